//! Login Page Component
//!
//! Login/register forms shown while no session token is stored.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::AppContext;
use crate::storage;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (registering, set_registering) = signal(false);
    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(String::new());
        let name = username.get();
        let mail = email.get();
        let pass = password.get();
        if name.is_empty() || pass.is_empty() {
            set_error.set("Veuillez remplir tous les champs.".to_string());
            return;
        }
        let register = registering.get();

        spawn_local(async move {
            let answer = if register {
                api::auth::register(&name, &mail, &pass).await
            } else {
                api::auth::login(&name, &pass).await
            };
            match answer {
                Ok(session) => {
                    if storage::set_session(&session.token, &session.username).is_err() {
                        set_error.set("Impossible de sauvegarder la session.".to_string());
                        return;
                    }
                    ctx.signed_in(session.username);
                }
                Err(e) => set_error.set(e.to_string()),
            }
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"🛒 Assistant Épicerie"</h1>
                <h2>{move || if registering.get() { "Créer un compte" } else { "Connexion" }}</h2>

                <form class="login-form" on:submit=submit>
                    <input
                        type="text"
                        placeholder="Nom d'utilisateur"
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />
                    <Show when=move || registering.get()>
                        <input
                            type="email"
                            placeholder="Courriel"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </Show>
                    <input
                        type="password"
                        placeholder="Mot de passe"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                    <button type="submit" class="btn btn-primary">
                        {move || if registering.get() { "S'inscrire" } else { "Se connecter" }}
                    </button>
                </form>

                <Show when=move || !error.get().is_empty()>
                    <p class="auth-error">{move || error.get()}</p>
                </Show>

                <button
                    type="button"
                    class="btn-link"
                    on:click=move |_| {
                        set_error.set(String::new());
                        set_registering.update(|r| *r = !*r);
                    }
                >
                    {move || {
                        if registering.get() {
                            "Déjà un compte ? Se connecter"
                        } else {
                            "Pas de compte ? S'inscrire"
                        }
                    }}
                </button>
            </div>
        </div>
    }
}
