//! Header Bar Component
//!
//! Top navigation: page switching, guided tour trigger and session controls.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::{AppContext, Page};
use crate::storage;
use crate::tutorial::{assistant_tour, TutorialHandle};

#[component]
pub fn HeaderBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let tutorial = use_context::<TutorialHandle>().expect("TutorialHandle should be provided");

    let logout = move |_| {
        spawn_local(async move {
            // The token is dropped locally even if the server call fails
            let _ = api::auth::logout().await;
            storage::clear_session();
            ctx.signed_out();
        });
    };

    let nav_class = move |page: Page| {
        if ctx.page.get() == page {
            "nav-btn active"
        } else {
            "nav-btn"
        }
    };

    view! {
        <header class="header-bar">
            <div class="header-title">
                <span class="header-logo">"🛒"</span>
                <h1>"Assistant Épicerie"</h1>
            </div>

            <nav class="header-nav">
                <button
                    class=move || nav_class(Page::Assistant)
                    on:click=move |_| ctx.go_to(Page::Assistant)
                >
                    "Assistant"
                </button>
                <button
                    class=move || nav_class(Page::Optimiseur)
                    on:click=move |_| ctx.go_to(Page::Optimiseur)
                >
                    "Optimiseur"
                </button>
            </nav>

            <div class="header-session">
                <Show when=move || ctx.page.get() == Page::Assistant>
                    <button
                        class="btn-help"
                        title="Visite guidée"
                        on:click=move |_| tutorial.start(assistant_tour())
                    >
                        "?"
                    </button>
                </Show>
                {move || {
                    ctx.username.get().map(|name| view! {
                        <span class="header-username">{name}</span>
                    })
                }}
                <button class="btn-logout" on:click=logout>
                    "Déconnexion"
                </button>
            </div>
        </header>
    }
}
