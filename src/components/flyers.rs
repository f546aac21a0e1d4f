//! Flyer Components
//!
//! Flyer import (conversion prompt + JSON paste), the per-store flyer
//! viewer and the saved-flyer manager.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::stores_widget::{persist_flyers, persist_stores};
use crate::components::CopyButton;
use crate::context::AppContext;
use crate::models::FlyerItem;
use crate::prompts;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::stores;

#[component]
pub fn FlyerImportPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (selected_store, set_selected_store) = signal(String::new());
    let (prompt, set_prompt) = signal(String::new());
    let (json_input, set_json_input) = signal(String::new());
    let (status, set_status) = signal(String::new());
    let (manager_open, set_manager_open) = signal(false);

    let generate_prompt = move |_| {
        let name = selected_store.get();
        if name.is_empty() {
            set_status.set("Veuillez d'abord sélectionner un commerce.".to_string());
            return;
        }
        set_status.set(String::new());
        set_prompt.set(prompts::flyer_import_prompt(&name));
    };

    let import = move |_| {
        let text = json_input.get();
        if text.trim().is_empty() {
            set_status.set("Veuillez coller le contenu JSON de la circulaire.".to_string());
            return;
        }
        let value = match stores::parse_flyer_json(&text) {
            Ok(value) => value,
            Err(e) => {
                set_status.set(e.to_string());
                return;
            }
        };
        spawn_local(async move {
            match api::market::import_flyer(&value).await {
                Ok(message) => {
                    set_status.set(message);
                    set_json_input.set(String::new());
                    ctx.reload();
                }
                Err(e) => {
                    set_status
                        .set(format!("Une erreur est survenue lors de l'importation : {e}"));
                }
            }
        });
    };

    let store_options = move || {
        stores::sorted_stores(&store.stores().get())
            .into_iter()
            .map(|entry| {
                view! { <option value=entry.name.clone()>{entry.name.clone()}</option> }
            })
            .collect_view()
    };

    view! {
        <div class="flyer-import-panel">
            <div class="flyer-import-header">
                <h3>"Importer une circulaire"</h3>
                <button class="btn btn-small" on:click=move |_| set_manager_open.set(true)>
                    "Gérer les circulaires"
                </button>
            </div>

            <Show when=move || !status.get().is_empty()>
                <p class="status-line">{move || status.get()}</p>
            </Show>

            <div class="flyer-prompt-row">
                <select
                    id="flyerStoreSelect"
                    on:change=move |ev| set_selected_store.set(event_target_value(&ev))
                >
                    <option value="">"-- Choisissez un commerce --"</option>
                    {store_options}
                </select>
                <button class="btn btn-small" on:click=generate_prompt>
                    "Générer le prompt d'importation"
                </button>
            </div>

            <Show when=move || !prompt.get().is_empty()>
                <div class="flyer-prompt-output">
                    <textarea readonly rows="6" prop:value=move || prompt.get()></textarea>
                    <CopyButton label="Copier le prompt" text=prompt/>
                </div>
            </Show>

            <textarea
                id="flyerJsonInput"
                rows="6"
                placeholder="Collez ici le JSON de la circulaire..."
                prop:value=move || json_input.get()
                on:input=move |ev| set_json_input.set(event_target_value(&ev))
            ></textarea>
            <button id="importFlyerBtn" class="btn btn-primary" on:click=import>
                "Importer la circulaire"
            </button>

            {move || {
                manager_open
                    .get()
                    .then(|| {
                        view! {
                            <FlyerManagerModal on_close=Callback::new(move |_| {
                                set_manager_open.set(false)
                            })/>
                        }
                    })
            }}
        </div>
    }
}

/// Read-only view of one store's cached flyer
#[component]
pub fn FlyerViewModal(store_name: String, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let store = use_app_store();
    let title = format!("Circulaire - {store_name}");
    let name_for_body = store_name.clone();

    let body = move || {
        let flyers = store.flyers().get();
        let content = flyers.get(&name_for_body).cloned().unwrap_or_default();
        if content.categories.iter().all(|c| c.items.is_empty()) {
            return view! { <p>"Cette circulaire ne contient aucun article."</p> }.into_any();
        }

        content
            .categories
            .into_iter()
            .map(|category| {
                view! {
                    <div class="flyer-category">
                        {category.category_name.map(|name| view! { <h4>{name}</h4> })}
                        {category
                            .items
                            .into_iter()
                            .map(|item| {
                                let price = flyer_price_label(&item);
                                let brand = item.brand.filter(|b| !b.is_empty());
                                view! {
                                    <div class="flyer-item">
                                        <span class="flyer-item-name">{item.name}</span>
                                        {brand
                                            .map(|b| {
                                                view! { <span class="flyer-item-brand">{b}</span> }
                                            })}
                                        <span class="flyer-item-price">{price}</span>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal-content" on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2>{title}</h2>
                    <button class="btn-close-modal" on:click=move |_| on_close.run(())>
                        "×"
                    </button>
                </div>
                <div class="modal-body flyer-view">{body}</div>
            </div>
        </div>
    }
}

/// Saved flyers with per-store removal. Deleting a flyer also removes the
/// store it belongs to.
#[component]
pub fn FlyerManagerModal(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let store = use_app_store();
    let (confirming, set_confirming) = signal(None::<String>);

    let delete_flyer_and_store = move |name: String| {
        let mut manual = store.stores().get_untracked();
        let mut flyers = store.flyers().get_untracked();
        stores::delete_store(&mut manual, &mut flyers, &name);
        *store.stores().write() = manual;
        *store.flyers().write() = flyers;
        store.selected_stores().write().retain(|n| n != &name);
        persist_stores(&store.stores().get_untracked());
        persist_flyers(&store.flyers().get_untracked());
        set_confirming.set(None);
    };

    let rows = move || {
        let flyers = store.flyers().get();
        if flyers.is_empty() {
            return view! { <p>"Aucune circulaire sauvegardée."</p> }.into_any();
        }
        let confirming_key = confirming.get();

        flyers
            .keys()
            .cloned()
            .collect::<Vec<_>>()
            .into_iter()
            .map(|name| {
                let label = if confirming_key.as_deref() == Some(name.as_str()) {
                    "Confirmer la suppression ?"
                } else {
                    "Supprimer"
                };
                let name_for_click = name.clone();
                view! {
                    <div class="flyer-manager-row">
                        <span class="flyer-store-name">{name.clone()}</span>
                        <button
                            class="btn btn-small btn-danger"
                            on:click=move |_| {
                                if confirming.get_untracked() == Some(name_for_click.clone()) {
                                    delete_flyer_and_store(name_for_click.clone());
                                } else {
                                    set_confirming.set(Some(name_for_click.clone()));
                                }
                            }
                        >
                            {label}
                        </button>
                    </div>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal-content" on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2>"Gérer les circulaires"</h2>
                    <button class="btn-close-modal" on:click=move |_| on_close.run(())>
                        "×"
                    </button>
                </div>
                <div class="modal-body">{rows}</div>
            </div>
        </div>
    }
}

fn flyer_price_label(item: &FlyerItem) -> String {
    match &item.price {
        Some(price) if !price.is_empty() => match &item.single_price {
            Some(single) if price.contains('/') && !single.is_empty() => {
                format!("{price} ({single})")
            }
            _ => price.clone(),
        },
        _ => "Prix non disponible".to_string(),
    }
}
