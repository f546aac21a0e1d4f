//! Shopping List Widget
//!
//! Checkable shopping list with drag reordering persisted to local
//! storage, a move-to-inventory shortcut and a paste-JSON import.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_reorder as reorder;

use crate::api;
use crate::api::inventory::NewInventoryItem;
use crate::context::AppContext;
use crate::storage;
use crate::store::{
    self, store_remove_shopping_item, store_update_shopping_item, use_app_store,
    AppStateStoreFields,
};

#[component]
pub fn ShoppingListWidget() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let rs = reorder::create_reorder_signals();

    let (status, set_status) = signal(String::new());
    let (new_name, set_new_name) = signal(String::new());
    let (new_quantity, set_new_quantity) = signal(String::new());
    let (import_text, set_import_text) = signal(String::new());

    let persist_order = move || {
        let ids: Vec<u32> = store
            .shopping()
            .get_untracked()
            .iter()
            .map(|item| item.id)
            .collect();
        if let Err(e) = storage::set_shopping_order(&ids) {
            web_sys::console::warn_1(&format!("[STORE] ordre non sauvegardé: {e}").into());
        }
    };

    let reorder_rows = move |dragged: u32, target: u32| {
        let moved =
            reorder::move_by_key(&mut *store.shopping().write(), dragged, target, |item| item.id);
        if moved {
            persist_order();
        }
    };

    let toggle_checked = move |id: u32, checked: bool| {
        spawn_local(async move {
            match api::shopping::set_shopping_checked(id, checked).await {
                Ok(updated) => store_update_shopping_item(&store, updated),
                Err(e) => {
                    web_sys::console::warn_1(&format!("[API] cochage refusé: {e}").into());
                }
            }
        });
    };

    let delete_item = move |id: u32| {
        spawn_local(async move {
            match api::shopping::delete_shopping_item(id).await {
                Ok(()) => {
                    store_remove_shopping_item(&store, id);
                    persist_order();
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("[API] suppression refusée: {e}").into());
                }
            }
        });
    };

    // The backend owns the category; the server error keys the message
    let move_to_inventory = move |id: u32| {
        let item = store
            .shopping()
            .get()
            .iter()
            .find(|item| item.id == id)
            .cloned();
        let Some(item) = item else {
            return;
        };
        spawn_local(async move {
            let args = NewInventoryItem {
                name: &item.name,
                quantity: &item.quantity,
                category: None,
                alert_threshold: None,
            };
            match api::inventory::create_inventory_item(&args).await {
                Ok(added) => match api::shopping::delete_shopping_item(id).await {
                    Ok(()) => {
                        store.inventory().write().push(added);
                        store_remove_shopping_item(&store, id);
                        persist_order();
                        set_status.set(String::new());
                    }
                    Err(_) => set_status.set(
                        "Une erreur est survenue lors du déplacement de l'article.".to_string(),
                    ),
                },
                Err(e) if e.to_string().contains("UNIQUE") => set_status.set(
                    "Erreur: Cet article existe déjà dans votre inventaire.".to_string(),
                ),
                Err(_) => set_status.set(
                    "Une erreur est survenue lors du déplacement de l'article.".to_string(),
                ),
            }
        });
    };

    let add_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get().trim().to_string();
        if name.is_empty() {
            return;
        }
        let quantity = new_quantity.get().trim().to_string();
        spawn_local(async move {
            match api::shopping::add_shopping_item(&name, &quantity).await {
                Ok(added) => {
                    store.shopping().write().push(added);
                    set_new_name.set(String::new());
                    set_new_quantity.set(String::new());
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("[API] ajout refusé: {e}").into());
                }
            }
        });
    };

    let import_items = move |_| {
        let text = import_text.get();
        if text.trim().is_empty() {
            set_status.set("Veuillez coller le texte JSON dans la zone prévue.".to_string());
            return;
        }
        match store::parse_shopping_import(&text) {
            Ok((valid, dropped)) => {
                if dropped > 0 {
                    set_status.set(
                        "Certains objets dans le JSON sont mal formatés. Chaque objet doit \
                         avoir des clés 'name' et 'quantity'."
                            .to_string(),
                    );
                }
                spawn_local(async move {
                    let mut added = 0;
                    for (name, quantity) in &valid {
                        if api::shopping::add_shopping_item(name, quantity).await.is_ok() {
                            added += 1;
                        }
                    }
                    set_status.set(format!("{added} article(s) importé(s) avec succès !"));
                    set_import_text.set(String::new());
                    ctx.reload();
                });
            }
            Err(e) => set_status.set(format!("Erreur lors de l'importation : {e}")),
        }
    };

    let rows_view = move || {
        let shopping = store.shopping().get();
        if shopping.is_empty() {
            return view! { <p class="placeholder-text">"Votre liste d'épicerie est vide."</p> }
                .into_any();
        }
        let rows = shopping
            .into_iter()
            .map(|item| {
                let id = item.id;
                let label = format!("{} (Qté: {})", item.name, item.quantity);
                let name_class = if item.is_checked {
                    "item-name checked"
                } else {
                    "item-name"
                };
                view! {
                    <li
                        class=move || {
                            if rs.over_read.get() == Some(id) {
                                "shopping-list-item drag-over"
                            } else {
                                "shopping-list-item"
                            }
                        }
                        draggable="true"
                        on:dragstart=reorder::make_on_dragstart(rs, id)
                        on:dragover=reorder::make_on_dragover(rs, id)
                        on:dragleave=reorder::make_on_dragleave(rs, id)
                        on:drop=reorder::make_on_drop(rs, id, reorder_rows)
                        on:dragend=reorder::make_on_dragend(rs)
                    >
                        <div class="item-details">
                            <input
                                type="checkbox"
                                checked=item.is_checked
                                on:change=move |ev| toggle_checked(id, event_target_checked(&ev))
                            />
                            <span class=name_class>{label}</span>
                        </div>
                        <div class="shopping-item-controls">
                            <button class="btn btn-move" on:click=move |_| move_to_inventory(id)>
                                "Ajouter à l'inventaire"
                            </button>
                            <button
                                class="btn btn-delete-shopping"
                                on:click=move |_| delete_item(id)
                            >
                                "Supprimer"
                            </button>
                        </div>
                    </li>
                }
            })
            .collect_view();
        view! { <ul>{rows}</ul> }.into_any()
    };

    view! {
        <div class="shopping-list-widget">
            <Show when=move || !status.get().is_empty()>
                <p class="status-line">{move || status.get()}</p>
            </Show>

            <div id="shopping-list-display">{rows_view}</div>

            <form class="add-item-form" on:submit=add_item>
                <input
                    type="text"
                    id="shoppingItemName"
                    placeholder="Nom de l'article"
                    prop:value=move || new_name.get()
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    id="shoppingItemQuantity"
                    placeholder="Quantité"
                    prop:value=move || new_quantity.get()
                    on:input=move |ev| set_new_quantity.set(event_target_value(&ev))
                />
                <button type="submit" class="btn btn-primary">"Ajouter"</button>
            </form>

            <div class="import-section">
                <textarea
                    id="importShoppingListTextarea"
                    placeholder="Collez ici la liste JSON produite par votre assistant IA"
                    prop:value=move || import_text.get()
                    on:input=move |ev| set_import_text.set(event_target_value(&ev))
                ></textarea>
                <button id="importShoppingListBtn" class="btn" on:click=import_items>
                    "Importer la liste"
                </button>
            </div>
        </div>
    }
}
