//! Inventory Widget
//!
//! Category-grouped inventory with prompt checkboxes, quantity controls,
//! alert thresholds, inline rename, drag reordering, an add form and the
//! low-stock batch transfer to the shopping list.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_reorder as reorder;
use web_sys::DragEvent;

use crate::api;
use crate::api::inventory::{InventoryPatch, NewInventoryItem};
use crate::components::ConfirmButton;
use crate::context::AppContext;
use crate::quantity;
use crate::store::{
    self, store_remove_inventory_item, store_update_inventory_item, use_app_store,
    AppStateStoreFields,
};

#[component]
pub fn InventoryWidget() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let rs = reorder::create_reorder_signals();

    let (status, set_status) = signal(String::new());
    let (editing, set_editing) = signal(None::<u32>);
    let (edit_name, set_edit_name) = signal(String::new());

    let (new_name, set_new_name) = signal(String::new());
    let (new_quantity, set_new_quantity) = signal(String::new());
    let (new_category, set_new_category) = signal(None::<u32>);

    let add_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get().trim().to_string();
        if name.is_empty() {
            return;
        }
        let quantity = new_quantity.get().trim().to_string();
        let category = new_category.get();

        spawn_local(async move {
            let args = NewInventoryItem {
                name: &name,
                quantity: &quantity,
                category,
                alert_threshold: Some(2),
            };
            match api::inventory::create_inventory_item(&args).await {
                Ok(added) => {
                    store.inventory().write().push(added);
                    set_new_name.set(String::new());
                    set_new_quantity.set(String::new());
                    set_status.set(String::new());
                }
                Err(e) if e.to_string().contains("UNIQUE") => {
                    set_status.set("L'article existe déjà dans votre inventaire.".to_string());
                }
                Err(e) => set_status.set(format!("Erreur lors de l'ajout : {e}")),
            }
        });
    };

    let update_quantity = move |id: u32, value: String| {
        spawn_local(async move {
            let patch = InventoryPatch {
                quantity: Some(&value),
                ..Default::default()
            };
            match api::inventory::update_inventory_item(id, &patch).await {
                Ok(updated) => store_update_inventory_item(&store, updated),
                Err(e) => {
                    web_sys::console::warn_1(&format!("[INV] mise à jour refusée: {e}").into());
                }
            }
        });
    };

    // +1/-1 only applies to countable quantities; "beaucoup" stays put
    let nudge = move |id: u32, delta: i32| {
        let current = store
            .inventory()
            .get()
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.quantity.clone());
        if let Some(raw) = current {
            if let Some(next) = quantity::nudge_quantity(&raw, delta) {
                update_quantity(id, next);
            }
        }
    };

    let update_threshold = move |id: u32, value: String| {
        let threshold = match value.trim().parse::<u32>() {
            Ok(v) => v,
            Err(_) => return,
        };
        spawn_local(async move {
            let patch = InventoryPatch {
                alert_threshold: Some(Some(threshold)),
                ..Default::default()
            };
            match api::inventory::update_inventory_item(id, &patch).await {
                Ok(updated) => store_update_inventory_item(&store, updated),
                Err(e) => {
                    web_sys::console::warn_1(&format!("[INV] seuil refusé: {e}").into());
                }
            }
        });
    };

    let save_rename = move |id: u32| {
        let name = edit_name.get().trim().to_string();
        set_editing.set(None);
        let unchanged = store
            .inventory()
            .get()
            .iter()
            .any(|item| item.id == id && item.name == name);
        if name.is_empty() || unchanged {
            return;
        }
        spawn_local(async move {
            let patch = InventoryPatch {
                name: Some(&name),
                ..Default::default()
            };
            match api::inventory::update_inventory_item(id, &patch).await {
                Ok(updated) => store_update_inventory_item(&store, updated),
                Err(e) => {
                    web_sys::console::warn_1(&format!("[INV] renommage refusé: {e}").into());
                }
            }
        });
    };

    let delete_item = move |id: u32| {
        spawn_local(async move {
            match api::inventory::delete_inventory_item(id).await {
                Ok(()) => store_remove_inventory_item(&store, id),
                Err(e) => {
                    web_sys::console::warn_1(&format!("[INV] suppression refusée: {e}").into());
                }
            }
        });
    };

    let toggle_include = move |id: u32, checked: bool| {
        if let Some(item) = store.inventory().write().iter_mut().find(|item| item.id == id) {
            item.include = checked;
        }
    };

    let toggle_all = move |checked: bool| {
        for item in store.inventory().write().iter_mut() {
            item.include = checked;
        }
    };

    // Dropping on a row slots the dragged item in front of it, possibly
    // changing its category; the server rewrites the order fields
    let reorder_rows = move |dragged: u32, target: u32| {
        let inventory = store.inventory().get();
        let sections = store::group_inventory(&inventory);
        let section = sections
            .into_iter()
            .find(|(_, _, items)| items.iter().any(|item| item.id == target));
        if let Some((category_id, _, items)) = section {
            let mut ids: Vec<u32> = items
                .iter()
                .map(|item| item.id)
                .filter(|id| *id != dragged)
                .collect();
            if let Some(pos) = ids.iter().position(|id| *id == target) {
                ids.insert(pos, dragged);
                spawn_local(async move {
                    match api::inventory::reorder_inventory(category_id, &ids).await {
                        Ok(()) => ctx.reload(),
                        Err(e) => {
                            web_sys::console::warn_1(&format!("[INV] réordonnancement refusé: {e}").into());
                        }
                    }
                });
            }
        }
    };

    // Dropping on a section title appends to that category
    let drop_on_section = move |category_id: Option<u32>| {
        let dragged = match rs.dragging_read.get() {
            Some(id) => id,
            None => return,
        };
        reorder::end_drag(&rs);
        let inventory = store.inventory().get();
        let sections = store::group_inventory(&inventory);
        let mut ids: Vec<u32> = sections
            .into_iter()
            .find(|(id, _, _)| *id == category_id)
            .map(|(_, _, items)| items.iter().map(|item| item.id).collect())
            .unwrap_or_default();
        ids.retain(|id| *id != dragged);
        ids.push(dragged);
        spawn_local(async move {
            match api::inventory::reorder_inventory(category_id, &ids).await {
                Ok(()) => ctx.reload(),
                Err(e) => {
                    web_sys::console::warn_1(&format!("[INV] réordonnancement refusé: {e}").into());
                }
            }
        });
    };

    let add_low_stock = move |_| {
        let low = store::low_stock_items(&store.inventory().get());
        if low.is_empty() {
            set_status.set(
                "Aucun article n'est actuellement en pénurie selon vos seuils d'alerte."
                    .to_string(),
            );
            return;
        }
        let names: Vec<String> = low.into_iter().map(|item| item.name).collect();
        let (new_names, _skipped) = store::partition_new_names(&names, &store.shopping().get());
        if new_names.is_empty() {
            set_status.set(
                "Tous les articles en pénurie sont déjà dans votre liste d'épicerie.".to_string(),
            );
            return;
        }
        spawn_local(async move {
            let mut added = 0;
            for name in &new_names {
                if api::shopping::add_shopping_item(name, "1").await.is_ok() {
                    added += 1;
                }
            }
            set_status.set(format!(
                "{added} article(s) en pénurie ont été ajouté(s) à votre liste d'épicerie."
            ));
            ctx.reload();
        });
    };

    let sections_view = move || {
        let inventory = store.inventory().get();
        if inventory.is_empty() {
            return view! { <p class="placeholder-text">"Votre inventaire est vide."</p> }
                .into_any();
        }
        let currently_editing = editing.get();

        store::group_inventory(&inventory)
            .into_iter()
            .map(|(category_id, category_name, items)| {
                let rows = items
                    .into_iter()
                    .map(|item| {
                        let id = item.id;
                        let mut row_class = String::from("inventory-item");
                        if quantity::is_low_stock(&item.quantity, item.alert_threshold) {
                            row_class.push_str(" low-quantity-warning");
                        }
                        let threshold_value = item.alert_threshold.unwrap_or(2);

                        let name_view = if currently_editing == Some(id) {
                            view! {
                                <input
                                    type="text"
                                    class="edit-inventory-name"
                                    autofocus=true
                                    prop:value=move || edit_name.get()
                                    on:input=move |ev| set_edit_name.set(event_target_value(&ev))
                                    on:blur=move |_| save_rename(id)
                                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                                        match ev.key().as_str() {
                                            "Enter" => save_rename(id),
                                            "Escape" => set_editing.set(None),
                                            _ => {}
                                        }
                                    }
                                />
                            }
                            .into_any()
                        } else {
                            let name = item.name.clone();
                            let name_for_edit = item.name.clone();
                            view! {
                                <span
                                    class="inventory-item-name"
                                    title="Cliquer pour renommer"
                                    on:click=move |_| {
                                        set_edit_name.set(name_for_edit.clone());
                                        set_editing.set(Some(id));
                                    }
                                >
                                    {name}
                                </span>
                            }
                            .into_any()
                        };

                        view! {
                            <li
                                class=move || {
                                    if rs.over_read.get() == Some(id) {
                                        format!("{row_class} drag-over")
                                    } else {
                                        row_class.clone()
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
                                        class="include-item"
                                        checked=item.include
                                        on:change=move |ev| {
                                            toggle_include(id, event_target_checked(&ev))
                                        }
                                    />
                                    {name_view}
                                </div>
                                <div class="item-controls">
                                    <button
                                        class="btn-icon btn-quantity-change"
                                        on:click=move |_| nudge(id, -1)
                                    >
                                        "−"
                                    </button>
                                    <input
                                        type="text"
                                        class="item-quantity-input"
                                        value=item.quantity.clone()
                                        on:change=move |ev| {
                                            update_quantity(id, event_target_value(&ev))
                                        }
                                    />
                                    <button
                                        class="btn-icon btn-quantity-change"
                                        on:click=move |_| nudge(id, 1)
                                    >
                                        "+"
                                    </button>
                                    <span class="item-threshold" title="Seuil d'alerte">
                                        "🔔"
                                        <input
                                            type="number"
                                            class="item-threshold-input"
                                            min="0"
                                            value=threshold_value
                                            on:change=move |ev| {
                                                update_threshold(id, event_target_value(&ev))
                                            }
                                        />
                                    </span>
                                    <ConfirmButton
                                        button_class="btn-icon delete"
                                        on_confirm=Callback::new(move |_| delete_item(id))
                                    />
                                </div>
                            </li>
                        }
                    })
                    .collect_view();

                view! {
                    <div class="inventory-section">
                        <h3
                            class="category-title"
                            on:dragover=move |ev: DragEvent| ev.prevent_default()
                            on:drop=move |ev: DragEvent| {
                                ev.prevent_default();
                                drop_on_section(category_id);
                            }
                        >
                            {category_name}
                        </h3>
                        <ul>{rows}</ul>
                    </div>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="inventory-widget">
            <div class="inventory-toolbar">
                <label class="toggle-all">
                    <input
                        type="checkbox"
                        prop:checked=move || store::all_included(&store.inventory().get())
                        on:change=move |ev| toggle_all(event_target_checked(&ev))
                    />
                    "Tout sélectionner"
                </label>
                <button id="low-stock-btn" class="btn btn-small" on:click=add_low_stock>
                    "Ajouter les articles en pénurie à la liste"
                </button>
            </div>

            <Show when=move || !status.get().is_empty()>
                <p class="status-line">{move || status.get()}</p>
            </Show>

            <div class="inventory-sections">{sections_view}</div>

            <form id="addItemForm" class="add-item-form" on:submit=add_item>
                <input
                    type="text"
                    id="itemName"
                    placeholder="Nom de l'article"
                    prop:value=move || new_name.get()
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    id="itemQuantity"
                    placeholder="Quantité"
                    prop:value=move || new_quantity.get()
                    on:input=move |ev| set_new_quantity.set(event_target_value(&ev))
                />
                <select
                    id="itemCategory"
                    on:change=move |ev| {
                        set_new_category.set(event_target_value(&ev).parse::<u32>().ok())
                    }
                >
                    <option value="">"Aucune catégorie"</option>
                    <For
                        each=move || store.categories().get()
                        key=|cat| cat.id
                        children=move |cat| {
                            view! { <option value=cat.id.to_string()>{cat.name}</option> }
                        }
                    />
                </select>
                <button type="submit" class="btn btn-primary">"Ajouter"</button>
            </form>
        </div>
    }
}
