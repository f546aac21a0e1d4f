//! Store Selection Widget
//!
//! Merged backend/manual store list with participation checkboxes, store
//! add-by-address, the edit modal and flyer shortcuts.

use leptos::prelude::*;

use crate::components::FlyerViewModal;
use crate::models::{FlyerData, ManualStore};
use crate::storage;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::stores;

#[component]
pub fn StoresWidget() -> impl IntoView {
    let store = use_app_store();

    let (status, set_status) = signal(String::new());
    let (url_input, set_url_input) = signal(String::new());
    let (editing_store, set_editing_store) = signal(None::<String>);
    let (viewing_flyer, set_viewing_flyer) = signal(None::<String>);

    let toggle_store = move |name: String, checked: bool| {
        if checked {
            let selected_field = store.selected_stores();
            let mut selected = selected_field.write();
            if !selected.iter().any(|n| n == &name) {
                selected.push(name);
            }
        } else {
            store.selected_stores().write().retain(|n| n != &name);
        }
    };

    let add_store = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let url = url_input.get();
        if url.trim().is_empty() {
            return;
        }
        let mut manual = store.stores().get_untracked();
        match stores::add_store_from_url(&mut manual, &url) {
            Ok(()) => {
                if let Some(added) = manual.last().cloned() {
                    store.selected_stores().write().push(added.name);
                }
                *store.stores().write() = manual;
                persist_stores(&store.stores().get_untracked());
                set_url_input.set(String::new());
                set_status.set(String::new());
            }
            Err(e) => set_status.set(e.to_string()),
        }
    };

    let delete_store_entry = move |name: String| {
        let mut manual = store.stores().get_untracked();
        let mut flyers = store.flyers().get_untracked();
        stores::delete_store(&mut manual, &mut flyers, &name);
        *store.stores().write() = manual;
        *store.flyers().write() = flyers;
        store.selected_stores().write().retain(|n| n != &name);
        persist_stores(&store.stores().get_untracked());
        persist_flyers(&store.flyers().get_untracked());
    };

    let rows_view = move || {
        let manual = store.stores().get();
        let selected = store.selected_stores().get();
        let flyers = store.flyers().get();
        if manual.is_empty() {
            return view! {
                <p class="placeholder-text">
                    "La liste des commerces apparaîtra ici. Ajoutez des commerces manuellement \
                     ou importez une circulaire."
                </p>
            }
            .into_any();
        }

        stores::sorted_stores(&manual)
            .into_iter()
            .map(|entry| {
                let name = entry.name.clone();
                let is_selected = selected.iter().any(|n| n == &name);
                let flyer_key = stores::flyer_key_for(&flyers, &name);
                let address = (!entry.address.trim().is_empty()
                    && entry.address != "Adresse non fournie")
                    .then(|| entry.address.clone());
                let website = (!entry.website.is_empty() && entry.website != "#")
                    .then(|| entry.website.clone());

                let name_for_toggle = name.clone();
                let name_for_edit = name.clone();
                let name_for_delete = name.clone();

                view! {
                    <div class="store-item">
                        <label class="store-row">
                            <input
                                type="checkbox"
                                class="store-checkbox"
                                checked=is_selected
                                on:change=move |ev| {
                                    toggle_store(name_for_toggle.clone(), event_target_checked(&ev))
                                }
                            />
                            <div class="store-info">
                                <div class="store-name">{name.clone()}</div>
                                {address.map(|a| view! { <div class="store-address">{a}</div> })}
                                <div class="store-details">
                                    {match website {
                                        Some(site) => view! {
                                            <a href=site target="_blank">"Visiter le site web"</a>
                                        }
                                            .into_any(),
                                        None => view! { <span>"(Ajouté manuellement)"</span> }
                                            .into_any(),
                                    }}
                                </div>
                            </div>
                        </label>
                        <div class="store-actions">
                            <button
                                class="btn btn-small btn-edit-manual"
                                on:click=move |_| set_editing_store.set(Some(name_for_edit.clone()))
                            >
                                "Éditer"
                            </button>
                            <button
                                class="btn btn-small btn-delete-manual"
                                on:click=move |_| delete_store_entry(name_for_delete.clone())
                            >
                                "X"
                            </button>
                            {flyer_key
                                .map(|key| {
                                    view! {
                                        <button
                                            class="btn btn-primary btn-view-flyer"
                                            on:click=move |_| {
                                                set_viewing_flyer.set(Some(key.clone()))
                                            }
                                        >
                                            "Voir la circulaire"
                                        </button>
                                    }
                                })}
                        </div>
                    </div>
                }
            })
            .collect_view()
            .into_any()
    };

    let edit_modal = move || {
        editing_store
            .get()
            .and_then(|name| {
                store
                    .stores()
                    .get()
                    .iter()
                    .find(|entry| entry.name == name)
                    .cloned()
            })
            .map(|entry| {
                view! {
                    <StoreEditModal
                        store_entry=entry
                        on_close=Callback::new(move |_| set_editing_store.set(None))
                    />
                }
            })
    };

    let flyer_modal = move || {
        viewing_flyer.get().map(|key| {
            view! {
                <FlyerViewModal
                    store_name=key
                    on_close=Callback::new(move |_| set_viewing_flyer.set(None))
                />
            }
        })
    };

    view! {
        <div class="stores-widget">
            <Show when=move || !status.get().is_empty()>
                <p class="status-line">{move || status.get()}</p>
            </Show>

            <div id="stores-list-display">{rows_view}</div>

            <form class="add-store-form" on:submit=add_store>
                <input
                    type="text"
                    id="manualStoreUrl"
                    placeholder="https://www.moncommerce.com"
                    prop:value=move || url_input.get()
                    on:input=move |ev| set_url_input.set(event_target_value(&ev))
                />
                <button type="submit" class="btn btn-small">"Ajouter un commerce"</button>
            </form>

            {edit_modal}
            {flyer_modal}
        </div>
    }
}

#[component]
fn StoreEditModal(store_entry: ManualStore, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let store = use_app_store();

    let original_name = store_entry.name.clone();
    let initial_website = if store_entry.website == "#" {
        String::new()
    } else {
        store_entry.website.clone()
    };
    let (name, set_name) = signal(store_entry.name.clone());
    let (address, set_address) = signal(store_entry.address.clone());
    let (website, set_website) = signal(initial_website);
    let (status, set_status) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut manual = store.stores().get_untracked();
        let mut flyers = store.flyers().get_untracked();
        let result = stores::edit_store(
            &mut manual,
            &mut flyers,
            &original_name,
            &name.get(),
            &address.get(),
            &website.get(),
        );
        match result {
            Ok(()) => {
                let new_name = name.get().trim().to_string();
                if new_name != original_name {
                    let selected_field = store.selected_stores();
                    let mut selected = selected_field.write();
                    for entry in selected.iter_mut() {
                        if *entry == original_name {
                            *entry = new_name.clone();
                        }
                    }
                }
                *store.stores().write() = manual;
                *store.flyers().write() = flyers;
                persist_stores(&store.stores().get_untracked());
                persist_flyers(&store.flyers().get_untracked());
                on_close.run(());
            }
            Err(e) => set_status.set(e.to_string()),
        }
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal-content" on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2>"Éditer le commerce"</h2>
                    <button class="btn-close-modal" on:click=move |_| on_close.run(())>
                        "×"
                    </button>
                </div>
                <form class="modal-body" on:submit=submit>
                    <Show when=move || !status.get().is_empty()>
                        <p class="status-line">{move || status.get()}</p>
                    </Show>

                    <label for="editStoreName">"Nom"</label>
                    <input
                        type="text"
                        id="editStoreName"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                    <label for="editStoreAddress">"Adresse"</label>
                    <input
                        type="text"
                        id="editStoreAddress"
                        prop:value=move || address.get()
                        on:input=move |ev| set_address.set(event_target_value(&ev))
                    />
                    <label for="editStoreWebsite">"Site web"</label>
                    <input
                        type="text"
                        id="editStoreWebsite"
                        prop:value=move || website.get()
                        on:input=move |ev| set_website.set(event_target_value(&ev))
                    />

                    <button type="submit" class="btn btn-primary">"Sauvegarder"</button>
                </form>
            </div>
        </div>
    }
}

pub(crate) fn persist_stores(manual: &[ManualStore]) {
    if let Err(e) = storage::set_manual_stores(manual) {
        web_sys::console::warn_1(&format!("[STORE] commerces non sauvegardés: {e}").into());
    }
}

pub(crate) fn persist_flyers(flyers: &FlyerData) {
    if let Err(e) = storage::set_flyer_data(flyers) {
        web_sys::console::warn_1(&format!("[STORE] circulaires non sauvegardées: {e}").into());
    }
}
