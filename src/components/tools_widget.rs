//! Tools Widget
//!
//! Inventory export/import as JSON files and category management.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::api;
use crate::api::inventory::ImportItem;
use crate::components::ConfirmButton;
use crate::context::AppContext;
use crate::error::{AppError, Result};
use crate::models::{ImportReport, InventoryItem};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ToolsWidget() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (status, set_status) = signal(String::new());
    let (new_category_name, set_new_category_name) = signal(String::new());

    let export_inventory = move |_| {
        let inventory = store.inventory().get();
        if inventory.is_empty() {
            set_status.set("Votre inventaire utilisateur est vide.".to_string());
            return;
        }
        match download_inventory(&inventory) {
            Ok(()) => set_status.set(String::new()),
            Err(e) => set_status.set(format!("Erreur lors de l'exportation : {e}")),
        }
    };

    let import_file = move |ev: web_sys::Event| {
        let target = ev.target().unwrap();
        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap().clone();
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        spawn_local(async move {
            match JsFuture::from(file.text()).await {
                Ok(value) => {
                    let text = value.as_string().unwrap_or_default();
                    match import_inventory_json(&text).await {
                        Ok(report) => {
                            set_status.set(format!(
                                "{} - {} article(s) ajouté(s) - {} article(s) mis à jour",
                                report.message,
                                report.articles_ajoutes,
                                report.articles_mis_a_jour
                            ));
                            ctx.reload();
                        }
                        Err(e) => set_status.set(format!("Erreur lors de l'importation : {e}")),
                    }
                }
                Err(_) => set_status.set("Erreur lors de la lecture du fichier.".to_string()),
            }
            // Same file can be picked again
            input.set_value("");
        });
    };

    let add_category = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_category_name.get().trim().to_string();
        if name.is_empty() {
            return;
        }
        spawn_local(async move {
            match api::inventory::create_category(&name).await {
                Ok(category) => {
                    store.categories().write().push(category);
                    set_new_category_name.set(String::new());
                }
                Err(e) => set_status.set(format!("Erreur lors de la création : {e}")),
            }
        });
    };

    // Items of the deleted category come back uncategorized
    let delete_category = move |id: u32| {
        spawn_local(async move {
            match api::inventory::delete_category(id).await {
                Ok(()) => {
                    store.categories().write().retain(|category| category.id != id);
                    ctx.reload();
                }
                Err(e) => set_status.set(format!("Erreur lors de la suppression : {e}")),
            }
        });
    };

    view! {
        <div class="tools-widget">
            <Show when=move || !status.get().is_empty()>
                <p class="status-line">{move || status.get()}</p>
            </Show>

            <div class="tools-section">
                <h3>"Inventaire"</h3>
                <button id="export-inventory-btn" class="btn" on:click=export_inventory>
                    "Exporter l'inventaire"
                </button>
                <label class="btn btn-file">
                    "Importer un inventaire"
                    <input
                        type="file"
                        id="inventory-file-input"
                        accept=".json,application/json"
                        on:change=import_file
                    />
                </label>
            </div>

            <div class="tools-section">
                <h3>"Catégories"</h3>
                <form class="add-category-form" on:submit=add_category>
                    <input
                        type="text"
                        placeholder="Nom de la nouvelle catégorie"
                        prop:value=move || new_category_name.get()
                        on:input=move |ev| set_new_category_name.set(event_target_value(&ev))
                    />
                    <button type="submit" class="btn btn-small">"Ajouter"</button>
                </form>
                <ul class="category-list">
                    <For
                        each=move || store.categories().get()
                        key=|category| category.id
                        children=move |category| {
                            let id = category.id;
                            view! {
                                <li class="category-row">
                                    <span>{category.name}</span>
                                    <ConfirmButton
                                        button_class="btn-icon delete"
                                        on_confirm=Callback::new(move |_| delete_category(id))
                                    />
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
        </div>
    }
}

/// Serializes the inventory and triggers a `inventaire_utilisateur_<date>.json`
/// download
fn download_inventory(inventory: &[InventoryItem]) -> Result<()> {
    let json = serde_json::to_string_pretty(inventory).map_err(AppError::decode)?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::MissingElement("document".to_string()))?;

    let parts = js_sys::Array::new();
    parts.push(&json.into());
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|_| AppError::storage("création du blob impossible"))?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| AppError::storage("URL d'objet impossible"))?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| AppError::MissingElement("a".to_string()))?
        .dyn_into()
        .map_err(|_| AppError::MissingElement("a".to_string()))?;
    anchor.set_href(&url);

    let iso = String::from(js_sys::Date::new_0().to_iso_string());
    let date = iso.get(..10).unwrap_or(&iso).to_string();
    anchor.set_download(&format!("inventaire_utilisateur_{date}.json"));

    let body = document
        .body()
        .ok_or_else(|| AppError::MissingElement("body".to_string()))?;
    let _ = body.append_child(&anchor);
    anchor.click();
    let _ = body.remove_child(&anchor);
    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

/// Parses a pasted/loaded inventory file and posts it to the import
/// endpoint. Rows without a name are dropped.
async fn import_inventory_json(text: &str) -> Result<ImportReport> {
    let value: serde_json::Value = serde_json::from_str(text.trim())
        .map_err(|e| AppError::validation(format!("JSON invalide : {e}")))?;
    let Some(rows) = value.as_array() else {
        return Err(AppError::validation(
            "Le fichier JSON doit contenir un tableau (une liste) d'articles.",
        ));
    };

    api::inventory::import_inventory(&import_rows(rows)).await
}

/// Maps parsed file rows to import payloads. Rows without a name are
/// dropped; a missing quantity becomes "1".
fn import_rows(rows: &[serde_json::Value]) -> Vec<ImportItem<'_>> {
    rows.iter()
        .filter_map(|row| {
            let name = row.get("name")?.as_str()?;
            Some(ImportItem {
                name,
                quantity: row.get("quantity").and_then(|v| v.as_str()).unwrap_or("1"),
                category_name: row.get("category_name").and_then(|v| v.as_str()),
                alert_threshold: row
                    .get("alert_threshold")
                    .and_then(|v| v.as_u64())
                    .map(|v| v as u32),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_then_import_keeps_names_and_quantities() {
        let inventory = vec![
            InventoryItem {
                id: 4,
                name: "Riz".to_string(),
                quantity: "x2".to_string(),
                category: Some(1),
                category_name: Some("Garde-manger".to_string()),
                alert_threshold: Some(1),
                order: 0,
                include: true,
            },
            InventoryItem {
                id: 9,
                name: "Lait".to_string(),
                quantity: "1".to_string(),
                category: None,
                category_name: None,
                alert_threshold: None,
                order: 1,
                include: false,
            },
        ];
        let json = serde_json::to_string_pretty(&inventory).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rows = import_rows(value.as_array().unwrap());
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].name, rows[0].quantity), ("Riz", "x2"));
        assert_eq!(rows[0].category_name, Some("Garde-manger"));
        assert_eq!(rows[0].alert_threshold, Some(1));
        assert_eq!((rows[1].name, rows[1].quantity), ("Lait", "1"));
        assert_eq!(rows[1].category_name, None);
    }

    #[test]
    fn rows_without_a_name_are_dropped() {
        let value: serde_json::Value =
            serde_json::from_str(r#"[{"quantity": "2"}, {"name": "Sel"}]"#).unwrap();
        let rows = import_rows(value.as_array().unwrap());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Sel");
        assert_eq!(rows[0].quantity, "1");
    }
}
