//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use std::collections::BTreeMap;

use crate::models::{
    ActiveDeal, Category, Commerce, FlyerData, InventoryItem, ManualStore, OptimizedItem, Recipe,
    ShoppingItem,
};
use crate::quantity;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Inventory as last fetched from the server
    pub inventory: Vec<InventoryItem>,
    /// Inventory categories
    pub categories: Vec<Category>,
    /// Shopping list, already in saved display order
    pub shopping: Vec<ShoppingItem>,
    /// Recipe book
    pub recipes: Vec<Recipe>,
    /// Backend stores, for the submission modals
    pub commerces: Vec<Commerce>,
    /// Store list shown on the optimizer page (manual + merged commerces)
    pub stores: Vec<ManualStore>,
    /// Names of the stores checked for optimization
    pub selected_stores: Vec<String>,
    /// Cached flyers by store name
    pub flyers: FlyerData,
    /// Active deals feeding the accordion
    pub active_deals: Vec<ActiveDeal>,
    /// Result of the last optimization
    pub optimized: Vec<OptimizedItem>,
    /// Accordion open state by store name
    pub accordion_open: BTreeMap<String, bool>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Update an inventory item in the store by ID, keeping its prompt checkbox
pub fn store_update_inventory_item(store: &AppStore, updated: InventoryItem) {
    store
        .inventory()
        .write()
        .iter_mut()
        .find(|item| item.id == updated.id)
        .map(|item| {
            let include = item.include;
            *item = updated;
            item.include = include;
        });
}

/// Remove an inventory item from the store by ID
pub fn store_remove_inventory_item(store: &AppStore, item_id: u32) {
    store.inventory().write().retain(|item| item.id != item_id);
}

/// Update a shopping item in the store by ID
pub fn store_update_shopping_item(store: &AppStore, updated: ShoppingItem) {
    store
        .shopping()
        .write()
        .iter_mut()
        .find(|item| item.id == updated.id)
        .map(|item| *item = updated);
}

/// Remove a shopping item from the store by ID
pub fn store_remove_shopping_item(store: &AppStore, item_id: u32) {
    store.shopping().write().retain(|item| item.id != item_id);
}

/// Update a recipe in the store by ID
pub fn store_update_recipe(store: &AppStore, updated: Recipe) {
    store
        .recipes()
        .write()
        .iter_mut()
        .find(|recipe| recipe.id == updated.id)
        .map(|recipe| *recipe = updated);
}

/// Remove a recipe from the store by ID
pub fn store_remove_recipe(store: &AppStore, recipe_id: u32) {
    store.recipes().write().retain(|recipe| recipe.id != recipe_id);
}

// ========================
// Pure list logic
// ========================

/// Server list reordered to the locally saved id order. Ids the server no
/// longer knows are dropped; new items keep their server order at the end.
pub fn apply_saved_order(items: Vec<ShoppingItem>, order: &[u32]) -> Vec<ShoppingItem> {
    let mut remaining = items;
    let mut ordered = Vec::with_capacity(remaining.len());
    for id in order {
        if let Some(pos) = remaining.iter().position(|item| item.id == *id) {
            ordered.push(remaining.remove(pos));
        }
    }
    ordered.extend(remaining);
    ordered
}

/// Inventory grouped for display: one section per category, sorted by
/// category name with uncategorized items last, rows in their saved order
pub fn group_inventory(
    inventory: &[InventoryItem],
) -> Vec<(Option<u32>, String, Vec<InventoryItem>)> {
    let mut sections: Vec<(Option<u32>, String, Vec<InventoryItem>)> = Vec::new();
    for item in inventory {
        match sections.iter_mut().find(|(id, _, _)| *id == item.category) {
            Some((_, _, items)) => items.push(item.clone()),
            None => {
                let name = item
                    .category_name
                    .clone()
                    .unwrap_or_else(|| "Sans catégorie".to_string());
                sections.push((item.category, name, vec![item.clone()]));
            }
        }
    }
    sections.sort_by(|a, b| match (a.0, b.0) {
        (None, None) => std::cmp::Ordering::Equal,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (Some(_), None) => std::cmp::Ordering::Less,
        (Some(_), Some(_)) => a.1.cmp(&b.1),
    });
    for (_, _, items) in &mut sections {
        items.sort_by_key(|item| item.order);
    }
    sections
}

/// Inventory rows under their alert threshold
pub fn low_stock_items(inventory: &[InventoryItem]) -> Vec<InventoryItem> {
    inventory
        .iter()
        .filter(|item| quantity::is_low_stock(&item.quantity, item.alert_threshold))
        .cloned()
        .collect()
}

/// Splits candidate names into (new, skipped): a candidate already on the
/// shopping list, or repeated in the batch, is skipped. Comparison ignores
/// case and whitespace.
pub fn partition_new_names(candidates: &[String], shopping: &[ShoppingItem]) -> (Vec<String>, usize) {
    let mut new_names: Vec<String> = Vec::new();
    let mut skipped = 0;
    for candidate in candidates {
        let key = candidate.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        let on_list = shopping.iter().any(|item| item.name.trim().to_lowercase() == key);
        let in_batch = new_names.iter().any(|name| name.trim().to_lowercase() == key);
        if on_list || in_batch {
            skipped += 1;
        } else {
            new_names.push(candidate.trim().to_string());
        }
    }
    (new_names, skipped)
}

/// Ingredient names from a recipe's ingredient block: one per line, the
/// parenthetical quantity stripped ("Farine (500g)" gives "Farine")
pub fn ingredient_names(ingredients: &str) -> Vec<String> {
    ingredients
        .lines()
        .map(|line| line.split('(').next().unwrap_or(line).trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Names the prompt builders feed on (checked inventory rows)
pub fn included_names(inventory: &[InventoryItem]) -> Vec<String> {
    inventory
        .iter()
        .filter(|item| item.include)
        .map(|item| item.name.clone())
        .collect()
}

/// Toggle-all checkbox state: every row checked, and at least one row
pub fn all_included(inventory: &[InventoryItem]) -> bool {
    !inventory.is_empty() && inventory.iter().all(|item| item.include)
}

/// Parses a pasted shopping-list JSON export. Returns the well-formed
/// entries as (name, quantity) and how many were dropped for having the
/// wrong shape.
pub fn parse_shopping_import(json: &str) -> crate::error::Result<(Vec<(String, String)>, usize)> {
    use crate::error::AppError;

    let value: serde_json::Value = serde_json::from_str(json.trim())
        .map_err(|e| AppError::validation(format!("JSON invalide : {e}")))?;
    let Some(entries) = value.as_array() else {
        return Err(AppError::validation("Le JSON doit être un tableau (Array)."));
    };

    let mut valid = Vec::new();
    let mut dropped = 0;
    for entry in entries {
        match (
            entry.get("name").and_then(|v| v.as_str()),
            entry.get("quantity").and_then(|v| v.as_str()),
        ) {
            (Some(name), Some(quantity)) => valid.push((name.to_string(), quantity.to_string())),
            _ => dropped += 1,
        }
    }
    Ok((valid, dropped))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_shopping(id: u32, name: &str) -> ShoppingItem {
        ShoppingItem {
            id,
            name: name.to_string(),
            quantity: "1".to_string(),
            is_checked: false,
        }
    }

    fn make_inventory(name: &str, quantity: &str, threshold: Option<u32>) -> InventoryItem {
        InventoryItem {
            id: 1,
            name: name.to_string(),
            quantity: quantity.to_string(),
            category: None,
            category_name: None,
            alert_threshold: threshold,
            order: 0,
            include: true,
        }
    }

    #[test]
    fn saved_order_wins_and_new_items_append() {
        let items = vec![
            make_shopping(1, "Lait"),
            make_shopping(2, "Pain"),
            make_shopping(3, "Oeufs"),
        ];
        let ordered = apply_saved_order(items, &[3, 9, 1]);
        let ids: Vec<u32> = ordered.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn inventory_groups_sort_by_name_with_uncategorized_last() {
        let mut lait = make_inventory("Lait", "1", None);
        lait.category = Some(2);
        lait.category_name = Some("Laitier".to_string());
        lait.order = 1;
        let mut yogourt = make_inventory("Yogourt", "1", None);
        yogourt.category = Some(2);
        yogourt.category_name = Some("Laitier".to_string());
        yogourt.order = 0;
        let mut pomme = make_inventory("Pomme", "1", None);
        pomme.category = Some(1);
        pomme.category_name = Some("Fruits".to_string());
        let sel = make_inventory("Sel", "1", None);

        let sections = group_inventory(&[lait, yogourt, pomme, sel]);
        let names: Vec<&str> = sections.iter().map(|(_, name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Fruits", "Laitier", "Sans catégorie"]);
        // rows follow their saved order inside a section
        assert_eq!(sections[1].2[0].name, "Yogourt");
        assert_eq!(sections[1].2[1].name, "Lait");
    }

    #[test]
    fn low_stock_needs_a_threshold_and_a_countable_quantity() {
        let inventory = vec![
            make_inventory("Lait", "x1", Some(2)),
            make_inventory("Pain", "3", Some(2)),
            make_inventory("Sel", "beaucoup", Some(2)),
            make_inventory("Riz", "0", None),
        ];
        let low: Vec<String> = low_stock_items(&inventory)
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(low, vec!["Lait"]);
    }

    #[test]
    fn batch_add_skips_items_already_on_the_list() {
        let shopping = vec![make_shopping(1, "Lait ")];
        let candidates = vec![
            "lait".to_string(),
            "Pain".to_string(),
            "PAIN".to_string(),
            "  ".to_string(),
        ];
        let (new_names, skipped) = partition_new_names(&candidates, &shopping);
        assert_eq!(new_names, vec!["Pain"]);
        assert_eq!(skipped, 2);
    }

    #[test]
    fn ingredient_lines_drop_quantities_and_blanks() {
        let names = ingredient_names("Farine (500g)\n\n  Oeufs (2)\nSel");
        assert_eq!(names, vec!["Farine", "Oeufs", "Sel"]);
    }

    #[test]
    fn toggle_all_reflects_every_row() {
        let mut inventory = vec![
            make_inventory("Lait", "1", None),
            make_inventory("Pain", "1", None),
        ];
        assert!(all_included(&inventory));
        inventory[1].include = false;
        assert!(!all_included(&inventory));
        assert!(!all_included(&[]));
        assert_eq!(included_names(&inventory), vec!["Lait"]);
    }

    #[test]
    fn shopping_import_keeps_well_formed_entries() {
        let (valid, dropped) = parse_shopping_import(
            r#"[{"name": "Oignons", "quantity": "2"}, {"name": "Ail"}, 4]"#,
        )
        .unwrap();
        assert_eq!(valid, vec![("Oignons".to_string(), "2".to_string())]);
        assert_eq!(dropped, 2);

        assert!(parse_shopping_import(r#"{"name": "Oignons"}"#).is_err());
    }
}
