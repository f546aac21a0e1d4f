//! Inventory Endpoints
//!
//! Items, categories, per-category reordering, bulk import.

use serde::Serialize;

use crate::error::Result;
use crate::models::{Category, ImportReport, InventoryItem};

#[derive(Serialize)]
pub struct NewInventoryItem<'a> {
    pub name: &'a str,
    pub quantity: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_threshold: Option<u32>,
}

/// Partial update; only the set fields travel
#[derive(Serialize, Default)]
pub struct InventoryPatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_threshold: Option<Option<u32>>,
}

#[derive(Serialize)]
struct NameArgs<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct ReorderArgs<'a> {
    category_id: Option<u32>,
    ordered_ids: &'a [u32],
}

/// Import line; export produces the same shape so a dump re-imports as-is
#[derive(Serialize)]
pub struct ImportItem<'a> {
    pub name: &'a str,
    pub quantity: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_threshold: Option<u32>,
}

pub async fn list_inventory() -> Result<Vec<InventoryItem>> {
    super::get_json("inventory").await
}

pub async fn create_inventory_item(args: &NewInventoryItem<'_>) -> Result<InventoryItem> {
    super::send_json("POST", "inventory", args).await
}

pub async fn update_inventory_item(id: u32, patch: &InventoryPatch<'_>) -> Result<InventoryItem> {
    super::send_json("PUT", &format!("inventory/{id}"), patch).await
}

pub async fn delete_inventory_item(id: u32) -> Result<()> {
    super::send_no_content::<()>("DELETE", &format!("inventory/{id}"), None).await
}

pub async fn list_categories() -> Result<Vec<Category>> {
    super::get_json("inventory/categories").await
}

pub async fn create_category(name: &str) -> Result<Category> {
    super::send_json("POST", "inventory/categories", &NameArgs { name }).await
}

pub async fn delete_category(id: u32) -> Result<()> {
    super::send_no_content::<()>("DELETE", &format!("inventory/categories/{id}"), None).await
}

/// Full ordered id sequence for one category; the caller re-fetches after
pub async fn reorder_inventory(category_id: Option<u32>, ordered_ids: &[u32]) -> Result<()> {
    super::send_no_content(
        "POST",
        "inventory/reorder",
        Some(&ReorderArgs {
            category_id,
            ordered_ids,
        }),
    )
    .await
}

pub async fn import_inventory(items: &[ImportItem<'_>]) -> Result<ImportReport> {
    super::send_json("POST", "inventory/import", items).await
}
