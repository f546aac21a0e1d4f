//! Frontend Models
//!
//! Data structures matching backend entities and the localStorage blobs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_true() -> bool {
    true
}

/// Inventory item (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: u32,
    pub name: String,
    /// Free-form quantity string ("x3", "2", "beaucoup")
    pub quantity: String,
    #[serde(default)]
    pub category: Option<u32>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub alert_threshold: Option<u32>,
    #[serde(default)]
    pub order: i32,
    /// Client-side only: selected for prompt generation
    #[serde(default = "default_true", skip_serializing)]
    pub include: bool,
}

/// Inventory category (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

/// Shopping list entry (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: u32,
    pub name: String,
    pub quantity: String,
    #[serde(default)]
    pub is_checked: bool,
}

/// Recipe (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub comments: String,
}

/// Login/register answer
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
}

/// Inventory import report
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImportReport {
    pub message: String,
    pub articles_ajoutes: u32,
    pub articles_mis_a_jour: u32,
}

/// Store known to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commerce {
    pub id: u32,
    pub nom: String,
    #[serde(default)]
    pub adresse: Option<String>,
    #[serde(default)]
    pub site_web: Option<String>,
}

/// Store added by hand on the optimizer page (localStorage only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualStore {
    pub name: String,
    pub website: String,
    #[serde(default)]
    pub address: String,
}

/// Active discount from `rabais-actifs` / `community-prices`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveDeal {
    pub price_id: u32,
    pub produit_nom: String,
    pub commerce_nom: String,
    #[serde(default)]
    pub categorie_nom: Option<String>,
    pub details_prix: String,
    pub prix: String,
    #[serde(default)]
    pub submitted_by_username: Option<String>,
}

/// One flyer line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlyerItem {
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub single_price: Option<String>,
}

/// Flyer section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlyerCategory {
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub items: Vec<FlyerItem>,
}

/// One store's flyer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlyerContent {
    #[serde(default)]
    pub categories: Vec<FlyerCategory>,
}

/// Store name → flyer, as cached locally and as served by
/// `circulaires-actives`
pub type FlyerData = BTreeMap<String, FlyerContent>;

/// Candidate deal attached to an optimized item. `price` arrives as a
/// number for community prices and as flyer text ("2 / 5.00$ (2.50)") for
/// discounts, so it is kept as its string form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedDeal {
    /// "rabais" (flyer) or "communautaire" (user-submitted)
    #[serde(rename = "type")]
    pub deal_type: String,
    pub name: String,
    #[serde(default)]
    pub price_id: Option<u32>,
    pub store: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub price: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub submitted_by_username: Option<String>,
    #[serde(default)]
    pub date_debut: Option<String>,
    #[serde(default)]
    pub date_fin: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }
    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => Some(s),
        Some(Raw::Number(n)) => Some(n.to_string()),
        None => None,
    })
}

/// Shopping-list line after optimization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedItem {
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub deals: Vec<OptimizedDeal>,
    /// Index into `deals`; client-side selection state
    #[serde(default)]
    pub selected_deal: Option<usize>,
    /// Effective price used for the total; manual input overrides
    #[serde(default)]
    pub selected_price: String,
}

/// Product from the global catalog (`products/search`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub nom: String,
    #[serde(default)]
    pub marque: Option<String>,
}

/// One dashboard widget's grid geometry. Older saved layouts carry the id
/// under "gs-id".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetGeometry {
    #[serde(alias = "gs-id")]
    pub id: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}
