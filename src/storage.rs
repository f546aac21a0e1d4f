//! Local Storage Access
//!
//! Typed wrappers over `window.localStorage`. One key per cached blob;
//! everything except the session pair is serialized JSON.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{FlyerData, ManualStore, OptimizedItem};
use std::collections::BTreeMap;

pub const KEY_AUTH_TOKEN: &str = "authToken";
pub const KEY_USERNAME: &str = "username";
pub const KEY_SHOPPING_ORDER: &str = "shoppingList";
pub const KEY_OPTIMIZED_LIST: &str = "savedOptimizedList";
pub const KEY_FLYER_DATA: &str = "flyerData";
pub const KEY_MANUAL_STORES: &str = "manualStoresList";
pub const KEY_ACCORDION_STATES: &str = "optimiseurAccordionStates";

fn storage() -> Result<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| AppError::storage("localStorage absent"))
}

fn get_raw(key: &str) -> Option<String> {
    storage().ok().and_then(|s| s.get_item(key).ok().flatten())
}

fn set_raw(key: &str, value: &str) -> Result<()> {
    storage()?
        .set_item(key, value)
        .map_err(|_| AppError::storage(format!("écriture refusée pour {key}")))
}

fn remove(key: &str) {
    if let Ok(s) = storage() {
        let _ = s.remove_item(key);
    }
}

fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = get_raw(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            web_sys::console::warn_1(&format!("[STORE] JSON invalide sous {key}: {e}").into());
            None
        }
    }
}

fn save_json<T: Serialize>(key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value).map_err(AppError::decode)?;
    set_raw(key, &raw)
}

// --- Session ---

pub fn auth_token() -> Option<String> {
    get_raw(KEY_AUTH_TOKEN)
}

pub fn username() -> Option<String> {
    get_raw(KEY_USERNAME)
}

pub fn set_session(token: &str, username: &str) -> Result<()> {
    set_raw(KEY_AUTH_TOKEN, token)?;
    set_raw(KEY_USERNAME, username)
}

/// Drop the session and the caches that only make sense for that user
pub fn clear_session() {
    remove(KEY_AUTH_TOKEN);
    remove(KEY_USERNAME);
    remove(KEY_SHOPPING_ORDER);
    remove(KEY_OPTIMIZED_LIST);
}

// --- Cached blobs ---

/// Persisted display order of shopping-list ids
pub fn shopping_order() -> Vec<u32> {
    load_json(KEY_SHOPPING_ORDER).unwrap_or_default()
}

pub fn set_shopping_order(order: &[u32]) -> Result<()> {
    save_json(KEY_SHOPPING_ORDER, &order)
}

pub fn saved_optimized_list() -> Vec<OptimizedItem> {
    load_json(KEY_OPTIMIZED_LIST).unwrap_or_default()
}

pub fn set_saved_optimized_list(items: &[OptimizedItem]) -> Result<()> {
    save_json(KEY_OPTIMIZED_LIST, &items)
}

pub fn flyer_data() -> FlyerData {
    load_json(KEY_FLYER_DATA).unwrap_or_default()
}

pub fn set_flyer_data(data: &FlyerData) -> Result<()> {
    save_json(KEY_FLYER_DATA, data)
}

pub fn manual_stores() -> Vec<ManualStore> {
    load_json(KEY_MANUAL_STORES).unwrap_or_default()
}

pub fn set_manual_stores(stores: &[ManualStore]) -> Result<()> {
    save_json(KEY_MANUAL_STORES, &stores)
}

/// Open/closed state of the deal accordion, per store name
pub fn accordion_states() -> BTreeMap<String, bool> {
    load_json(KEY_ACCORDION_STATES).unwrap_or_default()
}

pub fn set_accordion_states(states: &BTreeMap<String, bool>) -> Result<()> {
    save_json(KEY_ACCORDION_STATES, states)
}
