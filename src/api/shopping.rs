//! Shopping List Endpoints

use serde::Serialize;

use crate::error::Result;
use crate::models::ShoppingItem;

#[derive(Serialize)]
pub struct NewShoppingItem<'a> {
    pub name: &'a str,
    pub quantity: &'a str,
}

#[derive(Serialize)]
struct CheckArgs {
    is_checked: bool,
}

pub async fn list_shopping() -> Result<Vec<ShoppingItem>> {
    super::get_json("shopping-list").await
}

pub async fn add_shopping_item(name: &str, quantity: &str) -> Result<ShoppingItem> {
    super::send_json("POST", "shopping-list", &NewShoppingItem { name, quantity }).await
}

pub async fn set_shopping_checked(id: u32, is_checked: bool) -> Result<ShoppingItem> {
    super::send_json("PUT", &format!("shopping-list/{id}"), &CheckArgs { is_checked }).await
}

pub async fn delete_shopping_item(id: u32) -> Result<()> {
    super::send_no_content::<()>("DELETE", &format!("shopping-list/{id}"), None).await
}
