//! Recipe Endpoints

use serde::Serialize;

use crate::error::Result;
use crate::models::Recipe;

#[derive(Serialize)]
pub struct RecipePayload<'a> {
    pub name: &'a str,
    pub ingredients: &'a str,
    pub instructions: &'a str,
    pub comments: &'a str,
}

pub async fn list_recipes() -> Result<Vec<Recipe>> {
    super::get_json("recipes").await
}

pub async fn create_recipe(payload: &RecipePayload<'_>) -> Result<Recipe> {
    super::send_json("POST", "recipes", payload).await
}

pub async fn update_recipe(id: u32, payload: &RecipePayload<'_>) -> Result<Recipe> {
    super::send_json("PUT", &format!("recipes/{id}"), payload).await
}

pub async fn delete_recipe(id: u32) -> Result<()> {
    super::send_no_content::<()>("DELETE", &format!("recipes/{id}"), None).await
}
