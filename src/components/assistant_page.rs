//! Assistant Page
//!
//! Inventory-side dashboard: loads the per-user data whenever a reload is
//! requested, then lays the widgets out on the grid.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{
    DashboardGrid, GenerateListWidget, GridLayout, GridWidget, InventoryWidget, LayoutToolbar,
    RecipePromptWidget, RecipesWidget, ShoppingListWidget, ToolsWidget,
};
use crate::context::AppContext;
use crate::layout::LayoutPage;
use crate::storage;
use crate::store::{self, use_app_store, AppStateStoreFields};

#[component]
pub fn AssistantPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let grid = GridLayout::new(LayoutPage::Assistant);
    grid.load();

    Effect::new(move |_| {
        ctx.reload_trigger.get();
        spawn_local(async move {
            match api::inventory::list_inventory().await {
                Ok(items) => *store.inventory().write() = items,
                Err(e) if e.is_auth_failure() => {
                    // Dead token: drop the session rather than show a
                    // permanently empty dashboard
                    storage::clear_session();
                    ctx.signed_out();
                    return;
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("[API] inventaire non chargé: {e}").into());
                }
            }
            match api::inventory::list_categories().await {
                Ok(categories) => *store.categories().write() = categories,
                Err(e) => {
                    web_sys::console::warn_1(&format!("[API] catégories non chargées: {e}").into());
                }
            }
            match api::shopping::list_shopping().await {
                Ok(items) => {
                    let order = storage::shopping_order();
                    *store.shopping().write() = store::apply_saved_order(items, &order);
                }
                Err(e) => {
                    web_sys::console::warn_1(
                        &format!("[API] liste d'épicerie non chargée: {e}").into(),
                    );
                }
            }
            match api::recipes::list_recipes().await {
                Ok(recipes) => *store.recipes().write() = recipes,
                Err(e) => {
                    web_sys::console::warn_1(&format!("[API] recettes non chargées: {e}").into());
                }
            }
        });
    });

    view! {
        <main class="page assistant-page">
            <LayoutToolbar grid=grid/>
            <DashboardGrid>
                <GridWidget grid=grid id="inventory-widget" title="Inventaire">
                    <InventoryWidget/>
                </GridWidget>
                <GridWidget grid=grid id="shopping-list-widget" title="Liste d'épicerie">
                    <ShoppingListWidget/>
                </GridWidget>
                <GridWidget grid=grid id="tools-widget" title="Outils">
                    <ToolsWidget/>
                </GridWidget>
                <GridWidget grid=grid id="recipe-book-widget" title="Livre de recettes">
                    <RecipesWidget/>
                </GridWidget>
                <GridWidget grid=grid id="generate-list-widget" title="Générer une liste d'épicerie">
                    <GenerateListWidget/>
                </GridWidget>
                <GridWidget grid=grid id="recipe-generator-widget" title="Générateur de recettes">
                    <RecipePromptWidget/>
                </GridWidget>
            </DashboardGrid>
        </main>
    }
}
