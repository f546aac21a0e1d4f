//! UI Components
//!
//! Leptos components: the two dashboard pages, the grid plumbing and the
//! widgets themselves.

mod assistant_page;
mod confirm_button;
mod copy_button;
mod dashboard;
mod deals_widget;
mod flyers;
mod generate_list_widget;
mod header_bar;
mod inventory_widget;
mod login_page;
mod optimiseur_page;
mod optimization_widget;
mod price_modals;
mod recipe_prompt_widget;
mod recipes_widget;
mod route_widget;
mod shopping_widget;
mod stores_widget;
mod tools_widget;
mod tutorial_layer;

pub use assistant_page::AssistantPage;
pub use confirm_button::ConfirmButton;
pub use copy_button::CopyButton;
pub use dashboard::{DashboardGrid, GridLayout, GridWidget, LayoutToolbar};
pub use deals_widget::DealsWidget;
pub use flyers::{FlyerImportPanel, FlyerManagerModal, FlyerViewModal};
pub use generate_list_widget::GenerateListWidget;
pub use header_bar::HeaderBar;
pub use inventory_widget::InventoryWidget;
pub use login_page::LoginPage;
pub use optimiseur_page::OptimiseurPage;
pub use optimization_widget::OptimizationWidget;
pub use price_modals::{DealDetailModal, ReportPriceModal, SubmitDealModal, SubmitPriceModal};
pub use recipe_prompt_widget::RecipePromptWidget;
pub use recipes_widget::RecipesWidget;
pub use route_widget::RouteWidget;
pub use shopping_widget::ShoppingListWidget;
pub use stores_widget::StoresWidget;
pub use tools_widget::ToolsWidget;
pub use tutorial_layer::TutorialLayer;
