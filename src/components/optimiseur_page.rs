//! Optimiseur Page
//!
//! Deal-hunting dashboard. Local caches (stores, flyers, last optimized
//! list, accordion state) come up immediately; the server then refreshes
//! commerces, flyers and active deals.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::stores_widget::{persist_flyers, persist_stores};
use crate::components::{
    DashboardGrid, DealsWidget, GridLayout, GridWidget, LayoutToolbar, OptimizationWidget,
    RouteWidget, StoresWidget,
};
use crate::context::AppContext;
use crate::layout::LayoutPage;
use crate::storage;
use crate::store::{use_app_store, AppStateStoreFields};
use crate::stores;

#[component]
pub fn OptimiseurPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let grid = GridLayout::new(LayoutPage::Optimiseur);
    grid.load();

    // Cached state first, so the page is usable offline
    let saved_stores = storage::manual_stores();
    let names: Vec<String> = saved_stores.iter().map(|s| s.name.clone()).collect();
    *store.stores().write() = saved_stores;
    *store.selected_stores().write() = names;
    *store.flyers().write() = storage::flyer_data();
    *store.optimized().write() = storage::saved_optimized_list();
    *store.accordion_open().write() = storage::accordion_states();

    Effect::new(move |_| {
        ctx.reload_trigger.get();
        spawn_local(async move {
            match api::market::list_commerces().await {
                Ok(commerces) => {
                    *store.commerces().write() = commerces.clone();
                    let mut manual = store.stores().get_untracked();
                    stores::merge_commerces(&mut manual, &commerces);
                    persist_stores(&manual);
                    let names: Vec<String> = manual.iter().map(|s| s.name.clone()).collect();
                    *store.stores().write() = manual;
                    // Everything checked by default; unchecking is the
                    // exception
                    *store.selected_stores().write() = names;
                }
                Err(e) if e.is_auth_failure() => {
                    storage::clear_session();
                    ctx.signed_out();
                    return;
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("[API] commerces non chargés: {e}").into());
                }
            }
            match api::market::active_flyers().await {
                Ok(flyers) if !flyers.is_empty() => {
                    // Server flyers replace the local cache
                    persist_flyers(&flyers);
                    *store.flyers().write() = flyers;
                }
                Ok(_) => {}
                Err(e) => {
                    web_sys::console::warn_1(
                        &format!("[API] circulaires non chargées: {e}").into(),
                    );
                }
            }
            let mut deals = Vec::new();
            match api::market::active_deals().await {
                Ok(active) => deals = active,
                Err(e) => {
                    web_sys::console::warn_1(&format!("[API] rabais non chargés: {e}").into());
                }
            }
            match api::market::community_prices().await {
                Ok(community) => deals.extend(community),
                Err(e) => {
                    web_sys::console::warn_1(
                        &format!("[API] prix communautaires non chargés: {e}").into(),
                    );
                }
            }
            *store.active_deals().write() = deals;
        });
    });

    view! {
        <main class="page optimiseur-page">
            <LayoutToolbar grid=grid/>
            <DashboardGrid>
                <GridWidget grid=grid id="flyer-deals-widget" title="Rabais de la semaine">
                    <DealsWidget/>
                </GridWidget>
                <GridWidget grid=grid id="store-selection-widget" title="Sélection des commerces">
                    <StoresWidget/>
                </GridWidget>
                <GridWidget grid=grid id="optimization-widget" title="Optimisation de la liste">
                    <OptimizationWidget/>
                </GridWidget>
                <GridWidget grid=grid id="route-widget" title="Itinéraire">
                    <RouteWidget/>
                </GridWidget>
            </DashboardGrid>
        </main>
    }
}
