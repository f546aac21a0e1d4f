//! Shopping Route Widget
//!
//! Ordered list of the stores holding the selected deals.

use leptos::prelude::*;

use crate::deals;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn RouteWidget() -> impl IntoView {
    let store = use_app_store();

    let body = move || {
        let items = store.optimized().get();
        if items.is_empty() {
            return view! {
                <p class="placeholder-text">"Veuillez d'abord optimiser votre liste."</p>
            }
            .into_any();
        }
        let stops = deals::stores_to_visit(&items);
        if stops.is_empty() {
            return view! {
                <p class="placeholder-text">
                    "Aucune offre sélectionnée. Choisissez des rabais pour construire votre itinéraire."
                </p>
            }
            .into_any();
        }
        view! {
            <div class="route-list">
                <h3>"Magasins à visiter :"</h3>
                <ol>{stops.into_iter().map(|name| view! { <li>{name}</li> }).collect_view()}</ol>
            </div>
        }
        .into_any()
    };

    view! { <div class="route-widget">{body}</div> }
}
