//! Active Deals Widget
//!
//! Weekly deals accordion grouped by store then category, with
//! accent-insensitive search, community price confirmation, deal
//! submission and the flyer import panel.

use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::BTreeMap;

use crate::api;
use crate::components::{FlyerImportPanel, SubmitDealModal};
use crate::context::AppContext;
use crate::deals;
use crate::storage;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn DealsWidget() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (search, set_search) = signal(String::new());
    let (status, set_status) = signal(String::new());
    let (submit_open, set_submit_open) = signal(false);

    let toggle_section = move |name: String| {
        let mut states = store.accordion_open().get_untracked();
        let entry = states.entry(name).or_insert(false);
        *entry = !*entry;
        persist_accordion(&states);
        *store.accordion_open().write() = states;
    };

    let confirm = move |price_id: u32| {
        spawn_local(async move {
            match api::market::confirm_price(price_id).await {
                Ok(message) => {
                    set_status.set(message);
                    ctx.reload();
                }
                Err(e) => set_status.set(format!("Erreur lors de la confirmation : {e}")),
            }
        });
    };

    let accordion = move || {
        let all_deals = store.active_deals().get();
        let term = search.get();
        let filtered = if term.trim().is_empty() {
            all_deals
        } else {
            deals::filter_deals(&all_deals, &term)
        };
        if filtered.is_empty() {
            return view! { <p class="placeholder-text">"Aucun rabais actif trouvé."</p> }
                .into_any();
        }

        let open_states = store.accordion_open().get();
        // An ongoing search opens every section so matches are visible
        let force_open = term.trim().len() > 1;
        let current_user = ctx.username.get();

        deals::group_deals(&filtered)
            .into_iter()
            .map(|(store_name, categories)| {
                let count: usize = categories.iter().map(|(_, deals)| deals.len()).sum();
                let is_open =
                    force_open || open_states.get(&store_name).copied().unwrap_or(false);
                let name_for_toggle = store_name.clone();
                view! {
                    <details class="store-accordion" open=is_open>
                        <summary on:click=move |ev: web_sys::MouseEvent| {
                            ev.prevent_default();
                            toggle_section(name_for_toggle.clone());
                        }>
                            {store_name.clone()}
                            <span class="deal-count">{format!("{count} rabais")}</span>
                        </summary>
                        {categories
                            .into_iter()
                            .map(|(category, category_deals)| {
                                view! {
                                    <details class="category-accordion" open=true>
                                        <summary>{category}</summary>
                                        {category_deals
                                            .into_iter()
                                            .map(|deal| {
                                                let price = deals::price_label(&deal);
                                                let can = deals::can_confirm(
                                                    deal.submitted_by_username.as_deref(),
                                                    current_user.as_deref(),
                                                );
                                                let price_id = deal.price_id;
                                                view! {
                                                    <div class="rabais-item">
                                                        <span class="rabais-name">
                                                            {deal.produit_nom.clone()}
                                                        </span>
                                                        <span class="rabais-price">{price}</span>
                                                        {can
                                                            .then(|| {
                                                                view! {
                                                                    <button
                                                                        class="btn btn-small btn-confirm"
                                                                        on:click=move |_| confirm(price_id)
                                                                    >
                                                                        "Confirmer"
                                                                    </button>
                                                                }
                                                            })}
                                                    </div>
                                                }
                                            })
                                            .collect_view()}
                                    </details>
                                }
                            })
                            .collect_view()}
                    </details>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="deals-widget">
            <div class="deals-toolbar">
                <input
                    type="text"
                    id="dealsSearchInput"
                    placeholder="Rechercher un rabais..."
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
                <button class="btn btn-small" on:click=move |_| set_submit_open.set(true)>
                    "Soumettre un rabais"
                </button>
            </div>

            <Show when=move || !status.get().is_empty()>
                <p class="status-line">{move || status.get()}</p>
            </Show>

            <div id="rabais-actifs-display">{accordion}</div>

            <FlyerImportPanel/>

            {move || {
                submit_open
                    .get()
                    .then(|| {
                        view! {
                            <SubmitDealModal on_close=Callback::new(move |_| {
                                set_submit_open.set(false)
                            })/>
                        }
                    })
            }}
        </div>
    }
}

fn persist_accordion(states: &BTreeMap<String, bool>) {
    if let Err(e) = storage::set_accordion_states(states) {
        web_sys::console::warn_1(&format!("[STORE] états d'accordéon non sauvegardés: {e}").into());
    }
}
