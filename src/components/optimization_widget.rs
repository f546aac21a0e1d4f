//! List Optimization Widget
//!
//! Runs the shopping list against the selected stores' deals, then lets
//! the user pick a deal per row, reorder rows, fill missing prices by
//! hand or via the price-finder prompt, and feed the community catalog.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_reorder as reorder;

use crate::api;
use crate::components::{CopyButton, DealDetailModal, ReportPriceModal, SubmitPriceModal};
use crate::context::AppContext;
use crate::deals;
use crate::models::{OptimizedDeal, OptimizedItem};
use crate::prompts;
use crate::storage;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn OptimizationWidget() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let rs = reorder::create_reorder_signals();

    let (status, set_status) = signal(String::new());
    let (busy, set_busy) = signal(false);
    let (confirm_busy, set_confirm_busy) = signal(None::<u32>);
    let (confirmed, set_confirmed) = signal(Vec::<u32>::new());
    let (finder_open, set_finder_open) = signal(false);
    let (imported_json, set_imported_json) = signal(String::new());
    let (price_item, set_price_item) = signal(None::<String>);
    let (report_target, set_report_target) = signal(None::<u32>);
    let (detail_deal, set_detail_deal) = signal(None::<OptimizedDeal>);

    let optimize = move |_| {
        let selected = store.selected_stores().get();
        if selected.is_empty() {
            set_status.set(
                "Veuillez sélectionner au moins un commerce pour lancer l'optimisation."
                    .to_string(),
            );
            return;
        }
        set_busy.set(true);
        set_status.set("Récupération de votre liste...".to_string());
        spawn_local(async move {
            // Fresh server list; the cached one may miss edits from the
            // assistant page
            let items = match api::shopping::list_shopping().await {
                Ok(items) => items,
                Err(_) => store.shopping().get_untracked(),
            };
            if items.is_empty() {
                set_status.set("Votre liste d'épicerie est vide.".to_string());
                set_busy.set(false);
                return;
            }
            set_status.set("L'IA cherche les meilleurs prix...".to_string());
            match api::market::optimize(&items, &selected).await {
                Ok(mut optimized) => {
                    // Sorted once on arrival so radio indices stay stable
                    for item in &mut optimized {
                        deals::sort_deals_flyer_first(&mut item.deals);
                    }
                    persist_optimized(&optimized);
                    *store.optimized().write() = optimized;
                    set_status.set(String::new());
                }
                Err(e) => set_status.set(format!("Erreur lors de l'optimisation : {e}")),
            }
            set_busy.set(false);
        });
    };

    let select_row_deal = move |item_idx: usize, deal: Option<usize>| {
        let mut items = store.optimized().get_untracked();
        if let Some(item) = items.get_mut(item_idx) {
            deals::select_deal(item, deal);
        }
        persist_optimized(&items);
        *store.optimized().write() = items;
    };

    let set_row_price = move |item_idx: usize, value: String| {
        let mut items = store.optimized().get_untracked();
        if let Some(item) = items.get_mut(item_idx) {
            item.selected_price = value.trim().to_string();
        }
        persist_optimized(&items);
        *store.optimized().write() = items;
    };

    let reorder_rows = move |dragged: u32, target: u32| {
        let mut items = store.optimized().get_untracked();
        reorder::splice_move(&mut items, dragged as usize, target as usize);
        persist_optimized(&items);
        *store.optimized().write() = items;
    };

    let confirm_deal = move |price_id: u32| {
        set_confirm_busy.set(Some(price_id));
        spawn_local(async move {
            match api::market::confirm_price(price_id).await {
                Ok(message) => {
                    set_confirmed.update(|ids| ids.push(price_id));
                    set_status.set(message);
                    ctx.reload();
                }
                Err(e) => set_status.set(format!("Erreur lors de la confirmation : {e}")),
            }
            set_confirm_busy.set(None);
        });
    };

    let import_prices = move |_| {
        let text = imported_json.get();
        if text.trim().is_empty() {
            set_status.set("Veuillez coller le JSON des prix.".to_string());
            return;
        }
        match deals::parse_imported_prices(&text) {
            Ok(imported) => {
                let mut items = store.optimized().get_untracked();
                let updated = deals::apply_imported_prices(&mut items, &imported);
                persist_optimized(&items);
                *store.optimized().write() = items;
                set_imported_json.set(String::new());
                set_status.set(format!("{updated} prix importé(s) avec succès."));
            }
            Err(e) => set_status.set(e.to_string()),
        }
    };

    let finder_prompt = Signal::derive(move || {
        prompts::price_finder_prompt(&deals::items_needing_price(&store.optimized().get()))
    });

    let rows_view = move || {
        let items = store.optimized().get();
        if items.is_empty() {
            return view! {
                <p class="placeholder-text">"Les résultats de l'optimisation apparaîtront ici."</p>
            }
            .into_any();
        }
        let busy_confirm = confirm_busy.get();
        let confirmed_ids = confirmed.get();
        let current_user = ctx.username.get();

        items
            .into_iter()
            .enumerate()
            .map(|(item_idx, item)| {
                let idx = item_idx as u32;
                let row_class = if rs.over_read.get() == Some(idx) {
                    "optimized-item drag-over"
                } else {
                    "optimized-item"
                };
                let name_for_modal = item.name.clone();
                let label = format!("{} (Qté: {})", item.name, item.quantity);
                let radio_name = format!("deal-choice-{item_idx}");

                let deals_view = item
                    .deals
                    .iter()
                    .enumerate()
                    .map(|(deal_idx, deal)| {
                        let checked = item.selected_deal == Some(deal_idx);
                        let deal_label = optimized_deal_label(deal);
                        let is_flyer = deal.deal_type == "rabais";
                        let type_class =
                            if is_flyer { "deal-tag rabais" } else { "deal-tag communautaire" };
                        let type_label = if is_flyer { "Rabais" } else { "Communautaire" };
                        let deal_for_detail = deal.clone();

                        let community_actions = (!is_flyer)
                            .then_some(deal.price_id)
                            .flatten()
                            .map(|pid| {
                                let confirm_label = if busy_confirm == Some(pid) {
                                    "..."
                                } else if confirmed_ids.contains(&pid) {
                                    "Confirmé ✓"
                                } else {
                                    "Confirmer"
                                };
                                let can = deals::can_confirm(
                                    deal.submitted_by_username.as_deref(),
                                    current_user.as_deref(),
                                );
                                view! {
                                    <span class="deal-actions">
                                        {can
                                            .then(|| {
                                                view! {
                                                    <button
                                                        class="btn btn-tiny btn-confirm"
                                                        on:click=move |_| confirm_deal(pid)
                                                    >
                                                        {confirm_label}
                                                    </button>
                                                }
                                            })}
                                        <button
                                            class="btn btn-tiny btn-report"
                                            on:click=move |_| set_report_target.set(Some(pid))
                                        >
                                            "Signaler"
                                        </button>
                                    </span>
                                }
                            });

                        view! {
                            <label class="deal-option">
                                <input
                                    type="radio"
                                    name=radio_name.clone()
                                    checked=checked
                                    on:change=move |_| select_row_deal(item_idx, Some(deal_idx))
                                />
                                <span class=type_class>{type_label}</span>
                                <span class="deal-label">{deal_label}</span>
                                <button
                                    class="btn-icon btn-deal-info"
                                    title="Détails du rabais"
                                    on:click=move |_| {
                                        set_detail_deal.set(Some(deal_for_detail.clone()))
                                    }
                                >
                                    "ℹ"
                                </button>
                                {community_actions}
                            </label>
                        }
                    })
                    .collect_view();

                view! {
                    <div
                        class=row_class
                        draggable="true"
                        on:dragstart=reorder::make_on_dragstart(rs, idx)
                        on:dragover=reorder::make_on_dragover(rs, idx)
                        on:dragleave=reorder::make_on_dragleave(rs, idx)
                        on:drop=reorder::make_on_drop(rs, idx, reorder_rows)
                        on:dragend=reorder::make_on_dragend(rs)
                    >
                        <div class="optimized-item-header">
                            <span class="item-name">{label}</span>
                            <button
                                class="btn btn-tiny"
                                on:click=move |_| set_price_item.set(Some(name_for_modal.clone()))
                            >
                                "Soumettre un prix régulier"
                            </button>
                        </div>
                        <div class="deal-options">{deals_view}</div>
                        <div class="final-price-row">
                            <label>"Prix Final:"</label>
                            <input
                                type="text"
                                class="final-price-input"
                                value=item.selected_price.clone()
                                on:change=move |ev| set_row_price(item_idx, event_target_value(&ev))
                            />
                        </div>
                    </div>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="optimization-widget">
            <button
                id="optimize-btn"
                class="btn btn-primary"
                disabled=move || busy.get()
                on:click=optimize
            >
                "Optimiser ma liste"
            </button>

            <Show when=move || !status.get().is_empty()>
                <p class="status-line">{move || status.get()}</p>
            </Show>

            <div id="optimization-results">{rows_view}</div>

            <Show when=move || !store.optimized().get().is_empty()>
                <p class="total-line">
                    {move || {
                        format!("Total estimé: {:.2} $", deals::estimated_total(&store.optimized().get()))
                    }}
                </p>
            </Show>

            <Show when=move || !deals::items_needing_price(&store.optimized().get()).is_empty()>
                <div class="price-finder">
                    <button
                        class="btn btn-small"
                        on:click=move |_| set_finder_open.update(|open| *open = !*open)
                    >
                        "Trouver les prix"
                    </button>
                    <Show when=move || finder_open.get()>
                        <div class="price-finder-panel">
                            <textarea
                                readonly
                                rows="8"
                                prop:value=move || finder_prompt.get()
                            ></textarea>
                            <CopyButton label="Copier le prompt" text=finder_prompt/>
                            <textarea
                                id="importedPricesJson"
                                rows="4"
                                placeholder="Collez ici le JSON des prix..."
                                prop:value=move || imported_json.get()
                                on:input=move |ev| set_imported_json.set(event_target_value(&ev))
                            ></textarea>
                            <button class="btn btn-small" on:click=import_prices>
                                "Importer les prix"
                            </button>
                        </div>
                    </Show>
                </div>
            </Show>

            {move || {
                price_item
                    .get()
                    .map(|name| {
                        view! {
                            <SubmitPriceModal
                                item_name=name
                                on_close=Callback::new(move |_| set_price_item.set(None))
                            />
                        }
                    })
            }}
            {move || {
                report_target
                    .get()
                    .map(|price_id| {
                        view! {
                            <ReportPriceModal
                                price_id=price_id
                                on_close=Callback::new(move |_| set_report_target.set(None))
                            />
                        }
                    })
            }}
            {move || {
                detail_deal
                    .get()
                    .map(|deal| {
                        view! {
                            <DealDetailModal
                                deal=deal
                                on_close=Callback::new(move |_| set_detail_deal.set(None))
                            />
                        }
                    })
            }}
        </div>
    }
}

fn optimized_deal_label(deal: &OptimizedDeal) -> String {
    let price = match (&deal.details, &deal.price) {
        (Some(details), _) if !details.is_empty() => details.clone(),
        (_, Some(price)) => format!("{price} $"),
        _ => "Prix non disponible".to_string(),
    };
    format!("{} : {}", deal.store, price)
}

fn persist_optimized(items: &[OptimizedItem]) {
    if let Err(e) = storage::set_saved_optimized_list(items) {
        web_sys::console::warn_1(&format!("[STORE] liste optimisée non sauvegardée: {e}").into());
    }
}
