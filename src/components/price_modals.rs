//! Price And Deal Modals
//!
//! Community price submission (with on-the-fly product creation), price
//! reporting, manual deal submission and the deal detail view.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::AppContext;
use crate::models::OptimizedDeal;
use crate::store::{use_app_store, AppStateStoreFields};

/// Submits a regular shelf price for one shopping item. The product is
/// looked up in the catalog first; a missing product can be created from
/// here before the price goes out.
#[component]
pub fn SubmitPriceModal(item_name: String, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let store = use_app_store();

    let title = format!("Soumettre un prix pour \"{item_name}\"");
    let item_for_submit = item_name.clone();
    let item_for_create = item_name.clone();

    let (commerce_id, set_commerce_id) = signal(None::<u32>);
    let (price, set_price) = signal(String::new());
    let (brand, set_brand) = signal(String::new());
    let (creating, set_creating) = signal(false);
    let (status, set_status) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(commerce) = commerce_id.get() else {
            set_status.set("Veuillez choisir un commerce et entrer un prix.".to_string());
            return;
        };
        let price_value = price.get();
        if price_value.trim().is_empty() {
            set_status.set("Veuillez choisir un commerce et entrer un prix.".to_string());
            return;
        }
        let name = item_for_submit.clone();
        spawn_local(async move {
            let products = match api::market::search_products(&name).await {
                Ok(products) => products,
                Err(e) => {
                    set_status.set(format!("Erreur lors de la recherche du produit : {e}"));
                    return;
                }
            };
            let found = products
                .iter()
                .find(|p| p.nom.to_lowercase() == name.to_lowercase())
                .or_else(|| products.first())
                .cloned();
            match found {
                Some(product) => {
                    match api::market::submit_price(product.id, commerce, price_value.trim()).await
                    {
                        Ok(()) => {
                            set_status
                                .set("Merci ! Votre prix a été soumis avec succès.".to_string());
                        }
                        Err(e) => {
                            set_status.set(format!("Erreur lors de la soumission du prix : {e}"));
                        }
                    }
                }
                None => {
                    set_creating.set(true);
                    set_status.set(format!(
                        "\"{name}\" n'existe pas encore dans le catalogue. Créez-le pour soumettre votre prix."
                    ));
                }
            }
        });
    };

    let create_and_submit = move |_| {
        let Some(commerce) = commerce_id.get() else {
            set_status.set("Veuillez choisir un commerce et entrer un prix.".to_string());
            return;
        };
        let price_value = price.get();
        if price_value.trim().is_empty() {
            set_status.set("Veuillez choisir un commerce et entrer un prix.".to_string());
            return;
        }
        let name = item_for_create.clone();
        let brand_value = brand.get();
        spawn_local(async move {
            let args = api::market::NewProduct {
                nom: name.trim(),
                marque: if brand_value.trim().is_empty() {
                    None
                } else {
                    Some(brand_value.trim())
                },
            };
            let product = match api::market::create_product(&args).await {
                Ok(product) => product,
                Err(e) => {
                    set_status.set(format!("Erreur lors de la création du produit : {e}"));
                    return;
                }
            };
            match api::market::submit_price(product.id, commerce, price_value.trim()).await {
                Ok(()) => {
                    set_creating.set(false);
                    set_status.set("Produit ajouté et prix soumis avec succès !".to_string());
                }
                Err(e) => set_status.set(format!("Erreur lors de la soumission du prix : {e}")),
            }
        });
    };

    let commerce_options = move || {
        let mut commerces = store.commerces().get();
        commerces.sort_by(|a, b| a.nom.to_lowercase().cmp(&b.nom.to_lowercase()));
        commerces
            .into_iter()
            .map(|c| view! { <option value=c.id.to_string()>{c.nom}</option> })
            .collect_view()
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal-content" on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2>{title}</h2>
                    <button class="btn-close-modal" on:click=move |_| on_close.run(())>
                        "×"
                    </button>
                </div>
                <form class="modal-body" on:submit=submit>
                    <Show when=move || !status.get().is_empty()>
                        <p class="status-line">{move || status.get()}</p>
                    </Show>

                    <label for="priceCommerceSelect">"Commerce"</label>
                    <select
                        id="priceCommerceSelect"
                        on:change=move |ev| {
                            set_commerce_id.set(event_target_value(&ev).parse::<u32>().ok())
                        }
                    >
                        <option value="">"-- Choisissez un commerce --"</option>
                        {commerce_options}
                    </select>

                    <label for="priceValueInput">"Prix (ex: 4.99)"</label>
                    <input
                        type="text"
                        id="priceValueInput"
                        prop:value=move || price.get()
                        on:input=move |ev| set_price.set(event_target_value(&ev))
                    />

                    <Show when=move || creating.get()>
                        <label for="priceBrandInput">"Marque (optionnel)"</label>
                        <input
                            type="text"
                            id="priceBrandInput"
                            prop:value=move || brand.get()
                            on:input=move |ev| set_brand.set(event_target_value(&ev))
                        />
                        <button
                            type="button"
                            class="btn btn-primary"
                            on:click=create_and_submit.clone()
                        >
                            "Créer le produit et soumettre"
                        </button>
                    </Show>

                    <Show when=move || !creating.get()>
                        <button type="submit" class="btn btn-primary">"Soumettre"</button>
                    </Show>
                </form>
            </div>
        </div>
    }
}

/// Flags a community price as wrong or outdated
#[component]
pub fn ReportPriceModal(price_id: u32, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let (reason, set_reason) = signal("Prix incorrect".to_string());
    let (comments, set_comments) = signal(String::new());
    let (status, set_status) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let reason_value = reason.get();
        let comments_value = comments.get();
        spawn_local(async move {
            match api::market::report_price(price_id, &reason_value, &comments_value).await {
                Ok(message) => set_status.set(message),
                Err(e) => set_status.set(format!("Erreur lors du signalement : {e}")),
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal-content" on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2>"Signaler ce prix"</h2>
                    <button class="btn-close-modal" on:click=move |_| on_close.run(())>
                        "×"
                    </button>
                </div>
                <form class="modal-body" on:submit=submit>
                    <Show when=move || !status.get().is_empty()>
                        <p class="status-line">{move || status.get()}</p>
                    </Show>

                    <label for="reportReasonSelect">"Raison"</label>
                    <select
                        id="reportReasonSelect"
                        on:change=move |ev| set_reason.set(event_target_value(&ev))
                    >
                        <option value="Prix incorrect">"Prix incorrect"</option>
                        <option value="Rabais terminé">"Rabais terminé"</option>
                        <option value="Produit introuvable">"Produit introuvable"</option>
                        <option value="Autre">"Autre"</option>
                    </select>

                    <label for="reportCommentsInput">"Commentaires (optionnel)"</label>
                    <textarea
                        id="reportCommentsInput"
                        rows="3"
                        prop:value=move || comments.get()
                        on:input=move |ev| set_comments.set(event_target_value(&ev))
                    ></textarea>

                    <button type="submit" class="btn btn-danger">"Signaler"</button>
                </form>
            </div>
        </div>
    }
}

/// Manual deal submission, for discounts spotted in-store
#[component]
pub fn SubmitDealModal(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (product_name, set_product_name) = signal(String::new());
    let (brand, set_brand) = signal(String::new());
    let (commerce_id, set_commerce_id) = signal(None::<u32>);
    let (price_details, set_price_details) = signal(String::new());
    let (single_price, set_single_price) = signal(String::new());
    let (date_debut, set_date_debut) = signal(String::new());
    let (date_fin, set_date_fin) = signal(String::new());
    let (status, set_status) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = product_name.get();
        let details = price_details.get();
        let Some(commerce) = commerce_id.get() else {
            set_status
                .set("Veuillez remplir le nom du produit, le commerce et le prix.".to_string());
            return;
        };
        if name.trim().is_empty() || details.trim().is_empty() {
            set_status
                .set("Veuillez remplir le nom du produit, le commerce et le prix.".to_string());
            return;
        }
        let brand_value = brand.get();
        let single = single_price.get();
        let debut = date_debut.get();
        let fin = date_fin.get();
        spawn_local(async move {
            let args = api::market::DealSubmission {
                product_name: name.trim(),
                brand: brand_value.trim(),
                commerce_id: commerce,
                price_details: details.trim(),
                single_price: single.trim(),
                date_debut: debut.trim(),
                date_fin: fin.trim(),
            };
            match api::market::submit_deal(&args).await {
                Ok(message) => {
                    set_status.set(message);
                    ctx.reload();
                }
                Err(e) => set_status.set(format!("Erreur lors de la soumission du rabais : {e}")),
            }
        });
    };

    let commerce_options = move || {
        let mut commerces = store.commerces().get();
        commerces.sort_by(|a, b| a.nom.to_lowercase().cmp(&b.nom.to_lowercase()));
        commerces
            .into_iter()
            .map(|c| view! { <option value=c.id.to_string()>{c.nom}</option> })
            .collect_view()
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal-content" on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2>"Soumettre un rabais"</h2>
                    <button class="btn-close-modal" on:click=move |_| on_close.run(())>
                        "×"
                    </button>
                </div>
                <form class="modal-body" on:submit=submit>
                    <Show when=move || !status.get().is_empty()>
                        <p class="status-line">{move || status.get()}</p>
                    </Show>

                    <label for="dealProductName">"Nom du produit"</label>
                    <input
                        type="text"
                        id="dealProductName"
                        prop:value=move || product_name.get()
                        on:input=move |ev| set_product_name.set(event_target_value(&ev))
                    />
                    <label for="dealBrand">"Marque (optionnel)"</label>
                    <input
                        type="text"
                        id="dealBrand"
                        prop:value=move || brand.get()
                        on:input=move |ev| set_brand.set(event_target_value(&ev))
                    />
                    <label for="dealCommerceSelect">"Commerce"</label>
                    <select
                        id="dealCommerceSelect"
                        on:change=move |ev| {
                            set_commerce_id.set(event_target_value(&ev).parse::<u32>().ok())
                        }
                    >
                        <option value="">"-- Choisissez un commerce --"</option>
                        {commerce_options}
                    </select>
                    <label for="dealPriceDetails">"Prix affiché (ex: 2 / 5.00$)"</label>
                    <input
                        type="text"
                        id="dealPriceDetails"
                        prop:value=move || price_details.get()
                        on:input=move |ev| set_price_details.set(event_target_value(&ev))
                    />
                    <label for="dealSinglePrice">"Prix unitaire (optionnel)"</label>
                    <input
                        type="text"
                        id="dealSinglePrice"
                        prop:value=move || single_price.get()
                        on:input=move |ev| set_single_price.set(event_target_value(&ev))
                    />
                    <label for="dealDateDebut">"Début du rabais"</label>
                    <input
                        type="date"
                        id="dealDateDebut"
                        prop:value=move || date_debut.get()
                        on:input=move |ev| set_date_debut.set(event_target_value(&ev))
                    />
                    <label for="dealDateFin">"Fin du rabais"</label>
                    <input
                        type="date"
                        id="dealDateFin"
                        prop:value=move || date_fin.get()
                        on:input=move |ev| set_date_fin.set(event_target_value(&ev))
                    />

                    <button type="submit" class="btn btn-primary">"Soumettre"</button>
                </form>
            </div>
        </div>
    }
}

/// Read-only card for one optimization deal
#[component]
pub fn DealDetailModal(deal: OptimizedDeal, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let price_text = match (&deal.details, &deal.price) {
        (Some(details), _) if !details.is_empty() => details.clone(),
        (_, Some(price)) => format!("{price} $"),
        _ => "Prix non disponible".to_string(),
    };
    let validity = (deal.date_debut.is_some() || deal.date_fin.is_some()).then(|| {
        format!(
            "Du {} au {}",
            deal.date_debut.clone().unwrap_or_else(|| "?".to_string()),
            deal.date_fin.clone().unwrap_or_else(|| "?".to_string()),
        )
    });
    let source = if deal.deal_type == "communautaire" {
        "Communautaire (Utilisateur)"
    } else {
        "Circulaire"
    };
    let brand = deal.brand.clone().filter(|b| !b.is_empty());
    let category = deal.category_name.clone().filter(|c| !c.is_empty());

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal-content deal-detail" on:click=|ev: web_sys::MouseEvent| {
                ev.stop_propagation()
            }>
                <div class="modal-header">
                    <h2>{deal.name.clone()}</h2>
                    <button class="btn-close-modal" on:click=move |_| on_close.run(())>
                        "×"
                    </button>
                </div>
                <div class="modal-body">
                    <p class="deal-store">{deal.store.clone()}</p>
                    {brand.map(|b| view! { <span class="badge badge-brand">{b}</span> })}
                    {category.map(|c| view! { <span class="badge badge-category">{c}</span> })}
                    <p class="deal-price">{price_text}</p>
                    {validity.map(|v| view! { <p class="deal-validity">{v}</p> })}
                    <p class="deal-source">{source}</p>
                </div>
            </div>
        </div>
    }
}
