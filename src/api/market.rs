//! Market Endpoints
//!
//! Stores, flyers, active deals, list optimization and the community
//! price catalog.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{ActiveDeal, Commerce, FlyerData, OptimizedItem, Product, ShoppingItem};

#[derive(Serialize)]
struct OptimizeArgs<'a> {
    items: &'a [ShoppingItem],
    stores: &'a [String],
}

#[derive(Serialize)]
struct PriceArgs<'a> {
    produit_id: u32,
    commerce_id: u32,
    prix: &'a str,
}

#[derive(Serialize)]
struct ReportArgs<'a> {
    reason: &'a str,
    comments: &'a str,
}

#[derive(Serialize)]
pub struct NewProduct<'a> {
    pub nom: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marque: Option<&'a str>,
}

#[derive(Serialize)]
pub struct DealSubmission<'a> {
    pub product_name: &'a str,
    pub brand: &'a str,
    pub commerce_id: u32,
    pub price_details: &'a str,
    pub single_price: &'a str,
    pub date_debut: &'a str,
    pub date_fin: &'a str,
}

#[derive(Deserialize)]
struct MessageAnswer {
    message: String,
}

pub async fn list_commerces() -> Result<Vec<Commerce>> {
    super::get_json("commerces").await
}

pub async fn active_deals() -> Result<Vec<ActiveDeal>> {
    super::get_json("rabais-actifs").await
}

pub async fn community_prices() -> Result<Vec<ActiveDeal>> {
    super::get_json("community-prices").await
}

pub async fn active_flyers() -> Result<FlyerData> {
    super::get_json("circulaires-actives").await
}

pub async fn import_flyer(data: &serde_json::Value) -> Result<String> {
    let answer: MessageAnswer = super::send_json("POST", "import-flyer", data).await?;
    Ok(answer.message)
}

pub async fn optimize(items: &[ShoppingItem], stores: &[String]) -> Result<Vec<OptimizedItem>> {
    super::send_json("POST", "optimize", &OptimizeArgs { items, stores }).await
}

pub async fn search_products(query: &str) -> Result<Vec<Product>> {
    let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC);
    super::get_json(&format!("products/search?q={encoded}")).await
}

pub async fn create_product(args: &NewProduct<'_>) -> Result<Product> {
    super::send_json("POST", "products", args).await
}

pub async fn submit_price(produit_id: u32, commerce_id: u32, prix: &str) -> Result<()> {
    super::send_no_content(
        "POST",
        "prices",
        Some(&PriceArgs {
            produit_id,
            commerce_id,
            prix,
        }),
    )
    .await
}

pub async fn confirm_price(price_id: u32) -> Result<String> {
    let answer: MessageAnswer =
        super::send_json("POST", &format!("prices/{price_id}/confirm"), &()).await?;
    Ok(answer.message)
}

pub async fn report_price(price_id: u32, reason: &str, comments: &str) -> Result<String> {
    let answer: MessageAnswer = super::send_json(
        "POST",
        &format!("prices/{price_id}/report"),
        &ReportArgs { reason, comments },
    )
    .await?;
    Ok(answer.message)
}

pub async fn submit_deal(args: &DealSubmission<'_>) -> Result<String> {
    let answer: MessageAnswer = super::send_json("POST", "submit-deal", args).await?;
    Ok(answer.message)
}
