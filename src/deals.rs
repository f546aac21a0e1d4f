//! Deal Pricing And Search
//!
//! Pure helpers for the optimizer page: unit price extraction from flyer
//! price text, estimated totals, accent-insensitive deal search and the
//! store/category grouping behind the active-deals accordion.

use std::collections::BTreeMap;

use crate::error::{AppError, Result};
use crate::models::{ActiveDeal, OptimizedDeal, OptimizedItem};

/// Unit price hidden in flyer price text.
///
/// "2 / 5.00$ (2.50)" takes the parenthesized single price, "2/5.00"
/// divides, "4.99$" keeps the leading number. None when nothing usable is
/// found.
pub fn deal_unit_price(price: &str) -> Option<String> {
    if let Some(single) = parenthesized_price(price) {
        return Some(single.to_string());
    }

    let lead = leading_price_chars(price);
    if lead.is_empty() {
        return None;
    }
    if lead.contains('/') {
        let mut parts = lead.split('/');
        if let (Some(count), Some(total), None) = (parts.next(), parts.next(), parts.next()) {
            let count: f64 = count.parse().ok()?;
            let total: f64 = total.parse().ok()?;
            if count > 0.0 {
                return Some(format!("{:.2}", total / count));
            }
        }
        return None;
    }
    Some(lead.to_string())
}

/// First "(2.50)" style group in the text
fn parenthesized_price(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    for open in 0..bytes.len() {
        if bytes[open] != b'(' {
            continue;
        }
        let start = open + 1;
        let mut end = start;
        while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
            end += 1;
        }
        if end > start && bytes.get(end) == Some(&b')') {
            return Some(&text[start..end]);
        }
    }
    None
}

fn leading_price_chars(text: &str) -> &str {
    let end = text
        .find(|c: char| !c.is_ascii_digit() && c != '.' && c != '/')
        .unwrap_or(text.len());
    &text[..end]
}

/// Leading decimal number of a price field, ignoring trailing units
pub fn parse_price(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit() && c != '.' && c != '-' && c != '+')
        .unwrap_or(trimmed.len());
    let mut lead = &trimmed[..end];
    while !lead.is_empty() {
        if let Ok(value) = lead.parse::<f64>() {
            return Some(value);
        }
        lead = &lead[..lead.len() - 1];
    }
    None
}

/// Sum of the parseable selected prices
pub fn estimated_total(items: &[OptimizedItem]) -> f64 {
    items
        .iter()
        .filter_map(|item| parse_price(&item.selected_price))
        .sum()
}

/// No price yet, or an explicit zero
pub fn needs_price(item: &OptimizedItem) -> bool {
    item.selected_price.is_empty() || parse_price(&item.selected_price) == Some(0.0)
}

pub fn items_needing_price(items: &[OptimizedItem]) -> Vec<String> {
    items
        .iter()
        .filter(|item| needs_price(item))
        .map(|item| item.name.clone())
        .collect()
}

/// Flyer discounts listed before community prices, order otherwise kept
pub fn sort_deals_flyer_first(deals: &mut [OptimizedDeal]) {
    deals.sort_by_key(|deal| deal.deal_type != "rabais");
}

/// Applies a radio selection: records the deal index and derives the price
/// used for the total. `None` clears both.
pub fn select_deal(item: &mut OptimizedItem, deal: Option<usize>) {
    match deal {
        Some(index) if index < item.deals.len() => {
            item.selected_deal = Some(index);
            let price = item.deals[index].price.as_deref().unwrap_or("");
            item.selected_price = deal_unit_price(price).unwrap_or_default();
        }
        _ => {
            item.selected_deal = None;
            item.selected_price = String::new();
        }
    }
}

/// Parses the pasted AI price answer. Must be a JSON array; entries without
/// a name or a numeric price are skipped.
pub fn parse_imported_prices(json: &str) -> Result<Vec<(String, f64)>> {
    let value: serde_json::Value = serde_json::from_str(json.trim())
        .map_err(|e| AppError::validation(format!("JSON invalide : {e}")))?;
    let Some(entries) = value.as_array() else {
        return Err(AppError::validation(
            "Le JSON doit être un tableau (une liste) d'articles.",
        ));
    };
    Ok(entries
        .iter()
        .filter_map(|entry| {
            let name = entry.get("name")?.as_str()?;
            let price = entry.get("price")?.as_f64()?;
            (!name.is_empty()).then(|| (name.to_string(), price))
        })
        .collect())
}

/// Fills imported prices into rows still without one. First match by exact
/// name wins; returns how many rows changed.
pub fn apply_imported_prices(items: &mut [OptimizedItem], imported: &[(String, f64)]) -> usize {
    let mut updated = 0;
    for (name, price) in imported {
        if let Some(item) = items
            .iter_mut()
            .find(|item| item.name == *name && needs_price(item))
        {
            item.selected_price = format!("{price:.2}");
            updated += 1;
        }
    }
    updated
}

/// Lowercases and strips French diacritics for comparisons
pub fn normalize_for_search(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(fold_accent)
        .collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'î' | 'ï' => 'i',
        'ô' | 'ö' => 'o',
        'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        _ => c,
    }
}

/// Accent-insensitive substring filter on product names
pub fn filter_deals(deals: &[ActiveDeal], term: &str) -> Vec<ActiveDeal> {
    let needle = normalize_for_search(term);
    deals
        .iter()
        .filter(|deal| normalize_for_search(&deal.produit_nom).contains(&needle))
        .cloned()
        .collect()
}

/// Accordion grouping: store, then category ("Non classé" when the backend
/// sends none), both alphabetical
pub fn group_deals(deals: &[ActiveDeal]) -> Vec<(String, Vec<(String, Vec<ActiveDeal>)>)> {
    let mut by_store: BTreeMap<String, BTreeMap<String, Vec<ActiveDeal>>> = BTreeMap::new();
    for deal in deals {
        let category = deal
            .categorie_nom
            .clone()
            .unwrap_or_else(|| "Non classé".to_string());
        by_store
            .entry(deal.commerce_nom.clone())
            .or_default()
            .entry(category)
            .or_default()
            .push(deal.clone());
    }
    by_store
        .into_iter()
        .map(|(store, categories)| (store, categories.into_iter().collect()))
        .collect()
}

/// Unique stores of the selected deals, in list order, for the shopping
/// route panel
pub fn stores_to_visit(items: &[OptimizedItem]) -> Vec<String> {
    let mut stores: Vec<String> = Vec::new();
    for item in items {
        let Some(index) = item.selected_deal else { continue };
        let Some(deal) = item.deals.get(index) else { continue };
        if !deal.store.is_empty() && !stores.contains(&deal.store) {
            stores.push(deal.store.clone());
        }
    }
    stores
}

/// Display text for a deal price; the formatted details win when present
pub fn price_label(deal: &ActiveDeal) -> String {
    if deal.details_prix.is_empty() {
        format!("{} $", deal.prix)
    } else {
        deal.details_prix.clone()
    }
}

/// Community prices can be confirmed by anyone except their submitter
pub fn can_confirm(submitted_by: Option<&str>, current_user: Option<&str>) -> bool {
    match submitted_by {
        Some(submitter) => current_user != Some(submitter),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_deal(store: &str, category: Option<&str>, product: &str) -> ActiveDeal {
        ActiveDeal {
            price_id: 1,
            produit_nom: product.to_string(),
            commerce_nom: store.to_string(),
            categorie_nom: category.map(str::to_string),
            details_prix: String::new(),
            prix: "2.99".to_string(),
            submitted_by_username: None,
        }
    }

    fn make_item(name: &str, selected_price: &str) -> OptimizedItem {
        OptimizedItem {
            name: name.to_string(),
            quantity: "1".to_string(),
            deals: Vec::new(),
            selected_deal: None,
            selected_price: selected_price.to_string(),
        }
    }

    #[test]
    fn unit_price_prefers_parenthesized_single_price() {
        assert_eq!(deal_unit_price("2 / 5.00$ (2.50)"), Some("2.50".to_string()));
    }

    #[test]
    fn unit_price_divides_multi_buy_text() {
        assert_eq!(deal_unit_price("3/4.50"), Some("1.50".to_string()));
    }

    #[test]
    fn unit_price_keeps_plain_numbers() {
        assert_eq!(deal_unit_price("4.99$"), Some("4.99".to_string()));
        assert_eq!(deal_unit_price("prix membre"), None);
    }

    #[test]
    fn totals_skip_rows_without_a_parseable_price() {
        let items = vec![
            make_item("Lait", "4.50"),
            make_item("Pain", ""),
            make_item("Oeufs", "3.25$"),
        ];
        assert!((estimated_total(&items) - 7.75).abs() < 1e-9);
        assert_eq!(items_needing_price(&items), vec!["Pain"]);
    }

    #[test]
    fn zero_counts_as_missing_price() {
        assert!(needs_price(&make_item("Lait", "0.00")));
        assert!(!needs_price(&make_item("Lait", "1.99")));
    }

    #[test]
    fn selecting_a_deal_derives_its_price() {
        let mut item = make_item("Poulet", "");
        item.deals.push(OptimizedDeal {
            deal_type: "rabais".to_string(),
            name: "Poulet entier".to_string(),
            price_id: None,
            store: "Maxi".to_string(),
            details: None,
            price: Some("2/9.00".to_string()),
            brand: None,
            category_name: None,
            submitted_by_username: None,
            date_debut: None,
            date_fin: None,
        });
        select_deal(&mut item, Some(0));
        assert_eq!(item.selected_deal, Some(0));
        assert_eq!(item.selected_price, "4.50");

        select_deal(&mut item, None);
        assert_eq!(item.selected_deal, None);
        assert_eq!(item.selected_price, "");
    }

    #[test]
    fn imported_prices_only_fill_unpriced_rows() {
        let mut items = vec![make_item("Lait", "4.50"), make_item("Pain", "")];
        let imported = parse_imported_prices(
            r#"[{"name": "Lait", "price": 3.99}, {"name": "Pain", "price": 2.5}, {"price": 1.0}]"#,
        )
        .unwrap();
        assert_eq!(apply_imported_prices(&mut items, &imported), 1);
        assert_eq!(items[0].selected_price, "4.50");
        assert_eq!(items[1].selected_price, "2.50");
    }

    #[test]
    fn imported_prices_must_be_an_array() {
        assert!(parse_imported_prices(r#"{"name": "Lait"}"#).is_err());
        assert!(parse_imported_prices("pas du json").is_err());
    }

    #[test]
    fn search_ignores_case_and_accents() {
        let deals = vec![
            make_deal("Maxi", None, "Céréales Granola"),
            make_deal("IGA", None, "Pain blanc"),
        ];
        let found = filter_deals(&deals, "cere");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].produit_nom, "Céréales Granola");
    }

    #[test]
    fn grouping_sorts_stores_and_fills_missing_categories() {
        let deals = vec![
            make_deal("Metro", Some("Viandes"), "Boeuf"),
            make_deal("IGA", None, "Pain"),
            make_deal("Metro", Some("Fruits"), "Pommes"),
        ];
        let grouped = group_deals(&deals);
        assert_eq!(grouped[0].0, "IGA");
        assert_eq!(grouped[0].1[0].0, "Non classé");
        assert_eq!(grouped[1].0, "Metro");
        assert_eq!(grouped[1].1[0].0, "Fruits");
        assert_eq!(grouped[1].1[1].0, "Viandes");
    }

    #[test]
    fn flyer_deals_sort_before_community_prices() {
        let mut deals = vec![
            OptimizedDeal {
                deal_type: "communautaire".to_string(),
                name: "a".to_string(),
                price_id: None,
                store: "IGA".to_string(),
                details: None,
                price: None,
                brand: None,
                category_name: None,
                submitted_by_username: None,
                date_debut: None,
                date_fin: None,
            },
            OptimizedDeal {
                deal_type: "rabais".to_string(),
                name: "b".to_string(),
                price_id: None,
                store: "Maxi".to_string(),
                details: None,
                price: None,
                brand: None,
                category_name: None,
                submitted_by_username: None,
                date_debut: None,
                date_fin: None,
            },
        ];
        sort_deals_flyer_first(&mut deals);
        assert_eq!(deals[0].deal_type, "rabais");
    }

    #[test]
    fn route_lists_each_selected_store_once() {
        let deal = |store: &str| OptimizedDeal {
            deal_type: "rabais".to_string(),
            name: "x".to_string(),
            price_id: None,
            store: store.to_string(),
            details: None,
            price: None,
            brand: None,
            category_name: None,
            submitted_by_username: None,
            date_debut: None,
            date_fin: None,
        };
        let mut lait = make_item("Lait", "");
        lait.deals.push(deal("Maxi"));
        lait.selected_deal = Some(0);
        let mut pain = make_item("Pain", "");
        pain.deals.push(deal("IGA"));
        pain.deals.push(deal("Maxi"));
        pain.selected_deal = Some(1);
        let oeufs = make_item("Oeufs", "");

        assert_eq!(stores_to_visit(&[lait, pain, oeufs]), vec!["Maxi"]);
    }

    #[test]
    fn own_submissions_cannot_be_confirmed() {
        assert!(can_confirm(Some("alice"), Some("bob")));
        assert!(!can_confirm(Some("alice"), Some("alice")));
        assert!(!can_confirm(None, Some("bob")));
        assert!(can_confirm(Some("alice"), None));
    }
}
