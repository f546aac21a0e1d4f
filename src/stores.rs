//! Store List Management
//!
//! Manual store list kept in localStorage, merged with the backend
//! commerces, plus the flyer bookkeeping tied to store names.

use crate::error::{AppError, Result};
use crate::models::{Commerce, FlyerData, ManualStore};

/// Store name guessed from a pasted web address: hostname without `www.`,
/// first label, capitalized. None when the address is not parseable.
pub fn extract_store_name(url: &str) -> Option<String> {
    let with_scheme = if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    };
    let (_, rest) = with_scheme.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next().unwrap_or("");
    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    let host = host_port.split(':').next().unwrap_or("");
    if host.is_empty() || host.contains(char::is_whitespace) {
        return None;
    }

    let host = if host.to_lowercase().starts_with("www.") {
        &host[4..]
    } else {
        host
    };
    let name = host.split('.').next().filter(|part| !part.is_empty())?;

    let mut chars = name.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

/// Folds the backend commerces into the manual list. Matching is by
/// lowercased name and the backend wins; list order is otherwise kept.
pub fn merge_commerces(manual: &mut Vec<ManualStore>, commerces: &[Commerce]) {
    for commerce in commerces {
        let incoming = ManualStore {
            name: commerce.nom.clone(),
            website: commerce.site_web.clone().unwrap_or_default(),
            address: commerce.adresse.clone().unwrap_or_default(),
        };
        match manual
            .iter_mut()
            .find(|store| store.name.to_lowercase() == commerce.nom.to_lowercase())
        {
            Some(existing) => *existing = incoming,
            None => manual.push(incoming),
        }
    }
}

/// Display order for the store checkboxes
pub fn sorted_stores(manual: &[ManualStore]) -> Vec<ManualStore> {
    let mut stores = manual.to_vec();
    stores.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    stores
}

/// Adds a store from a pasted address, rejecting unparseable addresses and
/// duplicates (same website, or same name ignoring case)
pub fn add_store_from_url(manual: &mut Vec<ManualStore>, url: &str) -> Result<()> {
    let url = url.trim();
    let Some(name) = extract_store_name(url) else {
        return Err(AppError::validation("Veuillez entrer une adresse web valide."));
    };

    let duplicate = manual
        .iter()
        .any(|store| store.website == url || store.name.to_lowercase() == name.to_lowercase());
    if duplicate {
        return Err(AppError::validation("Ce commerce est déjà dans la liste."));
    }

    manual.push(ManualStore {
        name,
        website: url.to_string(),
        address: String::new(),
    });
    Ok(())
}

/// Applies the edit modal. A rename transfers the store's saved flyer to
/// the new name; a case-only rename of the same store is allowed.
pub fn edit_store(
    manual: &mut [ManualStore],
    flyers: &mut FlyerData,
    original_name: &str,
    new_name: &str,
    address: &str,
    website: &str,
) -> Result<()> {
    let new_name = new_name.trim();
    if new_name.is_empty() {
        return Err(AppError::validation("Le nom du commerce ne peut pas être vide."));
    }

    let index = manual
        .iter()
        .position(|store| store.name == original_name)
        .ok_or_else(|| AppError::validation("Impossible de trouver le commerce original."))?;

    let renamed = new_name.to_lowercase() != original_name.to_lowercase();
    if renamed
        && manual
            .iter()
            .any(|store| store.name.to_lowercase() == new_name.to_lowercase())
    {
        return Err(AppError::validation("Un commerce avec ce nom existe déjà."));
    }

    manual[index].name = new_name.to_string();
    manual[index].address = address.trim().to_string();
    let website = website.trim();
    manual[index].website = if website.is_empty() { "#".to_string() } else { website.to_string() };

    if new_name != original_name {
        if let Some(flyer) = flyers.remove(original_name) {
            flyers.insert(new_name.to_string(), flyer);
        }
    }
    Ok(())
}

/// Removes a store and its saved flyer
pub fn delete_store(manual: &mut Vec<ManualStore>, flyers: &mut FlyerData, name: &str) {
    manual.retain(|store| store.name != name);
    flyers.remove(name);
}

/// Flyer key matching a store name, ignoring case and stray whitespace
pub fn flyer_key_for(flyers: &FlyerData, store_name: &str) -> Option<String> {
    let wanted = store_name.trim().to_lowercase();
    flyers
        .keys()
        .find(|key| key.trim().to_lowercase() == wanted)
        .cloned()
}

/// Pre-flight check on pasted flyer JSON before it goes to the backend
pub fn parse_flyer_json(text: &str) -> Result<serde_json::Value> {
    let value: serde_json::Value = serde_json::from_str(text.trim())
        .map_err(|_| AppError::validation("Le texte fourni n'est pas un JSON valide."))?;
    if !value.is_object() {
        return Err(AppError::validation(
            "Le JSON doit être un objet dont les clés sont des noms de commerces.",
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FlyerContent;

    fn make_store(name: &str) -> ManualStore {
        ManualStore {
            name: name.to_string(),
            website: format!("https://{}.com", name.to_lowercase()),
            address: String::new(),
        }
    }

    #[test]
    fn store_name_comes_from_the_domain() {
        assert_eq!(extract_store_name("https://www.maxi.ca/fr"), Some("Maxi".to_string()));
        assert_eq!(extract_store_name("iga.net"), Some("Iga".to_string()));
        assert_eq!(extract_store_name("http://metro.ca:8080/x"), Some("Metro".to_string()));
        assert_eq!(extract_store_name("pas une adresse web"), None);
        assert_eq!(extract_store_name(""), None);
    }

    #[test]
    fn duplicate_stores_are_rejected() {
        let mut manual = vec![make_store("Maxi")];
        assert!(add_store_from_url(&mut manual, "https://MAXI.ca").is_err());
        assert!(add_store_from_url(&mut manual, "https://iga.net").is_ok());
        assert_eq!(manual.len(), 2);
        assert_eq!(manual[1].name, "Iga");
        assert_eq!(manual[1].website, "https://iga.net");
    }

    #[test]
    fn backend_commerces_overwrite_by_name() {
        let mut manual = vec![make_store("Maxi"), make_store("Iga")];
        merge_commerces(
            &mut manual,
            &[
                Commerce {
                    id: 1,
                    nom: "MAXI".to_string(),
                    adresse: Some("123 rue Principale".to_string()),
                    site_web: None,
                },
                Commerce {
                    id: 2,
                    nom: "Metro".to_string(),
                    adresse: None,
                    site_web: None,
                },
            ],
        );
        assert_eq!(manual.len(), 3);
        assert_eq!(manual[0].name, "MAXI");
        assert_eq!(manual[0].address, "123 rue Principale");
        assert_eq!(manual[2].name, "Metro");
    }

    #[test]
    fn renaming_a_store_moves_its_flyer() {
        let mut manual = vec![make_store("Maxi"), make_store("Iga")];
        let mut flyers = FlyerData::new();
        flyers.insert("Maxi".to_string(), FlyerContent { categories: Vec::new() });

        edit_store(&mut manual, &mut flyers, "Maxi", "Maxi Plus", "", "").unwrap();
        assert_eq!(manual[0].name, "Maxi Plus");
        assert_eq!(manual[0].website, "#");
        assert!(flyers.contains_key("Maxi Plus"));
        assert!(!flyers.contains_key("Maxi"));

        let err = edit_store(&mut manual, &mut flyers, "Maxi Plus", "Iga", "", "");
        assert!(err.is_err());
    }

    #[test]
    fn deleting_a_store_drops_its_flyer() {
        let mut manual = vec![make_store("Maxi")];
        let mut flyers = FlyerData::new();
        flyers.insert("Maxi".to_string(), FlyerContent { categories: Vec::new() });

        delete_store(&mut manual, &mut flyers, "Maxi");
        assert!(manual.is_empty());
        assert!(flyers.is_empty());
    }

    #[test]
    fn flyer_lookup_ignores_case_and_spacing() {
        let mut flyers = FlyerData::new();
        flyers.insert(" Maxi ".to_string(), FlyerContent { categories: Vec::new() });
        assert_eq!(flyer_key_for(&flyers, "maxi"), Some(" Maxi ".to_string()));
        assert_eq!(flyer_key_for(&flyers, "iga"), None);
    }

    #[test]
    fn flyer_json_must_be_an_object() {
        assert!(parse_flyer_json(r#"{"Maxi": {"categories": []}}"#).is_ok());
        assert!(parse_flyer_json("[1, 2]").is_err());
        assert!(parse_flyer_json("pas du json").is_err());
    }
}
