//! AI Prompt Builders
//!
//! Pure text generation for the copy-paste prompts: recipe ideas from the
//! inventory, missing-ingredient shopping lists, current-price lookups and
//! the flyer-to-JSON conversion instructions.

use crate::models::{FlyerData, InventoryItem};

/// Checkbox options of the recipe prompt widget
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipePromptOptions {
    pub use_flyer_deals: bool,
    pub include_extra: bool,
    pub no_oven: bool,
    pub no_cook: bool,
    pub quick: bool,
}

/// Flyer names are noisy ("Poulet, frais / Chicken (lb)"); keep the part
/// before the first separator
pub fn clean_flyer_name(name: &str) -> &str {
    let mut cut = name.len();
    for sep in [", ", " / ", " ("] {
        if let Some(i) = name.find(sep) {
            cut = cut.min(i);
        }
    }
    name[..cut].trim()
}

/// Deduplicated, cleaned item names across every cached flyer
pub fn flyer_item_names(flyers: &FlyerData) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for content in flyers.values() {
        for category in &content.categories {
            for item in &category.items {
                let clean = clean_flyer_name(&item.name);
                if !clean.is_empty() && !names.iter().any(|n| n == clean) {
                    names.push(clean.to_string());
                }
            }
        }
    }
    names
}

pub fn recipe_prompt(
    ingredients: &[String],
    flyer_names: &[String],
    opts: &RecipePromptOptions,
) -> String {
    let mut text = String::from("Propose-moi une recette simple. ");

    if !ingredients.is_empty() {
        text.push_str(&format!(
            "Voici les ingrédients que je possède : {}. ",
            ingredients.join(", ")
        ));
    }

    if opts.use_flyer_deals && !flyer_names.is_empty() {
        text.push_str(&format!(
            "Je souhaite aussi utiliser des articles en rabais cette semaine. Voici quelques exemples : {}. ",
            flyer_names.join(", ")
        ));
    }

    if opts.include_extra {
        text.push_str(
            "Tu peux suggérer 1 ou 2 ingrédients de base supplémentaires à acheter pour compléter la recette. ",
        );
    } else {
        text.push_str(
            "Essaie de créer une recette qui utilise UNIQUEMENT les ingrédients mentionnés (ceux de mon inventaire et/ou ceux en rabais). ",
        );
    }

    let mut constraints: Vec<&str> = Vec::new();
    if opts.no_cook {
        constraints.push("ne nécessite aucune cuisson (pas de four, pas de cuisinière)");
    } else if opts.no_oven {
        constraints.push("n'utilise que la cuisinière (les ronds), pas le four");
    }
    if opts.quick {
        constraints.push("doit pouvoir être préparée en moins de 30 minutes");
    }
    if !constraints.is_empty() {
        text.push_str(&format!(
            "La recette doit respecter les contraintes suivantes : {}. ",
            constraints.join(" et ")
        ));
    }

    text.push_str(
        "Présente la recette avec la liste complète des ingrédients (en indiquant clairement lesquels je dois acheter) et les instructions.",
    );
    text
}

pub fn shopping_list_prompt(num_people: u32, meals: &str, inventory: &[InventoryItem]) -> String {
    let current_inventory = inventory
        .iter()
        .map(|item| format!("{} ({})", item.name, item.quantity))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Agis comme un assistant de liste d'épicerie. Je veux préparer les repas suivants pour {num_people} personne(s) :\n\n\
         {meals}\n\n\
         Voici les ingrédients que je possède déjà dans mon inventaire :\n{current_inventory}\n\n\
         Crée une liste d'épicerie qui contient uniquement les ingrédients manquants. \
         Fournis la réponse sous forme de tableau JSON. Chaque objet doit avoir une clé \"name\" (string) et \"quantity\" (string). \
         N'ajoute aucun texte avant ou après le tableau JSON.\n\n\
         Exemple de format attendu:\n\
         [{{\"name\": \"Oignons\", \"quantity\": \"2\"}}, {{\"name\": \"Ail\", \"quantity\": \"1 tête\"}}]"
    )
}

/// Asks for current shelf prices of the still-unpriced optimized items
pub fn price_finder_prompt(item_names: &[String]) -> String {
    let quoted = item_names
        .iter()
        .map(|name| format!("    \"{name}\""))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "Agis comme un assistant d'épicerie pour le Québec, Canada.\n\
         Ta tâche est de trouver le prix courant et non en solde pour la liste d'articles suivante.\n\n\
         Fournis la réponse uniquement sous la forme d'un tableau JSON. N'inclus aucun texte, explication ou formatage avant ou après le bloc de code JSON.\n\n\
         Chaque objet dans le tableau doit avoir exactement deux clés :\n\
         1. \"name\" : une chaîne de caractères (string) qui doit correspondre EXACTEMENT au nom de l'article fourni.\n\
         2. \"price\" : un nombre (number) représentant le prix, par exemple 4.99.\n\n\
         Voici la liste des articles à rechercher :\n[\n{quoted}\n]\n\n\
         Voici un exemple de la sortie attendue :\n\
         ```json\n[\n{{\n\"name\": \"Laitue Iceberg\",\n\"price\": 2.99\n}},\n{{\n\"name\": \"Pain blanc en tranches\",\n\"price\": 3.79\n}}\n]\n```\n\n\
         Maintenant, génère le JSON pour la liste que je t'ai fournie."
    )
}

/// Instructions pasted next to a flyer so an assistant produces JSON the
/// importer accepts
pub fn flyer_import_prompt(store_name: &str) -> String {
    format!(
        "Convertis la circulaire de {store_name} en JSON.\n\n\
         Le résultat doit être un objet dont la clé est le nom du commerce et la valeur un objet \
         avec une clé \"categories\". Chaque catégorie a \"category_name\" et \"items\"; chaque \
         article a \"name\", \"brand\", \"price\" et, si le prix est du type \"2 / 5.00$\", \
         \"single_price\" avec le prix unitaire.\n\n\
         Exemple :\n\
         {{\"{store_name}\": {{\"categories\": [{{\"category_name\": \"Fruits et légumes\", \
         \"items\": [{{\"name\": \"Laitue Iceberg\", \"brand\": \"\", \"price\": \"2.99\", \"single_price\": \"\"}}]}}]}}}}\n\n\
         Réponds uniquement avec le JSON, sans texte autour."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FlyerCategory, FlyerContent, FlyerItem};

    fn make_inventory_item(name: &str, quantity: &str) -> InventoryItem {
        InventoryItem {
            id: 1,
            name: name.to_string(),
            quantity: quantity.to_string(),
            category: None,
            category_name: None,
            alert_threshold: None,
            order: 0,
            include: true,
        }
    }

    fn make_flyers(names: &[&str]) -> FlyerData {
        let items = names
            .iter()
            .map(|n| FlyerItem {
                name: n.to_string(),
                brand: None,
                price: None,
                single_price: None,
            })
            .collect();
        let mut flyers = FlyerData::new();
        flyers.insert(
            "Maxi".to_string(),
            FlyerContent {
                categories: vec![FlyerCategory {
                    category_name: Some("Épicerie".to_string()),
                    items,
                }],
            },
        );
        flyers
    }

    #[test]
    fn flyer_names_are_cleaned_and_deduplicated() {
        let flyers = make_flyers(&[
            "Poulet, frais",
            "Poulet (entier)",
            "Yogourt / Yogurt",
            "Pain",
        ]);
        assert_eq!(flyer_item_names(&flyers), vec!["Poulet", "Yogourt", "Pain"]);
    }

    #[test]
    fn recipe_prompt_lists_ingredients_and_constraints() {
        let text = recipe_prompt(
            &["Riz".to_string(), "Poulet".to_string()],
            &[],
            &RecipePromptOptions {
                no_oven: true,
                quick: true,
                ..Default::default()
            },
        );
        assert!(text.contains("Voici les ingrédients que je possède : Riz, Poulet."));
        assert!(text.contains(
            "n'utilise que la cuisinière (les ronds), pas le four et doit pouvoir être préparée en moins de 30 minutes"
        ));
        assert!(text.contains("UNIQUEMENT"));
    }

    #[test]
    fn no_cook_overrides_no_oven() {
        let text = recipe_prompt(
            &["Thon".to_string()],
            &[],
            &RecipePromptOptions {
                no_cook: true,
                no_oven: true,
                ..Default::default()
            },
        );
        assert!(text.contains("ne nécessite aucune cuisson"));
        assert!(!text.contains("les ronds"));
    }

    #[test]
    fn recipe_prompt_can_build_from_flyers_alone() {
        let text = recipe_prompt(
            &[],
            &["Tomates".to_string()],
            &RecipePromptOptions {
                use_flyer_deals: true,
                include_extra: true,
                ..Default::default()
            },
        );
        assert!(!text.contains("Voici les ingrédients que je possède"));
        assert!(text.contains("articles en rabais cette semaine"));
        assert!(text.contains("Tomates"));
        assert!(text.contains("1 ou 2 ingrédients de base supplémentaires"));
    }

    #[test]
    fn shopping_prompt_embeds_meals_people_and_inventory() {
        let inventory = vec![
            make_inventory_item("Pâtes", "2"),
            make_inventory_item("Ail", "1 tête"),
        ];
        let text = shopping_list_prompt(4, "Lasagne\nSoupe", &inventory);
        assert!(text.contains("pour 4 personne(s)"));
        assert!(text.contains("Lasagne\nSoupe"));
        assert!(text.contains("Pâtes (2), Ail (1 tête)"));
        assert!(text.contains("tableau JSON"));
    }

    #[test]
    fn price_finder_prompt_quotes_each_item() {
        let text =
            price_finder_prompt(&["Laitue Iceberg".to_string(), "Pain blanc".to_string()]);
        assert!(text.contains("    \"Laitue Iceberg\",\n    \"Pain blanc\""));
        assert!(text.contains("EXACTEMENT"));
    }
}
