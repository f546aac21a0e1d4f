//! Recipe Book Widget
//!
//! Recipe cards opening a view modal (ingredients, Markdown-rendered
//! instructions, batch add-to-list) and a create/edit form modal with a
//! paste-JSON quick fill.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::api::recipes::RecipePayload;
use crate::context::AppContext;
use crate::markdown;
use crate::models::Recipe;
use crate::store::{self, store_remove_recipe, use_app_store, AppStateStoreFields};

#[component]
pub fn RecipesWidget() -> impl IntoView {
    let store = use_app_store();

    let (status, set_status) = signal(String::new());
    let (viewing, set_viewing) = signal(None::<u32>);
    let (form_open, set_form_open) = signal(false);
    let (editing_id, set_editing_id) = signal(None::<u32>);

    let cards_view = move || {
        let recipes = store.recipes().get();
        if recipes.is_empty() {
            return view! { <p class="placeholder-text">"Aucune recette sauvegardée."</p> }
                .into_any();
        }
        recipes
            .into_iter()
            .map(|recipe| {
                let id = recipe.id;
                view! {
                    <div class="recipe-card" on:click=move |_| set_viewing.set(Some(id))>
                        <h5 class="card-title">{recipe.name}</h5>
                    </div>
                }
            })
            .collect_view()
            .into_any()
    };

    let view_modal = move || {
        viewing
            .get()
            .and_then(|id| store.recipes().get().iter().find(|r| r.id == id).cloned())
            .map(|recipe| {
                view! {
                    <RecipeViewModal
                        recipe=recipe
                        on_close=Callback::new(move |_| set_viewing.set(None))
                        on_edit=Callback::new(move |id: u32| {
                            set_viewing.set(None);
                            set_editing_id.set(Some(id));
                            set_form_open.set(true);
                        })
                        on_status=Callback::new(move |message: String| set_status.set(message))
                    />
                }
            })
    };

    let form_modal = move || {
        form_open.get().then(|| {
            let editing = editing_id
                .get()
                .and_then(|id| store.recipes().get().iter().find(|r| r.id == id).cloned());
            view! {
                <RecipeFormModal
                    editing=editing
                    on_close=Callback::new(move |_| set_form_open.set(false))
                />
            }
        })
    };

    view! {
        <div class="recipes-widget">
            <Show when=move || !status.get().is_empty()>
                <p class="status-line">{move || status.get()}</p>
            </Show>

            <div id="recipe-list-display" class="recipe-cards">{cards_view}</div>

            <button
                id="show-add-recipe-btn"
                class="btn btn-primary"
                on:click=move |_| {
                    set_editing_id.set(None);
                    set_form_open.set(true);
                }
            >
                "Ajouter une Recette"
            </button>

            {view_modal}
            {form_modal}
        </div>
    }
}

#[component]
fn RecipeViewModal(
    recipe: Recipe,
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_edit: Callback<u32>,
    #[prop(into)] on_status: Callback<String>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let recipe_id = recipe.id;
    let (maximized, set_maximized) = signal(false);
    let (confirm_delete, set_confirm_delete) = signal(false);

    let ingredients_text = recipe.ingredients.clone();
    let ingredients_display = if recipe.ingredients.trim().is_empty() {
        "N/A".to_string()
    } else {
        recipe.ingredients.clone()
    };
    let instructions_html = if recipe.instructions.trim().is_empty() {
        "<p>N/A</p>".to_string()
    } else {
        markdown::parse_markdown(&recipe.instructions)
    };
    let comments_display = if recipe.comments.trim().is_empty() {
        "N/A".to_string()
    } else {
        recipe.comments.clone()
    };

    let add_ingredients = move |_| {
        if ingredients_text.trim().is_empty() {
            on_status.run("Cette recette n'a pas d'ingrédients à ajouter.".to_string());
            return;
        }
        let names = store::ingredient_names(&ingredients_text);
        if names.is_empty() {
            on_status.run("Aucun ingrédient trouvé dans cette recette.".to_string());
            return;
        }
        let (new_names, _skipped) = store::partition_new_names(&names, &store.shopping().get());
        if new_names.is_empty() {
            on_status.run(
                "Tous les ingrédients de cette recette sont déjà dans votre liste d'épicerie."
                    .to_string(),
            );
            on_close.run(());
            return;
        }
        spawn_local(async move {
            let mut added = 0;
            let mut failed = 0;
            for name in &new_names {
                match api::shopping::add_shopping_item(name, "1").await {
                    Ok(_) => added += 1,
                    Err(_) => failed += 1,
                }
            }
            if failed > 0 {
                on_status.run("Une erreur est survenue lors de l'ajout des ingrédients.".to_string());
            } else {
                on_status.run(format!("{added} ingrédient(s) ont été ajouté(s) avec succès."));
            }
            ctx.reload();
            on_close.run(());
        });
    };

    let delete_recipe = move |_| {
        if !confirm_delete.get() {
            set_confirm_delete.set(true);
            return;
        }
        spawn_local(async move {
            match api::recipes::delete_recipe(recipe_id).await {
                Ok(()) => {
                    store_remove_recipe(&store, recipe_id);
                    on_close.run(());
                }
                Err(e) => {
                    web_sys::console::warn_1(&format!("[API] suppression refusée: {e}").into());
                }
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div
                class=move || {
                    if maximized.get() {
                        "modal-content maximized"
                    } else {
                        "modal-content"
                    }
                }
                on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
            >
                <div class="modal-header">
                    <h2 id="recipe-view-title">{recipe.name.clone()}</h2>
                    <div class="modal-header-buttons">
                        <button
                            class="btn-maximize"
                            title="Agrandir / Restaurer"
                            on:click=move |_| set_maximized.update(|m| *m = !*m)
                        >
                            "⛶"
                        </button>
                        <button class="btn-close-modal" on:click=move |_| on_close.run(())>
                            "×"
                        </button>
                    </div>
                </div>
                <div class="modal-body">
                    <h3>"Ingrédients"</h3>
                    <pre id="recipe-view-ingredients">{ingredients_display}</pre>
                    <h3>"Instructions"</h3>
                    <div id="recipe-view-instructions" inner_html=instructions_html></div>
                    <h3>"Notes"</h3>
                    <p id="recipe-view-comments">{comments_display}</p>
                </div>
                <div class="modal-footer" id="recipe-view-footer">
                    <button class="btn btn-success" on:click=add_ingredients>
                        "Ajouter ingrédients à la liste"
                    </button>
                    <button class="btn btn-warning" on:click=move |_| on_edit.run(recipe_id)>
                        "Éditer"
                    </button>
                    <button class="btn btn-danger" on:click=delete_recipe>
                        {move || {
                            if confirm_delete.get() {
                                "Confirmer la suppression ?"
                            } else {
                                "Supprimer"
                            }
                        }}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn RecipeFormModal(editing: Option<Recipe>, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let editing_id = editing.as_ref().map(|recipe| recipe.id);
    let title = if editing.is_some() {
        "Éditer la recette"
    } else {
        "Ajouter une Recette"
    };

    let (initial_name, initial_ingredients, initial_instructions, initial_comments) =
        match editing {
            Some(recipe) => (recipe.name, recipe.ingredients, recipe.instructions, recipe.comments),
            None => Default::default(),
        };
    let (name, set_name) = signal(initial_name);
    let (ingredients, set_ingredients) = signal(initial_ingredients);
    let (instructions, set_instructions) = signal(initial_instructions);
    let (comments, set_comments) = signal(initial_comments);
    let (json_input, set_json_input) = signal(String::new());
    let (status, set_status) = signal(String::new());

    let quick_fill = move |_| {
        let text = json_input.get();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            set_status.set("Veuillez coller le texte JSON dans la zone prévue.".to_string());
            return;
        }
        match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(value) => {
                let field = |key: &str| {
                    value
                        .get(key)
                        .and_then(|v| v.as_str())
                        .unwrap_or("")
                        .to_string()
                };
                let name_value = field("name");
                let ingredients_value = field("ingredients");
                let instructions_value = field("instructions");
                if name_value.is_empty()
                    || ingredients_value.is_empty()
                    || instructions_value.is_empty()
                {
                    set_status.set(
                        "Erreur lors de l'importation : Le JSON est incomplet. Les clés \
                         'name', 'ingredients', et 'instructions' sont requises."
                            .to_string(),
                    );
                    return;
                }
                set_name.set(name_value);
                set_ingredients.set(ingredients_value);
                set_instructions.set(instructions_value);
                set_comments.set(field("comments"));
                set_status.set("Les champs ont été remplis avec succès !".to_string());
            }
            Err(e) => set_status.set(format!("Erreur lors de l'importation : {e}")),
        }
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name_value = name.get().trim().to_string();
        if name_value.is_empty() {
            set_status.set("Le nom de la recette est requis.".to_string());
            return;
        }
        let ingredients_value = ingredients.get();
        let instructions_value = instructions.get();
        let comments_value = comments.get();
        spawn_local(async move {
            let payload = RecipePayload {
                name: &name_value,
                ingredients: &ingredients_value,
                instructions: &instructions_value,
                comments: &comments_value,
            };
            let result = match editing_id {
                Some(id) => api::recipes::update_recipe(id, &payload).await,
                None => api::recipes::create_recipe(&payload).await,
            };
            match result {
                Ok(_) => {
                    on_close.run(());
                    ctx.reload();
                }
                Err(e) => set_status.set(format!("Erreur lors de la sauvegarde : {e}")),
            }
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <div class="modal-content" on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()>
                <div class="modal-header">
                    <h2 id="recipe-modal-title">{title}</h2>
                    <button class="btn-close-modal" on:click=move |_| on_close.run(())>
                        "×"
                    </button>
                </div>
                <form class="modal-body" on:submit=submit>
                    <div class="quick-fill">
                        <textarea
                            id="recipe-json-input"
                            placeholder="Collez ici le JSON d'une recette pour remplir les champs"
                            prop:value=move || json_input.get()
                            on:input=move |ev| set_json_input.set(event_target_value(&ev))
                        ></textarea>
                        <button type="button" class="btn btn-small" on:click=quick_fill>
                            "Remplir depuis le JSON"
                        </button>
                    </div>

                    <Show when=move || !status.get().is_empty()>
                        <p class="status-line">{move || status.get()}</p>
                    </Show>

                    <label for="recipe-name">"Nom"</label>
                    <input
                        type="text"
                        id="recipe-name"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                    <label for="recipe-ingredients">"Ingrédients (un par ligne)"</label>
                    <textarea
                        id="recipe-ingredients"
                        prop:value=move || ingredients.get()
                        on:input=move |ev| set_ingredients.set(event_target_value(&ev))
                    ></textarea>
                    <label for="recipe-instructions">"Instructions"</label>
                    <textarea
                        id="recipe-instructions"
                        prop:value=move || instructions.get()
                        on:input=move |ev| set_instructions.set(event_target_value(&ev))
                    ></textarea>
                    <label for="recipe-comments">"Notes"</label>
                    <textarea
                        id="recipe-comments"
                        prop:value=move || comments.get()
                        on:input=move |ev| set_comments.set(event_target_value(&ev))
                    ></textarea>

                    <button type="submit" class="btn btn-primary">"Sauvegarder"</button>
                </form>
            </div>
        </div>
    }
}
