//! Recipe Prompt Widget
//!
//! Builds the recipe prompt from the checked inventory rows, optionally
//! mixing in the cached flyer deals and cooking constraints.

use leptos::prelude::*;

use crate::components::CopyButton;
use crate::prompts::{self, RecipePromptOptions};
use crate::store::{self, use_app_store, AppStateStoreFields};

#[component]
pub fn RecipePromptWidget() -> impl IntoView {
    let store = use_app_store();

    let (use_flyer, set_use_flyer) = signal(false);
    let (include_extra, set_include_extra) = signal(false);
    let (no_oven, set_no_oven) = signal(false);
    let (no_cook, set_no_cook) = signal(false);
    let (quick, set_quick) = signal(false);
    let (output, set_output) = signal(String::new());
    let (status, set_status) = signal(String::new());

    let generate = move |_| {
        let included = store::included_names(&store.inventory().get());
        let opts = RecipePromptOptions {
            use_flyer_deals: use_flyer.get(),
            include_extra: include_extra.get(),
            no_oven: no_oven.get(),
            no_cook: no_cook.get(),
            quick: quick.get(),
        };
        if included.is_empty() && !opts.use_flyer_deals {
            set_status.set(
                "Veuillez sélectionner au moins un ingrédient de votre inventaire ou cocher \
                 l'option pour utiliser les articles en rabais."
                    .to_string(),
            );
            return;
        }
        let flyer_names = if opts.use_flyer_deals {
            prompts::flyer_item_names(&store.flyers().get())
        } else {
            Vec::new()
        };
        set_status.set(String::new());
        set_output.set(prompts::recipe_prompt(&included, &flyer_names, &opts));
    };

    view! {
        <div class="recipe-prompt-widget">
            <div class="prompt-options">
                <label>
                    <input
                        type="checkbox"
                        id="useFlyerDeals"
                        prop:checked=move || use_flyer.get()
                        on:change=move |ev| set_use_flyer.set(event_target_checked(&ev))
                    />
                    "Utiliser les articles en rabais"
                </label>
                <label>
                    <input
                        type="checkbox"
                        id="includeExtraIngredients"
                        prop:checked=move || include_extra.get()
                        on:change=move |ev| set_include_extra.set(event_target_checked(&ev))
                    />
                    "Permettre 1-2 ingrédients supplémentaires"
                </label>
                <label>
                    <input
                        type="checkbox"
                        id="recipeCatNoOven"
                        prop:checked=move || no_oven.get()
                        on:change=move |ev| set_no_oven.set(event_target_checked(&ev))
                    />
                    "Sans four"
                </label>
                <label>
                    <input
                        type="checkbox"
                        id="recipeCatNoCook"
                        prop:checked=move || no_cook.get()
                        on:change=move |ev| set_no_cook.set(event_target_checked(&ev))
                    />
                    "Sans cuisson"
                </label>
                <label>
                    <input
                        type="checkbox"
                        id="recipeCatQuick"
                        prop:checked=move || quick.get()
                        on:change=move |ev| set_quick.set(event_target_checked(&ev))
                    />
                    "Rapide (moins de 30 minutes)"
                </label>
            </div>

            <button id="generate-prompt-btn" class="btn btn-primary" on:click=generate>
                "Générer le prompt de recette"
            </button>

            <Show when=move || !status.get().is_empty()>
                <p class="status-line">{move || status.get()}</p>
            </Show>

            <Show when=move || !output.get().is_empty()>
                <div class="prompt-output">
                    <textarea readonly prop:value=move || output.get()></textarea>
                    <CopyButton label="Copier le prompt" text=output />
                </div>
            </Show>
        </div>
    }
}
