//! Shopping List Prompt Widget
//!
//! Builds the missing-ingredients prompt from the meal plan and the
//! inventory, ready to paste into an AI assistant.

use leptos::prelude::*;

use crate::components::CopyButton;
use crate::prompts;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn GenerateListWidget() -> impl IntoView {
    let store = use_app_store();

    let (num_people, set_num_people) = signal("2".to_string());
    let (meals, set_meals) = signal(String::new());
    let (output, set_output) = signal(String::new());
    let (status, set_status) = signal(String::new());

    let generate = move |_| {
        let meals_value = meals.get().trim().to_string();
        if meals_value.is_empty() {
            set_status.set("Veuillez entrer au moins un repas à préparer.".to_string());
            return;
        }
        let people = num_people.get().trim().parse::<u32>().unwrap_or(0);
        if people < 1 {
            set_status.set("Veuillez entrer un nombre de personnes valide.".to_string());
            return;
        }
        set_status.set(String::new());
        set_output.set(prompts::shopping_list_prompt(
            people,
            &meals_value,
            &store.inventory().get(),
        ));
    };

    view! {
        <div class="generate-list-widget">
            <label for="numPeople">"Nombre de personnes"</label>
            <input
                type="number"
                id="numPeople"
                min="1"
                prop:value=move || num_people.get()
                on:input=move |ev| set_num_people.set(event_target_value(&ev))
            />

            <label for="mealsList">"Repas à préparer (un par ligne)"</label>
            <textarea
                id="mealsList"
                placeholder="Ex: Lasagne végétarienne"
                prop:value=move || meals.get()
                on:input=move |ev| set_meals.set(event_target_value(&ev))
            ></textarea>

            <button id="generateShoppingListBtn" class="btn btn-primary" on:click=generate>
                "Générer le prompt"
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
