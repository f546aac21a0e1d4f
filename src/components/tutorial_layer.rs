//! Tutorial Overlay Component
//!
//! Renders the guided-tour visuals (dim overlay, fake cursor, tooltip)
//! from the tutorial signal bundle. Clicking the overlay ends the tour.

use leptos::prelude::*;

use crate::tutorial::TutorialHandle;

#[component]
pub fn TutorialLayer() -> impl IntoView {
    let tutorial = use_context::<TutorialHandle>().expect("TutorialHandle should be provided");

    let cursor_style = move || {
        let c = tutorial.cursor.get();
        format!(
            "left: {}px; top: {}px; display: {};",
            c.x,
            c.y,
            if c.visible { "block" } else { "none" }
        )
    };

    let cursor_class = move || {
        if tutorial.cursor.get().clicking {
            "tutorial-cursor clicking"
        } else {
            "tutorial-cursor"
        }
    };

    let tooltip_style = move || {
        let t = tutorial.tooltip.get();
        format!(
            "left: {}px; top: {}px; display: {};",
            t.x,
            t.y,
            if t.visible { "block" } else { "none" }
        )
    };

    view! {
        <Show when=move || tutorial.playing.get()>
            <div
                class="tutorial-overlay"
                title="Cliquez pour quitter le tutoriel"
                on:click=move |_| tutorial.stop()
            ></div>
        </Show>
        <div class=cursor_class style=cursor_style></div>
        <div class="tutorial-tooltip" style=tooltip_style>
            {move || tutorial.tooltip.get().text}
        </div>
    }
}
