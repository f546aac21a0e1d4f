//! Guided Tour Engine
//!
//! Plays scripted tours: a fake cursor travels to each target element, a
//! tooltip explains it, and type/click actions animate on the real inputs.
//! All visual state lives in signals; `TutorialLayer` renders from them.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlElement, HtmlInputElement, HtmlTextAreaElement, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::error::{AppError, Result};

const SCROLL_SETTLE_MS: u32 = 600;
const SCROLL_RETRY_MS: u32 = 100;
const CURSOR_TRAVEL_MS: u32 = 800;
const TYPE_CHAR_MS: u32 = 100;
const TYPE_PAUSE_MS: u32 = 600;
const CLICK_PULSE_MS: u32 = 300;
const DEFAULT_WAIT_AFTER_MS: u32 = 1000;

/// One scripted tour step
#[derive(Debug, Clone, PartialEq)]
pub struct TutorialStep {
    /// CSS selector of the element the cursor travels to
    pub selector: &'static str,
    /// Tooltip text; empty hides the tooltip for this step
    pub text: &'static str,
    pub action: StepAction,
    /// Extra pause after the step; None means the default second
    pub wait_after: Option<u32>,
}

impl TutorialStep {
    pub fn show(selector: &'static str, text: &'static str) -> Self {
        Self {
            selector,
            text,
            action: StepAction::None,
            wait_after: None,
        }
    }

    pub fn typing(selector: &'static str, text: &'static str, value: &'static str) -> Self {
        Self {
            selector,
            text,
            action: StepAction::Type(value),
            wait_after: None,
        }
    }

    pub fn click(selector: &'static str, text: &'static str) -> Self {
        Self {
            selector,
            text,
            action: StepAction::Click { real: false },
            wait_after: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepAction {
    None,
    /// Fake-typing into an input; the previous value is restored afterwards
    Type(&'static str),
    /// Cursor pulse; `real` also fires an actual click on the element
    Click { real: bool },
}

/// Rendered state of the fake cursor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorState {
    pub x: f64,
    pub y: f64,
    pub visible: bool,
    pub clicking: bool,
}

/// Rendered state of the tooltip bubble
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipState {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub visible: bool,
}

/// Signal bundle driving the tutorial layer. Create once, provide via
/// context.
#[derive(Clone, Copy)]
pub struct TutorialHandle {
    pub playing: ReadSignal<bool>,
    set_playing: WriteSignal<bool>,
    pub cursor: ReadSignal<CursorState>,
    set_cursor: WriteSignal<CursorState>,
    pub tooltip: ReadSignal<TooltipState>,
    set_tooltip: WriteSignal<TooltipState>,
}

impl TutorialHandle {
    pub fn new() -> Self {
        let (playing, set_playing) = signal(false);
        let (cursor, set_cursor) = signal(CursorState::default());
        let (tooltip, set_tooltip) = signal(TooltipState::default());
        Self {
            playing,
            set_playing,
            cursor,
            set_cursor,
            tooltip,
            set_tooltip,
        }
    }

    /// Starts a tour unless one is already running
    pub fn start(&self, steps: Vec<TutorialStep>) {
        if self.playing.get_untracked() {
            return;
        }
        let handle = *self;
        handle.set_playing.set(true);

        // Cursor opens centered, tooltip hidden
        let (w, h) = viewport_size();
        handle.set_cursor.set(CursorState {
            x: w / 2.0,
            y: h / 2.0,
            visible: true,
            clicking: false,
        });
        handle.set_tooltip.set(TooltipState::default());

        spawn_local(async move {
            for step in steps {
                if !handle.playing.get_untracked() {
                    break;
                }
                if let Err(e) = handle.perform_step(&step).await {
                    web_sys::console::warn_1(&format!("[TUTO] étape interrompue: {e}").into());
                    break;
                }
            }
            handle.stop();
        });
    }

    /// Ends the tour and clears every visual
    pub fn stop(&self) {
        self.set_playing.set(false);
        self.set_cursor.update(|c| {
            c.visible = false;
            c.clicking = false;
        });
        self.set_tooltip.update(|t| t.visible = false);
        clear_focus_marks();
    }

    async fn perform_step(&self, step: &TutorialStep) -> Result<()> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| AppError::MissingElement("document".to_string()))?;
        let el = document
            .query_selector(step.selector)
            .ok()
            .flatten()
            .ok_or_else(|| AppError::MissingElement(step.selector.to_string()))?;

        scroll_to(&el, ScrollBehavior::Smooth);
        TimeoutFuture::new(SCROLL_SETTLE_MS).await;

        // Smooth scrolling can land short inside nested scroll areas
        let rect = el.get_bounding_client_rect();
        let (vw, vh) = viewport_size();
        if rect.top() < 0.0 || rect.top() > vh || rect.left() < 0.0 || rect.left() > vw {
            scroll_to(&el, ScrollBehavior::Auto);
            TimeoutFuture::new(SCROLL_RETRY_MS).await;
        }

        let rect = el.get_bounding_client_rect();
        let target_x = rect.left() + rect.width() / 2.0;
        let target_y = rect.top() + rect.height() / 2.0;

        self.set_cursor.update(|c| {
            c.x = target_x;
            c.y = target_y;
        });

        if step.text.is_empty() {
            self.set_tooltip.update(|t| t.visible = false);
        } else {
            let (tip_x, tip_y) = tooltip_position(target_x, target_y);
            self.set_tooltip.set(TooltipState {
                text: step.text.to_string(),
                x: tip_x,
                y: tip_y,
                visible: true,
            });
        }

        TimeoutFuture::new(CURSOR_TRAVEL_MS).await;

        match &step.action {
            StepAction::None => {}
            StepAction::Type(value) => self.animate_typing(&el, value).await,
            StepAction::Click { real } => {
                self.set_cursor.update(|c| c.clicking = true);
                TimeoutFuture::new(CLICK_PULSE_MS).await;
                self.set_cursor.update(|c| c.clicking = false);
                if *real {
                    if let Some(html) = el.dyn_ref::<HtmlElement>() {
                        html.click();
                    }
                }
            }
        }

        TimeoutFuture::new(step.wait_after.unwrap_or(DEFAULT_WAIT_AFTER_MS)).await;
        Ok(())
    }

    async fn animate_typing(&self, el: &Element, value: &str) {
        let _ = el.class_list().add_1("tutorial-focus");
        let original = field_value(el);

        let mut typed = String::new();
        for c in value.chars() {
            typed.push(c);
            set_field_value(el, &typed);
            TimeoutFuture::new(TYPE_CHAR_MS).await;
        }
        TimeoutFuture::new(TYPE_PAUSE_MS).await;

        set_field_value(el, &original);
        let _ = el.class_list().remove_1("tutorial-focus");
        // Lets the input's own listeners see the restored value
        if let Ok(event) = Event::new("input") {
            let _ = el.dispatch_event(&event);
        }
    }
}

impl Default for TutorialHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Tooltip goes 60px above the cursor, or 40px below when that would leave
/// the top of the viewport
pub fn tooltip_position(target_x: f64, target_y: f64) -> (f64, f64) {
    let mut top = target_y - 60.0;
    if top < 20.0 {
        top = target_y + 40.0;
    }
    (target_x, top)
}

fn viewport_size() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (0.0, 0.0);
    };
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w, h)
}

fn scroll_to(el: &Element, behavior: ScrollBehavior) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(behavior);
    options.set_block(ScrollLogicalPosition::Center);
    options.set_inline(ScrollLogicalPosition::Center);
    el.scroll_into_view_with_scroll_into_view_options(&options);
}

fn field_value(el: &Element) -> String {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn set_field_value(el: &Element, value: &str) {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

fn clear_focus_marks() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if let Ok(marked) = document.query_selector_all(".tutorial-focus") {
        for i in 0..marked.length() {
            if let Some(el) = marked.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                let _ = el.class_list().remove_1("tutorial-focus");
            }
        }
    }
}

/// The assistant page walkthrough started by the "?" button
pub fn assistant_tour() -> Vec<TutorialStep> {
    vec![
        TutorialStep::show(
            "#inventory-widget",
            "Voici votre inventaire. Chaque article garde sa quantité et son seuil d'alerte.",
        ),
        TutorialStep::typing(
            "#itemName",
            "Ajoutez un article en tapant son nom ici.",
            "Tomates",
        ),
        TutorialStep::click(
            "#low-stock-btn",
            "Ce bouton envoie d'un coup les articles en pénurie vers la liste d'épicerie.",
        ),
        TutorialStep::show(
            "#shopping-list-widget",
            "Votre liste d'épicerie. Glissez les lignes pour les réordonner.",
        ),
        TutorialStep::show(
            "#recipe-book-widget",
            "Vos recettes. Ouvrez-en une pour envoyer ses ingrédients vers la liste.",
        ),
        TutorialStep::show(
            "#recipe-generator-widget",
            "Générez ici un prompt de recette à partir de votre inventaire.",
        ),
        TutorialStep::click(
            "#generate-prompt-btn",
            "Copiez le prompt généré dans votre assistant IA préféré. Bonne épicerie !",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tooltip_sits_above_the_target() {
        assert_eq!(tooltip_position(400.0, 300.0), (400.0, 240.0));
    }

    #[test]
    fn tooltip_flips_below_near_the_top_edge() {
        assert_eq!(tooltip_position(400.0, 50.0), (400.0, 90.0));
        // 80 - 60 = 20 is exactly the limit and stays above
        assert_eq!(tooltip_position(400.0, 80.0), (400.0, 20.0));
    }

    #[test]
    fn assistant_tour_targets_are_unique_and_non_empty() {
        let steps = assistant_tour();
        assert!(!steps.is_empty());
        for (i, step) in steps.iter().enumerate() {
            assert!(step.selector.starts_with('#'));
            assert!(steps.iter().skip(i + 1).all(|s| s.selector != step.selector));
        }
    }
}
