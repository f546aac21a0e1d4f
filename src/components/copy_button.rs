//! Copy Button
//!
//! Clipboard copy with the transient "Copié !" label.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;

const COPIED_RESET_MS: u32 = 2000;

#[component]
pub fn CopyButton(#[prop(into)] label: String, #[prop(into)] text: Signal<String>) -> impl IntoView {
    let (copied, set_copied) = signal(false);
    let idle_label = label.clone();

    let copy = move |_| {
        let value = text.get();
        spawn_local(async move {
            let Some(window) = web_sys::window() else {
                return;
            };
            let clipboard = window.navigator().clipboard();
            if JsFuture::from(clipboard.write_text(&value)).await.is_ok() {
                set_copied.set(true);
                TimeoutFuture::new(COPIED_RESET_MS).await;
                set_copied.set(false);
            } else {
                web_sys::console::warn_1(&"[API] presse-papiers indisponible".into());
            }
        });
    };

    view! {
        <button class="btn btn-copy" on:click=copy>
            {move || if copied.get() { "Copié !".to_string() } else { idle_label.clone() }}
        </button>
    }
}
