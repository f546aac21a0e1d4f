//! Assistant Épicerie Frontend App
//!
//! Root component: provides the global store, the app context and the
//! tutorial handle, then switches between login and the two dashboards.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{AssistantPage, HeaderBar, LoginPage, OptimiseurPage, TutorialLayer};
use crate::context::{AppContext, Page};
use crate::storage;
use crate::store::AppState;
use crate::tutorial::TutorialHandle;

#[component]
pub fn App() -> impl IntoView {
    // A stored token resumes the session directly on the assistant page
    let initial_page = if storage::auth_token().is_some() {
        Page::Assistant
    } else {
        Page::Login
    };

    let reload = signal(0u32);
    let page = signal(initial_page);
    let username = signal(storage::username());

    provide_context(Store::new(AppState::default()));
    provide_context(AppContext::new(reload, page, username));
    provide_context(TutorialHandle::new());

    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <div class="app-layout">
            {move || match ctx.page.get() {
                Page::Login => view! { <LoginPage/> }.into_any(),
                Page::Assistant => {
                    view! {
                        <HeaderBar/>
                        <AssistantPage/>
                    }
                        .into_any()
                }
                Page::Optimiseur => {
                    view! {
                        <HeaderBar/>
                        <OptimiseurPage/>
                    }
                        .into_any()
                }
            }}
            <TutorialLayer/>
        </div>
    }
}
