//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

/// Which page is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Assistant,
    Optimiseur,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to reload server data - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload server data - write
    set_reload_trigger: WriteSignal<u32>,
    /// Current page - read
    pub page: ReadSignal<Page>,
    /// Current page - write
    set_page: WriteSignal<Page>,
    /// Logged-in username, None when logged out - read
    pub username: ReadSignal<Option<String>>,
    /// Logged-in username - write
    set_username: WriteSignal<Option<String>>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        page: (ReadSignal<Page>, WriteSignal<Page>),
        username: (ReadSignal<Option<String>>, WriteSignal<Option<String>>),
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            page: page.0,
            set_page: page.1,
            username: username.0,
            set_username: username.1,
        }
    }

    /// Trigger a reload of server data on the current page
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Switch page
    pub fn go_to(&self, page: Page) {
        self.set_page.set(page);
    }

    /// Record a fresh login and land on the assistant page
    pub fn signed_in(&self, username: String) {
        self.set_username.set(Some(username));
        self.set_page.set(Page::Assistant);
    }

    /// Drop the session and return to the login page
    pub fn signed_out(&self) {
        self.set_username.set(None);
        self.set_page.set(Page::Login);
    }
}
