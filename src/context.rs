//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

/// Top-level screens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    CreatePoint,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Screen currently shown - read
    pub page: ReadSignal<Page>,
    /// Screen currently shown - write
    set_page: WriteSignal<Page>,
}

impl AppContext {
    pub fn new(page: (ReadSignal<Page>, WriteSignal<Page>)) -> Self {
        Self {
            page: page.0,
            set_page: page.1,
        }
    }

    /// Switch to another screen
    pub fn navigate(&self, page: Page) {
        web_sys::console::log_1(&format!("[APP] Navigate to {:?}", page).into());
        self.set_page.set(page);
    }
}
