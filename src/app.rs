//! Ecoleta Frontend App
//!
//! Root component switching between the home and registration screens.

use leptos::prelude::*;

use crate::components::{CreatePoint, Home};
use crate::context::{AppContext, Page};

#[component]
pub fn App() -> impl IntoView {
    let (page, set_page) = signal(Page::Home);
    let ctx = AppContext::new((page, set_page));
    provide_context(ctx);

    view! {
        {move || match ctx.page.get() {
            Page::Home => view! { <Home /> }.into_any(),
            Page::CreatePoint => view! { <CreatePoint /> }.into_any(),
        }}
    }
}
