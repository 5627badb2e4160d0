//! Page Header Component

use leptos::prelude::*;

use crate::context::{AppContext, Page};

/// Logo bar with a link back to the home screen
#[component]
pub fn PageHeader() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <header class="page-header">
            <span class="logo">"Ecoleta"</span>
            <button type="button" class="back-link" on:click=move |_| ctx.navigate(Page::Home)>
                "← Voltar para a home"
            </button>
        </header>
    }
}
