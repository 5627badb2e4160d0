//! Home Component

use leptos::prelude::*;

use crate::context::{AppContext, Page};

#[component]
pub fn Home() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <div class="home">
            <header>
                <span class="logo">"Ecoleta"</span>
            </header>
            <main>
                <h1>"Seu marketplace de coleta de resíduos."</h1>
                <p>"Ajudamos pessoas a encontrarem pontos de coleta de forma eficiente."</p>
                <button type="button" class="cta" on:click=move |_| ctx.navigate(Page::CreatePoint)>
                    "Cadastre um ponto de coleta"
                </button>
            </main>
        </div>
    }
}
