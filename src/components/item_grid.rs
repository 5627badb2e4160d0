//! Item Grid Component

use leptos::prelude::*;

use crate::store::{store_is_item_selected, store_items, store_toggle_item, use_create_point_store};

/// Clickable grid of collectible items; selected ones are highlighted
#[component]
pub fn ItemGrid() -> impl IntoView {
    let store = use_create_point_store();

    view! {
        <ul class="items-grid">
            {move || store_items(&store).into_iter().map(|item| {
                let id = item.id;
                view! {
                    <li
                        class=move || if store_is_item_selected(&store, id) { "selected" } else { "" }
                        on:click=move |_| store_toggle_item(&store, id)
                    >
                        <img src=item.image_url alt=item.title.clone() />
                        <span>{item.title}</span>
                    </li>
                }
            }).collect_view()}
        </ul>
    }
}
