//! Map Picker Component
//!
//! OpenStreetMap tile view. Clicking the map moves the marker and reports
//! the clicked coordinate.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;

use crate::geo::{LatLng, MapViewport, DEFAULT_ZOOM};

const MAP_WIDTH: f64 = 600.0;
const MAP_HEIGHT: f64 = 350.0;

#[component]
pub fn MapPicker(
    /// Coordinate the view is centered on
    #[prop(into)]
    center: Signal<LatLng>,
    /// Marker position
    #[prop(into)]
    selected: Signal<LatLng>,
    #[prop(into)]
    on_select: Callback<LatLng>,
) -> impl IntoView {
    let viewport = move || MapViewport::new(center.get(), DEFAULT_ZOOM, MAP_WIDTH, MAP_HEIGHT);

    let on_click = move |ev: MouseEvent| {
        let Some(map) = ev
            .current_target()
            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        else {
            return;
        };
        let rect = map.get_bounding_client_rect();
        let x = f64::from(ev.client_x()) - rect.left();
        let y = f64::from(ev.client_y()) - rect.top();

        let view = MapViewport::new(center.get_untracked(), DEFAULT_ZOOM, MAP_WIDTH, MAP_HEIGHT);
        on_select.run(view.to_lat_lng(x, y));
    };

    view! {
        <div
            class="map"
            style=format!("width: {}px; height: {}px;", MAP_WIDTH, MAP_HEIGHT)
            on:click=on_click
        >
            {move || viewport().tiles().into_iter().map(|tile| view! {
                <img
                    class="map-tile"
                    src=tile.url()
                    alt=""
                    draggable="false"
                    style=format!("left: {}px; top: {}px;", tile.left, tile.top)
                />
            }).collect_view()}
            {move || {
                let (x, y) = viewport().to_screen(selected.get());
                view! { <div class="map-marker" style=format!("left: {}px; top: {}px;", x, y)></div> }
            }}
            <span class="map-attribution">"© OpenStreetMap contributors"</span>
        </div>
    }
}
