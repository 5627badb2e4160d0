//! Browser Geolocation
//!
//! One-shot position lookup through `navigator.geolocation`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Position, PositionError};

use crate::geo::LatLng;

/// Ask the browser for the current position
///
/// `on_position` runs at most once. Denied permission or an unavailable
/// position is only logged.
pub fn current_position(on_position: impl FnOnce(LatLng) + 'static) {
    let geolocation = match web_sys::window().map(|w| w.navigator().geolocation()) {
        Some(Ok(geolocation)) => geolocation,
        _ => {
            web_sys::console::error_1(&"[GEO] Geolocation unavailable".into());
            return;
        }
    };

    let success = Closure::once_into_js(move |position: Position| {
        let coords = position.coords();
        match located(coords.latitude(), coords.longitude()) {
            Some(found) => {
                web_sys::console::log_1(&format!("[GEO] Position {}, {}", found.lat, found.lng).into());
                on_position(found);
            }
            None => web_sys::console::error_1(&"[GEO] Browser reported an invalid position".into()),
        }
    });
    let failure = Closure::once_into_js(move |error: PositionError| {
        web_sys::console::error_1(&format!("[GEO] {}", error.message()).into());
    });

    if let Err(e) = geolocation.get_current_position_with_error_callback(
        success.unchecked_ref(),
        Some(failure.unchecked_ref()),
    ) {
        web_sys::console::error_1(&format!("[GEO] Position request failed: {:?}", e).into());
    }
}

/// Coordinate from raw browser degrees, if they describe a real place
fn located(latitude: f64, longitude: f64) -> Option<LatLng> {
    let valid = latitude.is_finite()
        && longitude.is_finite()
        && latitude.abs() <= 90.0
        && longitude.abs() <= 180.0;
    valid.then(|| LatLng::new(latitude, longitude))
}
