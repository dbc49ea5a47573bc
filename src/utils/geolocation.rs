use js_sys::{Promise, Reflect};
use leptos::logging::log;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

use crate::models::place::GeoPoint;

/// Asks the browser for the user's position once. Denied permission or a
/// missing API both end up as `None`; searches then go out without lat/lng.
pub async fn current_position() -> Option<GeoPoint> {
    let geolocation = gloo_utils::window().navigator().geolocation().ok()?;

    let promise = Promise::new(&mut |resolve, reject| {
        if let Err(err) = geolocation.get_current_position_with_error_callback(&resolve, Some(&reject)) {
            let _ = reject.call1(&JsValue::NULL, &err);
        }
    });

    match JsFuture::from(promise).await {
        Ok(position) => read_coords(&position),
        Err(err) => {
            log!("[GEO] Location unavailable: {:?}", err);
            None
        }
    }
}

fn read_coords(position: &JsValue) -> Option<GeoPoint> {
    let coords = Reflect::get(position, &"coords".into()).ok()?;
    let lat = Reflect::get(&coords, &"latitude".into()).ok()?.as_f64()?;
    let lng = Reflect::get(&coords, &"longitude".into()).ok()?.as_f64()?;
    Some(GeoPoint { lat, lng })
}
