//! Data behind the restaurant detail page.

use leptos::logging::error;

use crate::api::RestaurantApi;
use crate::assessment::assess;
use crate::error::AppError;
use crate::models::assessment::Assessment;
use crate::models::review::{Review, ReviewDraft};
use crate::reviews::{list_reviews, submit_error_message};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Ready(DetailData),
}

impl DetailState {
    pub fn is_ready(&self) -> bool {
        matches!(self, DetailState::Ready(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailData {
    pub assessment: Assessment,
    pub reviews: Vec<Review>,
}

/// Fetches the assessment and the review list concurrently. Each half
/// degrades on its own, so this always ends up `Ready`.
pub async fn load_detail(api: &dyn RestaurantApi, place_key: &str) -> DetailData {
    let (assessment, reviews) = futures::join!(assess(api, place_key), list_reviews(api, place_key));
    DetailData { assessment, reviews }
}

/// Route parameters arrive percent-encoded; fall back to the raw text when
/// they don't decode.
pub fn decode_place_key(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// The name the backend knows this restaurant by. A picked candidate carries
/// its display name in `?name=`; a raw search has only the route segment.
pub fn restaurant_key(route_id: Option<&str>, name: Option<&str>) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.to_string(),
        None => route_id.map(decode_place_key).unwrap_or_default(),
    }
}

/// Whether a result fetched for `requested` still belongs on the page now
/// showing `route_id` / `name`.
pub fn still_showing(requested: &str, route_id: Option<&str>, name: Option<&str>) -> bool {
    restaurant_key(route_id, name) == requested
}

/// Folds a finished submit into the page. Success swaps in the refreshed
/// list and resets the draft; failure leaves the draft alone and returns the
/// message for the form.
pub fn apply_submit_result(
    state: &mut DetailState,
    draft: &mut ReviewDraft,
    result: Result<Vec<Review>, AppError>,
) -> Option<String> {
    match result {
        Ok(refreshed) => {
            if let DetailState::Ready(data) = state {
                data.reviews = refreshed;
            }
            *draft = ReviewDraft::default();
            None
        }
        Err(err) => {
            if !matches!(err, AppError::Validation(_)) {
                error!("[REVIEWS] Error submitting review: {}", err);
            }
            Some(submit_error_message(&err))
        }
    }
}

/// Path for the detail view of `place_id`, carrying the display name along
/// for the heading.
pub fn detail_path(place_id: &str, display_name: Option<&str>) -> String {
    let mut path = format!("/restaurant/{}", urlencoding::encode(place_id));
    if let Some(name) = display_name.filter(|n| !n.trim().is_empty()) {
        path.push_str("?name=");
        path.push_str(&urlencoding::encode(name));
    }
    path
}
