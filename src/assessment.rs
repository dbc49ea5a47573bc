use leptos::logging::error;

use crate::api::RestaurantApi;
use crate::models::assessment::Assessment;

/// Asks the scoring service about `place_key`. Any failure yields
/// [`Assessment::degraded`]; there is no retry.
pub async fn assess(api: &dyn RestaurantApi, place_key: &str) -> Assessment {
    match api.assess(place_key).await {
        Ok(assessment) => assessment.clamped(),
        Err(err) => {
            error!("[ASSESS] Assessment failed for '{}': {}", place_key, err);
            Assessment::degraded()
        }
    }
}
