//! Reading and writing reviews for one restaurant.
//!
//! After a successful submit the list is fetched again rather than appended
//! to locally, so the page always shows what the backend stored.

use leptos::logging::{error, log};

use crate::api::RestaurantApi;
use crate::error::{AppError, ValidationError};
use crate::models::assessment::Assessment;
use crate::models::review::{Review, ReviewDraft};

pub const GENERIC_SUBMIT_FAILURE: &str = "Unknown error";

/// Reviews for `restaurant_key`, newest first as the backend orders them.
/// Failures degrade to an empty list.
pub async fn list_reviews(api: &dyn RestaurantApi, restaurant_key: &str) -> Vec<Review> {
    match api.list_reviews(restaurant_key).await {
        Ok(reviews) => reviews,
        Err(err) => {
            error!("[REVIEWS] Could not load reviews for '{}': {}", restaurant_key, err);
            Vec::new()
        }
    }
}

/// Validates and posts `draft`, then re-fetches the list once.
///
/// Returns the refreshed list on success. On error nothing about the draft
/// changes, so the caller can leave the form as is.
pub async fn submit_review(
    api: &dyn RestaurantApi,
    assessment: Option<&Assessment>,
    restaurant_key: &str,
    draft: &ReviewDraft,
) -> Result<Vec<Review>, AppError> {
    let restaurant_id = assessment
        .and_then(Assessment::restaurant_id)
        .ok_or(ValidationError::MissingRestaurantId)?;
    draft.validate()?;

    let submission = draft.clone().into_submission(restaurant_id);
    api.submit_review(&submission).await?;
    log!("[REVIEWS] Review stored for restaurant {}", restaurant_id);

    Ok(list_reviews(api, restaurant_key).await)
}

/// Inline message for a failed submit.
pub fn submit_error_message(err: &AppError) -> String {
    match err {
        AppError::Validation(reason) => reason.to_string(),
        other => format!(
            "Failed to submit review: {}",
            other.detail().unwrap_or(GENERIC_SUBMIT_FAILURE)
        ),
    }
}
