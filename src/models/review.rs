// src/models/review.rs
use serde::{Deserialize, Serialize};
use crate::error::ValidationError;

pub const MAX_RATING: f64 = 5.0;
pub const DEFAULT_RATING: f64 = 5.0;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub restaurant_id: Option<i64>,
    pub user_name: String,
    pub rating: f64,                 // 0-5 in 0.5 steps
    #[serde(rename = "review")]
    pub text: String,
}

/// What the user is typing into the review form.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDraft {
    pub user_name: String,
    pub rating: f64,
    pub text: String,
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self {
            user_name: String::new(),
            rating: DEFAULT_RATING,
            text: String::new(),
        }
    }
}

impl ReviewDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.user_name.trim().is_empty() {
            return Err(ValidationError::EmptyUserName);
        }
        if !is_valid_rating(self.rating) {
            return Err(ValidationError::InvalidRating);
        }
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyReviewText);
        }
        Ok(())
    }

    pub fn into_submission(self, restaurant_id: i64) -> ReviewSubmission {
        ReviewSubmission {
            restaurant_id,
            user_name: self.user_name,
            rating: self.rating,
            review: self.text,
        }
    }
}

/// Body of `POST /api/reviews`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReviewSubmission {
    pub restaurant_id: i64,
    pub user_name: String,
    pub rating: f64,
    pub review: String,
}

pub fn is_valid_rating(rating: f64) -> bool {
    (0.0..=MAX_RATING).contains(&rating) && (rating * 2.0).fract() == 0.0
}
