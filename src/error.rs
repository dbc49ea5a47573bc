use thiserror::Error;

/// Everything that can go wrong between the UI and its remote collaborators.
/// None of these are fatal; callers degrade to a visible, recoverable state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error("network request failed: {0}")]
    Network(String),

    #[error("server responded with status {status}")]
    Server { status: u16, detail: Option<String> },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("identity provider error: {0}")]
    SessionProvider(String),
}

impl AppError {
    /// Server-provided detail, if the backend sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            AppError::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

impl From<gloo_net::Error> for AppError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => AppError::Decode(e.to_string()),
            other => AppError::Network(other.to_string()),
        }
    }
}

/// Client-side checks that block an action before any request is made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Cannot submit review: Restaurant ID not found.")]
    MissingRestaurantId,

    #[error("Please enter your name.")]
    EmptyUserName,

    #[error("Please write a review.")]
    EmptyReviewText,

    #[error("Rating must be between 0 and 5 in steps of 0.5.")]
    InvalidRating,
}
