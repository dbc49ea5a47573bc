//! This module provides an in-memory stand-in for the nowhey backend, so the
//! search, assessment and review flows can run without a network.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use futures::channel::oneshot;
use nowhey::api::RestaurantApi;
use nowhey::error::AppError;
use nowhey::models::assessment::Assessment;
use nowhey::models::place::{GeoPoint, PlaceCandidate};
use nowhey::models::review::{Review, ReviewSubmission};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Search { query: String, location: Option<GeoPoint> },
    Assess(String),
    ListReviews(String),
    SubmitReview(ReviewSubmission),
}

type PlacesResult = Result<Vec<PlaceCandidate>, AppError>;

#[derive(Default)]
pub struct MockApi {
    calls: RefCell<Vec<Call>>,
    places: RefCell<Option<PlacesResult>>,
    search_gates: RefCell<HashMap<String, oneshot::Receiver<PlacesResult>>>,
    assessment: RefCell<Option<Result<Assessment, AppError>>>,
    reviews: RefCell<Vec<Review>>,
    list_error: RefCell<Option<AppError>>,
    submit_error: RefCell<Option<AppError>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_places(self, places: PlacesResult) -> Self {
        *self.places.borrow_mut() = Some(places);
        self
    }

    pub fn with_assessment(self, assessment: Result<Assessment, AppError>) -> Self {
        *self.assessment.borrow_mut() = Some(assessment);
        self
    }

    pub fn with_reviews(self, reviews: Vec<Review>) -> Self {
        *self.reviews.borrow_mut() = reviews;
        self
    }

    pub fn failing_list(self, err: AppError) -> Self {
        *self.list_error.borrow_mut() = Some(err);
        self
    }

    pub fn failing_submit(self, err: AppError) -> Self {
        *self.submit_error.borrow_mut() = Some(err);
        self
    }

    /// Holds the response for `query` until the returned sender fires.
    pub fn gate_search(&self, query: &str) -> oneshot::Sender<PlacesResult> {
        let (tx, rx) = oneshot::channel();
        self.search_gates.borrow_mut().insert(query.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| matches(call)).count()
    }
}

pub fn candidate(id: &str, name: &str) -> PlaceCandidate {
    PlaceCandidate {
        id: id.to_string(),
        display_name: name.to_string(),
        formatted_address: format!("{} Green St", id.len()),
    }
}

pub fn assessment_with_id(id: Option<i64>) -> Assessment {
    Assessment {
        id,
        score: 8.0,
        summary: "Plenty of oat milk and vegan bowls.".to_string(),
        dairy_free_options: vec!["Oat latte".to_string(), "Vegan bowl".to_string()],
    }
}

#[async_trait(?Send)]
impl RestaurantApi for MockApi {
    async fn search_places(
        &self,
        query: &str,
        location: Option<GeoPoint>,
    ) -> Result<Vec<PlaceCandidate>, AppError> {
        self.calls.borrow_mut().push(Call::Search {
            query: query.to_string(),
            location,
        });
        let gate = self.search_gates.borrow_mut().remove(query);
        if let Some(gate) = gate {
            return gate
                .await
                .unwrap_or_else(|_| Err(AppError::Network("gate dropped".into())));
        }
        self.places.borrow().clone().unwrap_or(Ok(Vec::new()))
    }

    async fn assess(&self, restaurant_name: &str) -> Result<Assessment, AppError> {
        self.calls
            .borrow_mut()
            .push(Call::Assess(restaurant_name.to_string()));
        self.assessment.borrow().clone().unwrap_or(Err(AppError::Server {
            status: 500,
            detail: None,
        }))
    }

    async fn list_reviews(&self, restaurant_name: &str) -> Result<Vec<Review>, AppError> {
        self.calls
            .borrow_mut()
            .push(Call::ListReviews(restaurant_name.to_string()));
        if let Some(err) = self.list_error.borrow().clone() {
            return Err(err);
        }
        Ok(self.reviews.borrow().clone())
    }

    async fn submit_review(&self, submission: &ReviewSubmission) -> Result<(), AppError> {
        self.calls
            .borrow_mut()
            .push(Call::SubmitReview(submission.clone()));
        if let Some(err) = self.submit_error.borrow().clone() {
            return Err(err);
        }
        let mut reviews = self.reviews.borrow_mut();
        let id = reviews.len() as i64 + 1;
        // Newest first, like the backend's `created_at desc`.
        reviews.insert(
            0,
            Review {
                id: Some(id),
                restaurant_id: Some(submission.restaurant_id),
                user_name: submission.user_name.clone(),
                rating: submission.rating,
                text: submission.review.clone(),
            },
        );
        Ok(())
    }
}
