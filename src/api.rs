use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use leptos::logging::log;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::error::AppError;
use crate::models::assessment::{Assessment, AssessmentRequest};
use crate::models::place::{GeoPoint, PlaceCandidate, PlacesResponse};
use crate::models::review::{Review, ReviewSubmission};

/// The nowhey backend as seen from the browser.
#[async_trait(?Send)]
pub trait RestaurantApi {
    async fn search_places(
        &self,
        query: &str,
        location: Option<GeoPoint>,
    ) -> Result<Vec<PlaceCandidate>, AppError>;

    async fn assess(&self, restaurant_name: &str) -> Result<Assessment, AppError>;

    async fn list_reviews(&self, restaurant_name: &str) -> Result<Vec<Review>, AppError>;

    async fn submit_review(&self, submission: &ReviewSubmission) -> Result<(), AppError>;
}

/// JSON-over-HTTP client built on `gloo-net`.
#[derive(Debug, Clone)]
pub struct HttpApi {
    config: ApiConfig,
}

impl HttpApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn search_url(&self, query: &str, location: Option<GeoPoint>) -> String {
        let mut url = format!(
            "{}?query={}",
            self.config.endpoint("/api/places/search"),
            urlencoding::encode(query)
        );
        if let Some(GeoPoint { lat, lng }) = location {
            url.push_str(&format!("&lat={}&lng={}", lat, lng));
        }
        url
    }

    pub fn reviews_url(&self, restaurant_name: &str) -> String {
        format!(
            "{}?restaurant_name={}",
            self.config.endpoint("/api/reviews"),
            urlencoding::encode(restaurant_name)
        )
    }
}

#[async_trait(?Send)]
impl RestaurantApi for HttpApi {
    async fn search_places(
        &self,
        query: &str,
        location: Option<GeoPoint>,
    ) -> Result<Vec<PlaceCandidate>, AppError> {
        let url = self.search_url(query, location);
        log!("[API] GET {}", url);
        let response = Request::get(&url).send().await?;
        let body: PlacesResponse = read_json(response).await?;
        Ok(body.into_candidates())
    }

    async fn assess(&self, restaurant_name: &str) -> Result<Assessment, AppError> {
        let url = self.config.endpoint("/api/assess");
        log!("[API] POST {} ({})", url, restaurant_name);
        let response = Request::post(&url)
            .json(&AssessmentRequest { restaurant_name })?
            .send()
            .await?;
        read_json(response).await
    }

    async fn list_reviews(&self, restaurant_name: &str) -> Result<Vec<Review>, AppError> {
        let url = self.reviews_url(restaurant_name);
        log!("[API] GET {}", url);
        let response = Request::get(&url).send().await?;
        read_json(response).await
    }

    async fn submit_review(&self, submission: &ReviewSubmission) -> Result<(), AppError> {
        let url = self.config.endpoint("/api/reviews");
        log!(
            "[API] POST {} - restaurant: {}, user: {}",
            url,
            submission.restaurant_id,
            submission.user_name
        );
        let response = Request::post(&url).json(submission)?.send().await?;
        ensure_ok(response).await.map(|_| ())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Pulls a human-readable `detail` out of an error body. FastAPI sends a
/// string for handled errors and a list of objects for request validation.
pub fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(text) if !text.is_empty() => Some(text),
        serde_json::Value::Null => None,
        serde_json::Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .map(str::to_string)
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        other => Some(other.to_string()),
    }
}

async fn ensure_ok(response: Response) -> Result<Response, AppError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    log!("[API] Request failed with status {}: {}", status, body);
    Err(AppError::Server {
        status,
        detail: error_detail(&body),
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let response = ensure_ok(response).await?;
    Ok(response.json::<T>().await?)
}
