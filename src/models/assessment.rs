// src/models/assessment.rs
use serde::{Deserialize, Serialize};

pub const MAX_SCORE: f64 = 10.0;
pub const DEGRADED_SUMMARY: &str = "Could not assess.";

/// AI-derived dairy-free verdict for one restaurant.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Assessment {
    #[serde(default)]
    pub id: Option<i64>,              // Restaurant row id, absent if the lookup failed
    #[serde(default)]
    pub score: f64,                   // 0-10
    #[serde(default)]
    pub summary: String,
    #[serde(default, rename = "dairyFreeOptions")]
    pub dairy_free_options: Vec<String>,
}

impl Assessment {
    /// Placeholder shown when the scoring service can't be reached.
    pub fn degraded() -> Self {
        Assessment {
            id: None,
            score: 0.0,
            summary: DEGRADED_SUMMARY.to_string(),
            dairy_free_options: Vec::new(),
        }
    }

    /// The id reviews can be attached to. Row ids start at 1; the backend's
    /// mock mode answers `0`, which is not a stored restaurant.
    pub fn restaurant_id(&self) -> Option<i64> {
        self.id.filter(|id| *id > 0)
    }

    pub fn clamped(mut self) -> Self {
        self.score = if self.score.is_finite() {
            self.score.clamp(0.0, MAX_SCORE)
        } else {
            0.0
        };
        self
    }
}

/// Body of `POST /api/assess`.
#[derive(Serialize, Debug, Clone)]
pub struct AssessmentRequest<'a> {
    pub restaurant_name: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_backend_shape() {
        let body = r#"{"id": 12, "score": 8, "summary": "Lots of oat milk.", "dairyFreeOptions": ["Oat latte", "Vegan bowl"]}"#;
        let assessment: Assessment = serde_json::from_str(body).unwrap();
        assert_eq!(assessment.restaurant_id(), Some(12));
        assert_eq!(assessment.score, 8.0);
        assert_eq!(assessment.dairy_free_options, vec!["Oat latte", "Vegan bowl"]);
    }

    #[test]
    fn test_null_or_mock_id_is_unresolved() {
        let body = r#"{"id": null, "score": 5, "summary": "ok"}"#;
        let assessment: Assessment = serde_json::from_str(body).unwrap();
        assert_eq!(assessment.restaurant_id(), None);
        assert!(assessment.dairy_free_options.is_empty());

        let mock = Assessment { id: Some(0), ..Assessment::degraded() };
        assert_eq!(mock.restaurant_id(), None);
    }

    #[test]
    fn test_clamped_score() {
        let high = Assessment { score: 14.0, ..Assessment::degraded() }.clamped();
        assert_eq!(high.score, 10.0);
        let nan = Assessment { score: f64::NAN, ..Assessment::degraded() }.clamped();
        assert_eq!(nan.score, 0.0);
    }
}
