// src/models/place.rs
use serde::{Deserialize, Serialize};

/// A search result identifying a physical restaurant location.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PlaceCandidate {
    pub id: String,
    pub display_name: String,
    pub formatted_address: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Raw body of `GET /api/places/search`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct PlacesResponse {
    #[serde(default)]
    pub places: Vec<RawPlace>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawPlace {
    pub id: String,
    pub display_name: Option<LocalizedText>,
    #[serde(default)]
    pub formatted_address: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LocalizedText {
    pub text: String,
}

impl From<RawPlace> for PlaceCandidate {
    fn from(raw: RawPlace) -> Self {
        PlaceCandidate {
            id: raw.id,
            display_name: raw.display_name.map(|name| name.text).unwrap_or_default(),
            formatted_address: raw.formatted_address,
        }
    }
}

impl PlacesResponse {
    pub fn into_candidates(self) -> Vec<PlaceCandidate> {
        self.places.into_iter().map(PlaceCandidate::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_places_response_flattens_display_name() {
        let body = r#"{
            "places": [
                {"id": "place1", "displayName": {"text": "Vegan Bistro"}, "formattedAddress": "123 Green St", "types": ["restaurant"]},
                {"id": "place3", "displayName": {"text": "Cool Cafe"}, "formattedAddress": "789 Bean Blvd"}
            ]
        }"#;
        let parsed: PlacesResponse = serde_json::from_str(body).unwrap();
        let candidates = parsed.into_candidates();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].display_name, "Vegan Bistro");
        assert_eq!(candidates[0].formatted_address, "123 Green St");
        assert_eq!(candidates[1].id, "place3");
    }

    #[test]
    fn test_missing_places_key_is_empty() {
        let parsed: PlacesResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.into_candidates().is_empty());
    }
}
