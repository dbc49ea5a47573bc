//! Client configuration, baked in at build time.
//!
//! `API_URL` points at the nowhey backend, `SUPABASE_URL` and
//! `SUPABASE_ANON_KEY` at the identity provider. Missing values fall back to
//! local development defaults.

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_API_URL.to_string()
        } else {
            trimmed.to_string()
        };
        Self { base_url }
    }

    pub fn from_build_env() -> Self {
        Self::new(option_env!("API_URL").unwrap_or(DEFAULT_API_URL))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins an absolute API path (e.g. `/api/assess`) onto the base origin.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub supabase_url: Option<String>,
    pub anon_key: Option<String>,
}

impl AuthConfig {
    pub fn from_build_env() -> Self {
        Self {
            supabase_url: non_empty(option_env!("SUPABASE_URL"))
                .map(|url| url.trim_end_matches('/').to_string()),
            anon_key: non_empty(option_env!("SUPABASE_ANON_KEY")).map(str::to_string),
        }
    }

    /// Both the provider origin and its public key, when configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.supabase_url, &self.anon_key) {
            (Some(url), Some(key)) => Some((url.as_str(), key.as_str())),
            _ => None,
        }
    }
}

fn non_empty(value: Option<&'static str>) -> Option<&'static str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_ignored() {
        let config = ApiConfig::new("https://api.nowhey.test/");
        assert_eq!(config.base_url(), "https://api.nowhey.test");
        assert_eq!(
            config.endpoint("/api/assess"),
            "https://api.nowhey.test/api/assess"
        );
    }

    #[test]
    fn test_blank_url_falls_back_to_local_origin() {
        assert_eq!(ApiConfig::new("  ").base_url(), DEFAULT_API_URL);
        assert_eq!(ApiConfig::default().base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_auth_credentials_need_both_values() {
        let partial = AuthConfig {
            supabase_url: Some("https://auth.test".into()),
            anon_key: None,
        };
        assert!(partial.credentials().is_none());

        let full = AuthConfig {
            supabase_url: Some("https://auth.test".into()),
            anon_key: Some("anon".into()),
        };
        assert_eq!(full.credentials(), Some(("https://auth.test", "anon")));
    }
}
