//! Service configuration from the process environment.

use std::time::Duration;

use tracing::warn;

use crate::error::{PlannerError, Result};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "API_KEY";
/// Fallback variable for the API key.
pub const API_KEY_FALLBACK_VAR: &str = "GEMINI_API_KEY";
/// Overrides the model name.
pub const MODEL_VAR: &str = "DECK_PLANNER_MODEL";
/// Overrides the API base URL.
pub const ENDPOINT_VAR: &str = "DECK_PLANNER_ENDPOINT";
/// Overrides the request timeout, in seconds.
pub const TIMEOUT_VAR: &str = "DECK_PLANNER_TIMEOUT_SECS";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// API base URL used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings for talking to the material service
#[derive(Clone)]
pub struct PlannerConfig {
    /// API key sent with every request.
    pub api_key: String,
    /// Model name, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// API base URL without a trailing slash.
    pub endpoint: String,
    /// Upper bound on a single request.
    pub timeout: Duration,
}

impl std::fmt::Debug for PlannerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlannerConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl PlannerConfig {
    /// Create a configuration with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup.
    ///
    /// Fails with `MissingCredential` when no non-blank API key is found.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = non_blank(API_KEY_VAR)
            .or_else(|| non_blank(API_KEY_FALLBACK_VAR))
            .ok_or_else(|| PlannerError::MissingCredential(API_KEY_VAR.to_string()))?;

        let mut config = Self::new(api_key.trim());

        if let Some(model) = non_blank(MODEL_VAR) {
            config.model = model.trim().to_string();
        }
        if let Some(endpoint) = non_blank(ENDPOINT_VAR) {
            config.endpoint = endpoint.trim().trim_end_matches('/').to_string();
        }
        if let Some(raw) = non_blank(TIMEOUT_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!(
                    "Ignoring {}={:?}, using {}s",
                    TIMEOUT_VAR,
                    raw,
                    DEFAULT_TIMEOUT.as_secs()
                ),
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_key() {
        let err = PlannerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, PlannerError::MissingCredential(ref v) if v == "API_KEY"));

        let err = PlannerConfig::from_lookup(lookup(&[("API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, PlannerError::MissingCredential(_)));
    }

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::from_lookup(lookup(&[("API_KEY", "secret")])).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_fallback_key_and_overrides() {
        let config = PlannerConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "fallback"),
            ("DECK_PLANNER_MODEL", "gemini-2.5-pro"),
            ("DECK_PLANNER_ENDPOINT", "http://localhost:8080/v1/"),
            ("DECK_PLANNER_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "fallback");
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.endpoint, "http://localhost:8080/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_bad_timeout_falls_back() {
        let config = PlannerConfig::from_lookup(lookup(&[
            ("API_KEY", "secret"),
            ("DECK_PLANNER_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_debug_hides_key() {
        let config = PlannerConfig::new("secret");
        assert!(!format!("{config:?}").contains("secret"));
    }
}
