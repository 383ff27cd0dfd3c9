//! Configuration management

use serde::Deserialize;
use std::path::Path;

use crate::error::{AnalyzerError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub models: ModelConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Gemini API key; the GEMINI_API_KEY environment variable overrides
    /// whatever the config file holds
    pub api_key: String,
    /// API endpoint override (primarily for tests against a local stub)
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model used to retrieve post content from a URL (search tool enabled)
    pub resolver_model: String,
    /// Model used for the schema-constrained sentiment analysis
    pub analysis_model: String,
    /// Sampling temperature for the analysis request
    pub temperature: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            resolver_model: "gemini-2.5-pro".to_string(),
            analysis_model: "gemini-2.5-flash".to_string(),
            temperature: 0.2,
        }
    }
}

impl Config {
    /// Load configuration from an optional file layered with environment
    /// variables.
    ///
    /// The file may be absent entirely; the credential can come from
    /// `GEMINI_API_KEY` alone. Presence of the credential is checked where
    /// the client is constructed, not here.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let expanded = shellexpand::tilde(path.as_ref().to_str().unwrap_or_default());

        let settings = config::Config::builder()
            .add_source(config::File::with_name(expanded.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("SENTIMENT").separator("__"))
            .build()
            .map_err(|e| AnalyzerError::Config(e.to_string()))?;

        let mut cfg: Config = settings
            .try_deserialize()
            .map_err(|e| AnalyzerError::Config(e.to_string()))?;

        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.trim().is_empty() {
                cfg.api.api_key = key;
            }
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_defaults() {
        let models = ModelConfig::default();
        assert_eq!(models.resolver_model, "gemini-2.5-pro");
        assert_eq!(models.analysis_model, "gemini-2.5-flash");
        assert!((models.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_config_from_toml() {
        let cfg: Config = toml::from_str(
            r#"
            [api]
            api_key = "test-key"

            [models]
            analysis_model = "gemini-2.0-flash"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.api.api_key, "test-key");
        assert_eq!(cfg.models.analysis_model, "gemini-2.0-flash");
        // Unspecified fields keep their defaults
        assert_eq!(cfg.models.resolver_model, "gemini-2.5-pro");
        assert!(cfg.api.base_url.is_none());
    }

    #[test]
    fn test_config_from_empty_toml() {
        let cfg: Config = toml::from_str("").unwrap();
        assert!(cfg.api.api_key.is_empty());
        assert_eq!(cfg.models.analysis_model, "gemini-2.5-flash");
    }

    #[test]
    fn test_config_base_url_override() {
        let cfg: Config = toml::from_str(
            r#"
            [api]
            api_key = "k"
            base_url = "http://localhost:8080/v1beta"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.api.base_url.as_deref(), Some("http://localhost:8080/v1beta"));
    }
}
