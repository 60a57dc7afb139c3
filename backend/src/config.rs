// src/config.rs

use std::{env, path::PathBuf, time::Duration};

use dotenvy::dotenv;
use thiserror::Error;
use url::Url;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY (or GOOGLE_API_KEY) must be set")]
    MissingApiKey,

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: Url,
    pub port: u16,
    pub rust_log: String,
    pub upstream_timeout: Duration,

    /// When set, the server also hosts the front end from this directory and
    /// answers unmatched GET requests with its `index.html`.
    pub public_dir: Option<PathBuf>,

    /// Origins allowed to call the API cross-origin. Empty disables CORS.
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        Self::from_source(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gemini_api_key = var("GEMINI_API_KEY")
            .or_else(|| var("GOOGLE_API_KEY"))
            .ok_or(ConfigError::MissingApiKey)?;

        let gemini_model = var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let base = var("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string());
        let gemini_api_base = Url::parse(base.trim_end_matches('/')).map_err(|e| ConfigError::Invalid {
            key: "GEMINI_API_BASE",
            reason: e.to_string(),
        })?;

        let port = match var("PORT") {
            Some(p) => p.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let rust_log = var("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let timeout_secs = match var("UPSTREAM_TIMEOUT_SECS") {
            Some(s) => s.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "UPSTREAM_TIMEOUT_SECS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "UPSTREAM_TIMEOUT_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }

        let public_dir = var("PUBLIC_DIR").map(PathBuf::from);

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            gemini_api_key,
            gemini_model,
            gemini_api_base,
            port,
            rust_log,
            upstream_timeout: Duration::from_secs(timeout_secs),
            public_dir,
            cors_allowed_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_source(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = load(&[("GEMINI_API_KEY", "secret")]).unwrap();

        assert_eq!(config.gemini_api_key, "secret");
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.gemini_api_base.as_str(), DEFAULT_GEMINI_API_BASE);
        assert_eq!(config.port, 3000);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.upstream_timeout, Duration::from_secs(60));
        assert!(config.public_dir.is_none());
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = load(&[("PORT", "8080")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));

        let err = load(&[("GEMINI_API_KEY", "   ")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn google_api_key_is_accepted_as_fallback() {
        let config = load(&[("GOOGLE_API_KEY", "fallback")]).unwrap();
        assert_eq!(config.gemini_api_key, "fallback");
    }

    #[test]
    fn bundled_deployment_and_cors_are_parsed() {
        let config = load(&[
            ("GEMINI_API_KEY", "k"),
            ("PORT", "8080"),
            ("PUBLIC_DIR", "public"),
            ("CORS_ALLOWED_ORIGINS", "http://127.0.0.1:5500, http://localhost:5500,"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.public_dir, Some(PathBuf::from("public")));
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://127.0.0.1:5500", "http://localhost:5500"]
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = load(&[("GEMINI_API_KEY", "k"), ("PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let err = load(&[("GEMINI_API_KEY", "k"), ("UPSTREAM_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "UPSTREAM_TIMEOUT_SECS", .. }));

        let err = load(&[("GEMINI_API_KEY", "k"), ("GEMINI_API_BASE", "::nope")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "GEMINI_API_BASE", .. }));
    }
}
