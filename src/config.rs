//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Connection settings for the coaching service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service root, without trailing slash. Endpoints live under `/api`.
    pub base_url: String,
    /// Optional bearer token sent with every request.
    pub api_token: Option<SecretString>,
    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    /// Directory for the rolling log file (binary only).
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: None,
            request_timeout: None,
            log_dir: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(SecretString::from(token.into()));
        self
    }

    /// Load from `LIFEPLAN_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("LIFEPLAN_BACKEND_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("LIFEPLAN_BACKEND_URL".to_string()))?;

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                key: "LIFEPLAN_BACKEND_URL".to_string(),
                message: format!("expected an http(s) URL, got {base_url:?}"),
            });
        }

        let request_timeout = match lookup("LIFEPLAN_REQUEST_TIMEOUT_SECS") {
            None => None,
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: "LIFEPLAN_REQUEST_TIMEOUT_SECS".to_string(),
                    message: format!("expected whole seconds, got {raw:?}"),
                })?;
                // 0 keeps the default of waiting indefinitely
                (secs > 0).then(|| Duration::from_secs(secs))
            }
        };

        let api_token = lookup("LIFEPLAN_API_TOKEN")
            .filter(|s| !s.is_empty())
            .map(SecretString::from);

        let log_dir = lookup("LIFEPLAN_LOG_DIR")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api_token,
            request_timeout,
            log_dir,
            ..Self::new(base_url)
        })
    }
}
