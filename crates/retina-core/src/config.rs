//! Client configuration.

use tracing::debug;

use crate::error::{RetinaError, RetinaResult};

/// Default prediction API URL.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Environment variable overriding the prediction API URL.
pub const API_URL_ENV: &str = "RETINA_API_URL";

/// Where the prediction service lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    /// Create a config for the given base URL.
    ///
    /// Trailing slashes are trimmed so endpoint paths can be appended as-is.
    pub fn with_url(base_url: &str) -> RetinaResult<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(RetinaError::config(format!(
                "API URL must start with http:// or https://, got '{}'",
                base_url
            )));
        }
        debug!(base_url = %trimmed, "Client config initialized");
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of an endpoint, e.g. `endpoint("predict")`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
        }
    }
}
