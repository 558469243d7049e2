// Store configuration: where the Realtime Database lives and how long a
// request may take. Built once in `main` and handed to `ApiClient`.

use crate::error::StoreError;
use reqwest::Url;
use std::time::Duration;
use uuid::Uuid;

/// Environment variable holding the database base URL, for example
/// `https://your-project-id-default-rtdb.europe-west1.firebasedatabase.app`.
pub const DATABASE_URL_VAR: &str = "NETPULSE_DATABASE_URL";

/// Optional request timeout in whole seconds.
pub const TIMEOUT_VAR: &str = "NETPULSE_HTTP_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    base_url: String,
    timeout: Option<Duration>,
}

impl StoreConfig {
    /// Validate a base URL and strip any trailing slashes.
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let invalid = || {
            StoreError::Config(format!(
                "{DATABASE_URL_VAR} must be an http(s) URL, got '{base_url}'"
            ))
        };
        let url = Url::parse(trimmed).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
            return Err(invalid());
        }
        Ok(StoreConfig {
            base_url: trimmed.to_string(),
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read the configuration from the environment.
    ///
    /// Returns `Ok(None)` when the database URL is unset or blank: the caller
    /// is expected to print setup instructions and stop without touching the
    /// network.
    pub fn from_env() -> Result<Option<Self>, StoreError> {
        Self::from_vars(
            std::env::var(DATABASE_URL_VAR).ok(),
            std::env::var(TIMEOUT_VAR).ok(),
        )
    }

    fn from_vars(url: Option<String>, timeout: Option<String>) -> Result<Option<Self>, StoreError> {
        let url = match url {
            Some(u) if !u.trim().is_empty() => u,
            _ => return Ok(None),
        };
        let mut config = StoreConfig::new(&url)?;
        if let Some(raw) = timeout.filter(|t| !t.trim().is_empty()) {
            let secs: u64 = raw
                .trim()
                .parse()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| {
                    StoreError::Config(format!("{TIMEOUT_VAR} must be a positive integer, got '{raw}'"))
                })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(Some(config))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Location of the whole user collection.
    pub fn users_url(&self) -> String {
        format!("{}/users.json", self.base_url)
    }

    /// Location of a single user, keyed by its identifier.
    pub fn user_url(&self, id: &Uuid) -> String {
        format!("{}/users/{}.json", self.base_url, id)
    }
}
