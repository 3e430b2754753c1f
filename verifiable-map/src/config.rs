use std::{fmt, time::Duration};

use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};

use crate::{Error, Result};

/// Server used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.continusec.com";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`crate::HttpClient`].
///
/// Can be deserialized from any serde format; `timeout` is given in whole
/// seconds.
#[serde_as]
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Account all maps and logs live under.
    pub account: String,
    /// API key sent as `Authorization: Key <api_key>`. Requests are
    /// unauthenticated when absent.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Scheme and host of the server, without the `/v1` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Limit on each request, connect to last body byte.
    #[serde(default = "default_timeout")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub timeout: Duration,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl ClientConfig {
    /// Settings for `account` against the public server, unauthenticated.
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            api_key: None,
            base_url: default_base_url(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Authenticate with `api_key`.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Talk to the server at `base_url` instead of the default.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check that the settings can address a server.
    pub fn validate(&self) -> Result<()> {
        if self.account.is_empty() {
            return Err(Error::InvalidConfig("account must not be empty".to_string()));
        }
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            Error::InvalidConfig(format!("base url {:?} is malformed: {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidConfig(format!(
                "base url must use http or https, got {:?}",
                self.base_url
            )));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(Error::InvalidConfig(format!(
                "base url {:?} has no host",
                self.base_url
            )));
        }
        Ok(())
    }

    /// Root URL every request path is appended to.
    pub fn account_url(&self) -> String {
        format!(
            "{}/v1/account/{}",
            self.base_url.trim_end_matches('/'),
            self.account
        )
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("account", &self.account)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
