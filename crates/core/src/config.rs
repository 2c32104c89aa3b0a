use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// How module and overall progress relate to lesson completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProgressPolicy {
    /// Recompute from completion counts after every change.
    #[default]
    Derived,
    /// Keep stored values until an explicit recompute.
    Snapshot,
}

impl FromStr for ProgressPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "derived" => Ok(Self::Derived),
            "snapshot" => Ok(Self::Snapshot),
            other => Err(ConfigError::InvalidProgressPolicy(other.to_owned())),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("unknown progress policy: {0} (expected `derived` or `snapshot`)")]
    InvalidProgressPolicy(String),
    #[error("invalid reply delay: {0} (expected milliseconds)")]
    InvalidReplyDelay(String),
}

/// Validated runtime configuration.
///
/// The API endpoint and key are carried for backend collaborators; nothing
/// in this workspace calls out over the network.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    api_base_url: Option<Url>,
    api_key: Option<String>,
    reply_delay: Duration,
    progress_policy: ProgressPolicy,
}

#[derive(Clone, Debug, Default)]
pub struct AppConfigDraft {
    pub api_base_url: Option<String>,
    pub api_key: Option<String>,
    pub reply_delay_ms: Option<u64>,
    pub progress_policy: Option<String>,
}

impl AppConfig {
    pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

    #[must_use]
    pub fn api_base_url(&self) -> Option<&Url> {
        self.api_base_url.as_ref()
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Delay before the assistant's scripted reply.
    #[must_use]
    pub fn reply_delay(&self) -> Duration {
        self.reply_delay
    }

    #[must_use]
    pub fn progress_policy(&self) -> ProgressPolicy {
        self.progress_policy
    }

    #[must_use]
    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    #[must_use]
    pub fn with_progress_policy(mut self, policy: ProgressPolicy) -> Self {
        self.progress_policy = policy;
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            api_key: None,
            reply_delay: Self::DEFAULT_REPLY_DELAY,
            progress_policy: ProgressPolicy::default(),
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_base_url", &self.api_base_url.as_ref().map(Url::as_str))
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("reply_delay", &self.reply_delay)
            .field("progress_policy", &self.progress_policy)
            .finish()
    }
}

impl AppConfigDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the base URL or progress policy is present but invalid.
    pub fn validate(self) -> Result<AppConfig, ConfigError> {
        let api_base_url = normalize_optional(self.api_base_url)
            .map(|raw| Url::parse(&raw).map_err(|_| ConfigError::InvalidBaseUrl(raw)))
            .transpose()?;
        let api_key = normalize_optional(self.api_key);
        let progress_policy = normalize_optional(self.progress_policy)
            .map(|raw| raw.parse::<ProgressPolicy>())
            .transpose()?
            .unwrap_or_default();
        let reply_delay = self
            .reply_delay_ms
            .map_or(AppConfig::DEFAULT_REPLY_DELAY, Duration::from_millis);

        Ok(AppConfig {
            api_base_url,
            api_key,
            reply_delay,
            progress_policy,
        })
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
