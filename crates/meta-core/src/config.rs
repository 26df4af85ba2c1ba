use std::{fmt, str::FromStr, time::Duration};

use meta_model::DurationMs;

use crate::error::MetaError;

pub const DEFAULT_BASE_URL: &str = "https://graph.facebook.com";
pub const DEFAULT_API_VERSION: &str = "v24.0";

const ENV_BASE_URL: &str = "META_GRAPH_BASE_URL";
const ENV_API_VERSION: &str = "META_GRAPH_API_VERSION";
const ENV_ACCESS_TOKEN: &str = "META_ACCESS_TOKEN";
const ENV_AUTH_STYLE: &str = "META_AUTH_STYLE";
const ENV_TIMEOUT_MS: &str = "META_HTTP_TIMEOUT_MS";

/// Where the access token is attached to outgoing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStrategy {
    /// `Authorization: Bearer <token>`.
    #[default]
    BearerHeader,
    /// `access_token=<token>` query parameter.
    QueryParam,
}

impl FromStr for AuthStrategy {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "bearer" | "header" | "bearer_header" => Ok(AuthStrategy::BearerHeader),
            "query" | "query_param" | "access_token" => Ok(AuthStrategy::QueryParam),
            _ => Err(MetaError::Config(format!(
                "unknown auth style: {s} (expected: bearer|query)"
            ))),
        }
    }
}

/// Connection settings for the Graph API.
#[derive(Clone)]
pub struct GraphConfig {
    /// Base URL (default: `https://graph.facebook.com`).
    pub base_url: String,
    /// API version path segment (default: `v24.0`).
    pub api_version: String,
    /// Page / user access token.
    pub access_token: String,
    /// How the token is sent (default: bearer header).
    pub auth: AuthStrategy,
    /// Per-request timeout (default: 30 seconds).
    pub timeout_ms: DurationMs,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            access_token: String::new(),
            auth: AuthStrategy::default(),
            timeout_ms: 30_000,
        }
    }
}

impl fmt::Debug for GraphConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("access_token", &"<redacted>")
            .field("auth", &self.auth)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl GraphConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_auth(mut self, auth: AuthStrategy) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: DurationMs) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Build a config from `META_*` environment variables.
    ///
    /// `META_ACCESS_TOKEN` is required, everything else falls back to defaults.
    pub fn from_env() -> Result<Self, MetaError> {
        let access_token = std::env::var(ENV_ACCESS_TOKEN)
            .map_err(|_| MetaError::Config(format!("{ENV_ACCESS_TOKEN} is not set")))?;
        let mut cfg = Self::new(access_token);

        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            cfg.base_url = base_url;
        }
        if let Ok(version) = std::env::var(ENV_API_VERSION) {
            cfg.api_version = version;
        }
        if let Ok(style) = std::env::var(ENV_AUTH_STYLE) {
            cfg.auth = style.parse()?;
        }
        if let Ok(timeout) = std::env::var(ENV_TIMEOUT_MS) {
            cfg.timeout_ms = timeout
                .trim()
                .parse()
                .map_err(|_| {
                    MetaError::Config(format!("{ENV_TIMEOUT_MS}: not a number: {timeout}"))
                })?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), MetaError> {
        if self.access_token.trim().is_empty() {
            return Err(MetaError::Config("access token is empty".into()));
        }
        if self.api_version.trim().is_empty() {
            return Err(MetaError::Config("api version is empty".into()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(MetaError::Config(format!(
                "base url must be http(s): {}",
                self.base_url
            )));
        }
        if self.timeout_ms == 0 {
            return Err(MetaError::Config("timeout must be positive".into()));
        }
        Ok(())
    }
}

/// Timing of the container readiness poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between two status checks (default: 10 seconds).
    pub interval_ms: DurationMs,
    /// Delay before the first status check (default: 2 seconds).
    pub initial_delay_ms: DurationMs,
    /// Overall deadline measured from the start of polling (default: 5 minutes).
    pub max_wait_ms: DurationMs,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval_ms: 10_000,
            initial_delay_ms: 2_000,
            max_wait_ms: 300_000,
        }
    }
}

impl PollPolicy {
    pub fn new(
        interval_ms: DurationMs,
        initial_delay_ms: DurationMs,
        max_wait_ms: DurationMs,
    ) -> Self {
        Self {
            interval_ms,
            initial_delay_ms,
            max_wait_ms,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    #[inline]
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    #[inline]
    pub fn max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms)
    }

    pub fn validate(&self) -> Result<(), MetaError> {
        if self.interval_ms == 0 {
            return Err(MetaError::Config("poll interval must be positive".into()));
        }
        if self.max_wait_ms == 0 {
            return Err(MetaError::Config("poll max wait must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = GraphConfig::default();
        assert_eq!(cfg.base_url, "https://graph.facebook.com");
        assert_eq!(cfg.api_version, "v24.0");
        assert_eq!(cfg.auth, AuthStrategy::BearerHeader);

        let poll = PollPolicy::default();
        assert_eq!(poll.interval(), Duration::from_secs(10));
        assert_eq!(poll.initial_delay(), Duration::from_secs(2));
        assert_eq!(poll.max_wait(), Duration::from_secs(300));
    }

    #[test]
    fn debug_redacts_token() {
        let cfg = GraphConfig::new("EAAB-secret");
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("EAAB-secret"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(GraphConfig::default().validate().is_err());
        assert!(GraphConfig::new("t").with_base_url("ftp://x").validate().is_err());
        assert!(GraphConfig::new("t").with_api_version(" ").validate().is_err());
        assert!(GraphConfig::new("t").with_timeout_ms(0).validate().is_err());
        assert!(GraphConfig::new("t").validate().is_ok());

        assert!(PollPolicy::new(0, 0, 1_000).validate().is_err());
        assert!(PollPolicy::new(10, 0, 0).validate().is_err());
        assert!(PollPolicy::default().validate().is_ok());
    }

    #[test]
    fn auth_strategy_from_str() {
        assert_eq!("Bearer".parse::<AuthStrategy>().unwrap(), AuthStrategy::BearerHeader);
        assert_eq!("query".parse::<AuthStrategy>().unwrap(), AuthStrategy::QueryParam);
        assert!("cookie".parse::<AuthStrategy>().is_err());
    }
}
