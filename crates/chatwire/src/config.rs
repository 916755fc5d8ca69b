//! Quota poller configuration with sensible defaults.
//!
//! [`PollerConfig`] holds everything the [`QuotaClient`](crate::quota::QuotaClient)
//! and [`QuotaPoller`](crate::quota::QuotaPoller) need. Start from
//! [`PollerConfig::new`] and override with the `with_*` builders.

use std::time::Duration;

/// Path of the quota endpoint, relative to the base URL.
pub const QUOTA_PATH: &str = "/quota";

/// Default base URL (a local dev server).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8094";

/// Configuration for quota polling.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Base URL of the backend. Default: `http://127.0.0.1:8094`.
    pub base_url: String,
    /// Time between poll cycles. Default: 5 s.
    pub interval: Duration,
    /// Minimum time between two request attempts, measured from attempt
    /// start. Cycles inside this window are skipped. Default: 2.5 s.
    pub cooldown: Duration,
    /// Per-request HTTP timeout. Default: 10 s.
    pub request_timeout: Duration,
    /// User-Agent header. Default: `chatwire/<version>`.
    pub user_agent: String,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            interval: Duration::from_millis(5000),
            cooldown: Duration::from_millis(2500),
            request_timeout: Duration::from_secs(10),
            user_agent: concat!("chatwire/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl PollerConfig {
    /// Defaults pointed at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Full URL of the quota endpoint.
    pub fn quota_url(&self) -> String {
        format!("{}{QUOTA_PATH}", self.base_url.trim_end_matches('/'))
    }
}
