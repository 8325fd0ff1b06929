//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

/// Timing constants of the wizard.
///
/// The suppress window is kept longer than the debounce on purpose; both
/// are configuration rather than derived from each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardTiming {
    /// Quiet period before a draft edit is written
    pub debounce: Duration,
    /// Grace period after a restore during which edits are not written
    pub suppress_window: Duration,
    /// Artificial delay before each create call, keeps progress legible
    pub submit_step_delay: Duration,
    /// How long "complete" stays visible before the completion callback
    pub completion_delay: Duration,
}

impl WizardTiming {
    /// Zero submission delays, draft timings unchanged (tests, scripted runs)
    pub fn instant() -> Self {
        Self {
            submit_step_delay: Duration::ZERO,
            completion_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

impl Default for WizardTiming {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            suppress_window: Duration::from_millis(600),
            submit_step_delay: Duration::from_secs(3),
            completion_delay: Duration::from_millis(1500),
        }
    }
}

/// Client configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ROSTER_BASIC_INFO_URL | http://localhost:4001 | basic-info service |
/// | ROSTER_DETAILS_URL | http://localhost:4002 | details service |
/// | ROSTER_REQUEST_TIMEOUT_MS | 10000 | request timeout |
/// | ROSTER_CACHE_TTL_SECS | 300 | response cache TTL |
/// | ROSTER_STORE_PATH | ./roster.redb | durable store file |
/// | ROSTER_LOG_LEVEL | info | default log level |
/// | ROSTER_LOG_DIR | (unset) | rolling log directory |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Basic-info service base URL (e.g., "http://localhost:4001")
    pub basic_info_url: String,

    /// Details service base URL (e.g., "http://localhost:4002")
    pub details_url: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,

    /// How long a cached response stays valid
    pub cache_ttl: Duration,

    /// Path of the durable store file
    pub store_path: PathBuf,

    /// Default log level when RUST_LOG is not set
    pub log_level: String,

    /// Directory for rolling log files
    pub log_dir: Option<String>,

    /// Wizard timing constants
    pub timing: WizardTiming,
}

impl ClientConfig {
    pub fn new(basic_info_url: impl Into<String>, details_url: impl Into<String>) -> Self {
        Self {
            basic_info_url: basic_info_url.into(),
            details_url: details_url.into(),
            timeout_ms: 10_000,
            cache_ttl: Duration::from_secs(5 * 60),
            store_path: PathBuf::from("./roster.redb"),
            log_level: "info".to_string(),
            log_dir: None,
            timing: WizardTiming::default(),
        }
    }

    /// Load configuration from environment variables, using defaults for
    /// anything unset or unparsable
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            basic_info_url: std::env::var("ROSTER_BASIC_INFO_URL")
                .unwrap_or(defaults.basic_info_url),
            details_url: std::env::var("ROSTER_DETAILS_URL").unwrap_or(defaults.details_url),
            timeout_ms: std::env::var("ROSTER_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_ms),
            cache_ttl: std::env::var("ROSTER_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            store_path: std::env::var("ROSTER_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.store_path),
            log_level: std::env::var("ROSTER_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: std::env::var("ROSTER_LOG_DIR").ok(),
            timing: defaults.timing,
        }
    }

    pub fn with_basic_info_url(mut self, url: impl Into<String>) -> Self {
        self.basic_info_url = url.into();
        self
    }

    pub fn with_details_url(mut self, url: impl Into<String>) -> Self {
        self.details_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, millis: u64) -> Self {
        self.timeout_ms = millis;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    pub fn with_timing(mut self, timing: WizardTiming) -> Self {
        self.timing = timing;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:4001", "http://localhost:4002")
    }
}
