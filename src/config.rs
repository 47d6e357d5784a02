//! Configuration management with environment variable support
//!
//! Everything is read once at startup into an immutable [`Config`] that is
//! passed by reference to whatever needs it.

use std::env;
use std::time::Duration;

use crate::kagi::KagiClientConfig;
use crate::kagi::client::DEFAULT_BASE_URL;
use crate::search::DEFAULT_SEARCH_TIMEOUT;

/// Which tools are registered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    pub search: bool,
    pub fastgpt: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            search: true,
            fastgpt: true,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Kagi API key (sent as `Authorization: Bot <key>`)
    pub api_key: Option<String>,
    /// Kagi API base URL
    pub base_url: String,
    pub features: FeatureFlags,
    /// Ceiling for each individual search call in a fan-out
    pub search_timeout: Duration,
    /// Whole-request timeout for the HTTP client
    pub http_timeout: Duration,
    /// Maximum concurrent searches per request (0 = one per query)
    pub max_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            features: FeatureFlags::default(),
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
            http_timeout: Duration::from_secs(30),
            max_concurrency: 0,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Supported environment variables:
    /// - KAGI_API_KEY: Kagi API key (required to serve requests)
    /// - KAGI_API_BASE_URL: API base URL (default: https://kagi.com/api/v0)
    /// - KAGI_ENABLE_SEARCH: Register the search tool (default: true)
    /// - KAGI_ENABLE_FASTGPT: Register the FastGPT tool (default: true)
    /// - KAGI_SEARCH_TIMEOUT_SECS: Per-query search timeout (default: 10)
    /// - KAGI_HTTP_TIMEOUT_SECS: HTTP request timeout (default: 30)
    /// - KAGI_MAX_CONCURRENCY: Concurrent searches per request (default: 0 for unbounded)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unparsable values keep their default
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(key) = lookup("KAGI_API_KEY") {
            if !key.trim().is_empty() {
                config.api_key = Some(key.trim().to_string());
            }
        }

        if let Some(url) = lookup("KAGI_API_BASE_URL") {
            config.base_url = url;
        }

        if let Some(value) = lookup("KAGI_ENABLE_SEARCH") {
            config.features.search = parse_flag("KAGI_ENABLE_SEARCH", &value, config.features.search);
        }

        if let Some(value) = lookup("KAGI_ENABLE_FASTGPT") {
            config.features.fastgpt =
                parse_flag("KAGI_ENABLE_FASTGPT", &value, config.features.fastgpt);
        }

        if let Some(secs) = lookup("KAGI_SEARCH_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(n) if n > 0 => config.search_timeout = Duration::from_secs(n),
                _ => tracing::warn!("Ignoring invalid KAGI_SEARCH_TIMEOUT_SECS={:?}", secs),
            }
        }

        if let Some(secs) = lookup("KAGI_HTTP_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(n) if n > 0 => config.http_timeout = Duration::from_secs(n),
                _ => tracing::warn!("Ignoring invalid KAGI_HTTP_TIMEOUT_SECS={:?}", secs),
            }
        }

        if let Some(limit) = lookup("KAGI_MAX_CONCURRENCY") {
            match limit.parse::<usize>() {
                Ok(n) => config.max_concurrency = n,
                Err(_) => tracing::warn!("Ignoring invalid KAGI_MAX_CONCURRENCY={:?}", limit),
            }
        }

        config
    }

    /// HTTP client settings derived from this configuration
    pub fn client_config(&self) -> KagiClientConfig {
        KagiClientConfig {
            api_key: self.api_key.clone().unwrap_or_default(),
            base_url: self.base_url.clone(),
            timeout: self.http_timeout,
        }
    }

    /// Concurrency cap for the fan-out executor
    pub fn concurrency_limit(&self) -> Option<usize> {
        (self.max_concurrency > 0).then_some(self.max_concurrency)
    }

    /// Print configuration summary
    pub fn log_summary(&self) {
        tracing::info!("Configuration:");
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!(
            "  API key: {}",
            if self.api_key.is_some() { "set" } else { "missing" }
        );
        tracing::info!("  Search tool: {}", enabled(self.features.search));
        tracing::info!("  FastGPT tool: {}", enabled(self.features.fastgpt));
        tracing::info!("  Search timeout: {:?}", self.search_timeout);
        tracing::info!("  HTTP timeout: {:?}", self.http_timeout);
        match self.concurrency_limit() {
            Some(n) => tracing::info!("  Max concurrency: {}", n),
            None => tracing::info!("  Max concurrency: unbounded"),
        }
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag { "enabled" } else { "disabled" }
}

fn parse_flag(name: &str, value: &str, default: bool) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!("Ignoring invalid {}={:?}, using {}", name, value, default);
            default
        }
    }
}
