//! Environment-driven configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::screener::{parse_symbols, RowFilter, DEFAULT_SCREEN_CONCURRENCY};
use crate::services::yahoo::DEFAULT_BASE_URL;
use crate::signals::engine::{DEFAULT_FAST_SPAN, DEFAULT_SLOW_SPAN};

/// Deployment environment, lower-cased (`sandbox` when unset).
pub fn get_environment() -> String {
    env::var("ENVIRONMENT")
        .unwrap_or_else(|_| "sandbox".to_string())
        .to_lowercase()
}

#[derive(Debug, Clone)]
pub struct ScreenerConfig {
    pub port: u16,
    pub yahoo_base_url: String,
    pub lookback_days: u32,
    pub fast_span: usize,
    pub slow_span: usize,
    pub default_symbols: Vec<String>,
    pub only_triggered: bool,
    pub screen_concurrency: usize,
    /// Most symbols accepted by one screen request.
    pub max_symbols: usize,
    pub http_timeout: Duration,
    pub http_max_retries: usize,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            yahoo_base_url: DEFAULT_BASE_URL.to_string(),
            lookback_days: 60,
            fast_span: DEFAULT_FAST_SPAN,
            slow_span: DEFAULT_SLOW_SPAN,
            default_symbols: parse_symbols("AAPL,GOOGL,MSFT"),
            only_triggered: false,
            screen_concurrency: DEFAULT_SCREEN_CONCURRENCY,
            max_symbols: 50,
            http_timeout: Duration::from_secs(10),
            http_max_retries: 2,
        }
    }
}

impl ScreenerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env_or("PORT", defaults.port),
            yahoo_base_url: env::var("YAHOO_BASE_URL").unwrap_or(defaults.yahoo_base_url),
            lookback_days: env_or("LOOKBACK_DAYS", defaults.lookback_days),
            fast_span: env_or("EMA_FAST_SPAN", defaults.fast_span),
            slow_span: env_or("EMA_SLOW_SPAN", defaults.slow_span),
            default_symbols: env::var("SCREEN_SYMBOLS")
                .map(|raw| parse_symbols(&raw))
                .unwrap_or(defaults.default_symbols),
            only_triggered: env_or("ONLY_TRIGGERED", defaults.only_triggered),
            screen_concurrency: env_or("SCREEN_CONCURRENCY", defaults.screen_concurrency),
            max_symbols: env_or("MAX_SCREEN_SYMBOLS", defaults.max_symbols),
            http_timeout: Duration::from_secs(env_or(
                "HTTP_TIMEOUT_SECS",
                defaults.http_timeout.as_secs(),
            )),
            http_max_retries: env_or("HTTP_MAX_RETRIES", defaults.http_max_retries),
        }
    }

    pub fn row_filter(&self) -> RowFilter {
        if self.only_triggered {
            RowFilter::TriggeredOnly
        } else {
            RowFilter::All
        }
    }
}

fn env_or<T: FromStr + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => parse_or(key, &raw, default),
        Err(_) => default,
    }
}

fn parse_or<T: FromStr + Copy>(key: &str, raw: &str, default: T) -> T {
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(key = key, value = raw, "Config: unparsable value, using default");
        default
    })
}
