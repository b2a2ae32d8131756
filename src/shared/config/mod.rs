//! Application configuration module
//!
//! Runtime settings for the messaging services, built either explicitly
//! through [`AppConfigBuilder`] or from the process environment.

use std::time::Duration;

use thiserror::Error;

const DEFAULT_LOG_FILTER: &str = "aigm=info";
const DEFAULT_SEARCH_SLOW_MS: u64 = 500;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string; services are disabled without it
    pub database_url: Option<String>,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
    /// Searches slower than this are logged at warn level
    pub search_slow_threshold: Duration,
    pub default_search_limit: u32,
    pub max_search_limit: u32,
    pub default_message_limit: u32,
    pub max_message_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            search_slow_threshold: Duration::from_millis(DEFAULT_SEARCH_SLOW_MS),
            default_search_limit: 20,
            max_search_limit: 100,
            default_message_limit: 50,
            max_message_limit: 100,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Read `DATABASE_URL`, `RUST_LOG` and `SEARCH_SLOW_MS`
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder = builder.log_filter(filter);
        }
        if let Ok(raw) = std::env::var("SEARCH_SLOW_MS") {
            let millis = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber("SEARCH_SLOW_MS", raw.clone()))?;
            builder = builder.search_slow_threshold(Duration::from_millis(millis));
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.database_url {
            if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::MissingValue("log_filter"));
        }
        if self.default_search_limit == 0 || self.default_search_limit > self.max_search_limit {
            return Err(ConfigError::InvalidLimit("search"));
        }
        if self.default_message_limit == 0 || self.default_message_limit > self.max_message_limit {
            return Err(ConfigError::InvalidLimit("message"));
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    log_filter: Option<String>,
    search_slow_threshold: Option<Duration>,
    search_limits: Option<(u32, u32)>,
    message_limits: Option<(u32, u32)>,
}

impl AppConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    pub fn search_slow_threshold(mut self, threshold: Duration) -> Self {
        self.search_slow_threshold = Some(threshold);
        self
    }

    /// Default and maximum page size for user search
    pub fn search_limits(mut self, default: u32, max: u32) -> Self {
        self.search_limits = Some((default, max));
        self
    }

    /// Default and maximum page size for message history
    pub fn message_limits(mut self, default: u32, max: u32) -> Self {
        self.message_limits = Some((default, max));
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let (default_search_limit, max_search_limit) = self
            .search_limits
            .unwrap_or((defaults.default_search_limit, defaults.max_search_limit));
        let (default_message_limit, max_message_limit) = self
            .message_limits
            .unwrap_or((defaults.default_message_limit, defaults.max_message_limit));

        let config = AppConfig {
            database_url: self.database_url,
            log_filter: self.log_filter.unwrap_or(defaults.log_filter),
            search_slow_threshold: self
                .search_slow_threshold
                .unwrap_or(defaults.search_slow_threshold),
            default_search_limit,
            max_search_limit,
            default_message_limit,
            max_message_limit,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid number for {0}: {1}")]
    InvalidNumber(&'static str, String),
    #[error("invalid {0} page limits")]
    InvalidLimit(&'static str),
}
