//! Demo configuration parsed from environment variables.

use std::time::Duration;

use feeds::SourceShape;

pub const DEFAULT_API1_DELAY_MS: u64 = 800;
pub const DEFAULT_API1_PAGE_SIZE: u32 = 5;
pub const DEFAULT_API2_DELAY_MS: u64 = 1000;
pub const DEFAULT_API2_PAGE_SIZE: u32 = 3;
pub const DEFAULT_TOTAL_ITEMS: u32 = 100;
pub const DEFAULT_LANE_DELAY_MS: u64 = 1000;
pub const DEFAULT_SIMULATOR_DELAY_MS: u64 = 3000;
pub const DEFAULT_SIMULATOR_FAILURE_RATE: f64 = 0.5;
pub const DEFAULT_SIMULATOR_RETRIES: usize = 1;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown FEED_JOIN_POLICY: {0} (expected 'all' or 'settled')")]
    InvalidJoinPolicy(String),
    #[error("SIMULATOR_FAILURE_RATE must be within 0..=1, got {0}")]
    InvalidFailureRate(f64),
    #[error("{0} must be at least 1")]
    InvalidPageSize(&'static str),
}

/// How the dual-source feed treats a failure of one of its two fetches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinPolicy {
    /// Any failure discards both pages.
    #[default]
    AllOrNothing,
    /// A failed source is skipped; the other source's page still applies.
    Settled,
}

impl JoinPolicy {
    /// Parse `all` or `settled`; `None` selects the default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidJoinPolicy`] for any other value.
    pub fn parse(raw: Option<&str>) -> Result<Self, ConfigError> {
        match raw.unwrap_or("all") {
            "all" => Ok(Self::AllOrNothing),
            "settled" => Ok(Self::Settled),
            other => Err(ConfigError::InvalidJoinPolicy(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    pub api1_delay_ms: u64,
    pub api1_page_size: u32,
    pub api2_delay_ms: u64,
    pub api2_page_size: u32,
    pub total_items: u32,
    pub lane_delay_ms: u64,
    pub join_policy: JoinPolicy,
    pub simulator_delay_ms: u64,
    pub simulator_failure_rate: f64,
    pub simulator_retries: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api1_delay_ms: DEFAULT_API1_DELAY_MS,
            api1_page_size: DEFAULT_API1_PAGE_SIZE,
            api2_delay_ms: DEFAULT_API2_DELAY_MS,
            api2_page_size: DEFAULT_API2_PAGE_SIZE,
            total_items: DEFAULT_TOTAL_ITEMS,
            lane_delay_ms: DEFAULT_LANE_DELAY_MS,
            join_policy: JoinPolicy::AllOrNothing,
            simulator_delay_ms: DEFAULT_SIMULATOR_DELAY_MS,
            simulator_failure_rate: DEFAULT_SIMULATOR_FAILURE_RATE,
            simulator_retries: DEFAULT_SIMULATOR_RETRIES,
        }
    }
}

impl FeedConfig {
    /// Build config from environment variables.
    ///
    /// All optional; unparseable numbers fall back to defaults:
    /// - `FEED_API1_DELAY_MS`, `FEED_API1_PAGE_SIZE`
    /// - `FEED_API2_DELAY_MS`, `FEED_API2_PAGE_SIZE`
    /// - `FEED_TOTAL_ITEMS`, `FEED_LANE_DELAY_MS`
    /// - `FEED_JOIN_POLICY`: `all` (default) or `settled`
    /// - `SIMULATOR_DELAY_MS`, `SIMULATOR_FAILURE_RATE`, `SIMULATOR_RETRIES`
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown join policy, a failure rate outside
    /// `0..=1`, or a page size of zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        let join_policy = JoinPolicy::parse(std::env::var("FEED_JOIN_POLICY").ok().as_deref())?;
        let simulator_failure_rate = env_parse("SIMULATOR_FAILURE_RATE", DEFAULT_SIMULATOR_FAILURE_RATE);
        if !(0.0..=1.0).contains(&simulator_failure_rate) {
            return Err(ConfigError::InvalidFailureRate(simulator_failure_rate));
        }

        let api1_page_size = env_page_size("FEED_API1_PAGE_SIZE", DEFAULT_API1_PAGE_SIZE)?;
        let api2_page_size = env_page_size("FEED_API2_PAGE_SIZE", DEFAULT_API2_PAGE_SIZE)?;

        Ok(Self {
            api1_delay_ms: env_parse("FEED_API1_DELAY_MS", DEFAULT_API1_DELAY_MS),
            api1_page_size,
            api2_delay_ms: env_parse("FEED_API2_DELAY_MS", DEFAULT_API2_DELAY_MS),
            api2_page_size,
            total_items: env_parse("FEED_TOTAL_ITEMS", DEFAULT_TOTAL_ITEMS),
            lane_delay_ms: env_parse("FEED_LANE_DELAY_MS", DEFAULT_LANE_DELAY_MS),
            join_policy,
            simulator_delay_ms: env_parse("SIMULATOR_DELAY_MS", DEFAULT_SIMULATOR_DELAY_MS),
            simulator_failure_rate,
            simulator_retries: env_parse("SIMULATOR_RETRIES", DEFAULT_SIMULATOR_RETRIES),
        })
    }

    #[must_use]
    pub fn api1_shape(&self) -> SourceShape {
        SourceShape::api1()
            .with_delay(Duration::from_millis(self.api1_delay_ms))
            .with_page_size(self.api1_page_size)
            .with_total_items(self.total_items)
    }

    #[must_use]
    pub fn api2_shape(&self) -> SourceShape {
        SourceShape::api2()
            .with_delay(Duration::from_millis(self.api2_delay_ms))
            .with_page_size(self.api2_page_size)
            .with_total_items(self.total_items)
    }

    #[must_use]
    pub fn posts_shape(&self) -> SourceShape {
        SourceShape::posts()
            .with_delay(Duration::from_millis(self.lane_delay_ms))
            .with_total_items(self.total_items)
    }

    #[must_use]
    pub fn comments_shape(&self) -> SourceShape {
        SourceShape::comments()
            .with_delay(Duration::from_millis(self.lane_delay_ms))
            .with_total_items(self.total_items)
    }

    #[must_use]
    pub fn simulator_delay(&self) -> Duration {
        Duration::from_millis(self.simulator_delay_ms)
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn env_page_size(key: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env_parse(key, default) {
        0 => Err(ConfigError::InvalidPageSize(key)),
        size => Ok(size),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
