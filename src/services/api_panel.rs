//! Single API call with loading/error/data display state.
//!
//! The four display states are one enum, so "loading with stale data" or
//! "error and data at once" cannot be represented. Each run resets to
//! `Loading` before the call goes out.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use feeds::{ApiMessage, simulate_api};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::FeedConfig;
use crate::services::resilience::retry_with_limit;
use crate::state::lock;

/// What the panel currently shows.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum CallState {
    /// Nothing fetched yet.
    #[default]
    Idle,
    Loading,
    Loaded(ApiMessage),
    /// Display message of the last failure.
    Failed { error: String },
}

#[derive(Clone)]
pub struct ApiCallPanel {
    delay: Duration,
    failure_rate: f64,
    attempts: usize,
    state: Arc<Mutex<CallState>>,
}

impl ApiCallPanel {
    /// Panel whose call always succeeds.
    #[must_use]
    pub fn plain(delay: Duration) -> Self {
        Self::new(delay, 0.0, 1)
    }

    /// Panel whose call fails half the time.
    #[must_use]
    pub fn with_errors(delay: Duration) -> Self {
        Self::new(delay, 0.5, 1)
    }

    /// Panel shaped by config: failure injection only when `errors` is set.
    #[must_use]
    pub fn from_config(config: &FeedConfig, errors: bool) -> Self {
        let failure_rate = if errors { config.simulator_failure_rate } else { 0.0 };
        Self::new(config.simulator_delay(), failure_rate, config.simulator_retries)
    }

    #[must_use]
    pub fn new(delay: Duration, failure_rate: f64, attempts: usize) -> Self {
        Self {
            delay,
            failure_rate: failure_rate.clamp(0.0, 1.0),
            attempts: attempts.max(1),
            state: Arc::new(Mutex::new(CallState::Idle)),
        }
    }

    /// Make the call and return the state it settled in.
    pub async fn run(&self) -> CallState {
        *lock(&self.state) = CallState::Loading;

        let result = retry_with_limit(self.attempts, || simulate_api(self.delay, self.failure_rate)).await;

        let settled = match result {
            Ok(message) => {
                info!(message = %message.message, "simulated call resolved");
                CallState::Loaded(message)
            }
            Err(e) => {
                warn!(error = %e, attempts = self.attempts, "simulated call failed");
                CallState::Failed { error: e.to_string() }
            }
        };
        lock(&self.state).clone_from(&settled);
        settled
    }

    #[must_use]
    pub fn state(&self) -> CallState {
        lock(&self.state).clone()
    }
}

#[cfg(test)]
#[path = "api_panel_test.rs"]
mod tests;
