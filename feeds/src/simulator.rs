//! Single-object API simulator with random failure.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Delay used when a caller has no preference.
pub const DEFAULT_SIMULATOR_DELAY: Duration = Duration::from_millis(2000);

pub const SUCCESS_MESSAGE: &str = "Hello from the simulated API!";

/// Payload resolved by [`simulate_api`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// The only failure [`simulate_api`] produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Simulated API failure!")]
pub struct SimulatedFailure;

/// Resolve after `delay`, failing with probability `failure_rate`.
///
/// `failure_rate` is clamped into `0.0..=1.0`; `0.0` never fails and `1.0`
/// always does.
///
/// # Errors
///
/// Returns [`SimulatedFailure`] when the injected failure fires.
pub async fn simulate_api(delay: Duration, failure_rate: f64) -> Result<ApiMessage, SimulatedFailure> {
    tokio::time::sleep(delay).await;

    let failure_rate = failure_rate.clamp(0.0, 1.0);
    if failure_rate > 0.0 && rand::rng().random_bool(failure_rate) {
        return Err(SimulatedFailure);
    }

    Ok(ApiMessage { message: SUCCESS_MESSAGE.to_owned() })
}

#[cfg(test)]
#[path = "simulator_test.rs"]
mod tests;
