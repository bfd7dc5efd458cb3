//! Error-handling patterns for pairs of async calls.
//!
//! Three shapes, picked by how much partial success matters:
//! - `join_all_or_nothing`: first error wins, no partial results.
//! - `join_settled`: both outcomes reported, failures isolated.
//! - `run_independently`: sequential, each failure logged and swallowed.
//!
//! `retry_with_limit` wraps a single call.

use std::fmt::Display;
use std::future::Future;

use tracing::{error, warn};

/// Call `op` until it succeeds, at most `attempts` times (minimum one).
///
/// # Errors
///
/// Returns the error from the final attempt.
pub async fn retry_with_limit<T, E, F, Fut>(attempts: usize, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= attempts => return Err(e),
            Err(e) => {
                warn!(attempt, attempts, error = %e, "attempt failed; retrying");
                attempt += 1;
            }
        }
    }
}

/// Run both futures concurrently and report each outcome.
pub async fn join_settled<A, B>(a: A, b: B) -> (A::Output, B::Output)
where
    A: Future,
    B: Future,
{
    tokio::join!(a, b)
}

/// Run both futures concurrently; fail as soon as either fails.
///
/// # Errors
///
/// Returns the first error observed.
pub async fn join_all_or_nothing<A, B, T1, T2, E>(a: A, b: B) -> Result<(T1, T2), E>
where
    A: Future<Output = Result<T1, E>>,
    B: Future<Output = Result<T2, E>>,
{
    tokio::try_join!(a, b)
}

/// Await `a` then `b`, each guarded separately. Failures are logged with
/// their position and become `None`.
pub async fn run_independently<A, B, T1, T2, E1, E2>(a: A, b: B) -> (Option<T1>, Option<T2>)
where
    A: Future<Output = Result<T1, E1>>,
    B: Future<Output = Result<T2, E2>>,
    E1: Display,
    E2: Display,
{
    let first = a.await.inspect_err(|e| error!(call = 1, error = %e, "call failed")).ok();
    let second = b.await.inspect_err(|e| error!(call = 2, error = %e, "call failed")).ok();
    (first, second)
}

#[cfg(test)]
#[path = "resilience_test.rs"]
mod tests;
