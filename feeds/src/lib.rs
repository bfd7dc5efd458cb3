//! Shared feed model and mock data sources for the scroll demos.
//!
//! This crate owns the item/page representation consumed by every feed
//! controller, plus the in-process "APIs" that stand in for a backend:
//! paginated sources with artificial latency and a single-object simulator
//! with random failure. It holds no UI state.

pub mod simulator;
pub mod source;

use serde::{Deserialize, Serialize};

pub use simulator::{ApiMessage, SimulatedFailure, simulate_api};
pub use source::{MockSource, PageSource, SourceShape, mock_api1, mock_api2};

/// Error returned by [`PageSource::fetch_page`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedError {
    /// Pages are 1-based; page `0` does not exist.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
    /// The source was configured to fail and rolled a failure.
    #[error("injected failure from {source_name}")]
    Injected { source_name: String },
}

/// A single synthetic record shown in a feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// `"{prefix}-{n}"`, unique within its source.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

/// One page of results from a [`PageSource`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<Item>,
    /// Whether a later page still holds items.
    pub has_more: bool,
}

impl Page {
    /// The page an already-exhausted source yields without being called.
    #[must_use]
    pub fn empty() -> Self {
        Self { items: Vec::new(), has_more: false }
    }
}

/// Pagination position into one source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    /// Next 1-based page to request.
    pub page: u32,
    /// Whether the last response reported more data.
    pub has_more: bool,
}

impl Cursor {
    #[must_use]
    pub fn new() -> Self {
        Self { page: 1, has_more: true }
    }

    /// Apply a fetched page: step forward only if that page reported more data.
    pub fn advance(&mut self, page: &Page) {
        if page.has_more {
            self.page += 1;
        }
        self.has_more = page.has_more;
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        !self.has_more
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Milliseconds since the Unix epoch, or `0` if the clock is before it.
#[must_use]
pub fn now_ms() -> i64 {
    let Ok(dur) = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(dur.as_millis()).unwrap_or(i64::MAX)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
