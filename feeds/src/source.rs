//! Paginated mock sources.
//!
//! DESIGN
//! ======
//! Each source slices a bounded synthetic sequence (`1..=total_items`) into
//! fixed-size pages after sleeping for a fixed delay. Sources differ in
//! latency, page size, and item age spacing so merged feeds interleave
//! unevenly. Slicing is deterministic; only the optional failure injection
//! is random.
//!
//! TIMESTAMPS
//! ==========
//! Item `n` is `n * age_step_ms` older than the anchor. Without a fixed
//! anchor, "now" is sampled per fetch, so items from later pages are always
//! older than items from earlier ones.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rand::Rng;
use tracing::debug;

use crate::{FeedError, Item, Page, now_ms};

const DEFAULT_TOTAL_ITEMS: u32 = 100;

// =============================================================================
// TRAIT
// =============================================================================

/// Anything a feed controller can page through. Enables test doubles.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    /// Short label used in logs and error messages.
    fn name(&self) -> &str;

    /// Fetch a 1-based page.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError`] for page `0` or when the source fails.
    async fn fetch_page(&self, page: u32) -> Result<Page, FeedError>;
}

// =============================================================================
// SPEC
// =============================================================================

/// Shape of a mock source's synthetic dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceShape {
    /// Id prefix, e.g. `"api1"` produces `"api1-7"`.
    pub prefix: String,
    /// Title label; the item number is appended, e.g. `"API 1 Item"`.
    pub title: String,
    pub page_size: u32,
    pub total_items: u32,
    pub delay: Duration,
    /// Age difference between consecutive items, in milliseconds.
    pub age_step_ms: i64,
    /// Probability in `0.0..=1.0` that a fetch fails.
    pub failure_rate: f64,
    /// Fixed reference instant (ms since epoch). `None` samples the clock.
    pub anchor_ms: Option<i64>,
}

impl SourceShape {
    /// First demo API: five items per page, 800ms latency.
    #[must_use]
    pub fn api1() -> Self {
        Self::new("api1", "API 1 Item", 5, Duration::from_millis(800), 1_000_000)
    }

    /// Second demo API: three items per page, 1s latency.
    #[must_use]
    pub fn api2() -> Self {
        Self::new("api2", "API 2 Item", 3, Duration::from_millis(1000), 1_500_000)
    }

    #[must_use]
    pub fn posts() -> Self {
        Self::new("post", "Post", 5, Duration::from_millis(1000), 60_000)
    }

    #[must_use]
    pub fn comments() -> Self {
        Self::new("comment", "Comment", 5, Duration::from_millis(1000), 30_000)
    }

    fn new(prefix: &str, title: &str, page_size: u32, delay: Duration, age_step_ms: i64) -> Self {
        Self {
            prefix: prefix.to_owned(),
            title: title.to_owned(),
            page_size,
            total_items: DEFAULT_TOTAL_ITEMS,
            delay,
            age_step_ms,
            failure_rate: 0.0,
            anchor_ms: None,
        }
    }

    /// At least one item per page.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub fn with_total_items(mut self, total_items: u32) -> Self {
        self.total_items = total_items;
        self
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Clamped into `0.0..=1.0`.
    #[must_use]
    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = failure_rate.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_anchor(mut self, anchor_ms: i64) -> Self {
        self.anchor_ms = Some(anchor_ms);
        self
    }

    /// Deterministic slice for a 1-based page, relative to `anchor_ms`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidPage`] for page `0`.
    pub fn slice(&self, page: u32, anchor_ms: i64) -> Result<Page, FeedError> {
        if page == 0 {
            return Err(FeedError::InvalidPage(page));
        }

        let start = (page - 1).saturating_mul(self.page_size).min(self.total_items);
        let end = start.saturating_add(self.page_size).min(self.total_items);
        let items = (start + 1..=end)
            .map(|n| Item {
                id: format!("{}-{n}", self.prefix),
                title: format!("{} {n}", self.title),
                created_at: anchor_ms.saturating_sub(i64::from(n).saturating_mul(self.age_step_ms)),
            })
            .collect();

        Ok(Page { items, has_more: end < self.total_items })
    }
}

// =============================================================================
// MOCK SOURCE
// =============================================================================

/// In-process paginated source that sleeps, optionally fails, then slices.
#[derive(Debug)]
pub struct MockSource {
    shape: SourceShape,
    fetches: AtomicUsize,
}

impl MockSource {
    #[must_use]
    pub fn new(shape: SourceShape) -> Self {
        Self { shape, fetches: AtomicUsize::new(0) }
    }

    #[must_use]
    pub fn shape(&self) -> &SourceShape {
        &self.shape
    }

    /// Number of `fetch_page` calls made so far, including failed ones.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn roll_failure(&self) -> bool {
        self.shape.failure_rate > 0.0 && rand::rng().random_bool(self.shape.failure_rate)
    }
}

#[async_trait::async_trait]
impl PageSource for MockSource {
    fn name(&self) -> &str {
        &self.shape.prefix
    }

    async fn fetch_page(&self, page: u32) -> Result<Page, FeedError> {
        let call = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(source = %self.shape.prefix, page, call, "mock fetch started");

        tokio::time::sleep(self.shape.delay).await;

        if page != 0 && self.roll_failure() {
            return Err(FeedError::Injected { source_name: self.shape.prefix.clone() });
        }

        let anchor = self.shape.anchor_ms.unwrap_or_else(now_ms);
        let result = self.shape.slice(page, anchor)?;
        debug!(
            source = %self.shape.prefix,
            page,
            items = result.items.len(),
            has_more = result.has_more,
            "mock fetch done"
        );
        Ok(result)
    }
}

/// First demo API with default shape.
#[must_use]
pub fn mock_api1() -> MockSource {
    MockSource::new(SourceShape::api1())
}

/// Second demo API with default shape.
#[must_use]
pub fn mock_api2() -> MockSource {
    MockSource::new(SourceShape::api2())
}

#[cfg(test)]
#[path = "source_test.rs"]
mod tests;
