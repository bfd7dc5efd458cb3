//! Shared feed controller state.
//!
//! DESIGN
//! ======
//! Every controller pairs a `LoadingFlag` with its data behind a
//! `std::sync::Mutex`. The flag is the only re-entrancy guard: a trigger
//! that cannot claim it is ignored without touching any source. Locks are
//! taken between awaits only, never across one.
//!
//! The claim is released by `LoadingGuard::drop`, so a trigger future that
//! is dropped mid-fetch still leaves the controller ready for the next one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use feeds::{Cursor, FeedError, Item, Page, PageSource};
use serde::Serialize;

// =============================================================================
// TRIGGER OUTCOME
// =============================================================================

/// What a visibility trigger did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A fetch was already in flight; nothing was requested.
    Ignored,
    /// Every source is exhausted; nothing was requested.
    Exhausted,
    /// Fetch finished and `added` items were appended.
    Loaded { added: usize },
    /// At least one fetch failed. `added` counts items still applied.
    Failed { added: usize, message: String },
}

// =============================================================================
// LOADING FLAG
// =============================================================================

/// Single boolean guarding one controller against overlapping fetch cycles.
#[derive(Clone, Debug, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    /// Claim the flag, or `None` if a fetch is already in flight.
    #[must_use]
    pub fn try_begin(&self) -> Option<LoadingGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LoadingGuard(Arc::clone(&self.0)))
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Clears the owning [`LoadingFlag`] on drop.
#[derive(Debug)]
pub struct LoadingGuard(Arc<AtomicBool>);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// =============================================================================
// TRACK
// =============================================================================

/// Accumulated items and pagination position for one source.
#[derive(Clone, Debug, Default)]
pub struct Track {
    pub cursor: Cursor,
    pub items: Vec<Item>,
}

impl Track {
    /// Append a fetched page and advance the cursor. Returns items added.
    pub fn apply(&mut self, page: Page) -> usize {
        self.cursor.advance(&page);
        let added = page.items.len();
        self.items.extend(page.items);
        added
    }
}

/// Fetch the cursor's page, or an empty final page if the source is done.
///
/// An exhausted source is never called.
///
/// # Errors
///
/// Propagates the source's [`FeedError`].
pub async fn fetch_next(source: &dyn PageSource, cursor: Cursor) -> Result<Page, FeedError> {
    if cursor.is_exhausted() {
        return Ok(Page::empty());
    }
    source.fetch_page(cursor.page).await
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Point-in-time view of a single-list feed, ready to render.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeedSnapshot {
    pub items: Vec<Item>,
    pub loading: bool,
    pub exhausted: bool,
    pub last_error: Option<String>,
}

/// Lock a controller mutex, recovering the data if a holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
