//! Dual-source infinite scroll with merged, time-ordered output.
//!
//! DESIGN
//! ======
//! Two independent cursors, two accumulated lists, one loading flag. Each
//! trigger fetches the next page of every source that still has data
//! (exhausted sources contribute an empty page without being called), joins
//! both fetches, then appends and advances. The merged list is derived on
//! read: both lists concatenated and stably sorted by `created_at`
//! descending.
//!
//! FAILURE HANDLING
//! ================
//! Under `JoinPolicy::AllOrNothing` a failure of either fetch discards both
//! pages, so cursors never drift apart from what was appended. Under
//! `JoinPolicy::Settled` the healthy source's page is applied and only the
//! failed source stays put. Both fetches always settle before state changes.

use std::sync::{Arc, Mutex};

use feeds::{Cursor, FeedError, Item, Page, PageSource};
use tracing::{debug, error, info};

use crate::config::JoinPolicy;
use crate::services::resilience::join_settled;
use crate::state::{FeedSnapshot, LoadingFlag, Track, TriggerOutcome, fetch_next, lock};

#[derive(Default)]
struct MultiState {
    tracks: [Track; 2],
    last_error: Option<String>,
}

impl MultiState {
    fn is_exhausted(&self) -> bool {
        self.tracks.iter().all(|t| t.cursor.is_exhausted())
    }
}

/// Infinite feed over two paginated sources, merged newest-first.
///
/// Cloning shares the same feed; triggers from any clone contend for the
/// same loading flag.
#[derive(Clone)]
pub struct MultiFeed {
    sources: [Arc<dyn PageSource>; 2],
    policy: JoinPolicy,
    loading: LoadingFlag,
    inner: Arc<Mutex<MultiState>>,
}

impl MultiFeed {
    #[must_use]
    pub fn new(first: Arc<dyn PageSource>, second: Arc<dyn PageSource>, policy: JoinPolicy) -> Self {
        Self {
            sources: [first, second],
            policy,
            loading: LoadingFlag::default(),
            inner: Arc::new(Mutex::new(MultiState::default())),
        }
    }

    /// Handle the load-more sentinel becoming visible.
    pub async fn trigger(&self) -> TriggerOutcome {
        let Some(_guard) = self.loading.try_begin() else {
            debug!("multi feed trigger ignored; fetch in flight");
            return TriggerOutcome::Ignored;
        };

        let cursors = {
            let state = lock(&self.inner);
            if state.is_exhausted() {
                return TriggerOutcome::Exhausted;
            }
            [state.tracks[0].cursor, state.tracks[1].cursor]
        };

        let (first, second) = join_settled(
            fetch_next(self.sources[0].as_ref(), cursors[0]),
            fetch_next(self.sources[1].as_ref(), cursors[1]),
        )
        .await;

        let mut state = lock(&self.inner);
        let outcome = match self.policy {
            JoinPolicy::AllOrNothing => apply_all_or_nothing(&mut state, first, second),
            JoinPolicy::Settled => apply_settled(&mut state, [first, second], &self.sources),
        };

        match &outcome {
            TriggerOutcome::Loaded { added } => {
                info!(added, cursors = ?state.tracks.each_ref().map(|t| t.cursor.page), "multi feed loaded");
            }
            TriggerOutcome::Failed { added, message } => {
                error!(added, error = %message, "multi feed fetch error");
            }
            TriggerOutcome::Ignored | TriggerOutcome::Exhausted => {}
        }
        outcome
    }

    /// Both sources merged, newest first.
    #[must_use]
    pub fn merged(&self) -> Vec<Item> {
        let state = lock(&self.inner);
        merge_newest_first(&state.tracks[0].items, &state.tracks[1].items)
    }

    #[must_use]
    pub fn cursors(&self) -> [Cursor; 2] {
        let state = lock(&self.inner);
        [state.tracks[0].cursor, state.tracks[1].cursor]
    }

    /// True exactly when both sources have reported no more data.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        lock(&self.inner).is_exhausted()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    #[must_use]
    pub fn snapshot(&self) -> FeedSnapshot {
        let state = lock(&self.inner);
        FeedSnapshot {
            items: merge_newest_first(&state.tracks[0].items, &state.tracks[1].items),
            loading: self.loading.is_loading(),
            exhausted: state.is_exhausted(),
            last_error: state.last_error.clone(),
        }
    }
}

/// Concatenate and stably sort by `created_at`, newest first.
#[must_use]
pub fn merge_newest_first(first: &[Item], second: &[Item]) -> Vec<Item> {
    let mut merged: Vec<Item> = first.iter().chain(second).cloned().collect();
    merged.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    merged
}

fn apply_all_or_nothing(
    state: &mut MultiState,
    first: Result<Page, FeedError>,
    second: Result<Page, FeedError>,
) -> TriggerOutcome {
    match (first, second) {
        (Ok(first), Ok(second)) => {
            let added = state.tracks[0].apply(first) + state.tracks[1].apply(second);
            state.last_error = None;
            TriggerOutcome::Loaded { added }
        }
        (Err(e), _) | (_, Err(e)) => {
            let message = e.to_string();
            state.last_error = Some(message.clone());
            TriggerOutcome::Failed { added: 0, message }
        }
    }
}

fn apply_settled(
    state: &mut MultiState,
    results: [Result<Page, FeedError>; 2],
    sources: &[Arc<dyn PageSource>; 2],
) -> TriggerOutcome {
    let mut added = 0;
    let mut errors = Vec::new();
    for ((track, result), source) in state.tracks.iter_mut().zip(results).zip(sources) {
        match result {
            Ok(page) => added += track.apply(page),
            Err(e) => {
                error!(source = source.name(), error = %e, "source fetch failed; keeping cursor");
                errors.push(e.to_string());
            }
        }
    }

    if errors.is_empty() {
        state.last_error = None;
        TriggerOutcome::Loaded { added }
    } else {
        let message = errors.join("; ");
        state.last_error = Some(message.clone());
        TriggerOutcome::Failed { added, message }
    }
}

#[cfg(test)]
#[path = "multi_feed_test.rs"]
mod tests;
