//! Single-source infinite scroll.
//!
//! Same trigger contract as the merged feed, over one source and without
//! reordering: items appear in the order the source returned them.

use std::sync::{Arc, Mutex};

use feeds::{Cursor, Item, PageSource};
use tracing::{debug, error, info};

use crate::state::{FeedSnapshot, LoadingFlag, Track, TriggerOutcome, fetch_next, lock};

#[derive(Default)]
struct SingleState {
    track: Track,
    last_error: Option<String>,
}

/// Append-only infinite feed over one paginated source.
#[derive(Clone)]
pub struct SingleFeed {
    source: Arc<dyn PageSource>,
    loading: LoadingFlag,
    inner: Arc<Mutex<SingleState>>,
}

impl SingleFeed {
    #[must_use]
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self {
            source,
            loading: LoadingFlag::default(),
            inner: Arc::new(Mutex::new(SingleState::default())),
        }
    }

    /// Handle the load-more sentinel becoming visible.
    pub async fn trigger(&self) -> TriggerOutcome {
        let Some(_guard) = self.loading.try_begin() else {
            debug!(source = self.source.name(), "trigger ignored; fetch in flight");
            return TriggerOutcome::Ignored;
        };

        let cursor = {
            let state = lock(&self.inner);
            if state.track.cursor.is_exhausted() {
                return TriggerOutcome::Exhausted;
            }
            state.track.cursor
        };

        let result = fetch_next(self.source.as_ref(), cursor).await;

        let mut state = lock(&self.inner);
        match result {
            Ok(page) => {
                let added = state.track.apply(page);
                state.last_error = None;
                info!(source = self.source.name(), added, page = cursor.page, "feed page loaded");
                TriggerOutcome::Loaded { added }
            }
            Err(e) => {
                error!(source = self.source.name(), page = cursor.page, error = %e, "feed fetch failed");
                let message = e.to_string();
                state.last_error = Some(message.clone());
                TriggerOutcome::Failed { added: 0, message }
            }
        }
    }

    #[must_use]
    pub fn items(&self) -> Vec<Item> {
        lock(&self.inner).track.items.clone()
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        lock(&self.inner).track.cursor
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        lock(&self.inner).track.cursor.is_exhausted()
    }

    #[must_use]
    pub fn snapshot(&self) -> FeedSnapshot {
        let state = lock(&self.inner);
        FeedSnapshot {
            items: state.track.items.clone(),
            loading: self.loading.is_loading(),
            exhausted: state.track.cursor.is_exhausted(),
            last_error: state.last_error.clone(),
        }
    }
}

#[cfg(test)]
#[path = "single_feed_test.rs"]
mod tests;
