//! Two side-by-side infinite lists that are never merged.
//!
//! DESIGN
//! ======
//! Each lane (posts, comments) has its own cursor and its own load-more
//! sentinel, but both share one loading flag: while either lane is fetching,
//! triggers on both lanes are ignored. A lane ends when its source returns an
//! empty page or reports no more data.

use std::sync::{Arc, Mutex};

use feeds::{Cursor, Item, Page, PageSource};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::services::resilience::join_settled;
use crate::state::{LoadingFlag, Track, TriggerOutcome, fetch_next, lock};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    Posts,
    Comments,
}

impl Lane {
    fn index(self) -> usize {
        match self {
            Self::Posts => 0,
            Self::Comments => 1,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Comments => "comments",
        }
    }
}

/// Render-ready state of both lanes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SplitSnapshot {
    pub posts: Vec<Item>,
    pub comments: Vec<Item>,
    pub loading: bool,
    pub posts_exhausted: bool,
    pub comments_exhausted: bool,
}

#[derive(Clone)]
pub struct SplitFeed {
    sources: [Arc<dyn PageSource>; 2],
    loading: LoadingFlag,
    tracks: Arc<Mutex<[Track; 2]>>,
}

impl SplitFeed {
    #[must_use]
    pub fn new(posts: Arc<dyn PageSource>, comments: Arc<dyn PageSource>) -> Self {
        Self {
            sources: [posts, comments],
            loading: LoadingFlag::default(),
            tracks: Arc::new(Mutex::new([Track::default(), Track::default()])),
        }
    }

    /// Load the first page of both lanes together, as on first render.
    pub async fn mount(&self) -> [TriggerOutcome; 2] {
        let Some(_guard) = self.loading.try_begin() else {
            return [TriggerOutcome::Ignored, TriggerOutcome::Ignored];
        };

        let cursors = {
            let tracks = lock(&self.tracks);
            [tracks[0].cursor, tracks[1].cursor]
        };
        let (posts, comments) = join_settled(
            fetch_next(self.sources[0].as_ref(), cursors[0]),
            fetch_next(self.sources[1].as_ref(), cursors[1]),
        )
        .await;

        [self.settle(Lane::Posts, posts), self.settle(Lane::Comments, comments)]
    }

    /// Handle the sentinel at the end of `lane` becoming visible.
    pub async fn trigger(&self, lane: Lane) -> TriggerOutcome {
        let Some(_guard) = self.loading.try_begin() else {
            debug!(lane = lane.label(), "trigger ignored; fetch in flight");
            return TriggerOutcome::Ignored;
        };

        let cursor = {
            let tracks = lock(&self.tracks);
            let cursor = tracks[lane.index()].cursor;
            if cursor.is_exhausted() {
                return TriggerOutcome::Exhausted;
            }
            cursor
        };

        let result = fetch_next(self.sources[lane.index()].as_ref(), cursor).await;
        self.settle(lane, result)
    }

    fn settle(&self, lane: Lane, result: Result<Page, feeds::FeedError>) -> TriggerOutcome {
        let mut tracks = lock(&self.tracks);
        let track = &mut tracks[lane.index()];
        match result {
            Ok(page) if page.items.is_empty() => {
                track.cursor.has_more = false;
                info!(lane = lane.label(), "lane exhausted");
                TriggerOutcome::Loaded { added: 0 }
            }
            Ok(page) => {
                let added = track.apply(page);
                info!(lane = lane.label(), added, "lane page loaded");
                TriggerOutcome::Loaded { added }
            }
            Err(e) => {
                error!(lane = lane.label(), error = %e, "lane fetch failed");
                TriggerOutcome::Failed { added: 0, message: e.to_string() }
            }
        }
    }

    #[must_use]
    pub fn items(&self, lane: Lane) -> Vec<Item> {
        lock(&self.tracks)[lane.index()].items.clone()
    }

    #[must_use]
    pub fn cursor(&self, lane: Lane) -> Cursor {
        lock(&self.tracks)[lane.index()].cursor
    }

    #[must_use]
    pub fn is_exhausted(&self, lane: Lane) -> bool {
        self.cursor(lane).is_exhausted()
    }

    #[must_use]
    pub fn snapshot(&self) -> SplitSnapshot {
        let tracks = lock(&self.tracks);
        SplitSnapshot {
            posts: tracks[0].items.clone(),
            comments: tracks[1].items.clone(),
            loading: self.loading.is_loading(),
            posts_exhausted: tracks[0].cursor.is_exhausted(),
            comments_exhausted: tracks[1].cursor.is_exhausted(),
        }
    }
}

#[cfg(test)]
#[path = "split_feed_test.rs"]
mod tests;
