use std::time::Duration;

use feeds::{FeedError, MockSource, SourceShape};

use super::*;

/// Always claims more data; only an empty page signals the end.
struct OptimisticSource {
    pages: u32,
}

#[async_trait::async_trait]
impl PageSource for OptimisticSource {
    fn name(&self) -> &str {
        "optimistic"
    }

    async fn fetch_page(&self, page: u32) -> Result<Page, FeedError> {
        tokio::time::sleep(Duration::from_millis(100)).await;
        let items = if page <= self.pages {
            vec![Item { id: format!("o-{page}"), title: format!("O {page}"), created_at: 0 }]
        } else {
            Vec::new()
        };
        Ok(Page { items, has_more: true })
    }
}

fn mocks() -> (Arc<MockSource>, Arc<MockSource>) {
    (
        Arc::new(MockSource::new(SourceShape::posts().with_total_items(12))),
        Arc::new(MockSource::new(SourceShape::comments().with_total_items(7))),
    )
}

#[tokio::test(start_paused = true)]
async fn mount_loads_first_page_of_both_lanes() {
    let (posts, comments) = mocks();
    let feed = SplitFeed::new(posts.clone(), comments.clone());

    let outcomes = feed.mount().await;

    assert_eq!(outcomes, [TriggerOutcome::Loaded { added: 5 }, TriggerOutcome::Loaded { added: 5 }]);
    assert_eq!(feed.items(Lane::Posts)[0].id, "post-1");
    assert_eq!(feed.items(Lane::Comments)[4].id, "comment-5");
    assert_eq!(posts.fetch_count(), 1);
    assert_eq!(comments.fetch_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn lanes_page_independently() {
    let (posts, comments) = mocks();
    let feed = SplitFeed::new(posts.clone(), comments.clone());
    feed.mount().await;

    assert_eq!(feed.trigger(Lane::Posts).await, TriggerOutcome::Loaded { added: 5 });
    assert_eq!(feed.trigger(Lane::Posts).await, TriggerOutcome::Loaded { added: 2 });

    assert_eq!(feed.items(Lane::Posts).len(), 12);
    assert_eq!(feed.items(Lane::Comments).len(), 5);
    assert!(feed.is_exhausted(Lane::Posts));
    assert!(!feed.is_exhausted(Lane::Comments));
    assert_eq!(comments.fetch_count(), 1);

    assert_eq!(feed.trigger(Lane::Posts).await, TriggerOutcome::Exhausted);
    assert_eq!(posts.fetch_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn shared_loading_flag_blocks_other_lane() {
    let (posts, comments) = mocks();
    let feed = SplitFeed::new(posts.clone(), comments.clone());

    let background = feed.clone();
    let in_flight = tokio::spawn(async move { background.trigger(Lane::Posts).await });
    tokio::time::sleep(Duration::from_millis(1)).await;

    assert!(feed.snapshot().loading);
    assert_eq!(feed.trigger(Lane::Comments).await, TriggerOutcome::Ignored);
    assert_eq!(feed.mount().await, [TriggerOutcome::Ignored, TriggerOutcome::Ignored]);

    assert_eq!(in_flight.await.unwrap(), TriggerOutcome::Loaded { added: 5 });
    assert_eq!(comments.fetch_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn empty_page_ends_lane_even_if_source_claims_more() {
    let feed = SplitFeed::new(Arc::new(OptimisticSource { pages: 2 }), Arc::new(OptimisticSource { pages: 0 }));

    assert_eq!(feed.trigger(Lane::Posts).await, TriggerOutcome::Loaded { added: 1 });
    assert_eq!(feed.trigger(Lane::Posts).await, TriggerOutcome::Loaded { added: 1 });
    assert!(!feed.is_exhausted(Lane::Posts));
    assert_eq!(feed.trigger(Lane::Posts).await, TriggerOutcome::Loaded { added: 0 });
    assert!(feed.is_exhausted(Lane::Posts));
    assert_eq!(feed.trigger(Lane::Posts).await, TriggerOutcome::Exhausted);

    let snapshot = feed.snapshot();
    assert!(snapshot.posts_exhausted);
    assert_eq!(snapshot.posts.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn failed_lane_is_left_unchanged() {
    let posts = Arc::new(MockSource::new(SourceShape::posts().with_failure_rate(1.0)));
    let (_, comments) = mocks();
    let feed = SplitFeed::new(posts, comments);

    let outcome = feed.trigger(Lane::Posts).await;
    assert_eq!(
        outcome,
        TriggerOutcome::Failed { added: 0, message: "injected failure from post".to_owned() }
    );
    assert_eq!(feed.cursor(Lane::Posts), Cursor::new());
    assert!(feed.items(Lane::Posts).is_empty());
    assert!(!feed.snapshot().loading);
}
