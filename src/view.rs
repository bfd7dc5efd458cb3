//! Plain-text rendering of controller snapshots.
//!
//! Each function returns the lines a terminal should print, top to bottom.
//! Footer rules mirror the list UIs: a loading line while a fetch is in
//! flight, an end-of-feed line only once nothing is loading and every
//! source is done.

use feeds::Item;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::services::api_panel::CallState;
use crate::services::split_feed::SplitSnapshot;
use crate::state::FeedSnapshot;

pub const LOADING: &str = "Loading...";
pub const NO_MORE_DATA: &str = "No more data.";
pub const NO_DATA_YET: &str = "No data fetched yet.";

/// Format epoch milliseconds as RFC 3339, falling back to the raw number.
#[must_use]
pub fn format_timestamp(ms: i64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000)
        .ok()
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .unwrap_or_else(|| ms.to_string())
}

fn item_line(item: &Item) -> String {
    format!("{}  ({})", item.title, format_timestamp(item.created_at))
}

#[must_use]
pub fn render_feed(heading: &str, snapshot: &FeedSnapshot) -> Vec<String> {
    let mut lines = vec![heading.to_owned()];
    lines.extend(snapshot.items.iter().map(item_line));

    if snapshot.loading {
        lines.push(LOADING.to_owned());
    } else if snapshot.exhausted {
        lines.push(NO_MORE_DATA.to_owned());
    }
    if let Some(error) = &snapshot.last_error {
        lines.push(format!("Fetch error: {error}"));
    }
    lines
}

#[must_use]
pub fn render_panel(state: &CallState) -> Vec<String> {
    let body = match state {
        CallState::Idle => NO_DATA_YET.to_owned(),
        CallState::Loading => LOADING.to_owned(),
        CallState::Loaded(data) => data.message.clone(),
        CallState::Failed { error } => format!("Error: {error}"),
    };
    vec!["Simulated API Call".to_owned(), body]
}

#[must_use]
pub fn render_split(snapshot: &SplitSnapshot) -> Vec<String> {
    let mut lines = vec!["Infinite Scroll with Multiple APIs".to_owned()];
    lines.extend(lane_lines("Posts", "posts", &snapshot.posts, snapshot.loading, snapshot.posts_exhausted));
    lines.extend(lane_lines(
        "Comments",
        "comments",
        &snapshot.comments,
        snapshot.loading,
        snapshot.comments_exhausted,
    ));
    lines
}

fn lane_lines(heading: &str, noun: &str, items: &[Item], loading: bool, exhausted: bool) -> Vec<String> {
    let mut lines = vec![format!("== {heading} ==")];
    lines.extend(items.iter().map(|item| format!("  {}", item.title)));
    if loading {
        lines.push(format!("Loading {noun}..."));
    }
    if exhausted && !items.is_empty() {
        lines.push(format!("No more {noun} to load"));
    }
    lines
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
