//! Infinite-scroll feed controllers over mock paginated sources.
//!
//! The browser pieces of a scroll UI are reduced to two inputs: a
//! `trigger` call when the load-more sentinel becomes visible, and snapshot
//! reads for rendering. Everything else (cursors, the loading guard,
//! merging, failure display) lives here.

pub mod config;
pub mod services;
pub mod state;
pub mod view;

pub use config::{FeedConfig, JoinPolicy};
pub use services::api_panel::{ApiCallPanel, CallState};
pub use services::multi_feed::MultiFeed;
pub use services::single_feed::SingleFeed;
pub use services::split_feed::{Lane, SplitFeed};
pub use state::{FeedSnapshot, TriggerOutcome};
