//! Feed controllers and call patterns driven by the demo views.
//!
//! ARCHITECTURE
//! ============
//! Controllers own pagination bookkeeping and display state; the mock
//! sources in `feeds` own latency and data. Views only read snapshots.

pub mod api_panel;
pub mod multi_feed;
pub mod resilience;
pub mod single_feed;
pub mod split_feed;
