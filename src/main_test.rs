use serde_json::Value;

use super::*;

fn fast_config() -> FeedConfig {
    FeedConfig {
        api1_delay_ms: 0,
        api2_delay_ms: 0,
        lane_delay_ms: 0,
        simulator_delay_ms: 0,
        ..FeedConfig::default()
    }
}

fn parse_json(out: &[u8]) -> Value {
    serde_json::from_slice(out).expect("stdout holds exactly one JSON document")
}

fn item_ids(items: &Value) -> Vec<&str> {
    items.as_array().unwrap().iter().map(|i| i["id"].as_str().unwrap()).collect()
}

// =============================================================================
// --json
// =============================================================================

#[tokio::test(start_paused = true)]
async fn simulate_json_is_only_the_settled_state() {
    let mut out = Vec::new();
    run_simulate(&fast_config(), false, true, &mut out).await.unwrap();

    let json = parse_json(&out);
    assert_eq!(json["state"], "loaded");
    assert_eq!(json["message"], feeds::simulator::SUCCESS_MESSAGE);
}

#[tokio::test(start_paused = true)]
async fn single_json_is_only_the_snapshot() {
    let mut out = Vec::new();
    run_single(&fast_config(), SourceChoice::Api2, 2, true, &mut out).await.unwrap();

    let json = parse_json(&out);
    assert_eq!(item_ids(&json["items"]), ["api2-1", "api2-2", "api2-3", "api2-4", "api2-5", "api2-6"]);
    assert_eq!(json["loading"], false);
    assert_eq!(json["exhausted"], false);
    assert_eq!(json["last_error"], Value::Null);
}

#[tokio::test(start_paused = true)]
async fn multi_json_is_only_the_merged_snapshot() {
    let mut out = Vec::new();
    run_multi(&fast_config(), 1, true, &mut out).await.unwrap();

    let json = parse_json(&out);
    assert_eq!(json["items"].as_array().unwrap().len(), 8);
    assert_eq!(json["loading"], false);
}

#[tokio::test(start_paused = true)]
async fn split_json_is_only_the_lane_snapshot() {
    let mut out = Vec::new();
    run_split(&fast_config(), 2, true, &mut out).await.unwrap();

    let json = parse_json(&out);
    assert_eq!(json["posts"].as_array().unwrap().len(), 10);
    assert_eq!(json["comments"].as_array().unwrap().len(), 10);
    assert_eq!(json["posts_exhausted"], false);
}

// =============================================================================
// view lines
// =============================================================================

#[tokio::test(start_paused = true)]
async fn simulate_text_shows_idle_then_result() {
    let mut out = Vec::new();
    run_simulate(&fast_config(), false, false, &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains(scrollfeed::view::NO_DATA_YET));
    assert!(text.contains(feeds::simulator::SUCCESS_MESSAGE));
}

#[tokio::test(start_paused = true)]
async fn single_text_reports_end_of_feed() {
    let config = FeedConfig { total_items: 4, ..fast_config() };
    let mut out = Vec::new();
    run_single(&config, SourceChoice::Api1, 5, false, &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains(scrollfeed::view::NO_MORE_DATA));
}
