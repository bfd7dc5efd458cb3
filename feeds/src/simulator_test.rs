use super::*;

#[tokio::test(start_paused = true)]
async fn zero_failure_rate_always_resolves() {
    for _ in 0..20 {
        let msg = simulate_api(Duration::from_millis(10), 0.0).await.expect("resolve");
        assert_eq!(msg.message, SUCCESS_MESSAGE);
    }
}

#[tokio::test(start_paused = true)]
async fn full_failure_rate_always_rejects() {
    let err = simulate_api(DEFAULT_SIMULATOR_DELAY, 1.0).await.expect_err("reject");
    assert_eq!(err.to_string(), "Simulated API failure!");
}

#[tokio::test(start_paused = true)]
async fn resolves_only_after_delay() {
    let started = tokio::time::Instant::now();
    let _ = simulate_api(Duration::from_millis(3000), 0.0).await;
    assert!(started.elapsed() >= Duration::from_millis(3000));
}

#[tokio::test(start_paused = true)]
async fn out_of_range_rate_is_clamped() {
    assert!(simulate_api(Duration::ZERO, 7.5).await.is_err());
    assert!(simulate_api(Duration::ZERO, -3.0).await.is_ok());
}
