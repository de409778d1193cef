//! Registry and scheduler behavior.
//!
//! Timing tests run on a paused clock so tick counts are exact instead of
//! sleep-flaky.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use vitals_collector::registry::MetricRegistry;
use vitals_core::model::Variant;

#[test]
fn duplicate_registration_fails_without_side_effects() {
    let reg = MetricRegistry::new(4, Duration::from_millis(10));
    reg.register("x", || Variant::Integer(1)).unwrap();

    let err = reg.register("x", || Variant::Integer(2)).unwrap_err();
    assert_eq!(err.code(), "DUPLICATE_METRIC");

    assert_eq!(reg.sample_count("x"), Some(0));
    assert_eq!(reg.sample_count("y"), None);
}

#[test]
fn empty_registry_renders_an_empty_object() {
    let reg = MetricRegistry::new(4, Duration::from_millis(10));
    assert_eq!(reg.snapshot().render_json(), r#"{"metrics":{}}"#);
    assert!(!reg.is_running());
}

#[tokio::test(start_paused = true)]
async fn collected_values_come_from_the_producer() {
    let reg = MetricRegistry::new(4, Duration::from_millis(10));
    reg.register("answer", || Variant::Integer(42)).unwrap();
    reg.start();

    tokio::time::sleep(Duration::from_millis(15)).await;
    reg.stop();

    let snap = reg.snapshot();
    let stats = &snap.metrics["answer"].stats;
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].value, Variant::Integer(42));
}

#[tokio::test(start_paused = true)]
async fn history_is_bounded_by_capacity() {
    let reg = MetricRegistry::new(3, Duration::from_millis(10));
    reg.register("count", || Variant::Integer(0)).unwrap();
    reg.start();

    // Two ticks fit into 25ms at a 10ms interval.
    tokio::time::sleep(Duration::from_millis(25)).await;
    assert_eq!(reg.sample_count("count"), Some(2));

    // Five more ticks push the total past the capacity of three.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(reg.sample_count("count"), Some(3));

    reg.stop();
}

#[tokio::test(start_paused = true)]
async fn repeated_start_keeps_one_scheduler() {
    let reg = MetricRegistry::new(16, Duration::from_millis(10));
    reg.register("count", || Variant::Integer(0)).unwrap();

    reg.start();
    reg.start();
    reg.start();
    assert!(reg.is_running());

    // Three ticks in 35ms; three tasks would have produced nine.
    tokio::time::sleep(Duration::from_millis(35)).await;
    assert_eq!(reg.sample_count("count"), Some(3));

    reg.stop();
}

#[tokio::test(start_paused = true)]
async fn stop_freezes_history_and_restart_resumes() {
    let reg = MetricRegistry::new(16, Duration::from_millis(10));
    reg.register("count", || Variant::Integer(0)).unwrap();

    reg.start();
    tokio::time::sleep(Duration::from_millis(25)).await;
    reg.stop();
    reg.stop();
    assert!(!reg.is_running());

    // Sleep well past several would-be ticks; the count must not move.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(reg.sample_count("count"), Some(2));

    reg.start();
    tokio::time::sleep(Duration::from_millis(25)).await;
    assert_eq!(reg.sample_count("count"), Some(4));

    reg.stop();
}

#[tokio::test(start_paused = true)]
async fn late_registration_joins_the_next_tick() {
    let reg = MetricRegistry::new(16, Duration::from_millis(10));
    reg.register("early", || Variant::Integer(1)).unwrap();
    reg.start();

    tokio::time::sleep(Duration::from_millis(15)).await;
    reg.register("late", || Variant::Integer(2)).unwrap();

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(reg.sample_count("early"), Some(3));
    assert_eq!(reg.sample_count("late"), Some(2));

    reg.stop();
}

#[tokio::test(start_paused = true)]
async fn panicking_producer_does_not_stop_collection() {
    let reg = MetricRegistry::new(16, Duration::from_millis(10));
    reg.register("bad", || panic!("boom")).unwrap();
    reg.register("good", || Variant::Integer(1)).unwrap();
    reg.start();

    tokio::time::sleep(Duration::from_millis(35)).await;
    assert_eq!(reg.sample_count("good"), Some(3));
    assert_eq!(reg.sample_count("bad"), Some(0));

    reg.stop();
}

#[tokio::test(start_paused = true)]
async fn every_metric_in_a_tick_shares_one_timestamp() {
    let reg = MetricRegistry::new(16, Duration::from_millis(10));
    reg.register("a", || Variant::Integer(1)).unwrap();
    reg.register("b", || Variant::Integer(2)).unwrap();
    reg.start();

    tokio::time::sleep(Duration::from_millis(15)).await;
    reg.stop();

    let snap = reg.snapshot();
    assert_eq!(snap.metrics["a"].stats.len(), 1);
    assert_eq!(
        snap.metrics["a"].stats[0].timestamp,
        snap.metrics["b"].stats[0].timestamp
    );
}

#[tokio::test(start_paused = true)]
async fn opaque_values_degrade_the_json_export() {
    let reg = MetricRegistry::new(4, Duration::from_millis(10));
    reg.register("weird", || Variant::Opaque("channel")).unwrap();
    reg.start();

    assert_eq!(
        reg.snapshot().render_json(),
        r#"{"metrics":{"weird":{"stats":[]}}}"#
    );

    tokio::time::sleep(Duration::from_millis(15)).await;
    reg.stop();

    assert_eq!(reg.snapshot().render_json(), "null");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_snapshots_never_observe_half_a_tick() {
    let reg = MetricRegistry::new(1024, Duration::from_millis(1));
    reg.register("a", || Variant::Integer(1)).unwrap();
    reg.register("b", || Variant::Integer(2)).unwrap();
    reg.start();

    for _ in 0..200 {
        let snap = reg.snapshot();
        assert_eq!(
            snap.metrics["a"].stats.len(),
            snap.metrics["b"].stats.len()
        );
        tokio::task::yield_now().await;
    }

    reg.stop();
}
