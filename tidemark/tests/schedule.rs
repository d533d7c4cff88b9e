mod helpers;

use std::sync::Arc;
use std::time::Duration;

use tidemark::{ScheduleConfig, TidemarkError};
use tidemark_mock::MemoryStore;

use helpers::*;

/// Let spawned runs make progress until the store holds `rows`.
async fn wait_for_rows(store: &MemoryStore, rows: usize) {
    for _ in 0..1_000 {
        if store.len().await >= rows {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("store never reached {rows} rows (has {})", store.len().await);
}

#[tokio::test]
async fn zero_interval_is_rejected() {
    let store = MemoryStore::new();
    let tidemark = Arc::new(mock_builder(&store).build().expect("valid builder"));
    let err = tidemark
        .schedule(ScheduleConfig {
            interval: Duration::ZERO,
            run_on_startup: true,
        })
        .expect_err("zero interval");
    assert!(matches!(err, TidemarkError::InvalidArg(_)));
}

#[tokio::test(start_paused = true)]
async fn startup_run_fires_immediately() {
    let store = MemoryStore::new();
    let tidemark = Arc::new(mock_builder(&store).build().expect("valid builder"));
    let handle = tidemark
        .schedule(ScheduleConfig::default())
        .expect("schedule");

    wait_for_rows(&store, MOCK_TOTAL_ROWS).await;
    assert_eq!(store.attempts().await, MOCK_TOTAL_ROWS);
    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn interval_triggers_rerun_without_new_rows() {
    let store = MemoryStore::new();
    let tidemark = Arc::new(mock_builder(&store).build().expect("valid builder"));
    let handle = Arc::clone(&tidemark)
        .schedule(ScheduleConfig {
            interval: Duration::from_secs(3_600),
            run_on_startup: false,
        })
        .expect("schedule");

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(store.is_empty().await, "no startup run requested");

    tokio::time::sleep(Duration::from_secs(3_600)).await;
    wait_for_rows(&store, MOCK_TOTAL_ROWS).await;

    // The next tick re-runs over identical data: every row is a duplicate.
    tokio::time::sleep(Duration::from_secs(3_600)).await;
    for _ in 0..1_000 {
        if store.attempts().await >= 2 * MOCK_TOTAL_ROWS {
            break;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    assert_eq!(store.attempts().await, 2 * MOCK_TOTAL_ROWS);
    assert_eq!(store.len().await, MOCK_TOTAL_ROWS);
    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn stopped_schedule_triggers_nothing() {
    let store = MemoryStore::new();
    let tidemark = Arc::new(mock_builder(&store).build().expect("valid builder"));
    let handle = Arc::clone(&tidemark)
        .schedule(ScheduleConfig {
            interval: Duration::from_secs(60),
            run_on_startup: false,
        })
        .expect("schedule");
    assert!(!handle.is_finished());
    handle.stop().await;

    tokio::time::sleep(Duration::from_secs(600)).await;
    assert!(store.is_empty().await);
    assert!(!tidemark.is_running());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_stops_the_loop() {
    let store = MemoryStore::new();
    let tidemark = Arc::new(mock_builder(&store).build().expect("valid builder"));
    let handle = Arc::clone(&tidemark)
        .schedule(ScheduleConfig {
            interval: Duration::from_secs(60),
            run_on_startup: false,
        })
        .expect("schedule");
    drop(handle);

    tokio::time::sleep(Duration::from_secs(600)).await;
    assert!(store.is_empty().await);
    // Only the test's own reference remains once the loop task is gone.
    assert_eq!(Arc::strong_count(&tidemark), 1);
}
