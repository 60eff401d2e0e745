use std::time::Duration;

use aisstream_consumer::settings::Settings;
use serde_json::json;

use crate::helper::{settle, test};

async fn advance(duration: Duration) {
    tokio::time::advance(duration).await;
    settle().await;
}

#[tokio::test(start_paused = true)]
async fn test_silent_connection_is_closed_once_and_reopened_by_next_sample() {
    test(Settings::test_default(), |helper| async move {
        let period = helper.settings.watchdog_period();
        assert_eq!(period, Duration::from_millis(60 * 1000 + 60_000));

        helper.send_position(60.0, 5.0).await;
        helper.open(0).await;

        advance(period - Duration::from_millis(1)).await;
        assert!(!helper.connection(0).is_terminated());

        advance(Duration::from_millis(2)).await;
        assert_eq!(helper.connection(0).terminations, 1);

        advance(period * 3).await;
        let connections = helper.connections();
        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].terminations, 1);

        helper.send_position(60.0, 5.0).await;
        assert_eq!(helper.connections().len(), 2);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_watchdog_is_armed_while_connecting() {
    test(Settings::test_default(), |helper| async move {
        let period = helper.settings.watchdog_period();
        helper.send_position(60.0, 5.0).await;

        advance(period + Duration::from_millis(1)).await;

        assert!(helper.connection(0).is_terminated());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_any_json_message_keeps_connection_alive() {
    test(Settings::test_default(), |helper| async move {
        let period = helper.settings.watchdog_period();
        helper.send_position(60.0, 5.0).await;
        helper.open(0).await;

        advance(period - Duration::from_secs(1)).await;
        helper.message(0, json!({"heartbeat": true})).await;
        advance(Duration::from_secs(2)).await;
        assert!(!helper.connection(0).is_terminated());

        advance(period).await;
        assert!(helper.connection(0).is_terminated());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_malformed_json_does_not_keep_connection_alive() {
    test(Settings::test_default(), |helper| async move {
        let period = helper.settings.watchdog_period();
        helper.send_position(60.0, 5.0).await;
        helper.open(0).await;

        advance(period - Duration::from_secs(1)).await;
        helper
            .emit(
                0,
                aisstream_core::TransportEventKind::Message("garbage".into()),
            )
            .await;
        advance(Duration::from_secs(2)).await;

        assert!(helper.connection(0).is_terminated());
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_watchdog_keeps_reference_center_for_reopen() {
    let mut settings = Settings::test_default();
    settings.refresh_rate = 1;

    test(settings, |helper| async move {
        let period = helper.settings.watchdog_period();
        assert_eq!(period, Duration::from_millis(61_000));

        helper.send_position(60.0, 5.0).await;
        helper.open(0).await;
        advance(period + Duration::from_millis(1)).await;

        helper.send_position(60.0, 5.0).await;
        helper.open(1).await;

        let first = helper.connection(0).subscriptions();
        let second = helper.connection(1).subscriptions();
        assert_eq!(first[0]["BoundingBoxes"], second[0]["BoundingBoxes"]);
    })
    .await;
}

#[tokio::test(start_paused = true)]
async fn test_movement_after_watchdog_reopen_counts_from_previous_center() {
    test(Settings::test_default(), |helper| async move {
        let period = helper.settings.watchdog_period();

        helper.send_position(60.0, 5.0).await;
        helper.open(0).await;
        advance(period + Duration::from_millis(1)).await;

        // ~78m from the first center, reopens without moving the reference.
        helper.send_position(60.0007, 5.0).await;
        helper.open(1).await;
        assert_eq!(helper.connection(1).sent.len(), 1);

        // ~167m from the first center, past the 100m limit.
        helper.send_position(60.0015, 5.0).await;

        let connections = helper.connections();
        assert_eq!(connections.len(), 2);
        assert_eq!(connections[1].subscriptions().len(), 2);
    })
    .await;
}
