use aisstream_consumer::{
    settings::{MessageTypeSettings, Settings},
    tracker::PositionSample,
};
use aisstream_core::{BoundingBox, GeoPoint, TransportEventKind};
use serde_json::json;

use crate::helper::test;

fn position_report(mmsi: u32) -> serde_json::Value {
    json!({
        "MessageType": "PositionReport",
        "MetaData": {
            "MMSI": mmsi,
            "ShipName": "  NORNE   ",
            "latitude": 60.39,
            "longitude": 5.32,
            "time_utc": "2024-01-01 12:00:00.5 +0000 UTC",
        },
        "Message": {
            "PositionReport": {
                "UserID": mmsi,
                "Cog": 45.0,
                "Sog": 10.0,
                "NavigationalStatus": 0,
            }
        },
    })
}

fn value<'a>(delta: &'a aisstream_core::Delta, path: &str) -> Option<&'a serde_json::Value> {
    delta.updates[0]
        .values
        .iter()
        .find(|v| v.path == path)
        .map(|v| &v.value)
}

#[tokio::test]
async fn test_first_position_opens_and_subscribes_after_connect() {
    test(Settings::test_default(), |helper| async move {
        helper.send_position(60.0, 5.0).await;

        let connections = helper.connections();
        assert_eq!(connections.len(), 1);
        assert!(connections[0].sent.is_empty());

        helper.open(0).await;

        let expected = BoundingBox::around(
            GeoPoint::new(60.0, 5.0),
            helper.settings.bounding_box_radius_meters(),
        );
        let subscriptions = helper.connection(0).subscriptions();
        assert_eq!(subscriptions.len(), 1);
        assert_eq!(subscriptions[0]["APIkey"], "test-api-key");
        assert_eq!(
            subscriptions[0]["BoundingBoxes"],
            json!([expected.as_corners()])
        );
        assert_eq!(
            subscriptions[0]["FilterMessageTypes"],
            json!([
                "PositionReport",
                "ShipStaticData",
                "StaticDataReport",
                "StandardClassBPositionReport",
                "ExtendedClassBPositionReport",
                "AidsToNavigationReport",
                "BaseStationReport",
            ])
        );
    })
    .await;
}

#[tokio::test]
async fn test_movement_beyond_limit_resubscribes_on_same_connection() {
    test(Settings::test_default(), |helper| async move {
        helper.send_position(60.0, 5.0).await;
        helper.open(0).await;

        // ~55m, below the 100m default limit.
        helper.send_position(60.0005, 5.0).await;
        assert_eq!(helper.connection(0).sent.len(), 1);

        // ~222m from the original center.
        helper.send_position(60.002, 5.0).await;

        let connections = helper.connections();
        assert_eq!(connections.len(), 1);
        let subscriptions = connections[0].subscriptions();
        assert_eq!(subscriptions.len(), 2);
        let expected = BoundingBox::around(
            GeoPoint::new(60.002, 5.0),
            helper.settings.bounding_box_radius_meters(),
        );
        assert_eq!(
            subscriptions[1]["BoundingBoxes"],
            json!([expected.as_corners()])
        );
    })
    .await;
}

#[tokio::test]
async fn test_update_while_connecting_is_sent_on_open() {
    test(Settings::test_default(), |helper| async move {
        helper.send_position(60.0, 5.0).await;
        helper.send_position(60.01, 5.0).await;
        assert!(helper.connection(0).sent.is_empty());

        helper.open(0).await;

        let expected = BoundingBox::around(
            GeoPoint::new(60.01, 5.0),
            helper.settings.bounding_box_radius_meters(),
        );
        let subscriptions = helper.connection(0).subscriptions();
        assert_eq!(subscriptions.len(), 1);
        assert_eq!(
            subscriptions[0]["BoundingBoxes"],
            json!([expected.as_corners()])
        );
    })
    .await;
}

#[tokio::test]
async fn test_reports_are_published_as_deltas() {
    test(Settings::test_default(), |helper| async move {
        helper.send_position(60.0, 5.0).await;
        helper.open(0).await;

        helper.message(0, position_report(257_000_001)).await;

        let deltas = helper.deltas();
        assert_eq!(deltas.len(), 1);
        let delta = &deltas[0];
        assert_eq!(delta.context, "vessels.urn:mrn:imo:mmsi:257000001");
        assert_eq!(delta.updates[0].source.label, "signalk-aisstream");

        let cog = value(delta, "navigation.courseOverGroundTrue")
            .and_then(|v| v.as_f64())
            .unwrap();
        let sog = value(delta, "navigation.speedOverGround")
            .and_then(|v| v.as_f64())
            .unwrap();
        assert!((cog - 0.785398).abs() < 1e-4);
        assert!((sog - 5.14444).abs() < 1e-4);
        assert_eq!(
            value(delta, "navigation.position"),
            Some(&json!({"longitude": 5.32, "latitude": 60.39}))
        );
        assert_eq!(
            value(delta, "navigation.datetime"),
            Some(&json!("2024-01-01T12:00:00.000Z"))
        );
        assert_eq!(value(delta, "sensors.ais.class"), Some(&json!("A")));
    })
    .await;
}

#[tokio::test]
async fn test_unusable_messages_are_dropped_and_stream_continues() {
    test(Settings::test_default(), |helper| async move {
        helper.send_position(60.0, 5.0).await;
        helper.open(0).await;

        helper
            .emit(0, TransportEventKind::Message("{not json".into()))
            .await;
        helper.message(0, json!({"error": "Api Key Is Not Valid"})).await;
        let mut without_mmsi = position_report(1);
        without_mmsi["MetaData"]
            .as_object_mut()
            .unwrap()
            .remove("MMSI");
        helper.message(0, without_mmsi).await;
        assert!(helper.deltas().is_empty());

        helper.message(0, position_report(257_000_002)).await;

        let deltas = helper.deltas();
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].context, "vessels.urn:mrn:imo:mmsi:257000002");
        assert!(!helper.connection(0).is_terminated());
    })
    .await;
}

#[tokio::test]
async fn test_aton_reports_use_aton_context() {
    test(Settings::test_default(), |helper| async move {
        helper.send_position(60.0, 5.0).await;
        helper.open(0).await;

        helper
            .message(
                0,
                json!({
                    "MetaData": {"MMSI": 992_576_001, "ShipName": "HOLMENGRAA LT"},
                    "Message": {
                        "AidsToNavigationReport": {
                            "Name": "HOLMENGRAA LT",
                            "Type": 5,
                            "VirtualAtoN": false,
                            "OffPosition": false,
                        }
                    },
                }),
            )
            .await;

        let deltas = helper.deltas();
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].context, "atons.urn:mrn:imo:mmsi:992576001");
        assert_eq!(value(&deltas[0], "sensors.ais.class"), Some(&json!("ATON")));
    })
    .await;
}

#[tokio::test]
async fn test_transport_close_releases_connection_and_next_sample_reopens() {
    test(Settings::test_default(), |helper| async move {
        helper.send_position(60.0, 5.0).await;
        helper.open(0).await;

        helper
            .emit(0, TransportEventKind::Error("connection reset".into()))
            .await;
        helper.emit(0, TransportEventKind::Closed).await;

        let connections = helper.connections();
        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].terminations, 1);

        // Still within the movement limit, a released session reopens regardless.
        helper.send_position(60.0001, 5.0).await;
        assert_eq!(helper.connections().len(), 2);

        helper.open(1).await;
        assert_eq!(helper.connection(1).sent.len(), 1);
    })
    .await;
}

#[tokio::test]
async fn test_events_from_replaced_connection_are_ignored() {
    test(Settings::test_default(), |helper| async move {
        helper.send_position(60.0, 5.0).await;
        helper.emit(0, TransportEventKind::Closed).await;
        helper.send_position(60.0, 5.0).await;

        helper.open(0).await;
        helper.message(0, position_report(257_000_003)).await;

        assert!(helper.connection(0).sent.is_empty());
        assert!(helper.connection(1).sent.is_empty());
        assert!(helper.deltas().is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_unusable_positions_do_not_open() {
    test(Settings::test_default(), |helper| async move {
        helper.send_sample(PositionSample::default()).await;
        helper
            .send_sample(PositionSample {
                longitude: Some(5.0),
                latitude: None,
            })
            .await;

        assert!(helper.connections().is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_no_message_types_never_connects() {
    let mut settings = Settings::test_default();
    settings.message_types = MessageTypeSettings::none();

    test(settings, |helper| async move {
        helper.send_position(60.0, 5.0).await;

        assert!(helper.connections().is_empty());
    })
    .await;
}

#[tokio::test]
async fn test_shutdown_closes_connection() {
    test(Settings::test_default(), |helper| async move {
        helper.send_position(60.0, 5.0).await;
        helper.open(0).await;

        let connections = helper.shutdown().await;

        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].terminations, 1);
    })
    .await;
}
