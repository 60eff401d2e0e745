use std::collections::BTreeSet;

use aisstream_core::{AisMessageType, BoundingBox, GeoPoint, SubscriptionFilter};
use serde::Deserialize;
use tracing::debug;

use crate::settings::Settings;

/// One sample from the position source, either coordinate may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct PositionSample {
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackingAction {
    /// Start a new session with the given subscription.
    Open(SubscriptionFilter),
    /// Resubscribe over the live session.
    Update(SubscriptionFilter),
}

/// Decides when the subscribed area has to follow our own position.
pub struct TrackingController {
    api_key: String,
    message_types: BTreeSet<AisMessageType>,
    radius_meters: f64,
    distance_limit: f64,
    reference_center: Option<GeoPoint>,
}

impl PositionSample {
    pub fn new(latitude: f64, longitude: f64) -> PositionSample {
        PositionSample {
            longitude: Some(longitude),
            latitude: Some(latitude),
        }
    }

    fn point(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => {
                Some(GeoPoint::new(lat, lon))
            }
            _ => None,
        }
    }
}

impl TrackingController {
    pub fn new(
        api_key: String,
        message_types: BTreeSet<AisMessageType>,
        radius_meters: f64,
        distance_limit: f64,
    ) -> TrackingController {
        TrackingController {
            api_key,
            message_types,
            radius_meters,
            distance_limit,
            reference_center: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> TrackingController {
        TrackingController::new(
            settings.api_key.clone(),
            settings.message_types(),
            settings.bounding_box_radius_meters(),
            settings.distance_limit_meters(),
        )
    }

    pub fn reference_center(&self) -> Option<GeoPoint> {
        self.reference_center
    }

    pub fn reset(&mut self) {
        self.reference_center = None;
    }

    pub fn on_position_sample(
        &mut self,
        sample: PositionSample,
        session_open: bool,
    ) -> Option<TrackingAction> {
        let Some(position) = sample.point() else {
            debug!("ignoring position sample without usable coordinates: {sample:?}");
            return None;
        };

        if self.message_types.is_empty() {
            debug!("no message types selected, no need to update subscription");
            return None;
        }

        match (session_open, self.reference_center) {
            (false, None) => Some(TrackingAction::Open(self.recenter(position))),
            // Reopening leaves the reference center where it was.
            (false, Some(_)) => Some(TrackingAction::Open(self.filter(position))),
            (true, Some(center)) => {
                let moved = center.distance(&position);
                if moved > self.distance_limit {
                    debug!(moved, limit = self.distance_limit, "moving subscribed area");
                    Some(TrackingAction::Update(self.recenter(position)))
                } else {
                    None
                }
            }
            (true, None) => Some(TrackingAction::Update(self.recenter(position))),
        }
    }

    fn recenter(&mut self, position: GeoPoint) -> SubscriptionFilter {
        self.reference_center = Some(position);
        self.filter(position)
    }

    fn filter(&self, position: GeoPoint) -> SubscriptionFilter {
        SubscriptionFilter {
            api_key: self.api_key.clone(),
            bounding_box: BoundingBox::around(position, self.radius_meters),
            message_types: self.message_types.clone(),
        }
    }
}
