use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use strum::{AsRefStr, Display, EnumIter};

use crate::{BoundingBox, CoreResult, core_error::SerializeSnafu};

/// Report variants aisstream can be asked to stream, ordered the way they are requested.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
)]
pub enum AisMessageType {
    PositionReport,
    ShipStaticData,
    StaticDataReport,
    StandardClassBPositionReport,
    ExtendedClassBPositionReport,
    SingleSlotBinaryMessage,
    MultiSlotBinaryMessage,
    AidsToNavigationReport,
    BaseStationReport,
}

/// What we ask aisstream to stream, sent on every open and resubscription.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionFilter {
    pub api_key: String,
    pub bounding_box: BoundingBox,
    pub message_types: BTreeSet<AisMessageType>,
}

#[derive(Serialize)]
struct SubscriptionPayload<'a> {
    #[serde(rename = "APIkey")]
    api_key: &'a str,
    #[serde(rename = "BoundingBoxes")]
    bounding_boxes: [[[f64; 2]; 2]; 1],
    #[serde(rename = "FilterMessageTypes")]
    filter_message_types: &'a BTreeSet<AisMessageType>,
}

impl SubscriptionFilter {
    pub fn payload(&self) -> CoreResult<String> {
        serde_json::to_string(&SubscriptionPayload {
            api_key: &self.api_key,
            bounding_boxes: [self.bounding_box.as_corners()],
            filter_message_types: &self.message_types,
        })
        .context(SerializeSnafu)
    }
}
