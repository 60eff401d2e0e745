use std::{collections::BTreeSet, time::Duration};

use aisstream_core::AisMessageType;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Grace period on top of the refresh rate before a silent connection is considered dead.
static WATCHDOG_GRACE: Duration = Duration::from_secs(60);

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    #[serde(default = "default_stream_url")]
    pub stream_url: String,
    /// Distance from our position to the subscribed bounding box corners, in kilometers.
    #[serde(default = "default_bounding_box_size")]
    pub bounding_box_size: u32,
    /// How far we may move, in percent of `bounding_box_size`, before the box is moved along.
    #[serde(default = "default_move_related_bounding_box")]
    pub move_related_bounding_box: u32,
    /// Seconds between position samples.
    #[serde(default = "default_refresh_rate")]
    pub refresh_rate: u64,
    #[serde(default = "default_sink_buffer_size")]
    pub sink_buffer_size: usize,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub message_types: MessageTypeSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MessageTypeSettings {
    #[serde(default = "enabled")]
    pub position_report: bool,
    #[serde(default = "enabled")]
    pub ship_static_data: bool,
    #[serde(default = "enabled")]
    pub static_data_report: bool,
    #[serde(default = "enabled")]
    pub standard_class_b_position_report: bool,
    #[serde(default = "enabled")]
    pub extended_class_b_position_report: bool,
    #[serde(default)]
    pub single_slot_binary_message: bool,
    #[serde(default)]
    pub multi_slot_binary_message: bool,
    #[serde(default = "enabled")]
    pub aids_to_navigation_report: bool,
    #[serde(default = "enabled")]
    pub base_station_report: bool,
}

impl Settings {
    pub fn new() -> Result<Settings, ConfigError> {
        let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".into());

        Config::builder()
            .add_source(
                File::with_name(&format!("config/{}", environment.to_lowercase())).required(false),
            )
            .add_source(Environment::with_prefix("AISSTREAM").separator("__"))
            .build()?
            .try_deserialize()
    }

    pub fn bounding_box_radius_meters(&self) -> f64 {
        self.bounding_box_size as f64 * 1000.0
    }

    /// How far the reference point may move before the subscription follows it.
    pub fn distance_limit_meters(&self) -> f64 {
        self.bounding_box_radius_meters() * (self.move_related_bounding_box as f64 / 100.0)
    }

    pub fn watchdog_period(&self) -> Duration {
        Duration::from_secs(self.refresh_rate) + WATCHDOG_GRACE
    }

    pub fn message_types(&self) -> BTreeSet<AisMessageType> {
        self.message_types.enabled()
    }
}

impl MessageTypeSettings {
    pub fn enabled(&self) -> BTreeSet<AisMessageType> {
        let MessageTypeSettings {
            position_report,
            ship_static_data,
            static_data_report,
            standard_class_b_position_report,
            extended_class_b_position_report,
            single_slot_binary_message,
            multi_slot_binary_message,
            aids_to_navigation_report,
            base_station_report,
        } = self;

        [
            (position_report, AisMessageType::PositionReport),
            (ship_static_data, AisMessageType::ShipStaticData),
            (static_data_report, AisMessageType::StaticDataReport),
            (
                standard_class_b_position_report,
                AisMessageType::StandardClassBPositionReport,
            ),
            (
                extended_class_b_position_report,
                AisMessageType::ExtendedClassBPositionReport,
            ),
            (
                single_slot_binary_message,
                AisMessageType::SingleSlotBinaryMessage,
            ),
            (
                multi_slot_binary_message,
                AisMessageType::MultiSlotBinaryMessage,
            ),
            (
                aids_to_navigation_report,
                AisMessageType::AidsToNavigationReport,
            ),
            (base_station_report, AisMessageType::BaseStationReport),
        ]
        .into_iter()
        .filter(|(enabled, _)| **enabled)
        .map(|(_, message_type)| message_type)
        .collect()
    }

    pub fn none() -> MessageTypeSettings {
        MessageTypeSettings {
            position_report: false,
            ship_static_data: false,
            static_data_report: false,
            standard_class_b_position_report: false,
            extended_class_b_position_report: false,
            single_slot_binary_message: false,
            multi_slot_binary_message: false,
            aids_to_navigation_report: false,
            base_station_report: false,
        }
    }
}

impl Default for MessageTypeSettings {
    fn default() -> Self {
        MessageTypeSettings {
            position_report: true,
            ship_static_data: true,
            static_data_report: true,
            standard_class_b_position_report: true,
            extended_class_b_position_report: true,
            single_slot_binary_message: false,
            multi_slot_binary_message: false,
            aids_to_navigation_report: true,
            base_station_report: true,
        }
    }
}

fn default_stream_url() -> String {
    "wss://stream.aisstream.io/v0/stream".into()
}

fn default_bounding_box_size() -> u32 {
    1
}

fn default_move_related_bounding_box() -> u32 {
    10
}

fn default_refresh_rate() -> u64 {
    60
}

fn default_sink_buffer_size() -> usize {
    100
}

fn default_log_level() -> String {
    "info".into()
}

fn enabled() -> bool {
    true
}

#[cfg(any(test, feature = "test"))]
mod test {
    use super::*;

    impl Settings {
        pub fn test_default() -> Settings {
            Settings {
                api_key: "test-api-key".into(),
                stream_url: "ws://127.0.0.1:1".into(),
                bounding_box_size: default_bounding_box_size(),
                move_related_bounding_box: default_move_related_bounding_box(),
                refresh_rate: default_refresh_rate(),
                sink_buffer_size: default_sink_buffer_size(),
                log_level: "debug".into(),
                message_types: MessageTypeSettings::default(),
            }
        }
    }
}
