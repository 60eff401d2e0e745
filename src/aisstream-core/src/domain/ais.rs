use std::fmt::Display;

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::IntoStaticStr;

use crate::AisMessageType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct Mmsi(u32);

impl Mmsi {
    pub fn into_inner(self) -> u32 {
        self.0
    }
}

impl From<u32> for Mmsi {
    fn from(value: u32) -> Self {
        Mmsi(value)
    }
}

impl Display for Mmsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A single report as received from aisstream.io.
#[derive(Debug, Clone, Deserialize)]
pub struct RawReport {
    #[serde(rename = "MetaData")]
    pub meta_data: MetaData,
    #[serde(rename = "MessageType")]
    pub message_type: Option<String>,
    #[serde(rename = "Message")]
    pub message: AisMessage,
}

/// Envelope data aisstream attaches to every report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetaData {
    #[serde(rename = "MMSI")]
    pub mmsi: Option<Mmsi>,
    #[serde(rename = "ShipName")]
    pub ship_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub time_utc: Option<String>,
}

/// The report body, aisstream wraps it in an object keyed by the variant name.
#[derive(Debug, Clone, Deserialize)]
pub enum AisMessage {
    PositionReport(PositionReport),
    ShipStaticData(ShipStaticData),
    StaticDataReport(StaticDataReport),
    StandardClassBPositionReport(StandardClassBPositionReport),
    ExtendedClassBPositionReport(ExtendedClassBPositionReport),
    AidsToNavigationReport(AidsToNavigationReport),
    BaseStationReport(BaseStationReport),
    SingleSlotBinaryMessage(BinaryMessage),
    MultiSlotBinaryMessage(BinaryMessage),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PositionReport {
    #[serde(rename = "UserID")]
    pub user_id: Option<u32>,
    pub cog: Option<f64>,
    pub sog: Option<f64>,
    pub rate_of_turn: Option<f64>,
    pub true_heading: Option<f64>,
    pub navigational_status: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StandardClassBPositionReport {
    #[serde(rename = "UserID")]
    pub user_id: Option<u32>,
    pub cog: Option<f64>,
    pub sog: Option<f64>,
    pub true_heading: Option<f64>,
    pub navigational_status: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtendedClassBPositionReport {
    #[serde(rename = "UserID")]
    pub user_id: Option<u32>,
    pub cog: Option<f64>,
    pub sog: Option<f64>,
    pub true_heading: Option<f64>,
    pub navigational_status: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub name: Option<String>,
    #[serde(rename = "Type")]
    pub ship_type: Option<u32>,
    pub dimension: Option<Dimension>,
}

/// Voyage related data broadcast by class A transponders.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShipStaticData {
    #[serde(rename = "UserID")]
    pub user_id: Option<u32>,
    pub name: Option<String>,
    pub call_sign: Option<String>,
    pub destination: Option<String>,
    pub imo_number: Option<u32>,
    #[serde(rename = "Type")]
    pub ship_type: Option<u32>,
    pub maximum_static_draught: Option<f64>,
    pub dimension: Option<Dimension>,
    pub eta: Option<Eta>,
}

/// Class B static data, split over two parts where only part B carries voyage data.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StaticDataReport {
    #[serde(rename = "UserID")]
    pub user_id: Option<u32>,
    pub part_number: Option<bool>,
    pub report_a: Option<StaticDataReportA>,
    pub report_b: Option<StaticDataReportB>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StaticDataReportA {
    pub valid: Option<bool>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StaticDataReportB {
    pub valid: Option<bool>,
    pub call_sign: Option<String>,
    pub destination: Option<String>,
    pub ship_type: Option<u32>,
    pub dimension: Option<Dimension>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AidsToNavigationReport {
    #[serde(rename = "UserID")]
    pub user_id: Option<u32>,
    pub name: Option<String>,
    #[serde(rename = "Type")]
    pub aton_type: Option<u32>,
    #[serde(rename = "VirtualAtoN")]
    pub virtual_aton: Option<bool>,
    pub off_position: Option<bool>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseStationReport {
    #[serde(rename = "UserID")]
    pub user_id: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Binary payloads are subscribed to but carry nothing we publish.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BinaryMessage {
    #[serde(rename = "UserID")]
    pub user_id: Option<u32>,
}

/// Distances in meters from the position reference point to bow (A), stern (B), port (C) and
/// starboard (D).
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimension {
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub c: Option<f64>,
    pub d: Option<f64>,
}

/// Estimated time of arrival as offsets, transmitters send these both as numbers and as numeric
/// strings so they are kept untyped until normalization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Eta {
    pub month: Option<Value>,
    pub day: Option<Value>,
    pub hour: Option<Value>,
    pub minute: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
pub enum AisClass {
    A,
    B,
    #[strum(serialize = "ATON")]
    Aton,
    #[strum(serialize = "BASE")]
    Base,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, FromPrimitive)]
#[repr(i32)]
pub enum NavigationStatus {
    UnderWayUsingEngine = 0,
    AtAnchor = 1,
    NotUnderCommand = 2,
    RestrictedManoeuverability = 3,
    ConstrainedByDraught = 4,
    Moored = 5,
    Aground = 6,
    EngagedInFishing = 7,
    UnderWaySailing = 8,
    Reserved9 = 9,
    Reserved10 = 10,
    Reserved11 = 11,
    Reserved12 = 12,
    Reserved13 = 13,
    AisSartIsActive = 14,
    NotDefined = 15,
}

impl AisMessage {
    pub fn message_type(&self) -> AisMessageType {
        match self {
            AisMessage::PositionReport(_) => AisMessageType::PositionReport,
            AisMessage::ShipStaticData(_) => AisMessageType::ShipStaticData,
            AisMessage::StaticDataReport(_) => AisMessageType::StaticDataReport,
            AisMessage::StandardClassBPositionReport(_) => {
                AisMessageType::StandardClassBPositionReport
            }
            AisMessage::ExtendedClassBPositionReport(_) => {
                AisMessageType::ExtendedClassBPositionReport
            }
            AisMessage::AidsToNavigationReport(_) => AisMessageType::AidsToNavigationReport,
            AisMessage::BaseStationReport(_) => AisMessageType::BaseStationReport,
            AisMessage::SingleSlotBinaryMessage(_) => AisMessageType::SingleSlotBinaryMessage,
            AisMessage::MultiSlotBinaryMessage(_) => AisMessageType::MultiSlotBinaryMessage,
        }
    }

    /// The transponder class the report originates from, binary messages and class B static
    /// data do not identify one.
    pub fn ais_class(&self) -> Option<AisClass> {
        match self {
            AisMessage::PositionReport(_) | AisMessage::ShipStaticData(_) => Some(AisClass::A),
            AisMessage::StandardClassBPositionReport(_)
            | AisMessage::ExtendedClassBPositionReport(_) => Some(AisClass::B),
            AisMessage::AidsToNavigationReport(_) => Some(AisClass::Aton),
            AisMessage::BaseStationReport(_) => Some(AisClass::Base),
            AisMessage::StaticDataReport(_)
            | AisMessage::SingleSlotBinaryMessage(_)
            | AisMessage::MultiSlotBinaryMessage(_) => None,
        }
    }
}

impl AisClass {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl NavigationStatus {
    /// Signal K `navigation.state` value.
    pub fn state(&self) -> &'static str {
        match self {
            NavigationStatus::UnderWayUsingEngine => "motoring",
            NavigationStatus::AtAnchor => "anchored",
            NavigationStatus::NotUnderCommand => "not under command",
            NavigationStatus::RestrictedManoeuverability => "restricted manouverability",
            NavigationStatus::ConstrainedByDraught => "constrained by draft",
            NavigationStatus::Moored => "moored",
            NavigationStatus::Aground => "aground",
            NavigationStatus::EngagedInFishing => "fishing",
            NavigationStatus::UnderWaySailing => "sailing",
            NavigationStatus::Reserved9 => "hazardous material high speed",
            NavigationStatus::Reserved10 => "IMO hazard",
            NavigationStatus::Reserved11 => "power-driven vessel towing astern",
            NavigationStatus::Reserved12 => {
                "power-driven vessel pushing ahead or towing alongside"
            }
            NavigationStatus::Reserved13 => "reserved for future use",
            NavigationStatus::AisSartIsActive => "ais-sart",
            NavigationStatus::NotDefined => "default",
        }
    }
}

pub fn ship_type_name(ship_type: u32) -> Option<&'static str> {
    let name = match ship_type {
        20 => "Wing In Ground",
        29 => "Wing In Ground (no other information)",
        30 => "Fishing",
        31 => "Towing",
        32 => "Towing exceeds 200m or wider than 25m",
        33 => "Engaged in dredging or underwater operations",
        34 => "Engaged in diving operations",
        35 => "Engaged in military operations",
        36 => "Sailing",
        37 => "Pleasure",
        40 => "High speed craft",
        41 => "High speed craft carrying dangerous goods",
        42 => "High speed craft hazard cat B",
        43 => "High speed craft hazard cat C",
        44 => "High speed craft hazard cat D",
        49 => "High speed craft (no additional information)",
        50 => "Pilot vessel",
        51 => "SAR",
        52 => "Tug",
        53 => "Port tender",
        54 => "Anti-pollution",
        55 => "Law enforcement",
        56 => "Spare",
        57 => "Spare #2",
        58 => "Medical",
        59 => "RR Resolution No.1",
        60 => "Passenger ship",
        69 => "Passenger ship (no additional information)",
        70 => "Cargo ship",
        71 => "Cargo ship carrying dangerous goods",
        72 => "Cargo ship hazard cat B",
        73 => "Cargo ship hazard cat C",
        74 => "Cargo ship hazard cat D",
        79 => "Cargo ship (no additional information)",
        80 => "Tanker",
        81 => "Tanker carrying dangerous goods",
        82 => "Tanker hazard cat B",
        83 => "Tanker hazard cat C",
        84 => "Tanker hazard cat D",
        89 => "Tanker (no additional information)",
        90 => "Other",
        91 => "Other carrying dangerous goods",
        92 => "Other hazard cat B",
        93 => "Other hazard cat C",
        94 => "Other hazard cat D",
        99 => "Other (no additional information)",
        _ => return None,
    };
    Some(name)
}

pub fn aton_type_name(aton_type: u32) -> Option<&'static str> {
    let name = match aton_type {
        0 => "Unspecified",
        1 => "Reference Point",
        2 => "RACON",
        3 => "Fixed Structure",
        4 => "Spare",
        5 => "Light",
        6 => "Light w/Sectors",
        7 => "Leading Light Front",
        8 => "Leading Light Rear",
        9 => "Cardinal N Beacon",
        10 => "Cardinal E Beacon",
        11 => "Cardinal S Beacon",
        12 => "Cardinal W Beacon",
        13 => "Beacon, Port Hand",
        14 => "Beacon, Starboard Hand",
        15 => "Beacon, Preferred Channel Port Hand",
        16 => "Beacon, Preferred Channel Starboard Hand",
        17 => "Beacon, Isolated Danger",
        18 => "Beacon, Safe Water",
        19 => "Beacon, Special Mark",
        20 => "Cardinal Mark N",
        21 => "Cardinal Mark E",
        22 => "Cardinal Mark S",
        23 => "Cardinal Mark W",
        24 => "Port Hand Mark",
        25 => "Starboard Hand Mark",
        26 => "Preferred Channel Port Hand",
        27 => "Preferred Channel Starboard Hand",
        28 => "Isolated Danger",
        29 => "Safe Water",
        30 => "Special Mark",
        31 => "Light Vessel/Rig",
        _ => return None,
    };
    Some(name)
}
