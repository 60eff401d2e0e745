use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::Mmsi;

/// Label every published update is attributed to.
pub const SOURCE_LABEL: &str = "signalk-aisstream";

static VESSEL_CONTEXT_PREFIX: &str = "vessels.urn:mrn:imo:mmsi:";
static ATON_CONTEXT_PREFIX: &str = "atons.urn:mrn:imo:mmsi:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    Vessel,
    Aton,
}

impl ContextKind {
    pub fn context(&self, mmsi: Mmsi) -> String {
        let prefix = match self {
            ContextKind::Vessel => VESSEL_CONTEXT_PREFIX,
            ContextKind::Aton => ATON_CONTEXT_PREFIX,
        };
        format!("{prefix}{mmsi}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldAssignment {
    pub path: String,
    pub value: Value,
}

/// The field assignments derived from one report, not yet stamped for publishing.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub context: String,
    pub values: Vec<FieldAssignment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delta {
    pub context: String,
    pub updates: Vec<Update>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Update {
    pub source: Source,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub values: Vec<FieldAssignment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Source {
    pub label: String,
}

impl FieldAssignment {
    pub fn new(path: impl Into<String>, value: impl Into<Value>) -> FieldAssignment {
        FieldAssignment {
            path: path.into(),
            value: value.into(),
        }
    }
}

impl Delta {
    pub fn new(normalized: Normalized, timestamp: DateTime<Utc>) -> Delta {
        let Normalized { context, values } = normalized;
        Delta {
            context,
            updates: vec![Update {
                source: Source {
                    label: SOURCE_LABEL.to_string(),
                },
                timestamp,
                values,
            }],
        }
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub fn iso_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_timestamp<S: Serializer>(
    timestamp: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&iso_timestamp(timestamp))
}
