use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use num_traits::FromPrimitive;
use serde_json::{Value, json};
use tracing::debug;

use crate::{
    AisMessage, ContextKind, Dimension, Eta, FieldAssignment, NavigationStatus, Normalized,
    RawReport, aton_type_name, iso_timestamp, ship_type_name,
};

static KNOTS_TO_METERS_PER_SECOND: f64 = 1852.0 / 3600.0;

/// Motion fields shared by the class A and class B position reports.
#[derive(Default)]
struct Kinematics {
    course_over_ground: Option<f64>,
    speed_over_ground: Option<f64>,
    rate_of_turn: Option<f64>,
    true_heading: Option<f64>,
    navigational_status: Option<i32>,
}

/// Voyage and design fields, class A static data takes precedence over class B part B.
#[derive(Default)]
struct VoyageData<'a> {
    destination: Option<&'a str>,
    call_sign: Option<&'a str>,
    ship_type: Option<u32>,
    imo_number: Option<u32>,
    draught: Option<f64>,
    dimension: Option<Dimension>,
    eta: Option<&'a Eta>,
}

/// Maps a report to the field assignments published for its vessel or navaid.
///
/// Reports without an MMSI have nothing to be published against and yield `None`. Every other
/// field is optional and only emitted when present, zero valued numbers included.
pub fn normalize(report: &RawReport) -> Option<Normalized> {
    let RawReport {
        meta_data, message, ..
    } = report;

    let mmsi = meta_data.mmsi?;

    let kinematics = Kinematics::from(message);
    let voyage = VoyageData::from(message);
    let reported_at = meta_data.time_utc.as_deref().and_then(parse_time_utc);

    let (context_kind, name) = match message {
        AisMessage::AidsToNavigationReport(aton) => (
            ContextKind::Aton,
            aton.name.as_deref(),
        ),
        _ => (ContextKind::Vessel, meta_data.ship_name.as_deref()),
    };

    let mut values = vec![FieldAssignment::new(
        "",
        json!({ "mmsi": mmsi.to_string() }),
    )];

    if let (Some(longitude), Some(latitude)) = (meta_data.longitude, meta_data.latitude) {
        values.push(FieldAssignment::new(
            "navigation.position",
            json!({ "longitude": longitude, "latitude": latitude }),
        ));
    }

    if let Some(cog) = kinematics.course_over_ground {
        let cog = cog.to_radians();
        values.push(FieldAssignment::new("navigation.courseOverGroundTrue", cog));
        values.push(FieldAssignment::new(
            "navigation.courseOverGroundMagnetic",
            cog,
        ));
    }

    if let Some(sog) = kinematics.speed_over_ground {
        values.push(FieldAssignment::new(
            "navigation.speedOverGround",
            sog * KNOTS_TO_METERS_PER_SECOND,
        ));
    }

    if let Some(rot) = kinematics.rate_of_turn {
        values.push(FieldAssignment::new(
            "navigation.rateOfTurn",
            rot.to_radians(),
        ));
    }

    if let Some(heading) = kinematics.true_heading {
        values.push(FieldAssignment::new(
            "navigation.headingTrue",
            heading.to_radians(),
        ));
    }

    if let Some(reported_at) = reported_at.and_then(|t| t.with_nanosecond(0)) {
        values.push(FieldAssignment::new(
            "navigation.datetime",
            iso_timestamp(&reported_at),
        ));
    }

    if let Some(status) = kinematics
        .navigational_status
        .and_then(NavigationStatus::from_i32)
    {
        values.push(FieldAssignment::new("navigation.state", status.state()));
    }

    if let Some(name) = name.and_then(collapse_whitespace) {
        values.push(FieldAssignment::new("", json!({ "name": name })));
    }

    if let Some(destination) = voyage.destination.and_then(collapse_whitespace) {
        values.push(FieldAssignment::new(
            "navigation.destination.commonName",
            destination,
        ));
    }

    if let Some(ship_type) = voyage.ship_type {
        values.push(FieldAssignment::new(
            "design.aisShipType",
            type_value(ship_type, ship_type_name(ship_type)),
        ));
    }

    if let Some(imo) = voyage.imo_number {
        values.push(FieldAssignment::new(
            "",
            json!({ "registrations": { "imo": format!("IMO {imo}") } }),
        ));
    }

    if let Some(call_sign) = voyage.call_sign.and_then(collapse_whitespace) {
        values.push(FieldAssignment::new(
            "",
            json!({ "communication": { "callsignVhf": call_sign } }),
        ));
    }

    if let (Some(eta), Some(reported_at)) = (voyage.eta, reported_at) {
        match eta_after(eta, reported_at) {
            Some(eta) => values.push(FieldAssignment::new(
                "navigation.destination.eta",
                iso_timestamp(&eta),
            )),
            None => debug!("skipping malformed eta for {mmsi}: {eta:?}"),
        }
    }

    if let Some(draught) = voyage.draught {
        values.push(FieldAssignment::new(
            "design.draft",
            json!({ "current": draught, "maximum": draught }),
        ));
    }

    if let Some(dimension) = voyage.dimension {
        if let (Some(a), Some(b)) = (dimension.a, dimension.b) {
            values.push(FieldAssignment::new(
                "design.length",
                json!({ "overall": a + b }),
            ));
        }
        if let (Some(c), Some(d)) = (dimension.c, dimension.d) {
            values.push(FieldAssignment::new("design.beam", c + d));
        }
    }

    if let Some(class) = message.ais_class() {
        values.push(FieldAssignment::new("sensors.ais.class", class.as_str()));
    }

    if let AisMessage::AidsToNavigationReport(aton) = message {
        if let Some(aton_type) = aton.aton_type {
            values.push(FieldAssignment::new(
                "atonType",
                type_value(aton_type, aton_type_name(aton_type)),
            ));
        }
        if let Some(virtual_aton) = aton.virtual_aton {
            values.push(FieldAssignment::new("virtual", virtual_aton));
        }
        if let Some(off_position) = aton.off_position {
            values.push(FieldAssignment::new("offPosition", off_position));
        }
    }

    Some(Normalized {
        context: context_kind.context(mmsi),
        values,
    })
}

/// Accepts RFC 3339 as well as the `2022-12-29 18:22:32.318353 +0000 UTC` form aisstream uses.
pub fn parse_time_utc(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(value) {
        return Some(t.with_timezone(&Utc));
    }

    let value = value.strip_suffix(" UTC").unwrap_or(value);
    DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f %z")
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Moves `t` by whole months, letting a day of month past the end of the target month spill
/// over into the next one (Jan 31 + 1 month is Mar 2 or 3).
fn add_months(t: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    let total = i64::from(t.year()) * 12 + i64::from(t.month0()) + months;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;

    let date = NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_signed(Duration::try_days(i64::from(t.day0()))?)?;

    Some(date.and_time(t.time()).and_utc())
}

/// Applies the eta offsets to `reported_at` in month, day, hour, minute order.
fn eta_after(eta: &Eta, reported_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let month = eta_component(eta.month.as_ref())?;
    let day = eta_component(eta.day.as_ref())?;
    let hour = eta_component(eta.hour.as_ref())?;
    let minute = eta_component(eta.minute.as_ref())?;

    let t = add_months(reported_at, month)?;

    t.checked_add_signed(Duration::try_days(day)?)?
        .checked_add_signed(Duration::try_hours(hour)?)?
        .checked_add_signed(Duration::try_minutes(minute)?)
}

fn eta_component(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|v| v.is_finite())
                .map(|v| v.trunc() as i64)
        }),
        Value::String(s) => leading_integer(s),
        _ => None,
    }
}

/// Parses the integer at the start of `value`, ignoring whatever follows it ("6.5" is 6).
fn leading_integer(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let sign = usize::from(value.starts_with(['+', '-']));
    let end = value[sign..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(value.len(), |i| i + sign);
    value[..end].parse().ok()
}

fn collapse_whitespace(value: &str) -> Option<String> {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

fn type_value(id: u32, name: Option<&str>) -> Value {
    match name {
        Some(name) => json!({ "id": id, "name": name }),
        None => json!({ "id": id }),
    }
}

impl From<&AisMessage> for Kinematics {
    fn from(message: &AisMessage) -> Self {
        match message {
            AisMessage::PositionReport(m) => Kinematics {
                course_over_ground: m.cog,
                speed_over_ground: m.sog,
                rate_of_turn: m.rate_of_turn,
                true_heading: m.true_heading,
                navigational_status: m.navigational_status,
            },
            AisMessage::StandardClassBPositionReport(m) => Kinematics {
                course_over_ground: m.cog,
                speed_over_ground: m.sog,
                rate_of_turn: None,
                true_heading: m.true_heading,
                navigational_status: m.navigational_status,
            },
            AisMessage::ExtendedClassBPositionReport(m) => Kinematics {
                course_over_ground: m.cog,
                speed_over_ground: m.sog,
                rate_of_turn: None,
                true_heading: m.true_heading,
                navigational_status: m.navigational_status,
            },
            AisMessage::ShipStaticData(_)
            | AisMessage::StaticDataReport(_)
            | AisMessage::AidsToNavigationReport(_)
            | AisMessage::BaseStationReport(_)
            | AisMessage::SingleSlotBinaryMessage(_)
            | AisMessage::MultiSlotBinaryMessage(_) => Kinematics::default(),
        }
    }
}

impl<'a> From<&'a AisMessage> for VoyageData<'a> {
    fn from(message: &'a AisMessage) -> Self {
        match message {
            AisMessage::ShipStaticData(m) => VoyageData {
                destination: m.destination.as_deref(),
                call_sign: m.call_sign.as_deref(),
                ship_type: m.ship_type,
                imo_number: m.imo_number,
                draught: m.maximum_static_draught,
                dimension: m.dimension,
                eta: m.eta.as_ref(),
            },
            AisMessage::StaticDataReport(m) => match &m.report_b {
                Some(report_b) => VoyageData {
                    destination: report_b.destination.as_deref(),
                    call_sign: report_b.call_sign.as_deref(),
                    ..Default::default()
                },
                None => VoyageData::default(),
            },
            AisMessage::PositionReport(_)
            | AisMessage::StandardClassBPositionReport(_)
            | AisMessage::ExtendedClassBPositionReport(_)
            | AisMessage::AidsToNavigationReport(_)
            | AisMessage::BaseStationReport(_)
            | AisMessage::SingleSlotBinaryMessage(_)
            | AisMessage::MultiSlotBinaryMessage(_) => VoyageData::default(),
        }
    }
}
