//! Occupancy readings and their wire projections.
//!
//! A [`Reading`] is the internal record kept in history. The HTTP layer
//! never serializes it directly; it projects readings into a
//! [`SnapshotEntry`] (snapshot endpoint) or a [`HistoryPoint`] (history
//! endpoint).

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::location::Location;

/// One synthetic occupancy observation for a location.
///
/// The alert flag is always derived from the count and the threshold in
/// force when the reading was taken; there is no way to construct a
/// reading with an independent alert value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reading {
    people_count: u32,
    timestamp: DateTime<FixedOffset>,
    alert: bool,
}

impl Reading {
    /// Evaluate a count against `threshold`. Alerts when
    /// `people_count >= threshold`.
    pub const fn evaluate(
        people_count: u32,
        threshold: u32,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            people_count,
            timestamp,
            alert: people_count >= threshold,
        }
    }

    /// Number of people observed.
    pub const fn people_count(&self) -> u32 {
        self.people_count
    }

    /// When the reading was taken.
    pub const fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Whether the count reached the threshold.
    pub const fn alert(&self) -> bool {
        self.alert
    }
}

/// A location joined with its latest reading, as returned per location by
/// the snapshot endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SnapshotEntry {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Number of people observed.
    pub people_count: u32,
    /// Whether `people_count` reached the location's threshold.
    pub alert: bool,
    /// ISO-8601 timestamp with UTC offset.
    #[serde(with = "crate::timestamp")]
    #[ts(as = "String")]
    pub timestamp: DateTime<FixedOffset>,
}

impl SnapshotEntry {
    /// Join a location with a reading taken for it.
    pub const fn new(location: &Location, reading: &Reading) -> Self {
        Self {
            lat: location.lat,
            lon: location.lon,
            people_count: reading.people_count,
            alert: reading.alert,
            timestamp: reading.timestamp,
        }
    }
}

/// A single element of a location's history as served over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HistoryPoint {
    /// ISO-8601 timestamp with UTC offset.
    #[serde(with = "crate::timestamp")]
    #[ts(as = "String")]
    pub timestamp: DateTime<FixedOffset>,
    /// Number of people observed.
    pub people_count: u32,
}

impl From<&Reading> for HistoryPoint {
    fn from(reading: &Reading) -> Self {
        Self {
            timestamp: reading.timestamp,
            people_count: reading.people_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn at(secs: i64) -> DateTime<FixedOffset> {
        Utc.timestamp_opt(secs, 0)
            .single()
            .unwrap_or_default()
            .fixed_offset()
    }

    #[test]
    fn alert_at_threshold() {
        let r = Reading::evaluate(60, 60, at(0));
        assert!(r.alert());
    }

    #[test]
    fn no_alert_below_threshold() {
        let r = Reading::evaluate(59, 60, at(0));
        assert!(!r.alert());
        assert_eq!(r.people_count(), 59);
    }

    #[test]
    fn zero_threshold_always_alerts() {
        let r = Reading::evaluate(0, 0, at(0));
        assert!(r.alert());
    }

    #[test]
    fn snapshot_entry_wire_shape() {
        let loc = Location::new("A.Ts Krog", 65.5838, 22.1531, 30);
        let reading = Reading::evaluate(31, 30, at(1_700_000_000));
        let entry = SnapshotEntry::new(&loc, &reading);

        let value = serde_json::to_value(&entry).unwrap_or_default();
        assert_eq!(value["people_count"], 31);
        assert_eq!(value["alert"], true);
        assert_eq!(value["timestamp"], "2023-11-14T22:13:20.000000+00:00");
        assert!(value["lat"].is_f64());
        assert!(value["lon"].is_f64());
        assert_eq!(value.as_object().map(serde_json::Map::len), Some(5));
    }

    #[test]
    fn history_point_wire_shape() {
        let reading = Reading::evaluate(12, 30, at(1_700_000_000));
        let point = HistoryPoint::from(&reading);

        let value = serde_json::to_value(&point).unwrap_or_default();
        assert_eq!(value["people_count"], 12);
        assert_eq!(value["timestamp"], "2023-11-14T22:13:20.000000+00:00");
        assert_eq!(value.as_object().map(serde_json::Map::len), Some(2));
    }
}
