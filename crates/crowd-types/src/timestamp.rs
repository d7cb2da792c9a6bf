//! Wire format for reading timestamps.
//!
//! Timestamps are written as RFC 3339 with exactly six fractional digits
//! and a numeric offset (`+00:00`, never `Z`), e.g.
//! `2024-05-01T14:03:27.118204+02:00`. Use with
//! `#[serde(with = "crate::timestamp")]`.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Deserialize, Deserializer, Serializer};

/// Serialize `timestamp` in the fixed wire format.
pub fn serialize<S>(timestamp: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(timestamp))
}

/// Deserialize any RFC 3339 timestamp, keeping its offset.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw).map_err(serde::de::Error::custom)
}

/// Render `timestamp` in the wire format.
pub fn format(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, false)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn utc_uses_numeric_offset() {
        let ts = Utc
            .timestamp_opt(1_700_000_000, 0)
            .single()
            .unwrap_or_default()
            .fixed_offset();
        assert_eq!(format(&ts), "2023-11-14T22:13:20.000000+00:00");
    }

    #[test]
    fn keeps_trailing_zeros_in_fraction() {
        let ts = Utc
            .timestamp_opt(1_700_000_000, 118_000_000)
            .single()
            .unwrap_or_default()
            .fixed_offset();
        assert_eq!(format(&ts), "2023-11-14T22:13:20.118000+00:00");
    }

    #[test]
    fn non_utc_offset() {
        let ts = FixedOffset::east_opt(7200)
            .and_then(|tz| tz.timestamp_opt(1_700_000_000, 118_204_000).single())
            .unwrap_or_default();
        assert_eq!(format(&ts), "2023-11-15T00:13:20.118204+02:00");
    }

    #[test]
    fn deserialize_accepts_z_and_offset() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            #[serde(with = "crate::timestamp")]
            at: DateTime<FixedOffset>,
        }

        let z: Result<Wrapper, _> = serde_json::from_str(r#"{"at":"2023-11-14T22:13:20Z"}"#);
        let offset: Result<Wrapper, _> =
            serde_json::from_str(r#"{"at":"2023-11-15T00:13:20.118204+02:00"}"#);
        assert_eq!(z.ok().map(|w| w.at.timestamp()), Some(1_700_000_000));
        assert_eq!(
            offset.ok().map(|w| w.at.offset().local_minus_utc()),
            Some(7200)
        );

        let bad: Result<Wrapper, _> = serde_json::from_str(r#"{"at":"yesterday"}"#);
        assert!(bad.is_err());
    }
}
