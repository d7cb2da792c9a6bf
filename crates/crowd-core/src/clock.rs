//! Timestamp capture for readings.
//!
//! Timestamps are taken in the configured zone and truncated to
//! microseconds. A named IANA zone (default `Europe/Stockholm`) follows
//! daylight saving; a fixed offset never changes. Either way the reading
//! stores the offset in force at capture time, e.g.
//! `2024-05-01T14:03:27.118204+02:00`.

use chrono::{DateTime, FixedOffset, Offset, SubsecRound, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::config::ClockConfig;
use crate::error::CoreError;

/// How timestamps are assigned to the entries of one snapshot call.
///
/// Consumers may infer simultaneity from shared timestamps, so the
/// policy is fixed for the life of a deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampPolicy {
    /// One timestamp taken at the start of the call, shared by every entry.
    #[default]
    PerCall,
    /// A fresh timestamp taken for each location.
    PerLocation,
}

/// The zone a [`Clock`] reports in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// An IANA zone; the offset follows its DST rules.
    Named(Tz),
    /// A constant offset from UTC.
    Fixed(FixedOffset),
}

/// Source of reading timestamps.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    zone: Zone,
    policy: TimestampPolicy,
}

impl Clock {
    /// Create a clock with a fixed offset and the given policy.
    pub const fn new(offset: FixedOffset, policy: TimestampPolicy) -> Self {
        Self {
            zone: Zone::Fixed(offset),
            policy,
        }
    }

    /// Create a clock in a named zone.
    pub const fn named(tz: Tz, policy: TimestampPolicy) -> Self {
        Self {
            zone: Zone::Named(tz),
            policy,
        }
    }

    /// A UTC clock with the default per-call policy.
    pub fn utc() -> Self {
        Self::new(Utc.fix(), TimestampPolicy::PerCall)
    }

    /// Build a clock from configuration.
    ///
    /// `utc_offset_minutes`, when set, selects a fixed offset and the
    /// `timezone` name is not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidUtcOffset`] if the offset is not
    /// strictly within one day of UTC, or [`CoreError::InvalidTimezone`]
    /// if the zone name is unknown.
    pub fn from_config(config: &ClockConfig) -> Result<Self, CoreError> {
        if let Some(minutes) = config.utc_offset_minutes {
            let offset = minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .ok_or(CoreError::InvalidUtcOffset { minutes })?;
            return Ok(Self::new(offset, config.timestamp_policy));
        }

        let tz = config
            .timezone
            .parse::<Tz>()
            .map_err(|_| CoreError::InvalidTimezone {
                name: config.timezone.clone(),
            })?;
        Ok(Self::named(tz, config.timestamp_policy))
    }

    /// The current time in the configured zone, truncated to microseconds.
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.at(Utc::now())
    }

    /// `instant` expressed in the configured zone, truncated to
    /// microseconds.
    pub fn at(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        let local = match self.zone {
            Zone::Named(tz) => instant.with_timezone(&tz).fixed_offset(),
            Zone::Fixed(offset) => instant.with_timezone(&offset),
        };
        local.trunc_subsecs(6)
    }

    /// The active timestamp policy.
    pub const fn policy(&self) -> TimestampPolicy {
        self.policy
    }

    /// The configured zone.
    pub const fn zone(&self) -> Zone {
        self.zone
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::utc()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};
    use crowd_types::{HistoryPoint, Reading};

    use super::*;

    fn utc(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().unwrap_or_default()
    }

    fn stockholm() -> ClockConfig {
        ClockConfig {
            timezone: String::from("Europe/Stockholm"),
            utc_offset_minutes: None,
            timestamp_policy: TimestampPolicy::PerCall,
        }
    }

    #[test]
    fn from_config_applies_fixed_offset() {
        let config = ClockConfig {
            utc_offset_minutes: Some(120),
            timestamp_policy: TimestampPolicy::PerLocation,
            ..ClockConfig::default()
        };
        let clock = Clock::from_config(&config);
        assert!(clock.is_ok());
        let clock = clock.ok().unwrap_or_default();
        assert_eq!(clock.policy(), TimestampPolicy::PerLocation);
        assert_eq!(clock.now().offset().local_minus_utc(), 7200);
    }

    #[test]
    fn from_config_rejects_out_of_range_offset() {
        let config = ClockConfig {
            utc_offset_minutes: Some(24 * 60),
            ..ClockConfig::default()
        };
        assert!(matches!(
            Clock::from_config(&config),
            Err(CoreError::InvalidUtcOffset { minutes: 1440 })
        ));
    }

    #[test]
    fn from_config_rejects_unknown_zone() {
        let config = ClockConfig {
            timezone: String::from("Europe/Lulea"),
            ..ClockConfig::default()
        };
        assert!(matches!(
            Clock::from_config(&config),
            Err(CoreError::InvalidTimezone { name }) if name == "Europe/Lulea"
        ));
    }

    #[test]
    fn default_config_is_stockholm() {
        let clock = Clock::from_config(&ClockConfig::default()).ok();
        assert_eq!(
            clock.map(|c| c.zone()),
            Some(Zone::Named(chrono_tz::Europe::Stockholm))
        );
    }

    #[test]
    fn stockholm_follows_daylight_saving() {
        let clock = Clock::from_config(&stockholm()).ok().unwrap_or_default();

        // 2024-01-15T12:00:00Z, CET
        let winter = clock.at(utc(1_705_320_000));
        assert_eq!(winter.offset().local_minus_utc(), 3600);
        assert_eq!(winter.hour(), 13);

        // 2024-07-15T12:00:00Z, CEST
        let summer = clock.at(utc(1_721_044_800));
        assert_eq!(summer.offset().local_minus_utc(), 7200);
        assert_eq!(summer.hour(), 14);
    }

    #[test]
    fn stockholm_now_is_cet_or_cest() {
        let clock = Clock::from_config(&stockholm()).ok().unwrap_or_default();
        let offset = clock.now().offset().local_minus_utc();
        assert!(offset == 3600 || offset == 7200, "offset {offset}");
    }

    #[test]
    fn now_is_microsecond_precision() {
        let now = Clock::utc().now();
        assert_eq!(now.nanosecond() % 1000, 0);
    }

    #[test]
    fn serialized_timestamp_has_micros_and_offset() {
        let clock = Clock::from_config(&stockholm()).ok().unwrap_or_default();
        let reading = Reading::evaluate(10, 60, clock.now());
        let value = serde_json::to_value(HistoryPoint::from(&reading)).unwrap_or_default();
        let rendered = value["timestamp"].as_str().unwrap_or_default();

        // 2024-05-01T14:03:27.118204+02:00
        assert_eq!(rendered.len(), 32, "unexpected: {rendered}");
        assert_eq!(rendered.find('.'), Some(19), "unexpected: {rendered}");
        assert!(
            rendered.ends_with("+01:00") || rendered.ends_with("+02:00"),
            "unexpected: {rendered}"
        );
    }
}
