//! Error types for the `crowd-core` crate.
//!
//! Every variant describes a problem detected while building the service
//! from configuration. Once a [`CrowdService`](crate::CrowdService) exists
//! its operations cannot fail.

/// Errors raised while constructing the registry, generator, clock, or
/// history store.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Two registry entries share a name.
    #[error("duplicate location name: {0}")]
    DuplicateLocation(String),

    /// A registry entry has an empty name.
    #[error("location name must not be empty")]
    EmptyLocationName,

    /// A registry entry has coordinates outside valid bounds.
    #[error("location {name} has invalid coordinates ({lat}, {lon})")]
    InvalidCoordinates {
        /// The offending location.
        name: String,
        /// Configured latitude.
        lat: f64,
        /// Configured longitude.
        lon: f64,
    },

    /// An absolute range has `min > max`.
    #[error("invalid generator range: min {min} exceeds max {max}")]
    InvalidRange {
        /// Lower bound.
        min: u32,
        /// Upper bound.
        max: u32,
    },

    /// A capped retention policy was configured with a zero cap.
    #[error("history retention cap must be at least 1")]
    InvalidRetention,

    /// The configured UTC offset is out of range.
    #[error("invalid UTC offset: {minutes} minutes")]
    InvalidUtcOffset {
        /// Configured offset in minutes east of UTC.
        minutes: i32,
    },

    /// The configured timezone is not an IANA zone name.
    #[error("unknown timezone: {name}")]
    InvalidTimezone {
        /// Configured zone name.
        name: String,
    },
}
