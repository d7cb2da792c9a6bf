//! Location registry entries.
//!
//! A [`Location`] is a named, geographically fixed point of interest.
//! The same shape is used in the YAML configuration and on the wire:
//! `{name, lat, lon, threshold}`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A named point of interest with an optional occupancy alert threshold.
///
/// Immutable once loaded into the registry. When `threshold` is absent
/// the process-wide default critical threshold applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Location {
    /// Unique registry key, e.g. `"ICA Maxi Luleå"`.
    pub name: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Occupancy at or above which the location alerts.
    #[serde(default)]
    #[ts(optional = nullable)]
    pub threshold: Option<u32>,
}

impl Location {
    /// Create a location with an explicit threshold.
    pub fn new(name: impl Into<String>, lat: f64, lon: f64, threshold: u32) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
            threshold: Some(threshold),
        }
    }

    /// Return the location's own threshold, or `default` when unset.
    pub const fn effective_threshold(&self, default: u32) -> u32 {
        match self.threshold {
            Some(threshold) => threshold,
            None => default,
        }
    }

    /// Whether the coordinates lie within valid latitude/longitude bounds.
    pub fn has_valid_coordinates(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}
