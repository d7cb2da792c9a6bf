//! The location registry.
//!
//! [`LocationRegistry`] is validated once at construction and is
//! read-only afterwards. Locations keep their configured order, which is
//! the order the snapshot service visits them in.

use std::collections::BTreeSet;

use crowd_types::Location;

use crate::error::CoreError;

/// Immutable, validated set of locations.
#[derive(Debug, Clone)]
pub struct LocationRegistry {
    locations: Vec<Location>,
    default_threshold: u32,
}

impl LocationRegistry {
    /// Build a registry from `locations`.
    ///
    /// `default_threshold` applies to every location without its own
    /// threshold.
    ///
    /// # Errors
    ///
    /// - [`CoreError::EmptyLocationName`] if any name is empty
    /// - [`CoreError::DuplicateLocation`] if two locations share a name
    /// - [`CoreError::InvalidCoordinates`] if coordinates are out of bounds
    pub fn new(locations: Vec<Location>, default_threshold: u32) -> Result<Self, CoreError> {
        let mut seen = BTreeSet::new();
        for loc in &locations {
            if loc.name.is_empty() {
                return Err(CoreError::EmptyLocationName);
            }
            if !seen.insert(loc.name.as_str()) {
                return Err(CoreError::DuplicateLocation(loc.name.clone()));
            }
            if !loc.has_valid_coordinates() {
                return Err(CoreError::InvalidCoordinates {
                    name: loc.name.clone(),
                    lat: loc.lat,
                    lon: loc.lon,
                });
            }
        }

        Ok(Self {
            locations,
            default_threshold,
        })
    }

    /// All locations in registry order.
    pub fn list_locations(&self) -> &[Location] {
        &self.locations
    }

    /// Look up a location by name.
    pub fn get(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|loc| loc.name == name)
    }

    /// The threshold in force for `location`.
    pub const fn threshold_for(&self, location: &Location) -> u32 {
        location.effective_threshold(self.default_threshold)
    }

    /// The process-wide critical threshold.
    pub const fn default_threshold(&self) -> u32 {
        self.default_threshold
    }

    /// Number of registered locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether the registry has no locations.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// The compiled-in location set used when configuration provides none.
///
/// Thresholds reflect each venue's typical capacity.
pub fn default_locations() -> Vec<Location> {
    vec![
        Location::new("ICA Maxi Luleå", 65.6099, 22.1460, 60),
        Location::new("A.Ts Krog", 65.5838, 22.1531, 30),
        Location::new("Mood Galleria", 59.3342, 18.0675, 100),
        Location::new("Kungsträdgården", 59.3303, 18.0722, 150),
        Location::new("Gallerian Stockholm", 59.3326, 18.0649, 120),
        Location::new("Smedjan Galleria", 65.5848, 22.1547, 70),
        Location::new("Shopping Galleria", 65.5840, 22.1543, 65),
        Location::new("Strand Galleria", 65.5832, 22.1551, 50),
        Location::new("Stadsparken Luleå", 65.5845, 22.1572, 80),
        Location::new("Luleå Airport", 65.5436, 22.1225, 90),
        Location::new("Clarion Hotel Sense", 65.5839, 22.1534, 40),
    ]
}
