//! Append-only per-location reading log.
//!
//! [`HistoryStore`] keeps every recorded [`Reading`] in insertion order,
//! keyed by location name. A single store-wide [`RwLock`] guards the map:
//! appends take the write lock, queries take the read lock and clone the
//! sequence out, so no reader ever observes a partially appended reading.
//!
//! Lookups for names that were never recorded (including names that are
//! not in the registry at all) return an empty sequence rather than an
//! error.

use std::collections::BTreeMap;

use crowd_types::Reading;
use tokio::sync::RwLock;

use crate::config::HistoryConfig;
use crate::error::CoreError;

/// How many readings a location keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Retention {
    /// Grow for the life of the process.
    #[default]
    Unbounded,
    /// Keep only the newest `n` readings per location.
    Capped(usize),
}

impl Retention {
    /// Build a retention policy from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRetention`] for a cap of zero.
    pub const fn from_config(config: &HistoryConfig) -> Result<Self, CoreError> {
        match config.max_per_location {
            None => Ok(Self::Unbounded),
            Some(0) => Err(CoreError::InvalidRetention),
            Some(n) => Ok(Self::Capped(n)),
        }
    }
}

/// In-memory history of readings per location.
#[derive(Debug, Default)]
pub struct HistoryStore {
    series: RwLock<BTreeMap<String, Vec<Reading>>>,
    retention: Retention,
}

impl HistoryStore {
    /// Create an empty, unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with the given retention policy.
    pub fn with_retention(retention: Retention) -> Self {
        Self {
            series: RwLock::new(BTreeMap::new()),
            retention,
        }
    }

    /// The active retention policy.
    pub const fn retention(&self) -> Retention {
        self.retention
    }

    /// Append `reading` to the end of `name`'s sequence, creating the
    /// sequence on first use.
    pub async fn append(&self, name: &str, reading: Reading) {
        self.append_with(name, |_| reading).await;
    }

    /// Build a reading from the location's latest recorded reading and
    /// append it, all under one write lock.
    ///
    /// Returns a copy of the appended reading.
    pub async fn append_with<F>(&self, name: &str, build: F) -> Reading
    where
        F: FnOnce(Option<&Reading>) -> Reading,
    {
        let mut series = self.series.write().await;
        let readings = series.entry(name.to_owned()).or_default();
        let reading = build(readings.last());
        readings.push(reading.clone());

        if let Retention::Capped(cap) = self.retention {
            if readings.len() > cap {
                let drain_count = readings.len().saturating_sub(cap);
                readings.drain(..drain_count);
            }
        }

        reading
    }

    /// The full recorded sequence for `name`, oldest first. Empty if the
    /// name has no history.
    pub async fn get(&self, name: &str) -> Vec<Reading> {
        self.series
            .read()
            .await
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// The most recent reading for `name`, if any.
    pub async fn latest(&self, name: &str) -> Option<Reading> {
        self.series
            .read()
            .await
            .get(name)
            .and_then(|readings| readings.last().cloned())
    }

    /// Number of readings currently held for `name`.
    pub async fn len(&self, name: &str) -> usize {
        self.series.read().await.get(name).map_or(0, Vec::len)
    }

    /// Number of readings held across all locations.
    pub async fn total_readings(&self) -> usize {
        self.series.read().await.values().map(Vec::len).sum()
    }
}
