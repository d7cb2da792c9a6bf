//! The snapshot and history query operations.
//!
//! [`CrowdService`] owns the immutable registry and the mutable history
//! store. It is built once at startup and shared with request handlers
//! behind an [`Arc`](std::sync::Arc); there is no global state.

use std::collections::BTreeMap;

use crowd_types::{Reading, SnapshotEntry};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::clock::{Clock, TimestampPolicy};
use crate::config::CrowdConfig;
use crate::error::CoreError;
use crate::generator::ReadingGenerator;
use crate::history::{HistoryStore, Retention};
use crate::registry::LocationRegistry;

/// Crowd density service: registry, generator, clock, and history.
#[derive(Debug)]
pub struct CrowdService {
    registry: LocationRegistry,
    generator: ReadingGenerator,
    clock: Clock,
    history: HistoryStore,
    rng: Mutex<SmallRng>,
}

impl CrowdService {
    /// Create a service with an OS-seeded random number generator.
    pub fn new(
        registry: LocationRegistry,
        generator: ReadingGenerator,
        clock: Clock,
        history: HistoryStore,
    ) -> Self {
        let rng = SmallRng::from_rng(&mut rand::rng());
        Self::with_rng(registry, generator, clock, history, rng)
    }

    /// Create a service whose readings are reproducible for a given seed.
    pub fn with_seed(
        registry: LocationRegistry,
        generator: ReadingGenerator,
        clock: Clock,
        history: HistoryStore,
        seed: u64,
    ) -> Self {
        let rng = SmallRng::seed_from_u64(seed);
        Self::with_rng(registry, generator, clock, history, rng)
    }

    fn with_rng(
        registry: LocationRegistry,
        generator: ReadingGenerator,
        clock: Clock,
        history: HistoryStore,
        rng: SmallRng,
    ) -> Self {
        Self {
            registry,
            generator,
            clock,
            history,
            rng: Mutex::new(rng),
        }
    }

    /// Build every component from configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`CoreError`] if the location list, generator range,
    /// timezone or UTC offset, or retention cap is invalid.
    pub fn from_config(config: &CrowdConfig) -> Result<Self, CoreError> {
        let registry = LocationRegistry::new(config.locations.clone(), config.default_threshold)?;
        let generator = ReadingGenerator::new(config.generator.strategy())?;
        let clock = Clock::from_config(&config.clock)?;
        let history = HistoryStore::with_retention(Retention::from_config(&config.history)?);

        info!(
            locations = registry.len(),
            default_threshold = registry.default_threshold(),
            strategy = generator.strategy().name(),
            zone = ?clock.zone(),
            timestamp_policy = ?clock.policy(),
            retention = ?history.retention(),
            seeded = config.generator.seed.is_some(),
            "Crowd service configured"
        );

        Ok(match config.generator.seed {
            Some(seed) => Self::with_seed(registry, generator, clock, history, seed),
            None => Self::new(registry, generator, clock, history),
        })
    }

    /// Take one reading for every registered location, record each in
    /// history, and return the entries keyed by location name.
    ///
    /// Every call appends exactly one reading per location, even when the
    /// count is unchanged.
    pub async fn snapshot(&self) -> BTreeMap<String, SnapshotEntry> {
        let call_time = self.clock.now();
        let mut rng = self.rng.lock().await;
        let mut entries = BTreeMap::new();
        let mut alerts: usize = 0;

        for location in self.registry.list_locations() {
            let threshold = self.registry.threshold_for(location);
            let timestamp = match self.clock.policy() {
                TimestampPolicy::PerCall => call_time,
                TimestampPolicy::PerLocation => self.clock.now(),
            };

            let reading = self
                .history
                .append_with(&location.name, |previous| {
                    let count = self.generator.generate(
                        threshold,
                        previous.map(Reading::people_count),
                        &mut *rng,
                    );
                    Reading::evaluate(count, threshold, timestamp)
                })
                .await;

            if reading.alert() {
                alerts = alerts.saturating_add(1);
                debug!(
                    location = %location.name,
                    people_count = reading.people_count(),
                    threshold,
                    "Occupancy at or above threshold"
                );
            }

            entries.insert(
                location.name.clone(),
                SnapshotEntry::new(location, &reading),
            );
        }

        debug!(locations = entries.len(), alerts, "Snapshot recorded");
        entries
    }

    /// The recorded readings for `name`, oldest first.
    ///
    /// Total over all inputs: unknown, empty, or malformed names yield an
    /// empty sequence.
    pub async fn history(&self, name: &str) -> Vec<Reading> {
        self.history.get(name).await
    }

    /// The location registry.
    pub const fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    /// The reading generator.
    pub const fn generator(&self) -> &ReadingGenerator {
        &self.generator
    }

    /// The timestamp source.
    pub const fn clock(&self) -> &Clock {
        &self.clock
    }

    /// The history store.
    pub const fn history_store(&self) -> &HistoryStore {
        &self.history
    }
}
