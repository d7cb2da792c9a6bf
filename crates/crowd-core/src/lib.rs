//! Core services for the crowd density telemetry endpoint.
//!
//! Crates downstream (the HTTP API and the server binary) only ever talk
//! to [`CrowdService`], which owns the pieces below and exposes the two
//! read operations: [`CrowdService::snapshot`] and
//! [`CrowdService::history`].
//!
//! # Modules
//!
//! - [`registry`] -- Immutable set of locations loaded at startup
//! - [`generator`] -- Synthetic occupancy count strategies
//! - [`clock`] -- Timestamp capture (named zone or fixed offset, per-call vs per-location)
//! - [`history`] -- Append-only per-location reading log
//! - [`service`] -- Snapshot and history query operations
//! - [`config`] -- YAML configuration and environment overrides
//! - [`error`] -- Construction-time errors

pub mod clock;
pub mod config;
pub mod error;
pub mod generator;
pub mod history;
pub mod registry;
pub mod service;

pub use clock::{Clock, TimestampPolicy, Zone};
pub use config::{ConfigError, CrowdConfig};
pub use error::CoreError;
pub use generator::{GenerationStrategy, ReadingGenerator};
pub use history::{HistoryStore, Retention};
pub use registry::LocationRegistry;
pub use service::CrowdService;
