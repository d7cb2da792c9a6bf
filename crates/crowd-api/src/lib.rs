//! HTTP API for the crowd density telemetry service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Snapshot endpoint** (`/crowd-data`) taking a fresh reading for
//!   every registered location and recording it in history
//! - **History endpoint** (`/history/{location}`) returning the recorded
//!   readings for one location
//! - **Registry endpoint** (`/api/locations`) listing locations with their
//!   effective thresholds
//! - **Minimal HTML status page** (`GET /`)
//!
//! # Architecture
//!
//! Handlers share one [`CrowdService`](crowd_core::CrowdService) through
//! [`AppState`]. Every endpoint is total: no location name, however
//! malformed, produces a 4xx or 5xx response. CORS is fully open so the
//! map frontend can be served from any origin.

pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
