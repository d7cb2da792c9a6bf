//! Shared application state for the API server.
//!
//! [`AppState`] wraps the [`CrowdService`] that owns the registry and the
//! history store, plus the process start time shown on the status page.

use chrono::{DateTime, Utc};
use crowd_core::CrowdService;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
#[derive(Debug)]
pub struct AppState {
    /// The crowd density service.
    pub service: CrowdService,
    /// When the state was created.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create application state around `service`.
    pub fn new(service: CrowdService) -> Self {
        Self {
            service,
            started_at: Utc::now(),
        }
    }
}
