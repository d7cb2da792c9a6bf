//! REST API endpoint handlers.
//!
//! All handlers delegate to the [`CrowdService`](crowd_core::CrowdService)
//! held in the shared [`AppState`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/crowd-data` | Fresh snapshot of every location |
//! | `GET` | `/history/{location}` | Recorded readings for one location |
//! | `GET` | `/api/locations` | Registry with effective thresholds |

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse};
use crowd_types::{HistoryPoint, Location, SnapshotEntry};
use tracing::debug;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response structs
// ---------------------------------------------------------------------------

/// Response body for `GET /api/locations`.
#[derive(Debug, serde::Serialize)]
pub struct LocationsResponse {
    /// Number of registered locations.
    pub count: usize,
    /// Threshold applied to locations that define none.
    pub default_threshold: u32,
    /// Locations in registry order, each with its effective threshold.
    pub locations: Vec<Location>,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page showing server status and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let service = &state.service;
    let location_count = service.registry().len();
    let reading_count = service.history_store().total_readings().await;
    let strategy = service.generator().strategy().name();
    let default_threshold = service.registry().default_threshold();
    let started_at = state.started_at.format("%Y-%m-%d %H:%M:%S UTC");

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Crowd Map API</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #58a6ff; text-decoration: none; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
        li::before {{ content: "GET "; color: #7ee787; font-weight: bold; }}
    </style>
</head>
<body>
    <h1>Crowd Map API</h1>
    <p class="subtitle">Simulated crowd density telemetry -- up since {started_at}</p>

    <div>
        <div class="metric">
            <div class="label">Locations</div>
            <div class="value">{location_count}</div>
        </div>
        <div class="metric">
            <div class="label">Readings</div>
            <div class="value">{reading_count}</div>
        </div>
        <div class="metric">
            <div class="label">Strategy</div>
            <div class="value">{strategy}</div>
        </div>
        <div class="metric">
            <div class="label">Default threshold</div>
            <div class="value">{default_threshold}</div>
        </div>
    </div>

    <h2>API Endpoints</h2>
    <ul>
        <li><a href="/crowd-data">/crowd-data</a> -- Current snapshot (records history)</li>
        <li><code>/history/{{location}}</code> -- Recorded readings for one location</li>
        <li><a href="/api/locations">/api/locations</a> -- Location registry</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// GET /crowd-data -- snapshot
// ---------------------------------------------------------------------------

/// Take a reading for every location and return them keyed by name.
pub async fn get_crowd_data(
    State(state): State<Arc<AppState>>,
) -> Json<BTreeMap<String, SnapshotEntry>> {
    Json(state.service.snapshot().await)
}

// ---------------------------------------------------------------------------
// GET /history/{*location} -- per-location history
// ---------------------------------------------------------------------------

/// Return the recorded readings for one location, oldest first.
///
/// The name is the whole remainder of the path, so names containing `/`
/// resolve. Unknown names yield `[]`. A remainder that cannot be extracted
/// (missing, or not valid UTF-8 after percent-decoding) is treated as an
/// unknown name rather than rejected.
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    location: Result<Path<String>, PathRejection>,
) -> Json<Vec<HistoryPoint>> {
    let name = match location {
        Ok(Path(name)) => name,
        Err(rejection) => {
            debug!(%rejection, "unreadable location segment, returning empty history");
            return Json(Vec::new());
        }
    };

    let points = state
        .service
        .history(&name)
        .await
        .iter()
        .map(HistoryPoint::from)
        .collect();
    Json(points)
}

// ---------------------------------------------------------------------------
// GET /api/locations -- registry
// ---------------------------------------------------------------------------

/// List registered locations with their effective thresholds.
pub async fn list_locations(State(state): State<Arc<AppState>>) -> Json<LocationsResponse> {
    let registry = state.service.registry();
    let locations: Vec<Location> = registry
        .list_locations()
        .iter()
        .map(|loc| Location {
            threshold: Some(registry.threshold_for(loc)),
            ..loc.clone()
        })
        .collect();

    Json(LocationsResponse {
        count: locations.len(),
        default_threshold: registry.default_threshold(),
        locations,
    })
}
