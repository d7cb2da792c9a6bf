//! Shared type definitions for the crowd density telemetry service.
//!
//! This crate is the single source of truth for the values that cross
//! crate boundaries and the HTTP wire. Types flow downstream to
//! `TypeScript` via `ts-rs` for the map frontend.
//!
//! # Modules
//!
//! - [`location`] -- Registry entries (name, coordinates, threshold)
//! - [`reading`] -- Occupancy readings and their wire projections
//! - [`timestamp`] -- Timestamp wire format

pub mod location;
pub mod reading;
pub mod timestamp;

// Re-export all public types at crate root for convenience.
pub use location::Location;
pub use reading::{HistoryPoint, Reading, SnapshotEntry};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // The files are written to the `bindings/` directory relative to
        // the crate root.
        use ts_rs::TS;

        let _ = crate::location::Location::export_all();
        let _ = crate::reading::SnapshotEntry::export_all();
        let _ = crate::reading::HistoryPoint::export_all();
    }
}
