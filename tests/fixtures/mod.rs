//! Test fixtures for evac-planner.
//!
//! Provides a 24-location facility laid out as four corridors of six rooms,
//! plus reading builders for safe and hazardous snapshots.

pub mod facility;

pub use facility::*;
