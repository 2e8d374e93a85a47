//! evac-planner core
//!
//! Safety-gated shortest routes through a fixed facility graph. Locations
//! whose environmental readings cross alarm thresholds are closed before
//! all-pairs shortest paths are computed.

pub mod error;
pub mod matrix;
pub mod graph;
pub mod environment;
pub mod safety;
pub mod engine;
pub mod route;
pub mod traits;
pub mod loader;
pub mod planner;

pub use error::{Error, Result};
