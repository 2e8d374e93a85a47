//! Input seams for the planner.
//!
//! The planner only needs a cost matrix and one snapshot of readings per run.
//! Hosts implement these for their own storage; CSV sources live in
//! [`crate::loader`].

use crate::environment::EnvironmentSnapshot;
use crate::error::Result;
use crate::graph::GraphStore;

/// Provides the facility cost matrix.
pub trait AdjacencyProvider {
    /// Loads a `size x size` graph, failing if the source has another shape.
    fn adjacency(&self, size: usize) -> Result<GraphStore>;
}

/// Provides one snapshot of environmental readings.
pub trait EnvironmentProvider {
    /// Loads readings for exactly `size` locations.
    fn snapshot(&self, size: usize) -> Result<EnvironmentSnapshot>;
}

impl AdjacencyProvider for GraphStore {
    fn adjacency(&self, size: usize) -> Result<GraphStore> {
        if self.size() != size {
            return Err(crate::error::Error::config(format!(
                "graph has {} locations, expected {}",
                self.size(),
                size
            )));
        }
        Ok(self.clone())
    }
}

impl EnvironmentProvider for EnvironmentSnapshot {
    fn snapshot(&self, size: usize) -> Result<EnvironmentSnapshot> {
        self.ensure_size(size)?;
        Ok(self.clone())
    }
}
