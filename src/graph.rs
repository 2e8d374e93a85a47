//! Facility adjacency matrix and validated location handles.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::matrix::SquareMatrix;

/// Number of locations in the reference facility.
pub const FACILITY_SIZE: usize = 24;

/// Sentinel travel cost meaning "no usable edge".
///
/// Must exceed any feasible sum of real edges in the facility.
pub const UNREACHABLE: Cost = 1000;

/// Travel cost between two locations.
pub type Cost = u32;

/// Index of one facility node, validated against the graph it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Location(usize);

impl Location {
    pub(crate) fn from_index(index: usize) -> Self {
        Location(index)
    }

    /// Zero-based index of this location.
    pub fn index(self) -> usize {
        self.0
    }

    /// One-based number used when presenting routes.
    pub fn display_number(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_number())
    }
}

/// Travel costs between every pair of facility locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStore {
    costs: SquareMatrix<Cost>,
}

impl GraphStore {
    /// Creates a graph of `size` isolated locations.
    pub fn new(size: usize) -> Self {
        let costs = SquareMatrix::from_fn(size, |v, w| if v == w { 0 } else { UNREACHABLE });
        Self { costs }
    }

    /// Builds a graph from row-major costs.
    ///
    /// Rows must form a square and every diagonal entry must be zero.
    pub fn from_rows(rows: Vec<Vec<Cost>>) -> Result<Self> {
        let costs = SquareMatrix::from_rows(rows)?;
        for v in 0..costs.size() {
            if let Some(&cost) = costs.get(v, v) {
                if cost != 0 {
                    return Err(Error::config(format!(
                        "self cost of location {} is {}, expected 0",
                        v + 1,
                        cost
                    )));
                }
            }
        }
        Ok(Self { costs })
    }

    pub fn size(&self) -> usize {
        self.costs.size()
    }

    /// Validates a zero-based index against this graph.
    pub fn location(&self, index: usize) -> Result<Location> {
        if index < self.size() {
            Ok(Location(index))
        } else {
            Err(Error::IndexOutOfRange {
                index,
                size: self.size(),
            })
        }
    }

    /// All locations in index order.
    pub fn locations(&self) -> impl Iterator<Item = Location> + use<> {
        (0..self.size()).map(Location)
    }

    pub fn get(&self, v: Location, w: Location) -> Result<Cost> {
        self.costs
            .get(v.0, w.0)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index: v.0.max(w.0),
                size: self.size(),
            })
    }

    /// Replaces the cost of edge `v -> w`. Self costs must stay zero.
    pub fn set(&mut self, v: Location, w: Location, cost: Cost) -> Result<()> {
        if v == w && cost != 0 {
            return Err(Error::config(format!(
                "self cost of location {} must be 0, got {}",
                v.display_number(),
                cost
            )));
        }
        self.costs.set(v.0, w.0, cost)
    }

    /// Outgoing edges of `v` with a real (non-sentinel) cost, excluding the self loop.
    pub fn neighbours(&self, v: Location) -> impl Iterator<Item = (Location, Cost)> + '_ {
        self.costs
            .row(v.0)
            .unwrap_or(&[])
            .iter()
            .enumerate()
            .filter(move |&(w, &cost)| w != v.0 && cost < UNREACHABLE)
            .map(|(w, &cost)| (Location(w), cost))
    }

    /// Voids every edge into and out of `v`, keeping its self loop free.
    pub fn close(&mut self, v: Location) -> Result<()> {
        for z in 0..self.size() {
            self.costs.set(v.0, z, UNREACHABLE)?;
            self.costs.set(z, v.0, UNREACHABLE)?;
        }
        self.costs.set(v.0, v.0, 0)
    }

    pub(crate) fn costs(&self) -> &SquareMatrix<Cost> {
        &self.costs
    }
}
