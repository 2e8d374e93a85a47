//! Route reconstruction from the next-hop table, plus presentation helpers.

use std::fmt::Write;

use serde::Serialize;
use tracing::debug;

use crate::engine::ShortestPaths;
use crate::error::{Error, Result};
use crate::graph::{Cost, GraphStore, Location, UNREACHABLE};

/// A concrete shortest route between two locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub source: Location,
    pub destination: Location,
    pub total_cost: Cost,
    /// Ordered stops, starting at `source` and ending at `destination`.
    pub stops: Vec<Location>,
}

/// One edge travelled along a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Leg {
    pub from: Location,
    pub to: Location,
    pub cost: Cost,
}

impl Route {
    /// Number of edges travelled.
    pub fn hops(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }

    /// Edge costs for each consecutive pair of stops, read from `graph`.
    pub fn legs(&self, graph: &GraphStore) -> Result<Vec<Leg>> {
        self.stops
            .windows(2)
            .map(|pair| {
                Ok(Leg {
                    from: pair[0],
                    to: pair[1],
                    cost: graph.get(pair[0], pair[1])?,
                })
            })
            .collect()
    }
}

/// Result of a route query. `Unreachable` is an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    Found(Route),
    Unreachable {
        source: Location,
        destination: Location,
    },
}

impl RouteOutcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            RouteOutcome::Found(route) => Some(route),
            RouteOutcome::Unreachable { .. } => None,
        }
    }

    pub fn into_route(self) -> Option<Route> {
        match self {
            RouteOutcome::Found(route) => Some(route),
            RouteOutcome::Unreachable { .. } => None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, RouteOutcome::Found(_))
    }
}

/// Answers route queries against one set of computed shortest paths.
#[derive(Debug, Clone, Copy)]
pub struct RouteReporter<'a> {
    paths: &'a ShortestPaths,
}

impl<'a> RouteReporter<'a> {
    pub fn new(paths: &'a ShortestPaths) -> Self {
        Self { paths }
    }

    /// Rebuilds the shortest route from `source` to `destination`.
    ///
    /// Returns [`RouteOutcome::Unreachable`] without walking the next-hop
    /// table when the distance is at or above the sentinel cost.
    pub fn route(&self, source: Location, destination: Location) -> Result<RouteOutcome> {
        let total_cost = self.distance(source, destination)?;

        if source == destination {
            return Ok(RouteOutcome::Found(Route {
                source,
                destination,
                total_cost: 0,
                stops: vec![source],
            }));
        }

        if total_cost >= UNREACHABLE {
            debug!(
                source = source.display_number(),
                destination = destination.display_number(),
                "no route"
            );
            return Ok(RouteOutcome::Unreachable {
                source,
                destination,
            });
        }

        let mut stops = vec![source];
        let mut current = source;
        while current != destination {
            current = self
                .paths
                .next_hop(current, destination)
                .ok_or(Error::RouteReconstruction {
                    start: source.index(),
                    goal: destination.index(),
                })?;
            stops.push(current);
            if stops.len() > self.paths.size() {
                return Err(Error::RouteReconstruction {
                    start: source.index(),
                    goal: destination.index(),
                });
            }
        }

        Ok(RouteOutcome::Found(Route {
            source,
            destination,
            total_cost,
            stops,
        }))
    }

    /// Cheapest reachable exit from `source`.
    ///
    /// Ties keep the exit listed first; `None` when every exit is cut off.
    pub fn nearest_exit(&self, source: Location, exits: &[Location]) -> Result<Option<Route>> {
        let mut best: Option<(Location, Cost)> = None;
        for &exit in exits {
            let cost = self.distance(source, exit)?;
            if cost >= UNREACHABLE {
                continue;
            }
            if best.is_none_or(|(_, best_cost)| cost < best_cost) {
                best = Some((exit, cost));
            }
        }

        match best {
            Some((exit, _)) => Ok(self.route(source, exit)?.into_route()),
            None => Ok(None),
        }
    }

    fn distance(&self, source: Location, destination: Location) -> Result<Cost> {
        let size = self.paths.size();
        for location in [source, destination] {
            if location.index() >= size {
                return Err(Error::IndexOutOfRange {
                    index: location.index(),
                    size,
                });
            }
        }
        self.paths
            .distance(source, destination)
            .ok_or(Error::IndexOutOfRange {
                index: source.index().max(destination.index()),
                size,
            })
    }
}

/// Renders an outcome as two lines of text with one-based stop numbers.
pub fn render_text(outcome: &RouteOutcome) -> String {
    let mut out = String::new();
    match outcome {
        RouteOutcome::Found(route) => {
            let _ = writeln!(
                out,
                "The shortest path from {} to {} is {}",
                route.source, route.destination, route.total_cost
            );
            let stops = route
                .stops
                .iter()
                .map(|stop| stop.to_string())
                .collect::<Vec<_>>()
                .join("-> ");
            let _ = write!(out, "path: {}", stops);
        }
        RouteOutcome::Unreachable {
            source,
            destination,
        } => {
            let _ = write!(out, "No route from {} to {}", source, destination);
        }
    }
    out
}

/// Renders an outcome as pretty-printed JSON.
pub fn render_json(outcome: &RouteOutcome) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}
