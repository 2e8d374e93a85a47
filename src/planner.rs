//! One evaluation cycle: load inputs, gate, compute, report.

use serde::Deserialize;
use tracing::info;

use crate::engine::{ShortestPathEngine, ShortestPaths};
use crate::error::Result;
use crate::graph::{FACILITY_SIZE, GraphStore, Location};
use crate::route::{Route, RouteOutcome, RouteReporter};
use crate::safety::{GateReport, SafetyGate, SafetyThresholds};
use crate::traits::{AdjacencyProvider, EnvironmentProvider};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlannerOptions {
    /// Number of facility locations expected in every input.
    pub size: usize,
    pub thresholds: SafetyThresholds,
    /// Zero-based indices of the facility exits used by [`evacuate`].
    pub exits: Vec<usize>,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            size: FACILITY_SIZE,
            thresholds: SafetyThresholds::default(),
            exits: vec![15],
        }
    }
}

/// Everything produced by one cycle. The gated graph and paths stay read-only
/// afterwards and can serve further queries.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub graph: GraphStore,
    pub gate: GateReport,
    pub paths: ShortestPaths,
}

impl Evaluation {
    pub fn reporter(&self) -> RouteReporter<'_> {
        RouteReporter::new(&self.paths)
    }

    pub fn route(&self, source: usize, destination: usize) -> Result<RouteOutcome> {
        let source = self.graph.location(source)?;
        let destination = self.graph.location(destination)?;
        self.reporter().route(source, destination)
    }
}

/// Loads both inputs, closes unsafe locations and computes all shortest paths.
pub fn evaluate<A, E>(adjacency: &A, environment: &E, options: &PlannerOptions) -> Result<Evaluation>
where
    A: AdjacencyProvider,
    E: EnvironmentProvider,
{
    let mut graph = adjacency.adjacency(options.size)?;
    let snapshot = environment.snapshot(options.size)?;

    let gate = SafetyGate::new(options.thresholds).apply(&mut graph, &snapshot)?;
    let paths = ShortestPathEngine::new().compute(&graph);

    Ok(Evaluation { graph, gate, paths })
}

/// Computes the route from `source` to `destination` for one snapshot.
pub fn plan<A, E>(
    adjacency: &A,
    environment: &E,
    options: &PlannerOptions,
    source: usize,
    destination: usize,
) -> Result<(Evaluation, RouteOutcome)>
where
    A: AdjacencyProvider,
    E: EnvironmentProvider,
{
    let evaluation = evaluate(adjacency, environment, options)?;
    let outcome = evaluation.route(source, destination)?;
    info!(
        source = source + 1,
        destination = destination + 1,
        reachable = outcome.is_reachable(),
        closed = evaluation.gate.closed.len(),
        "route planned"
    );
    Ok((evaluation, outcome))
}

/// Routes `source` to the cheapest reachable exit in `options.exits`.
pub fn evacuate<A, E>(
    adjacency: &A,
    environment: &E,
    options: &PlannerOptions,
    source: usize,
) -> Result<(Evaluation, Option<Route>)>
where
    A: AdjacencyProvider,
    E: EnvironmentProvider,
{
    let evaluation = evaluate(adjacency, environment, options)?;
    let source = evaluation.graph.location(source)?;
    let exits = options
        .exits
        .iter()
        .map(|&exit| evaluation.graph.location(exit))
        .collect::<Result<Vec<Location>>>()?;

    let route = evaluation.reporter().nearest_exit(source, &exits)?;
    info!(
        source = source.display_number(),
        exit = ?route.as_ref().map(|r| r.destination.display_number()),
        closed = evaluation.gate.closed.len(),
        "evacuation planned"
    );
    Ok((evaluation, route))
}
