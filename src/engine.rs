//! All-pairs shortest paths (Floyd-Warshall) with a forward next-hop table.

use rayon::prelude::*;
use tracing::debug;

use crate::graph::{Cost, GraphStore, Location, UNREACHABLE};
use crate::matrix::SquareMatrix;

/// Distance and next-hop tables for one gated graph.
///
/// `next_hops[v][w]` is the first stop after `v` on a shortest path toward `w`,
/// so routes are rebuilt by walking forward from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPaths {
    distances: SquareMatrix<Cost>,
    next_hops: SquareMatrix<usize>,
}

impl ShortestPaths {
    pub fn size(&self) -> usize {
        self.distances.size()
    }

    /// Minimal total cost from `v` to `w`.
    pub fn distance(&self, v: Location, w: Location) -> Option<Cost> {
        self.distances.get(v.index(), w.index()).copied()
    }

    pub fn next_hop(&self, v: Location, w: Location) -> Option<Location> {
        self.next_hops
            .get(v.index(), w.index())
            .map(|&hop| Location::from_index(hop))
    }

    /// True when a real path exists, i.e. the distance is below the sentinel.
    pub fn is_reachable(&self, v: Location, w: Location) -> bool {
        self.distance(v, w).is_some_and(|cost| cost < UNREACHABLE)
    }

    pub fn distances(&self) -> &SquareMatrix<Cost> {
        &self.distances
    }

    pub fn next_hops(&self) -> &SquareMatrix<usize> {
        &self.next_hops
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestPathEngine;

impl ShortestPathEngine {
    pub fn new() -> Self {
        Self
    }

    /// Runs the dynamic program over `graph`.
    ///
    /// Costs must be non-negative; ties keep the path found with the lowest
    /// intermediate index.
    pub fn compute(&self, graph: &GraphStore) -> ShortestPaths {
        let size = graph.size();
        let mut distances = graph.costs().clone();
        let mut next_hops = SquareMatrix::from_fn(size, |_, w| w);
        let mut via_row = vec![0 as Cost; size];

        debug!(locations = size, "computing shortest paths");

        let mut relaxations = 0usize;
        for k in 0..size {
            // Row k cannot improve during pass k because D[k][k] is zero.
            if let Some(row) = distances.row(k) {
                via_row.copy_from_slice(row);
            }
            let via_row = &via_row;

            relaxations += distances
                .cells_mut()
                .par_chunks_exact_mut(size)
                .zip(next_hops.cells_mut().par_chunks_exact_mut(size))
                .map(|(dist_row, hop_row)| relax_row(dist_row, hop_row, via_row, k))
                .sum::<usize>();
        }

        debug!(locations = size, relaxations, "shortest paths computed");
        ShortestPaths {
            distances,
            next_hops,
        }
    }
}

/// Relaxes one row `v` through intermediate `k`, returning the number of improvements.
fn relax_row(dist_row: &mut [Cost], hop_row: &mut [usize], via_row: &[Cost], k: usize) -> usize {
    let to_k = dist_row[k];
    let hop_to_k = hop_row[k];
    let mut improved = 0;
    for (w, &k_to_w) in via_row.iter().enumerate() {
        let candidate = to_k.saturating_add(k_to_w);
        if candidate < dist_row[w] {
            dist_row[w] = candidate;
            hop_row[w] = hop_to_k;
            improved += 1;
        }
    }
    improved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::route::RouteReporter;

    fn triangle() -> GraphStore {
        GraphStore::from_rows(vec![vec![0, 1, 4], vec![1, 0, 2], vec![4, 2, 0]]).unwrap()
    }

    #[test]
    fn test_relaxes_through_intermediate() {
        let graph = triangle();
        let paths = ShortestPathEngine::new().compute(&graph);
        let a = graph.location(0).unwrap();
        let b = graph.location(1).unwrap();
        let c = graph.location(2).unwrap();
        assert_eq!(paths.distance(a, c), Some(3));
        assert_eq!(paths.next_hop(a, c), Some(b));
        assert_eq!(paths.next_hop(c, a), Some(b));
        assert_eq!(paths.next_hop(a, b), Some(b));
    }

    #[test]
    fn test_tie_keeps_lowest_intermediate() {
        // 0 -> 3 costs 2 both via 1 and via 2; via 1 is found first.
        let u = UNREACHABLE;
        let graph = GraphStore::from_rows(vec![
            vec![0, 1, 1, u],
            vec![1, 0, u, 1],
            vec![1, u, 0, 1],
            vec![u, 1, 1, 0],
        ])
        .unwrap();
        let paths = ShortestPathEngine::new().compute(&graph);
        let start = graph.location(0).unwrap();
        let goal = graph.location(3).unwrap();
        assert_eq!(paths.distance(start, goal), Some(2));
        assert_eq!(paths.next_hop(start, goal), graph.location(1).ok());
    }

    #[test]
    fn test_direct_edge_tie_is_kept() {
        // The direct edge equals the detour, strict comparison keeps it.
        let graph =
            GraphStore::from_rows(vec![vec![0, 1, 3], vec![1, 0, 2], vec![3, 2, 0]]).unwrap();
        let paths = ShortestPathEngine::new().compute(&graph);
        let a = graph.location(0).unwrap();
        let c = graph.location(2).unwrap();
        assert_eq!(paths.distance(a, c), Some(3));
        assert_eq!(paths.next_hop(a, c), Some(c));
    }

    #[test]
    fn test_disconnected_pair_stays_unreachable() {
        let graph = GraphStore::new(3);
        let paths = ShortestPathEngine::new().compute(&graph);
        let a = graph.location(0).unwrap();
        let b = graph.location(1).unwrap();
        assert_eq!(paths.distance(a, b), Some(UNREACHABLE));
        assert!(!paths.is_reachable(a, b));
        assert!(paths.is_reachable(a, a));
    }

    #[test]
    fn test_empty_graph() {
        let paths = ShortestPathEngine::new().compute(&GraphStore::new(0));
        assert_eq!(paths.size(), 0);
    }

    #[test]
    fn test_relax_row_counts_improvements() {
        let mut dist = vec![0, 1, 10];
        let mut hops = vec![0, 1, 2];
        let improved = relax_row(&mut dist, &mut hops, &[1, 0, 2], 1);
        assert_eq!(improved, 1);
        assert_eq!(dist, vec![0, 1, 3]);
        assert_eq!(hops, vec![0, 1, 1]);
    }

    #[test]
    fn test_cyclic_next_hops_stop_reconstruction() {
        // 0 and 1 point at each other when heading for 2.
        let paths = ShortestPaths {
            distances: SquareMatrix::from_fn(3, |v, w| if v == w { 0 } else { 1 }),
            next_hops: SquareMatrix::from_fn(3, |v, w| match (v, w) {
                (0, 2) => 1,
                (1, 2) => 0,
                _ => w,
            }),
        };
        let graph = GraphStore::new(3);
        let start = graph.location(0).unwrap();
        let goal = graph.location(2).unwrap();

        let err = RouteReporter::new(&paths).route(start, goal).unwrap_err();
        assert!(matches!(err, Error::RouteReconstruction { start: 0, goal: 2 }));
    }
}
