//! Reference facility: rooms `r * 6 + c` on a 4 x 6 floor plan.
//!
//! Location 4 (displayed as 5) is the usual starting point and location 15
//! (displayed as 16) the main exit.

#![allow(dead_code)]

use evac_planner::environment::{EnvironmentSnapshot, Reading};
use evac_planner::graph::{Cost, FACILITY_SIZE, GraphStore};

pub const START: usize = 4;
pub const MAIN_EXIT: usize = 15;
pub const WEST_EXIT: usize = 0;
pub const EAST_EXIT: usize = 23;

/// Undirected corridors and stairwells as `(a, b, cost)`.
pub const CORRIDORS: &[(usize, usize, Cost)] = &[
    // row 0
    (0, 1, 4),
    (1, 2, 3),
    (2, 3, 5),
    (3, 4, 2),
    (4, 5, 4),
    // row 1
    (6, 7, 3),
    (7, 8, 4),
    (8, 9, 2),
    (9, 10, 3),
    (10, 11, 5),
    // row 2
    (12, 13, 2),
    (13, 14, 6),
    (14, 15, 3),
    (15, 16, 4),
    (16, 17, 2),
    // row 3
    (18, 19, 5),
    (19, 20, 3),
    (20, 21, 4),
    (21, 22, 2),
    (22, 23, 3),
    // between rows
    (0, 6, 3),
    (2, 8, 4),
    (4, 10, 3),
    (5, 11, 6),
    (6, 12, 5),
    (9, 15, 4),
    (11, 17, 3),
    (12, 18, 4),
    (14, 20, 5),
    (17, 23, 4),
    (3, 9, 6),
    (16, 22, 5),
];

pub fn facility() -> GraphStore {
    let mut graph = GraphStore::new(FACILITY_SIZE);
    for &(a, b, cost) in CORRIDORS {
        let a = graph.location(a).unwrap();
        let b = graph.location(b).unwrap();
        graph.set(a, b, cost).unwrap();
        graph.set(b, a, cost).unwrap();
    }
    graph
}

/// The facility rendered as comma-separated rows.
pub fn facility_csv() -> String {
    let graph = facility();
    let mut out = String::new();
    for v in graph.locations() {
        let row = graph
            .locations()
            .map(|w| graph.get(v, w).unwrap().to_string())
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&row);
        out.push('\n');
    }
    out
}

pub fn safe_reading() -> Reading {
    Reading {
        temperature: 22.0,
        humidity: 45.0,
        co2: 420.0,
        light: 300.0,
    }
}

pub fn smoke_reading() -> Reading {
    Reading {
        temperature: 64.0,
        humidity: 28.0,
        co2: 950.0,
        light: 40.0,
    }
}

/// A snapshot where every location is safe except those listed.
pub fn snapshot_with(hazards: &[(usize, Reading)]) -> EnvironmentSnapshot {
    let mut readings = vec![safe_reading(); FACILITY_SIZE];
    for &(index, reading) in hazards {
        readings[index] = reading;
    }
    EnvironmentSnapshot::from_readings(&readings)
}

pub fn calm_snapshot() -> EnvironmentSnapshot {
    snapshot_with(&[])
}
