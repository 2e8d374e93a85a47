//! Environmental safety gating.
//!
//! A location whose readings cross any threshold is closed: every edge into
//! or out of it is replaced by the sentinel cost, leaving only its free self
//! loop. Routes can still start or end there trivially but never pass
//! through it.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::environment::{EnvironmentSnapshot, Reading};
use crate::error::Result;
use crate::graph::{GraphStore, Location};

/// Alarm limits for one evaluation. All comparisons are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyThresholds {
    /// Locations at or above this temperature are unsafe.
    pub temperature_max: f64,
    /// Locations at or below this humidity are unsafe.
    pub humidity_min: f64,
    /// Locations at or above this CO2 concentration are unsafe.
    pub co2_max: f64,
    /// Locations at or below this light level are unsafe.
    pub light_min: f64,
}

impl Default for SafetyThresholds {
    fn default() -> Self {
        Self {
            temperature_max: 57.0,
            humidity_min: 30.0,
            co2_max: 500.0,
            light_min: 100.0,
        }
    }
}

/// A reading that can trip a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Temperature,
    Humidity,
    Co2,
    Light,
}

impl SafetyThresholds {
    /// Metrics of `reading` that violate these thresholds, in fixed order.
    ///
    /// A non-finite reading always counts as a violation.
    pub fn violations(&self, reading: &Reading) -> Vec<Metric> {
        let t = self;
        let checks = [
            (Metric::Temperature, reading.temperature, reading.temperature >= t.temperature_max),
            (Metric::Humidity, reading.humidity, reading.humidity <= t.humidity_min),
            (Metric::Co2, reading.co2, reading.co2 >= t.co2_max),
            (Metric::Light, reading.light, reading.light <= t.light_min),
        ];
        checks
            .into_iter()
            .filter(|&(_, value, tripped)| tripped || !value.is_finite())
            .map(|(metric, _, _)| metric)
            .collect()
    }

    pub fn is_safe(&self, reading: &Reading) -> bool {
        self.violations(reading).is_empty()
    }
}

/// A location that failed at least one threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hazard {
    pub location: Location,
    pub reading: Reading,
    pub violated: Vec<Metric>,
}

/// Locations closed by [`SafetyGate::apply`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GateReport {
    pub closed: Vec<Hazard>,
}

impl GateReport {
    pub fn is_closed(&self, location: Location) -> bool {
        self.closed.iter().any(|hazard| hazard.location == location)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SafetyGate {
    thresholds: SafetyThresholds,
}

impl SafetyGate {
    pub fn new(thresholds: SafetyThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &SafetyThresholds {
        &self.thresholds
    }

    /// Lists unsafe locations without touching any graph.
    pub fn assess(&self, graph: &GraphStore, snapshot: &EnvironmentSnapshot) -> Result<Vec<Hazard>> {
        snapshot.ensure_size(graph.size())?;

        let mut hazards = Vec::new();
        for location in graph.locations() {
            let reading = snapshot.reading(location)?;
            let violated = self.thresholds.violations(&reading);
            if !violated.is_empty() {
                hazards.push(Hazard {
                    location,
                    reading,
                    violated,
                });
            }
        }
        Ok(hazards)
    }

    /// Closes every unsafe location in `graph`.
    ///
    /// Run once per snapshot, before computing shortest paths.
    pub fn apply(&self, graph: &mut GraphStore, snapshot: &EnvironmentSnapshot) -> Result<GateReport> {
        let closed = self.assess(graph, snapshot)?;
        for hazard in &closed {
            warn!(
                location = hazard.location.display_number(),
                violated = ?hazard.violated,
                "closing unsafe location"
            );
            graph.close(hazard.location)?;
        }

        info!(
            closed = closed.len(),
            locations = graph.size(),
            "safety gate applied"
        );
        Ok(GateReport { closed })
    }
}
