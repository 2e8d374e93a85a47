//! Per-location environmental readings for one evaluation cycle.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::Location;

/// The four readings taken at a single location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub temperature: f64,
    pub humidity: f64,
    pub co2: f64,
    pub light: f64,
}

/// Parallel reading sequences, one entry per location, captured together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentSnapshot {
    temperature: Vec<f64>,
    humidity: Vec<f64>,
    co2: Vec<f64>,
    light: Vec<f64>,
}

impl EnvironmentSnapshot {
    /// Bundles four reading sequences, which must all have the same length
    /// and hold only finite values.
    pub fn new(
        temperature: Vec<f64>,
        humidity: Vec<f64>,
        co2: Vec<f64>,
        light: Vec<f64>,
    ) -> Result<Self> {
        let expected = temperature.len();
        for (name, len) in [
            ("humidity", humidity.len()),
            ("co2", co2.len()),
            ("light", light.len()),
        ] {
            if len != expected {
                return Err(Error::config(format!(
                    "{} has {} readings but temperature has {}",
                    name, len, expected
                )));
            }
        }
        for (name, values) in [
            ("temperature", &temperature),
            ("humidity", &humidity),
            ("co2", &co2),
            ("light", &light),
        ] {
            if let Some(index) = values.iter().position(|value| !value.is_finite()) {
                return Err(Error::config(format!(
                    "{} reading {} is not a finite number",
                    name,
                    index + 1
                )));
            }
        }

        Ok(Self {
            temperature,
            humidity,
            co2,
            light,
        })
    }

    /// Builds a snapshot from per-location readings.
    ///
    /// Values are not checked here; non-finite readings count as violations
    /// when the snapshot is gated.
    pub fn from_readings(readings: &[Reading]) -> Self {
        Self {
            temperature: readings.iter().map(|r| r.temperature).collect(),
            humidity: readings.iter().map(|r| r.humidity).collect(),
            co2: readings.iter().map(|r| r.co2).collect(),
            light: readings.iter().map(|r| r.light).collect(),
        }
    }

    /// Number of locations covered.
    pub fn len(&self) -> usize {
        self.temperature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperature.is_empty()
    }

    /// Fails unless the snapshot covers exactly `size` locations.
    pub fn ensure_size(&self, size: usize) -> Result<()> {
        if self.len() == size {
            Ok(())
        } else {
            Err(Error::config(format!(
                "snapshot covers {} locations, graph has {}",
                self.len(),
                size
            )))
        }
    }

    pub fn reading(&self, location: Location) -> Result<Reading> {
        let index = location.index();
        if index >= self.len() {
            return Err(Error::IndexOutOfRange {
                index,
                size: self.len(),
            });
        }
        Ok(Reading {
            temperature: self.temperature[index],
            humidity: self.humidity[index],
            co2: self.co2[index],
            light: self.light[index],
        })
    }

    pub fn temperature(&self) -> &[f64] {
        &self.temperature
    }

    pub fn humidity(&self) -> &[f64] {
        &self.humidity
    }

    pub fn co2(&self) -> &[f64] {
        &self.co2
    }

    pub fn light(&self) -> &[f64] {
        &self.light
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphStore;

    #[test]
    fn test_mismatched_lengths_rejected() {
        let err = EnvironmentSnapshot::new(vec![20.0; 3], vec![50.0; 3], vec![400.0; 2], vec![300.0; 3])
            .unwrap_err();
        assert!(err.to_string().contains("co2"));
    }

    #[test]
    fn test_non_finite_reading_rejected() {
        let err = EnvironmentSnapshot::new(
            vec![20.0, 21.0],
            vec![50.0, f64::NAN],
            vec![400.0, 400.0],
            vec![300.0, 300.0],
        )
        .unwrap_err();
        assert!(err.to_string().contains("humidity reading 2"));
    }

    #[test]
    fn test_ensure_size() {
        let snapshot =
            EnvironmentSnapshot::new(vec![20.0; 3], vec![50.0; 3], vec![400.0; 3], vec![300.0; 3])
                .unwrap();
        assert!(snapshot.ensure_size(3).is_ok());
        assert!(matches!(snapshot.ensure_size(24), Err(Error::Config { .. })));
    }

    #[test]
    fn test_reading_gathers_all_metrics() {
        let snapshot = EnvironmentSnapshot::new(
            vec![20.0, 60.0],
            vec![50.0, 45.0],
            vec![400.0, 420.0],
            vec![300.0, 250.0],
        )
        .unwrap();
        let graph = GraphStore::new(2);
        let reading = snapshot.reading(graph.location(1).unwrap()).unwrap();
        assert_eq!(
            reading,
            Reading {
                temperature: 60.0,
                humidity: 45.0,
                co2: 420.0,
                light: 250.0,
            }
        );
    }

    #[test]
    fn test_from_readings_round_trips_order() {
        let readings = [
            Reading { temperature: 1.0, humidity: 2.0, co2: 3.0, light: 4.0 },
            Reading { temperature: 5.0, humidity: 6.0, co2: 7.0, light: 8.0 },
        ];
        let snapshot = EnvironmentSnapshot::from_readings(&readings);
        assert_eq!(snapshot.temperature(), &[1.0, 5.0]);
        assert_eq!(snapshot.light(), &[4.0, 8.0]);
    }
}
