//! CSV input sources.
//!
//! The cost matrix is `N` rows of `N` integers. Each reading file holds `N`
//! floats, either on one row or one per line. No header row is expected and
//! empty trailing fields are ignored.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::environment::EnvironmentSnapshot;
use crate::error::{Error, Result};
use crate::graph::{Cost, GraphStore};
use crate::traits::{AdjacencyProvider, EnvironmentProvider};

/// Default file names inside a facility data directory.
pub const ADJACENCY_FILE: &str = "pathfinal.csv";
pub const TEMPERATURE_FILE: &str = "T.csv";
pub const HUMIDITY_FILE: &str = "H.csv";
pub const CO2_FILE: &str = "C.csv";
pub const LIGHT_FILE: &str = "L.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Field delimiter shared by every file.
    pub delimiter: u8,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Parses a `size x size` cost matrix.
pub fn read_costs<R: Read>(reader: R, size: usize, options: LoaderOptions) -> Result<GraphStore> {
    let mut rows: Vec<Vec<Cost>> = Vec::with_capacity(size);
    let mut csv_reader = csv_reader(reader, options);

    for record in csv_reader.records() {
        let record = record?;
        let row = rows.len() + 1;
        let fields = record_fields(&record, || format!("cost row {}", row))?;
        if fields.is_empty() {
            continue;
        }

        if fields.len() != size {
            return Err(Error::config(format!(
                "cost row {} has {} fields, expected {}",
                row,
                fields.len(),
                size
            )));
        }

        let costs = fields
            .iter()
            .enumerate()
            .map(|(col, field)| {
                field.parse::<Cost>().map_err(|_| {
                    Error::config(format!(
                        "cost row {} column {}: invalid cost '{}'",
                        row,
                        col + 1,
                        field
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(costs);
    }

    if rows.len() != size {
        return Err(Error::config(format!(
            "cost matrix has {} rows, expected {}",
            rows.len(),
            size
        )));
    }

    debug!(rows = rows.len(), "cost matrix loaded");
    GraphStore::from_rows(rows)
}

/// Parses exactly `size` readings.
pub fn read_readings<R: Read>(reader: R, size: usize, options: LoaderOptions) -> Result<Vec<f64>> {
    let mut values = Vec::with_capacity(size);
    let mut csv_reader = csv_reader(reader, options);

    for record in csv_reader.records() {
        let record = record?;
        let first = values.len() + 1;
        let fields = record_fields(&record, || format!("readings from {}", first))?;
        for field in fields {
            let value = field
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| {
                    Error::config(format!(
                        "reading {}: invalid value '{}'",
                        values.len() + 1,
                        field
                    ))
                })?;
            values.push(value);
        }
    }

    if values.len() != size {
        return Err(Error::config(format!(
            "found {} readings, expected {}",
            values.len(),
            size
        )));
    }

    debug!(readings = values.len(), "readings loaded");
    Ok(values)
}

/// Fields of one record with trailing empty fields dropped.
///
/// An empty field followed by a non-empty one is rejected.
fn record_fields<'r>(
    record: &'r csv::StringRecord,
    label: impl FnOnce() -> String,
) -> Result<Vec<&'r str>> {
    let mut fields: Vec<&str> = record.iter().collect();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    if let Some(blank) = fields.iter().position(|field| field.is_empty()) {
        return Err(Error::config(format!(
            "{}: field {} is empty",
            label(),
            blank + 1
        )));
    }
    Ok(fields)
}

fn csv_reader<R: Read>(reader: R, options: LoaderOptions) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(options.delimiter)
        .from_reader(reader)
}

fn read_readings_file(path: &Path, size: usize, options: LoaderOptions) -> Result<Vec<f64>> {
    let file = File::open(path)?;
    read_readings(file, size, options).map_err(|err| with_path(err, path))
}

fn with_path(err: Error, path: &Path) -> Error {
    match err {
        Error::Config { message } => Error::config(format!("{}: {}", path.display(), message)),
        other => other,
    }
}

/// Cost matrix stored in a CSV file.
#[derive(Debug, Clone)]
pub struct CsvAdjacency {
    pub path: PathBuf,
    pub options: LoaderOptions,
}

impl CsvAdjacency {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: LoaderOptions::default(),
        }
    }

    /// Uses [`ADJACENCY_FILE`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(ADJACENCY_FILE))
    }

    pub fn with_options(mut self, options: LoaderOptions) -> Self {
        self.options = options;
        self
    }
}

impl AdjacencyProvider for CsvAdjacency {
    fn adjacency(&self, size: usize) -> Result<GraphStore> {
        let file = File::open(&self.path)?;
        read_costs(file, size, self.options).map_err(|err| with_path(err, &self.path))
    }
}

/// Four reading files, one per metric.
#[derive(Debug, Clone)]
pub struct CsvEnvironment {
    pub temperature: PathBuf,
    pub humidity: PathBuf,
    pub co2: PathBuf,
    pub light: PathBuf,
    pub options: LoaderOptions,
}

impl CsvEnvironment {
    /// Uses the default reading file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            temperature: dir.join(TEMPERATURE_FILE),
            humidity: dir.join(HUMIDITY_FILE),
            co2: dir.join(CO2_FILE),
            light: dir.join(LIGHT_FILE),
            options: LoaderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: LoaderOptions) -> Self {
        self.options = options;
        self
    }
}

impl EnvironmentProvider for CsvEnvironment {
    fn snapshot(&self, size: usize) -> Result<EnvironmentSnapshot> {
        EnvironmentSnapshot::new(
            read_readings_file(&self.temperature, size, self.options)?,
            read_readings_file(&self.humidity, size, self.options)?,
            read_readings_file(&self.co2, size, self.options)?,
            read_readings_file(&self.light, size, self.options)?,
        )
    }
}
