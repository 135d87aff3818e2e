//! Sensor packages: `(type tag, readings)` pairs and batch processing.

use std::fmt;
use std::fs;
use std::path::Path;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PackageError, WorkoutError};
use crate::factory::create_session;
use crate::summary::SessionSummary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub workout_type: String,
    pub data: Vec<f64>,
}

impl Package {
    pub fn new(workout_type: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            workout_type: workout_type.into(),
            data,
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.workout_type, self.data.iter().join(", "))
    }
}

/// Built-in demo readings, one per workout type
pub fn sample_packages() -> Vec<Package> {
    vec![
        Package::new("SWM", vec![720.0, 1.0, 80.0, 25.0, 40.0]),
        Package::new("RUN", vec![15000.0, 1.0, 75.0]),
        Package::new("WLK", vec![9000.0, 1.0, 75.0, 180.0]),
    ]
}

/// Read packages from a `.json` or `.csv` file
pub fn load_packages<P: AsRef<Path>>(path: P) -> Result<Vec<Package>, PackageError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let packages = match extension.as_deref() {
        Some("json") => load_json(path)?,
        Some("csv") => load_csv(path)?,
        _ => return Err(PackageError::UnsupportedFormat(path.to_path_buf())),
    };
    info!("Loaded {} packages from {}", packages.len(), path.display());
    Ok(packages)
}

fn load_json(path: &Path) -> Result<Vec<Package>, PackageError> {
    let bytes = fs::read(path).map_err(|source| PackageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| PackageError::Json {
        path: path.to_path_buf(),
        source,
    })
}

// One package per row: tag first, readings after it, no header.
fn load_csv(path: &Path) -> Result<Vec<Package>, PackageError> {
    let csv_err = |source: csv::Error| PackageError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let mut packages = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let line = record.position().map_or(0, |pos| pos.line());
        if record.iter().all(str::is_empty) {
            continue;
        }

        let mut fields = record.iter();
        let workout_type = fields
            .next()
            .filter(|tag| !tag.is_empty())
            .ok_or_else(|| PackageError::MissingWorkoutType {
                path: path.to_path_buf(),
                line,
            })?;
        let data = fields
            .map(|value| {
                value.parse::<f64>().map_err(|_| PackageError::BadNumber {
                    path: path.to_path_buf(),
                    line,
                    value: value.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        packages.push(Package::new(workout_type, data));
    }
    Ok(packages)
}

/// Result of running one package through the calculator
#[derive(Debug, Clone, PartialEq)]
pub struct PackageOutcome {
    /// 1-based position in the input
    pub index: usize,
    pub package: Package,
    pub result: Result<SessionSummary, WorkoutError>,
}

pub fn process_package(package: &Package) -> Result<SessionSummary, WorkoutError> {
    create_session(&package.workout_type, &package.data)?.summarize()
}

pub fn process_packages(packages: &[Package]) -> Vec<PackageOutcome> {
    packages
        .iter()
        .enumerate()
        .map(|(i, package)| {
            let result = process_package(package);
            match &result {
                Ok(summary) => debug!("package #{} -> {}", i + 1, summary.workout_type()),
                Err(e) => debug!("package #{} ({}) failed: {}", i + 1, package, e),
            }
            PackageOutcome {
                index: i + 1,
                package: package.clone(),
                result,
            }
        })
        .collect()
}
