//! File-based input loaders
//!
//! The full project snapshot is carried as one JSON document; individual
//! external series (loan interest, depreciation) can also be loaded from
//! two-column `year,value` CSV files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use super::series::YearSeries;
use super::ProjectInputs;

/// Errors surfaced while reading project configuration from disk
///
/// This is a loader boundary concern only; the computational core itself
/// never raises.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed project input JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed year series CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("year series row {row}: {message}")]
    MalformedRow { row: usize, message: String },
}

/// Load a full project input snapshot from a JSON file
pub fn load_inputs(path: &Path) -> Result<ProjectInputs, ConfigError> {
    let file = File::open(path)?;
    parse_inputs(file)
}

/// Parse a project input snapshot from any reader
pub fn parse_inputs<R: Read>(reader: R) -> Result<ProjectInputs, ConfigError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a `year,value` series from a CSV file (header row expected)
pub fn load_year_series(path: &Path) -> Result<YearSeries, ConfigError> {
    let file = File::open(path)?;
    parse_year_series(file)
}

/// Parse a `year,value` series from any reader
pub fn parse_year_series<R: Read>(reader: R) -> Result<YearSeries, ConfigError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut series = YearSeries::new();

    for (row, result) in csv_reader.records().enumerate() {
        let record = result?;
        if record.len() < 2 {
            return Err(ConfigError::MalformedRow {
                row: row + 1,
                message: format!("expected 2 columns, found {}", record.len()),
            });
        }

        let year: u32 = record[0]
            .trim()
            .parse()
            .map_err(|e| ConfigError::MalformedRow {
                row: row + 1,
                message: format!("bad year {:?}: {e}", &record[0]),
            })?;
        let value: f64 = record[1]
            .trim()
            .parse()
            .map_err(|e| ConfigError::MalformedRow {
                row: row + 1,
                message: format!("bad value {:?}: {e}", &record[1]),
            })?;

        series.insert(year, value);
    }

    Ok(series)
}
