//! Export of the final generation.
//!
//! The test-case table is the product of a run: one CSV row per candidate
//! with its validity label, header first. Next to it an optional JSON run
//! report records the configuration and coverage the table came from.

use crate::calendar::DateCandidate;
use crate::config::GaConfig;
use crate::evolution::EvolutionOutcome;
use crate::evolution::coverage::CoverageReport;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Column labels of the test-case table, in order.
pub const CSV_HEADER: [&str; 4] = ["Day", "Month", "Year", "Valid/Invalid"];

pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write output file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to encode run report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Label written in the last column of the table.
pub fn validity_label(candidate: &DateCandidate) -> &'static str {
    if candidate.is_valid() {
        "Valid"
    } else {
        "Invalid"
    }
}

/// Writes the test-case table to any writer.
pub fn write_test_cases<W: Write>(
    writer: W,
    test_cases: &[DateCandidate],
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for candidate in test_cases {
        wtr.write_record([
            candidate.day.to_string(),
            candidate.month.to_string(),
            candidate.year.to_string(),
            validity_label(candidate).to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the test-case table to `output_path`, replacing any existing file.
pub fn write_test_cases_to_csv(
    test_cases: &[DateCandidate],
    output_path: &Path,
) -> Result<(), ExportError> {
    let file = std::fs::File::create(output_path)?;
    write_test_cases(file, test_cases)
}

/// Summary of a run, stored next to the test-case table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Schema version for forward/backward compatibility
    pub schema_version: String,
    /// Unix timestamp when the report was generated
    pub generated_at: i64,
    /// Parameters the run used
    pub config: GaConfig,
    /// Generation counter at termination
    pub generations: usize,
    /// Coverage of the exported generation
    pub coverage: CoverageReport,
    /// Number of rows in the test-case table
    pub test_cases: usize,
}

impl RunReport {
    pub fn new(outcome: &EvolutionOutcome, config: &GaConfig) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION.to_string(),
            generated_at: chrono::Utc::now().timestamp(),
            config: config.clone(),
            generations: outcome.generations,
            coverage: outcome.coverage,
            test_cases: outcome.population.len(),
        }
    }
}

pub fn write_report_to_json(report: &RunReport, output_path: &Path) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(output_path, json)?;
    Ok(())
}

pub fn read_report_from_json(input_path: &Path) -> Result<RunReport, ExportError> {
    let content = std::fs::read_to_string(input_path)?;
    let report: RunReport = serde_json::from_str(&content)?;
    Ok(report)
}
