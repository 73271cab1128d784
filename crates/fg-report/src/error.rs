//! Error types for report emission.

use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while emitting a report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// IO error while writing the report to disk.
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
