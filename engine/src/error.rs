//! Engine error taxonomy and the validation report.

use std::io::Write;

use thiserror::Error;

/// Structured report for a failed changelog validation.
///
/// Rendered descriptively — one line per failing changeset — instead of
/// being collapsed into a generic failure message.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Human-readable description of each failing changeset.
    pub failures: Vec<String>,
}

impl ValidationReport {
    /// Writes the descriptive rendering to `out`.
    pub fn write_descriptive(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            out,
            "Validation failed: {} change set(s) have problems",
            self.failures.len()
        )?;
        for failure in &self.failures {
            writeln!(out, "  {failure}")?;
        }
        Ok(())
    }
}

/// Errors reported by an engine implementation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The database connection could not be established.
    #[error("could not open database connection: {0}")]
    Connect(String),

    /// An operation failed while executing against the database.
    #[error("{0}")]
    Execution(String),

    /// Changelog validation found problems; carries the full report.
    #[error("changelog validation failed")]
    ValidationFailed(ValidationReport),

    /// I/O failure while writing SQL or report output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results with [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;
