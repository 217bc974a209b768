//! Report writer errors.

use thiserror::Error;

/// Failure while writing a run report.  Never fatal to the run itself.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("report I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("report CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;
