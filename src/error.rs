use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

#[derive(Error, Debug)]
pub enum ReportError {
    /// Input CSV does not exist
    #[error("input file not found (path={0})")]
    MissingFile(PathBuf),

    /// Expected column absent from the CSV header
    #[error("missing column in CSV header (path={path}, column={column})")]
    MissingColumn { path: PathBuf, column: String },

    /// A cell could not be parsed as the column's type
    #[error("invalid value in CSV (path={path}, row={row}, column={column}, value={value})")]
    InvalidValue {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    /// No measurements to compute a baseline from
    #[error("measurement sequence is empty")]
    EmptyMeasurements,

    /// Speed-up would divide by a zero elapsed time
    #[error("elapsed time is zero (position={position}, processors={processors})")]
    ZeroElapsedTime { position: usize, processors: u32 },

    /// Speed-up overflowed, e.g. an elapsed time close to zero
    #[error("speed-up is not finite (position={position}, processors={processors})")]
    NonFiniteSpeedUp { position: usize, processors: u32 },

    /// Unrecognised menu token
    #[error("invalid selection (token={0})")]
    InvalidSelection(String),

    /// Malformed plot table
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error raised by the plotting backend
    #[error("error rendering chart: {0}")]
    Render(String),
}
