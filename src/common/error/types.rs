//! Unified error types for pathtint.
//!
//! Every stage of the pipeline reports through this type so that `main` can
//! print one message and exit non-zero.
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pathtint operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed or is missing required keys
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data file extension is neither `.csv` nor `.xlsx`
    #[error("Unsupported file format for {}: please use .csv or .xlsx", path.display())]
    UnsupportedDataFormat { path: PathBuf },

    /// A required column is absent from the data table header
    #[error("Column '{column}' not found in data table (available: {})", available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// A value cell holds something that is neither numeric nor a missing marker
    #[error("Invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    /// Named palette is not known
    #[error("Unknown color palette: {0}")]
    UnknownPalette(String),

    /// Explicit gradient stops are malformed
    #[error("Invalid gradient: {0}")]
    InvalidGradient(String),

    /// Invalid file format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Stream or part not found
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    XmlError(String),

    /// Invalid content type
    #[error("Invalid content type: expected {expected}, got {got}")]
    InvalidContentType { expected: String, got: String },

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// CSV reader error
    #[error("CSV error: {0}")]
    Csv(String),

    /// Image encoding or decoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type for pathtint operations.
pub type Result<T> = std::result::Result<T, Error>;
