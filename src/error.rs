//! Error types for the car pipeline.

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while loading, filtering or rendering cars.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Failed to open or read an input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// The markup document is not well-formed XML
    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// JSON rendering error
    #[error("JSON rendering error: {0}")]
    Json(#[from] serde_json::Error),

    /// A source row or element could not be turned into a valid car
    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord { line: u64, message: String },

    /// A filter parameter that should be a number or a date failed to parse
    #[error("Invalid filter input for {field}: {message}")]
    InvalidFilterInput { field: &'static str, message: String },
}

impl PipelineError {
    pub(crate) fn malformed(line: u64, message: impl Into<String>) -> Self {
        PipelineError::MalformedRecord {
            line,
            message: message.into(),
        }
    }
}

/// Invariant violations caught by the [`Car`](crate::Car) constructors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("brand must not be empty")]
    EmptyBrand,

    #[error("at least one price is required")]
    NoPrices,

    #[error("currency code must not be empty")]
    EmptyCurrency,

    #[error("price in {currency} must not be negative")]
    NegativePrice { currency: String },

    #[error("preferred currency {0} has no price")]
    UnknownPreferredCurrency(String),
}
