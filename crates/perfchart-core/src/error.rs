use thiserror::Error;

/// Validation and contract errors exposed by `perfchart-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid timeframe '{value}', expected one of 1M, 6M, 1Y, ALL")]
    InvalidTimeframe { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be positive")]
    NonPositiveValue { field: &'static str },

    #[error("date must be a calendar date (YYYY-MM-DD): '{value}'")]
    InvalidDate { value: String },

    #[error("backend url must be an absolute http(s) url: '{value}'")]
    InvalidBackendUrl { value: String },
    #[error("request timeout must be greater than zero milliseconds: '{value}'")]
    InvalidTimeout { value: String },
}
