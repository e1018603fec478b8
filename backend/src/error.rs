//! Error types for the DataDash backend.
//!
//! - [`CsvError`] - CSV decoding and parsing errors
//! - [`LoadError`] - Dataset loading errors (degrade to an empty table)
//! - [`QueryError`] - Query parameter errors, mapped to HTTP status codes
//! - [`ConfigError`] - Environment configuration errors
//! - [`ServerError`] - Top-level server startup errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use axum::http::StatusCode;
use thiserror::Error;

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors during CSV parsing.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid CSV format.
    #[error("Line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Delimiter cannot be used by the CSV reader.
    #[error("Unsupported delimiter '{0}'")]
    UnsupportedDelimiter(char),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

// =============================================================================
// Loading Errors
// =============================================================================

/// Errors while turning a CSV file into a listings table.
#[derive(Debug, Error)]
pub enum LoadError {
    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// A column the listings table cannot be built without.
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors returned by the query layer.
#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    /// A required parameter was absent or empty.
    #[error("{0}")]
    MissingParameter(String),

    /// A parameter could not be parsed.
    #[error("Invalid value for '{name}': '{value}' is not a number")]
    InvalidParameter { name: String, value: String },

    /// The query string itself could not be decoded.
    #[error("Invalid query string: {0}")]
    MalformedQuery(String),

    /// Anything else.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl QueryError {
    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            QueryError::MissingParameter(_)
            | QueryError::InvalidParameter { .. }
            | QueryError::MalformedQuery(_) => StatusCode::BAD_REQUEST,
            QueryError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors reading configuration from the environment.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// PORT is set but not a valid port number.
    #[error("Invalid PORT value '{0}'")]
    InvalidPort(String),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Binding or serving failed.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let csv_err = CsvError::EmptyFile;
        let load_err: LoadError = csv_err.into();
        assert!(load_err.to_string().contains("empty"));

        let config_err = ConfigError::InvalidPort("abc".into());
        let server_err: ServerError = config_err.into();
        assert!(server_err.to_string().contains("abc"));
    }

    #[test]
    fn test_query_error_status() {
        let missing = QueryError::MissingParameter("Both domains are required for comparison".into());
        assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.to_string(), "Both domains are required for comparison");

        let invalid = QueryError::InvalidParameter {
            name: "min_salary".into(),
            value: "lots".into(),
        };
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
        let msg = invalid.to_string();
        assert!(msg.contains("min_salary"));
        assert!(msg.contains("lots"));

        let malformed = QueryError::MalformedQuery("bad escape".into());
        assert_eq!(malformed.status_code(), StatusCode::BAD_REQUEST);

        let unexpected = QueryError::Unexpected("boom".into());
        assert_eq!(unexpected.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
