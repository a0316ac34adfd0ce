//! Error types for quizdb

use crate::patch::{BuildError, FieldError};
use thiserror::Error;

/// Result type alias for quizdb operations
pub type QuizResult<T> = Result<T, QuizError>;

/// Error types for quiz storage operations
#[derive(Debug, Error)]
pub enum QuizError {
    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Row not found
    #[error("{0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Check or not-null constraint violation
    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Invalid identifier or schema declaration
    #[error("Validation error: {0}")]
    Validation(String),

    /// A field in a partial update document failed its converter
    #[error(transparent)]
    InvalidField(#[from] FieldError),

    /// A partial update document matched none of the updatable fields
    #[error("no fields to update")]
    NothingToUpdate,

    /// A request body could not be decoded
    #[error("{0}")]
    InvalidDocument(String),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    /// Migration error
    #[cfg(feature = "migrate")]
    #[error("Migration error: {0}")]
    Migration(String),
}

impl QuizError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether the error was caused by the client's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// HTTP status code a request handler should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidField(_) | Self::NothingToUpdate | Self::InvalidDocument(_) => 400,
            Self::CheckViolation(_) => 400,
            Self::NotFound(_) => 404,
            Self::UniqueViolation(_) => 409,
            _ => 500,
        }
    }

    /// Parse a tokio_postgres error into a more specific QuizError
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            let constraint = db_err.constraint().unwrap_or("unknown");
            let message = db_err.message();

            match db_err.code().code() {
                "23505" => return Self::UniqueViolation(format!("{constraint}: {message}")),
                // not_null_violation and check_violation both come from bad input.
                "23502" | "23514" => {
                    return Self::CheckViolation(format!("{constraint}: {message}"));
                }
                _ => {}
            }
        }
        Self::Query(err)
    }
}

impl From<BuildError> for QuizError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::Field(e) => Self::InvalidField(e),
            // Start index is chosen by code, never by the request body.
            other @ BuildError::PlaceholderOutOfRange { .. } => Self::Validation(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidDocument(err.to_string())
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for QuizError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}

#[cfg(feature = "migrate")]
impl From<refinery::Error> for QuizError {
    fn from(err: refinery::Error) -> Self {
        Self::Migration(err.to_string())
    }
}
