//! Error types for jobly

use thiserror::Error;

/// Result type alias for jobly operations
pub type JoblyResult<T> = Result<T, JoblyError>;

/// Error types for clause compilation and store access
#[derive(Debug, Error)]
pub enum JoblyError {
    /// A partial update carried no fields
    #[error("Partial update requires at least one field")]
    EmptyInput,

    /// A filter's minimum bound exceeds its maximum bound
    #[error("{min_key} ({min}) must not be greater than {max_key} ({max})")]
    RangeValidation {
        min_key: String,
        max_key: String,
        min: String,
        max: String,
    },

    /// A filter key outside the entity's recognized set (only under `UnknownKeys::Reject`)
    #[error("Unknown filter key: {0}")]
    UnknownFilterKey(String),

    /// A recognized filter key carried a value of the wrong shape
    #[error("Invalid value for filter '{key}': expected {expected}")]
    InvalidFilterValue { key: String, expected: &'static str },

    /// A partial update named a field that is not mutable
    #[error("Unknown or immutable field: {0}")]
    UnknownField(String),

    /// A column identifier could not be rendered safely
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Natural key already exists
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl JoblyError {
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

    /// Create an invalid filter value error
    pub fn invalid_filter_value(key: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidFilterValue {
            key: key.into(),
            expected,
        }
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a duplicate key error
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey(_))
    }

    /// Whether the caller's input caused this error.
    ///
    /// Client errors map to 4xx responses and are never logged as internal faults.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::RangeValidation { .. }
                | Self::UnknownFilterKey(_)
                | Self::InvalidFilterValue { .. }
                | Self::UnknownField(_)
                | Self::InvalidIdentifier(_)
                | Self::DuplicateKey(_)
                | Self::NotFound(_)
                | Self::ForeignKeyViolation(_)
        )
    }

    /// Parse a tokio_postgres error into a more specific JoblyError
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(db_err) = err.as_db_error() {
            let constraint = db_err.constraint().unwrap_or("unknown");
            let message = db_err.message();

            match db_err.code().code() {
                "23505" => return Self::DuplicateKey(format!("{}: {}", constraint, message)),
                "23503" => {
                    return Self::ForeignKeyViolation(format!("{}: {}", constraint, message));
                }
                _ => {}
            }
        }
        Self::Query(err)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for JoblyError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
