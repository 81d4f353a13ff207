use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Table not found: {0}")]
    TableNotFound(String),
    #[error("Request throttled: {0}")]
    Throttled(String),
    #[error("Access denied: {0}")]
    AccessDenied(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Conditional check failed: {0}")]
    ConditionFailed(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Operation failed: {0}")]
    OperationFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
