use thiserror::Error;

/// Errors raised by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The targeted record does not exist.
    #[error("record not found")]
    NotFound,
    /// A stored value could not be turned into a domain value.
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
