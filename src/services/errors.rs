use thiserror::Error;

use crate::normalizer::ValidationError;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// Machine data violates a taxonomy invariant.
    #[error("{0}")]
    Validation(ValidationError),
    /// A value failed its type constraints.
    #[error("invalid data: {0}")]
    TypeConstraint(String),
    /// Submitted form data was rejected.
    #[error("{0}")]
    Form(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
