use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Not available: {0}")]
    NotAvailable(String),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),
    #[error("Connection pool error: {0}")]
    ConnectionPoolError(#[from] diesel::r2d2::PoolError),
}

impl From<crate::services::order_flow::TransitionError> for RepositoryError {
    fn from(e: crate::services::order_flow::TransitionError) -> Self {
        RepositoryError::InvalidTransition(e.to_string())
    }
}
