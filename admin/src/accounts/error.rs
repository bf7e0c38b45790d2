//! Account Administration Error Types

/// Failure raised by a persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Raised by the in-memory store when a failure has been armed.
    /// Test-only; `PgAccountStore` never produces it.
    #[doc(hidden)]
    #[error("Injected store failure: {0}")]
    Injected(String),
}

/// Why a user deletion did not happen.
#[derive(Debug, thiserror::Error)]
pub enum DeleteUserError {
    #[error("Username must not be empty")]
    InvalidUsername,

    #[error("User with username \"{0}\" does not exist.")]
    NotFound(String),

    #[error("Failed to read confirmation: {0}")]
    Prompt(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<sqlx::Error> for DeleteUserError {
    fn from(e: sqlx::Error) -> Self {
        Self::Store(StoreError::Database(e))
    }
}
