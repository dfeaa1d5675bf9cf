//! Auth service errors.

use thiserror::Error;

use crate::{auth::ApiTokenError, database::StorageError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("token not found")]
    NotFound,

    #[error("token processing error")]
    Token(#[source] ApiTokenError),

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for AuthServiceError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

impl From<ApiTokenError> for AuthServiceError {
    fn from(error: ApiTokenError) -> Self {
        Self::Token(error)
    }
}
