//! Accounts service errors.

use thiserror::Error;

use crate::database::StorageError;

#[derive(Debug, Error)]
pub enum AccountsServiceError {
    #[error("user not found")]
    NotFound,

    #[error("user already exists")]
    AlreadyExists,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for AccountsServiceError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound => Self::NotFound,
            StorageError::AlreadyExists => Self::AlreadyExists,
            other => Self::Storage(other),
        }
    }
}
