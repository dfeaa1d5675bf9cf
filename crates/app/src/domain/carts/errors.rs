//! Carts service errors.

use thiserror::Error;

use crate::database::StorageError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart not found")]
    NotFound,

    #[error("food not found")]
    FoodNotFound,

    #[error("quantity must be a positive integer")]
    InvalidQuantity,

    #[error("cart was modified concurrently")]
    Conflict,

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for CartsServiceError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound => Self::NotFound,
            StorageError::Conflict => Self::Conflict,
            other => Self::Storage(other),
        }
    }
}
