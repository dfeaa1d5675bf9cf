//! Catalog service errors.

use thiserror::Error;

use crate::database::StorageError;

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("food not found")]
    FoodNotFound,

    #[error("restaurant not found")]
    RestaurantNotFound,

    #[error("record already exists")]
    AlreadyExists,

    #[error("actor does not own this restaurant")]
    Forbidden,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for CatalogServiceError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::AlreadyExists => Self::AlreadyExists,
            other => Self::Storage(other),
        }
    }
}
