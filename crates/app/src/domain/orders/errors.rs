//! Orders service errors.

use thiserror::Error;

use crate::{database::StorageError, domain::orders::status::SubOrderStatus};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("delivery address must not be empty")]
    MissingDeliveryAddress,

    #[error("cart is empty")]
    EmptyCart,

    #[error("no cart item could be resolved against the catalog")]
    NoValidItems,

    #[error("order not found")]
    NotFound,

    #[error("sub-order not found")]
    SubOrderNotFound,

    #[error("actor may not modify this order")]
    Forbidden,

    #[error("illegal transition from {from} to {to}")]
    IllegalTransition {
        from: SubOrderStatus,
        to: SubOrderStatus,
    },

    #[error("order was modified concurrently")]
    Conflict,

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for OrdersServiceError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound => Self::NotFound,
            StorageError::Conflict => Self::Conflict,
            other => Self::Storage(other),
        }
    }
}
