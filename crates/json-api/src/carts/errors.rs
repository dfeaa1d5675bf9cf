//! Errors

use salvo::http::StatusError;
use tracing::error;

use tiffin_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart not found"),
        CartsServiceError::FoodNotFound => StatusError::not_found().brief("Food not found"),
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be a positive integer")
        }
        CartsServiceError::Conflict => {
            StatusError::conflict().brief("Cart was modified concurrently, retry")
        }
        CartsServiceError::Storage(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
