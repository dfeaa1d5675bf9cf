//! Errors

use salvo::http::StatusError;
use tracing::error;

use tiffin_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::MissingDeliveryAddress => {
            StatusError::bad_request().brief("Delivery address must not be empty")
        }
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        OrdersServiceError::NoValidItems => {
            StatusError::bad_request().brief("No cart item is still on the menu")
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::SubOrderNotFound => {
            StatusError::not_found().brief("Sub-order not found")
        }
        OrdersServiceError::Forbidden => {
            StatusError::forbidden().brief("Not allowed to modify this order")
        }
        OrdersServiceError::IllegalTransition { from, to } => {
            StatusError::conflict().brief(format!("Illegal transition from {from} to {to}"))
        }
        OrdersServiceError::Conflict => {
            StatusError::conflict().brief("Order was modified concurrently, retry")
        }
        OrdersServiceError::Storage(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
