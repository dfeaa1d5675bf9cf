//! Errors

use salvo::http::StatusError;
use tracing::error;

use tiffin_app::domain::catalog::CatalogServiceError;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::FoodNotFound => StatusError::not_found().brief("Food not found"),
        CatalogServiceError::RestaurantNotFound => {
            StatusError::not_found().brief("Restaurant not found")
        }
        CatalogServiceError::AlreadyExists => StatusError::conflict().brief("Already exists"),
        CatalogServiceError::Forbidden => StatusError::forbidden(),
        CatalogServiceError::InvalidData => StatusError::bad_request().brief("Invalid data"),
        CatalogServiceError::Storage(source) => {
            error!("catalog storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
