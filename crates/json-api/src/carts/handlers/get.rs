//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the authenticated customer's cart, or 404 when no cart has been
/// created yet.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.user_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(customer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
