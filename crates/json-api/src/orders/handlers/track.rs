//! Track Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
    state::State,
};

/// Track Order Handler
///
/// Returns one of the authenticated customer's orders with its current
/// sub-order statuses. Another customer's order reads as not found.
#[endpoint(
    tags("orders"),
    summary = "Track Order",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.user_uuid_or_401()?;

    let order = state
        .app
        .orders
        .track_order(customer, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
