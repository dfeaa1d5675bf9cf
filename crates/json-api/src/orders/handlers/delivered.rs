//! Mark Delivered Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
    state::State,
};

/// Mark Delivered Handler
///
/// Customer confirmation that the whole order arrived: every sub-order is
/// forced to `delivered` and the order to `completed`, regardless of where
/// the restaurants left their statuses.
#[endpoint(
    tags("orders"),
    summary = "Mark Order Delivered",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order completed"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the order's customer"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
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
        .mark_delivered(customer, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
