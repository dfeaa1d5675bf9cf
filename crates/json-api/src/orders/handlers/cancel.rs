//! Cancel Sub-Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
    state::State,
};

/// Cancel Sub-Order Handler
///
/// Cancels one of the authenticated customer's sub-orders. Only possible
/// while the sub-order is pending or confirmed.
#[endpoint(
    tags("orders"),
    summary = "Cancel Sub-Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Sub-order cancelled"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the order's customer"),
        (status_code = StatusCode::NOT_FOUND, description = "Order or sub-order not found"),
        (status_code = StatusCode::CONFLICT, description = "Cooking already started"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    sub_order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.user_uuid_or_401()?;

    let order = state
        .app
        .orders
        .cancel_sub_order(
            customer,
            order.into_inner().into(),
            sub_order.into_inner().into(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
