//! Advance Sub-Order Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tiffin_app::domain::orders::SubOrderStatus;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
    state::State,
};

/// Update Sub-Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusRequest {
    /// The target status (must be the single next step in the chain)
    pub status: String,
}

/// Advance Sub-Order Handler
///
/// Moves a sub-order one step along its lifecycle. Restricted to the owner
/// of the sub-order's restaurant; cancellation goes through its own route.
#[endpoint(
    tags("orders"),
    summary = "Update Sub-Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status name"),
        (status_code = StatusCode::FORBIDDEN, description = "Not the restaurant owner"),
        (status_code = StatusCode::NOT_FOUND, description = "Order or sub-order not found"),
        (status_code = StatusCode::CONFLICT, description = "Illegal transition or concurrent update"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    sub_order: PathParam<Uuid>,
    json: JsonBody<UpdateStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let actor = depot.user_uuid_or_401()?;

    let to = json
        .into_inner()
        .status
        .parse::<SubOrderStatus>()
        .map_err(|source| StatusError::bad_request().brief(source.to_string()))?;

    let order = state
        .app
        .orders
        .advance_sub_order(
            actor,
            order.into_inner().into(),
            sub_order.into_inner().into(),
            to,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
