//! Checkout Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};

use tiffin_app::domain::orders::models::{Checkout, PaymentMethod};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, responses::OrderResponse},
    state::State,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckoutRequest {
    /// Where to deliver the order
    pub delivery_address: String,

    /// "cash" (the default) or "card"
    pub payment_method: Option<String>,
}

/// Checkout Handler
///
/// Turns the authenticated customer's cart into an order with one sub-order
/// per restaurant, then empties the cart.
#[endpoint(
    tags("cart"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or missing address"),
        (status_code = StatusCode::CONFLICT, description = "Concurrent cart update"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.user_uuid_or_401()?;

    let request = json.into_inner();

    let payment_method = request
        .payment_method
        .as_deref()
        .map(str::parse::<PaymentMethod>)
        .transpose()
        .map_err(|source| StatusError::bad_request().brief(source.to_string()))?;

    let order = state
        .app
        .orders
        .checkout(
            customer,
            Checkout {
                delivery_address: request.delivery_address,
                payment_method,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/trackOrder/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
