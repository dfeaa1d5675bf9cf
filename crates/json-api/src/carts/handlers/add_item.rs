//! Add To Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tiffin_app::domain::carts::models::NewLineItem;

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Add To Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddToCartRequest {
    /// The food to add
    pub food_id: Uuid,

    /// How many units to add
    pub quantity: u32,

    /// Optional special request ("no onions")
    pub request: Option<String>,
}

impl From<AddToCartRequest> for NewLineItem {
    fn from(request: AddToCartRequest) -> Self {
        NewLineItem {
            food_uuid: request.food_id.into(),
            quantity: request.quantity,
            request: request.request,
        }
    }
}

/// Add To Cart Handler
///
/// Adds a food to the authenticated customer's cart, creating the cart on
/// first use. Adding a food already in the cart accumulates its quantity.
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity"),
        (status_code = StatusCode::NOT_FOUND, description = "Food not found"),
        (status_code = StatusCode::CONFLICT, description = "Concurrent cart update"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.user_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .add_item(customer, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use tiffin_app::domain::carts::{CartsServiceError, MockCartsService};

    use crate::test_helpers::{TEST_USER_UUID, authed_service, make_resolved_cart, state_with_carts};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        authed_service(
            state_with_carts(carts),
            Router::with_path("cart/addToCart").post(handler),
        )
    }

    #[tokio::test]
    async fn test_add_item_returns_updated_cart() -> TestResult {
        let food = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .withf(move |customer, item| {
                *customer == TEST_USER_UUID
                    && item.food_uuid == food.into()
                    && item.quantity == 2
                    && item.request.as_deref() == Some("extra chutney")
            })
            .return_once(|customer, _| Ok(make_resolved_cart(customer)));

        carts.expect_get_cart().never();
        carts.expect_remove_item().never();

        let res = TestClient::post("http://example.com/cart/addToCart")
            .json(&serde_json::json!({
                "foodId": food,
                "quantity": 2,
                "request": "extra chutney",
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_food_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::FoodNotFound));

        carts.expect_get_cart().never();
        carts.expect_remove_item().never();

        let res = TestClient::post("http://example.com/cart/addToCart")
            .json(&serde_json::json!({ "foodId": Uuid::now_v7(), "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_zero_quantity_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidQuantity));

        carts.expect_get_cart().never();
        carts.expect_remove_item().never();

        let res = TestClient::post("http://example.com/cart/addToCart")
            .json(&serde_json::json!({ "foodId": Uuid::now_v7(), "quantity": 0 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_update_returns_409() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::Conflict));

        carts.expect_get_cart().never();
        carts.expect_remove_item().never();

        let res = TestClient::post("http://example.com/cart/addToCart")
            .json(&serde_json::json!({ "foodId": Uuid::now_v7(), "quantity": 1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
