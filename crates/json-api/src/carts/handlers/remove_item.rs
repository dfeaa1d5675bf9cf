//! Remove From Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, responses::CartResponse},
    extensions::*,
    state::State,
};

/// Remove From Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RemoveFromCartRequest {
    /// The food whose line item should be removed
    pub food_id: Uuid,
}

/// Remove From Cart Handler
///
/// Removes a food's line item from the cart. Removing a food that is not in
/// the cart is a no-op.
#[endpoint(
    tags("cart"),
    summary = "Remove Item from Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    json: JsonBody<RemoveFromCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.user_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .remove_item(customer, json.into_inner().food_id.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tiffin_app::domain::carts::{CartsServiceError, MockCartsService, models::ResolvedCart};

    use crate::test_helpers::{TEST_USER_UUID, authed_service, state_with_carts};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        authed_service(
            state_with_carts(carts),
            Router::with_path("cart/removeFromCart").post(handler),
        )
    }

    #[tokio::test]
    async fn test_remove_item_returns_updated_cart() -> TestResult {
        let food = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .withf(move |customer, f| *customer == TEST_USER_UUID && *f == food.into())
            .return_once(|customer, _| {
                Ok(ResolvedCart {
                    customer_uuid: customer,
                    items: Vec::new(),
                    subtotal: 0,
                })
            });

        carts.expect_get_cart().never();
        carts.expect_add_item().never();

        let mut res = TestClient::post("http://example.com/cart/removeFromCart")
            .json(&serde_json::json!({ "foodId": food }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let cart: CartResponse = res.take_json().await?;

        assert!(cart.items.is_empty(), "expected the line item gone");

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_without_a_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        carts.expect_get_cart().never();
        carts.expect_add_item().never();

        let res = TestClient::post("http://example.com/cart/removeFromCart")
            .json(&serde_json::json!({ "foodId": Uuid::now_v7() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
