//! List Foods Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tiffin_app::domain::catalog::models::Food;

use crate::{extensions::*, foods::errors::into_status_error, state::State};

/// Food Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FoodResponse {
    /// The unique identifier of the food
    pub uuid: Uuid,

    /// Menu name
    pub name: String,

    /// Menu price, in minor units
    pub price: u64,

    /// Menu category ("mains", "sides", ...)
    pub category: String,

    /// The restaurant serving this food
    pub restaurant_uuid: Uuid,
}

impl From<Food> for FoodResponse {
    fn from(food: Food) -> Self {
        Self {
            uuid: food.uuid.into(),
            name: food.name,
            price: food.price,
            category: food.category,
            restaurant_uuid: food.restaurant_uuid.into(),
        }
    }
}

/// List Foods Handler
///
/// Returns the full menu across all restaurants. Public, so customers can
/// browse before signing in.
#[endpoint(tags("foods"), summary = "List Foods")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<FoodResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let foods = state
        .app
        .catalog
        .list_foods()
        .await
        .map_err(into_status_error)?;

    Ok(Json(foods.into_iter().map(FoodResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use tiffin_app::domain::catalog::MockCatalogService;

    use crate::test_helpers::{make_food, public_service, state_with_catalog};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        public_service(
            state_with_catalog(catalog),
            Router::with_path("foods").get(handler),
        )
    }

    #[tokio::test]
    async fn test_index_lists_the_menu() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_foods()
            .once()
            .return_once(|| Ok(vec![make_food("Dosa", 6_00), make_food("Idli", 3_00)]));

        let mut res = TestClient::get("http://example.com/foods")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<FoodResponse> = res.take_json().await?;

        assert_eq!(body.len(), 2);
        assert_eq!(body[0].name, "Dosa");
        assert_eq!(body[0].price, 6_00);

        Ok(())
    }
}
