//! Get Food Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    foods::{errors::into_status_error, handlers::index::FoodResponse},
    state::State,
};

/// Get Food Handler
///
/// Returns a single menu item.
#[endpoint(tags("foods"), summary = "Get Food")]
pub(crate) async fn handler(
    food: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<FoodResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let food = state
        .app
        .catalog
        .get_food(food.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(food.into()))
}
