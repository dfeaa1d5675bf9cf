//! Cart response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tiffin_app::domain::carts::models::{ResolvedCart, ResolvedLineItem};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartResponse {
    /// The cart's line items, resolved against the current menu
    pub items: Vec<CartLineResponse>,

    /// Sum of the line totals at current menu prices
    pub subtotal: u64,
}

impl From<ResolvedCart> for CartResponse {
    fn from(cart: ResolvedCart) -> Self {
        Self {
            items: cart.items.into_iter().map(CartLineResponse::from).collect(),
            subtotal: cart.subtotal,
        }
    }
}

/// Cart Line Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartLineResponse {
    /// The unique identifier of the food
    pub food_uuid: Uuid,

    /// Current menu name of the food
    pub name: String,

    /// Current menu price of the food, in minor units
    pub unit_price: u64,

    /// How many units are in the cart
    pub quantity: u32,

    /// Special request attached to this line, if any
    pub request: Option<String>,

    /// `unit_price * quantity`
    pub line_total: u64,
}

impl From<ResolvedLineItem> for CartLineResponse {
    fn from(item: ResolvedLineItem) -> Self {
        let line_total = item.line_total();

        Self {
            food_uuid: item.food.uuid.into(),
            name: item.food.name,
            unit_price: item.food.price,
            quantity: item.quantity,
            request: item.request,
            line_total,
        }
    }
}
