//! Order response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tiffin_app::domain::orders::models::{Order, PurchasedItem, SubOrder};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// Where the order is delivered
    pub delivery_address: String,

    /// How the customer pays on delivery
    pub payment_method: String,

    /// Sum of the sub-order subtotals, in minor units
    pub total_price: u64,

    /// Derived order-level status
    pub overall_status: String,

    /// One sub-order per restaurant
    pub sub_orders: Vec<SubOrderResponse>,

    /// The date and time the order was placed
    pub created_at: String,

    /// The date and time the order was last updated
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into(),
            delivery_address: order.delivery_address,
            payment_method: order.payment_method.to_string(),
            total_price: order.total_price,
            overall_status: order.overall_status.to_string(),
            sub_orders: order
                .sub_orders
                .into_iter()
                .map(SubOrderResponse::from)
                .collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Sub-Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubOrderResponse {
    /// The unique identifier of the sub-order
    pub uuid: Uuid,

    /// The restaurant fulfilling this sub-order
    pub restaurant_uuid: Uuid,

    /// Restaurant name captured at purchase time
    pub restaurant_name: String,

    /// Lifecycle status of this sub-order
    pub status: String,

    /// Sum of the item line totals, in minor units
    pub subtotal: u64,

    /// Purchase-time item copies
    pub items: Vec<PurchasedItemResponse>,
}

impl From<SubOrder> for SubOrderResponse {
    fn from(sub: SubOrder) -> Self {
        Self {
            uuid: sub.uuid.into(),
            restaurant_uuid: sub.restaurant_uuid.into(),
            restaurant_name: sub.restaurant_name,
            status: sub.status.to_string(),
            subtotal: sub.subtotal,
            items: sub
                .items
                .into_iter()
                .map(PurchasedItemResponse::from)
                .collect(),
        }
    }
}

/// Purchased Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PurchasedItemResponse {
    /// The food this line was purchased from
    pub food_uuid: Uuid,

    /// Name captured at purchase time
    pub name: String,

    /// Unit price captured at purchase time, in minor units
    pub unit_price: u64,

    /// How many units were purchased
    pub quantity: u32,

    /// Special request attached to this line, if any
    pub request: Option<String>,
}

impl From<PurchasedItem> for PurchasedItemResponse {
    fn from(item: PurchasedItem) -> Self {
        Self {
            food_uuid: item.food_uuid.into(),
            name: item.name,
            unit_price: item.unit_price,
            quantity: item.quantity,
            request: item.request,
        }
    }
}
