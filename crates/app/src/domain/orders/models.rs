//! Order Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{
    domain::{
        accounts::models::UserUuid,
        catalog::models::{FoodUuid, RestaurantUuid},
        orders::status::{OverallStatus, SubOrderStatus},
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Sub-order UUID
pub type SubOrderUuid = TypedUuid<SubOrder>;

/// How the customer pays on delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
}

impl PaymentMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognised payment method.
#[derive(Debug, thiserror::Error)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

/// Order Model
///
/// Created at checkout and immutable afterwards except for status
/// transitions. `overall_status` is always the derivation over the
/// sub-order statuses (or `completed` via the customer shortcut).
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: OrderUuid,
    pub customer_uuid: UserUuid,
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
    pub total_price: u64,
    pub overall_status: OverallStatus,
    pub sub_orders: Vec<SubOrder>,
    pub version: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    /// Find a sub-order by id.
    #[must_use]
    pub fn sub_order(&self, uuid: SubOrderUuid) -> Option<&SubOrder> {
        self.sub_orders.iter().find(|sub| sub.uuid == uuid)
    }

    /// Find a sub-order by id, mutably.
    pub fn sub_order_mut(&mut self, uuid: SubOrderUuid) -> Option<&mut SubOrder> {
        self.sub_orders.iter_mut().find(|sub| sub.uuid == uuid)
    }
}

/// The portion of an order belonging to a single restaurant.
#[derive(Debug, Clone)]
pub struct SubOrder {
    pub uuid: SubOrderUuid,
    pub restaurant_uuid: RestaurantUuid,
    pub restaurant_name: String,
    pub status: SubOrderStatus,
    pub subtotal: u64,
    pub items: Vec<PurchasedItem>,
}

/// A purchase-time copy of a cart line item: name and unit price are
/// captured by value, so later catalog edits never reprice an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchasedItem {
    pub food_uuid: FoodUuid,
    pub name: String,
    pub unit_price: u64,
    pub quantity: u32,
    pub request: Option<String>,
}

impl PurchasedItem {
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.unit_price * u64::from(self.quantity)
    }
}

/// Checkout input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    pub delivery_address: String,
    pub payment_method: Option<PaymentMethod>,
}
