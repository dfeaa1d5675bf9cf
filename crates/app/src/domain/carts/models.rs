//! Cart Models

use jiff::Timestamp;

use crate::domain::{
    accounts::models::UserUuid,
    catalog::models::{Food, FoodUuid},
};

/// Cart Model
///
/// A customer owns at most one cart. `version` backs the optimistic
/// concurrency check in the repository so two simultaneous mutations of the
/// same cart cannot silently lose an update.
#[derive(Debug, Clone)]
pub struct Cart {
    pub customer_uuid: UserUuid,
    pub items: Vec<LineItem>,
    pub version: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Cart {
    /// An empty, never-persisted cart for the given customer.
    #[must_use]
    pub fn empty(customer_uuid: UserUuid) -> Self {
        let now = Timestamp::now();

        Self {
            customer_uuid,
            items: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A (food, quantity, request) tuple inside a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub food_uuid: FoodUuid,
    pub quantity: u32,
    pub request: Option<String>,
}

/// Input for adding a line item to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLineItem {
    pub food_uuid: FoodUuid,
    pub quantity: u32,
    pub request: Option<String>,
}

/// A cart with food references resolved against the current catalog.
#[derive(Debug, Clone)]
pub struct ResolvedCart {
    pub customer_uuid: UserUuid,
    pub items: Vec<ResolvedLineItem>,
    pub subtotal: u64,
}

/// A line item joined with its current catalog entry.
#[derive(Debug, Clone)]
pub struct ResolvedLineItem {
    pub food: Food,
    pub quantity: u32,
    pub request: Option<String>,
}

impl ResolvedLineItem {
    /// Price of this line at current catalog prices.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.food.price * u64::from(self.quantity)
    }
}
