//! Catalog Models

use jiff::Timestamp;

use crate::{domain::accounts::models::UserUuid, uuids::TypedUuid};

/// Restaurant UUID
pub type RestaurantUuid = TypedUuid<Restaurant>;

/// Restaurant Model
#[derive(Debug, Clone)]
pub struct Restaurant {
    pub uuid: RestaurantUuid,
    pub name: String,
    pub owner_uuid: UserUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Restaurant Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewRestaurant {
    pub uuid: RestaurantUuid,
    pub name: String,
    pub owner_uuid: UserUuid,
}

/// Food UUID
pub type FoodUuid = TypedUuid<Food>;

/// Food Model
///
/// Prices are integer minor units (pence/cents).
#[derive(Debug, Clone)]
pub struct Food {
    pub uuid: FoodUuid,
    pub name: String,
    pub price: u64,
    pub category: String,
    pub restaurant_uuid: RestaurantUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Food Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewFood {
    pub uuid: FoodUuid,
    pub name: String,
    pub price: u64,
    pub category: String,
    pub restaurant_uuid: RestaurantUuid,
}
