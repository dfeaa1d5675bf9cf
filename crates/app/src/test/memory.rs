//! In-memory repository fakes.
//!
//! These mirror the Postgres repositories' observable behavior, version
//! checks included, so service tests run without a database.

use std::{
    collections::HashMap,
    sync::Mutex,
};

use async_trait::async_trait;
use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    auth::{
        ActiveApiToken, ApiTokenMetadata, AuthRepository, NewApiToken,
    },
    database::StorageError,
    domain::{
        accounts::{
            models::{NewUser, User, UserUuid},
            repository::AccountsRepository,
        },
        carts::{models::Cart, repository::CartsRepository},
        catalog::{
            models::{Food, FoodUuid, NewFood, NewRestaurant, Restaurant, RestaurantUuid},
            repository::CatalogRepository,
        },
        orders::{
            models::{Order, OrderUuid},
            repository::OrdersRepository,
        },
    },
};

#[derive(Default)]
pub(crate) struct MemoryCatalogRepository {
    pub foods: Mutex<HashMap<FoodUuid, Food>>,
    pub restaurants: Mutex<HashMap<RestaurantUuid, Restaurant>>,
}

#[async_trait]
impl CatalogRepository for MemoryCatalogRepository {
    async fn get_food(&self, food: FoodUuid) -> Result<Food, StorageError> {
        self.foods
            .lock()
            .expect("lock poisoned")
            .get(&food)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn list_foods(&self) -> Result<Vec<Food>, StorageError> {
        let mut foods: Vec<Food> = self
            .foods
            .lock()
            .expect("lock poisoned")
            .values()
            .cloned()
            .collect();

        foods.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(foods)
    }

    async fn create_food(&self, food: NewFood) -> Result<Food, StorageError> {
        let mut foods = self.foods.lock().expect("lock poisoned");

        if foods.contains_key(&food.uuid) {
            return Err(StorageError::AlreadyExists);
        }

        let now = Timestamp::now();
        let created = Food {
            uuid: food.uuid,
            name: food.name,
            price: food.price,
            category: food.category,
            restaurant_uuid: food.restaurant_uuid,
            created_at: now,
            updated_at: now,
        };

        foods.insert(created.uuid, created.clone());

        Ok(created)
    }

    async fn get_restaurant(&self, restaurant: RestaurantUuid) -> Result<Restaurant, StorageError> {
        self.restaurants
            .lock()
            .expect("lock poisoned")
            .get(&restaurant)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, StorageError> {
        let mut restaurants: Vec<Restaurant> = self
            .restaurants
            .lock()
            .expect("lock poisoned")
            .values()
            .cloned()
            .collect();

        restaurants.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(restaurants)
    }

    async fn create_restaurant(
        &self,
        restaurant: NewRestaurant,
    ) -> Result<Restaurant, StorageError> {
        let mut restaurants = self.restaurants.lock().expect("lock poisoned");

        if restaurants.contains_key(&restaurant.uuid) {
            return Err(StorageError::AlreadyExists);
        }

        let now = Timestamp::now();
        let created = Restaurant {
            uuid: restaurant.uuid,
            name: restaurant.name,
            owner_uuid: restaurant.owner_uuid,
            created_at: now,
            updated_at: now,
        };

        restaurants.insert(created.uuid, created.clone());

        Ok(created)
    }
}

#[derive(Default)]
pub(crate) struct MemoryAccountsRepository {
    pub users: Mutex<HashMap<UserUuid, User>>,
}

#[async_trait]
impl AccountsRepository for MemoryAccountsRepository {
    async fn get_user(&self, user: UserUuid) -> Result<User, StorageError> {
        self.users
            .lock()
            .expect("lock poisoned")
            .get(&user)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let mut users = self.users.lock().expect("lock poisoned");

        if users.contains_key(&user.uuid) {
            return Err(StorageError::AlreadyExists);
        }

        let now = Timestamp::now();
        let created = User {
            uuid: user.uuid,
            name: user.name,
            role: user.role,
            order_history: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        users.insert(created.uuid, created.clone());

        Ok(created)
    }

    async fn append_order(&self, user: UserUuid, order: OrderUuid) -> Result<(), StorageError> {
        let mut users = self.users.lock().expect("lock poisoned");

        let user = users.get_mut(&user).ok_or(StorageError::NotFound)?;
        user.order_history.push(order);

        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct MemoryCartsRepository {
    pub carts: Mutex<HashMap<UserUuid, Cart>>,
}

#[async_trait]
impl CartsRepository for MemoryCartsRepository {
    async fn get_cart(&self, customer: UserUuid) -> Result<Cart, StorageError> {
        self.carts
            .lock()
            .expect("lock poisoned")
            .get(&customer)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn save_cart(&self, cart: &Cart) -> Result<Cart, StorageError> {
        let mut carts = self.carts.lock().expect("lock poisoned");

        let stored_version = carts.get(&cart.customer_uuid).map_or(0, |c| c.version);

        if stored_version != cart.version {
            return Err(StorageError::Conflict);
        }

        let mut saved = cart.clone();
        saved.version = stored_version + 1;
        saved.updated_at = Timestamp::now();

        carts.insert(saved.customer_uuid, saved.clone());

        Ok(saved)
    }

    async fn clear_cart(&self, customer: UserUuid) -> Result<Cart, StorageError> {
        let mut carts = self.carts.lock().expect("lock poisoned");

        let cart = carts.get_mut(&customer).ok_or(StorageError::NotFound)?;
        cart.items.clear();
        cart.version += 1;
        cart.updated_at = Timestamp::now();

        Ok(cart.clone())
    }
}

#[derive(Default)]
pub(crate) struct MemoryOrdersRepository {
    pub orders: Mutex<HashMap<OrderUuid, Order>>,
}

#[async_trait]
impl OrdersRepository for MemoryOrdersRepository {
    async fn create_order(&self, order: &Order) -> Result<Order, StorageError> {
        let mut orders = self.orders.lock().expect("lock poisoned");

        if orders.contains_key(&order.uuid) {
            return Err(StorageError::AlreadyExists);
        }

        let mut created = order.clone();
        created.version = 1;

        orders.insert(created.uuid, created.clone());

        Ok(created)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, StorageError> {
        self.orders
            .lock()
            .expect("lock poisoned")
            .get(&order)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn list_orders(&self, customer: UserUuid) -> Result<Vec<Order>, StorageError> {
        let mut orders: Vec<Order> = self
            .orders
            .lock()
            .expect("lock poisoned")
            .values()
            .filter(|order| order.customer_uuid == customer)
            .cloned()
            .collect();

        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(orders)
    }

    async fn update_statuses(&self, order: &Order) -> Result<Order, StorageError> {
        let mut orders = self.orders.lock().expect("lock poisoned");

        let stored = orders.get_mut(&order.uuid).ok_or(StorageError::NotFound)?;

        if stored.version != order.version {
            return Err(StorageError::Conflict);
        }

        stored.overall_status = order.overall_status;
        stored.sub_orders = order.sub_orders.clone();
        stored.version += 1;
        stored.updated_at = Timestamp::now();

        Ok(stored.clone())
    }
}

struct StoredToken {
    token: ActiveApiToken,
    metadata: ApiTokenMetadata,
}

#[derive(Default)]
pub(crate) struct MemoryAuthRepository {
    tokens: Mutex<HashMap<Uuid, StoredToken>>,
}

#[async_trait]
impl AuthRepository for MemoryAuthRepository {
    async fn create_api_token(
        &self,
        token: &NewApiToken,
    ) -> Result<ApiTokenMetadata, StorageError> {
        let mut tokens = self.tokens.lock().expect("lock poisoned");

        if tokens.contains_key(&token.uuid) {
            return Err(StorageError::AlreadyExists);
        }

        let metadata = ApiTokenMetadata {
            uuid: token.uuid,
            user_uuid: token.user_uuid,
            version: token.version,
            created_at: Timestamp::now(),
            last_used_at: None,
            expires_at: token.expires_at,
        };

        tokens.insert(
            token.uuid,
            StoredToken {
                token: ActiveApiToken {
                    user_uuid: token.user_uuid,
                    version: token.version,
                    token_hash: token.token_hash.clone(),
                },
                metadata: metadata.clone(),
            },
        );

        Ok(metadata)
    }

    async fn find_active_api_token(
        &self,
        token_uuid: Uuid,
    ) -> Result<Option<ActiveApiToken>, StorageError> {
        let tokens = self.tokens.lock().expect("lock poisoned");

        let active = tokens.get(&token_uuid).and_then(|stored| {
            match stored.metadata.expires_at {
                Some(expires_at) if expires_at <= Timestamp::now() => None,
                _ => Some(stored.token.clone()),
            }
        });

        Ok(active)
    }

    async fn touch_api_token_last_used(&self, token_uuid: Uuid) -> Result<(), StorageError> {
        let mut tokens = self.tokens.lock().expect("lock poisoned");

        if let Some(stored) = tokens.get_mut(&token_uuid) {
            stored.metadata.last_used_at = Some(Timestamp::now());
        }

        Ok(())
    }
}
