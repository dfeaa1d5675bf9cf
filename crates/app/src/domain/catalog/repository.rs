//! Catalog repository: lookup and persistence of foods and restaurants.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::StorageError,
    domain::{
        accounts::models::UserUuid,
        catalog::models::{Food, FoodUuid, NewFood, NewRestaurant, Restaurant, RestaurantUuid},
    },
};

const GET_FOOD_SQL: &str = include_str!("sql/get_food.sql");
const LIST_FOODS_SQL: &str = include_str!("sql/list_foods.sql");
const CREATE_FOOD_SQL: &str = include_str!("sql/create_food.sql");
const GET_RESTAURANT_SQL: &str = include_str!("sql/get_restaurant.sql");
const LIST_RESTAURANTS_SQL: &str = include_str!("sql/list_restaurants.sql");
const CREATE_RESTAURANT_SQL: &str = include_str!("sql/create_restaurant.sql");

/// Resolve-by-id and listing capabilities over the food catalog.
///
/// The domain services depend on this trait only; the Postgres
/// implementation below and the in-memory fake used by tests are
/// interchangeable.
#[automock]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn get_food(&self, food: FoodUuid) -> Result<Food, StorageError>;

    async fn list_foods(&self) -> Result<Vec<Food>, StorageError>;

    async fn create_food(&self, food: NewFood) -> Result<Food, StorageError>;

    async fn get_restaurant(&self, restaurant: RestaurantUuid) -> Result<Restaurant, StorageError>;

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, StorageError>;

    async fn create_restaurant(&self, restaurant: NewRestaurant)
    -> Result<Restaurant, StorageError>;
}

#[derive(Debug, Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn get_food(&self, food: FoodUuid) -> Result<Food, StorageError> {
        let food = query_as::<Postgres, Food>(GET_FOOD_SQL)
            .bind(food.into_uuid())
            .fetch_one(&self.pool)
            .await?;

        Ok(food)
    }

    async fn list_foods(&self) -> Result<Vec<Food>, StorageError> {
        let foods = query_as::<Postgres, Food>(LIST_FOODS_SQL)
            .fetch_all(&self.pool)
            .await?;

        Ok(foods)
    }

    async fn create_food(&self, food: NewFood) -> Result<Food, StorageError> {
        let created = query_as::<Postgres, Food>(CREATE_FOOD_SQL)
            .bind(food.uuid.into_uuid())
            .bind(food.name)
            .bind(amount_to_db(food.price)?)
            .bind(food.category)
            .bind(food.restaurant_uuid.into_uuid())
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn get_restaurant(&self, restaurant: RestaurantUuid) -> Result<Restaurant, StorageError> {
        let restaurant = query_as::<Postgres, Restaurant>(GET_RESTAURANT_SQL)
            .bind(restaurant.into_uuid())
            .fetch_one(&self.pool)
            .await?;

        Ok(restaurant)
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, StorageError> {
        let restaurants = query_as::<Postgres, Restaurant>(LIST_RESTAURANTS_SQL)
            .fetch_all(&self.pool)
            .await?;

        Ok(restaurants)
    }

    async fn create_restaurant(
        &self,
        restaurant: NewRestaurant,
    ) -> Result<Restaurant, StorageError> {
        let created = query_as::<Postgres, Restaurant>(CREATE_RESTAURANT_SQL)
            .bind(restaurant.uuid.into_uuid())
            .bind(restaurant.name)
            .bind(restaurant.owner_uuid.into_uuid())
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }
}

impl<'r> FromRow<'r, PgRow> for Food {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: FoodUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price: try_get_amount(row, "price")?,
            category: row.try_get("category")?,
            restaurant_uuid: RestaurantUuid::from_uuid(row.try_get("restaurant_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Restaurant {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: RestaurantUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            owner_uuid: UserUuid::from_uuid(row.try_get("owner_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

/// Amounts are stored as `BIGINT`; negative values never round-trip.
pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(crate) fn amount_to_db(amount: u64) -> Result<i64, StorageError> {
    i64::try_from(amount).map_err(|_overflow| {
        StorageError::Sql(sqlx::Error::Encode("amount exceeds BIGINT range".into()))
    })
}
