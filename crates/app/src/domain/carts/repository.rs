//! Carts repository.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::{
    database::StorageError,
    domain::{
        accounts::models::UserUuid,
        carts::models::{Cart, LineItem},
        catalog::{
            models::FoodUuid,
            repository::{amount_to_db, try_get_amount},
        },
    },
};

const GET_CART_SQL: &str = include_str!("sql/get_cart.sql");
const GET_CART_ITEMS_SQL: &str = include_str!("sql/get_cart_items.sql");
const UPSERT_CART_SQL: &str = include_str!("sql/upsert_cart.sql");
const CLEAR_CART_SQL: &str = include_str!("sql/clear_cart.sql");
const DELETE_CART_ITEMS_SQL: &str = include_str!("sql/delete_cart_items.sql");
const INSERT_CART_ITEM_SQL: &str = include_str!("sql/insert_cart_item.sql");

/// Per-customer cart persistence with optimistic concurrency.
#[automock]
#[async_trait]
pub trait CartsRepository: Send + Sync {
    /// Fetch the customer's cart, NotFound when none has ever been created.
    async fn get_cart(&self, customer: UserUuid) -> Result<Cart, StorageError>;

    /// Persist the cart, replacing its line items.
    ///
    /// `cart.version` must match the stored version (0 for a cart that does
    /// not exist yet); Conflict otherwise. The stored version is bumped on
    /// success.
    async fn save_cart(&self, cart: &Cart) -> Result<Cart, StorageError>;

    /// Empty the cart's line items unconditionally, keeping the cart row.
    async fn clear_cart(&self, customer: UserUuid) -> Result<Cart, StorageError>;
}

#[derive(Debug, Clone)]
pub struct PgCartsRepository {
    pool: PgPool,
}

impl PgCartsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartsRepository for PgCartsRepository {
    async fn get_cart(&self, customer: UserUuid) -> Result<Cart, StorageError> {
        let mut cart = query_as::<Postgres, Cart>(GET_CART_SQL)
            .bind(customer.into_uuid())
            .fetch_one(&self.pool)
            .await?;

        cart.items = self.fetch_items(customer).await?;

        Ok(cart)
    }

    async fn save_cart(&self, cart: &Cart) -> Result<Cart, StorageError> {
        let mut tx = self.pool.begin().await?;

        let expected = amount_to_db(cart.version)?;

        let saved = query_as::<Postgres, Cart>(UPSERT_CART_SQL)
            .bind(cart.customer_uuid.into_uuid())
            .bind(expected)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StorageError::Conflict)?;

        query(DELETE_CART_ITEMS_SQL)
            .bind(cart.customer_uuid.into_uuid())
            .execute(&mut *tx)
            .await?;

        for (position, item) in cart.items.iter().enumerate() {
            query(INSERT_CART_ITEM_SQL)
                .bind(cart.customer_uuid.into_uuid())
                .bind(item.food_uuid.into_uuid())
                .bind(amount_to_db(u64::from(item.quantity))?)
                .bind(item.request.as_deref())
                .bind(amount_to_db(position as u64)?)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(Cart {
            items: cart.items.clone(),
            ..saved
        })
    }

    async fn clear_cart(&self, customer: UserUuid) -> Result<Cart, StorageError> {
        let mut tx = self.pool.begin().await?;

        let cleared = query_as::<Postgres, Cart>(CLEAR_CART_SQL)
            .bind(customer.into_uuid())
            .fetch_one(&mut *tx)
            .await?;

        query(DELETE_CART_ITEMS_SQL)
            .bind(customer.into_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(cleared)
    }
}

impl PgCartsRepository {
    async fn fetch_items(&self, customer: UserUuid) -> Result<Vec<LineItem>, StorageError> {
        let items = query_as::<Postgres, LineItem>(GET_CART_ITEMS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            customer_uuid: UserUuid::from_uuid(row.try_get("customer_uuid")?),
            items: Vec::new(),
            version: try_get_amount(row, "version")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for LineItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity = try_get_amount(row, "quantity")?;

        Ok(Self {
            food_uuid: FoodUuid::from_uuid(row.try_get("food_uuid")?),
            quantity: u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })?,
            request: row.try_get("request")?,
        })
    }
}
