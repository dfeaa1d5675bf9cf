//! Accounts repository.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::StorageError,
    domain::{
        accounts::models::{NewUser, User, UserRole, UserUuid},
        orders::models::OrderUuid,
    },
};

const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const GET_USER_ORDERS_SQL: &str = include_str!("sql/get_user_orders.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const APPEND_ORDER_SQL: &str = include_str!("sql/append_order.sql");

#[automock]
#[async_trait]
pub trait AccountsRepository: Send + Sync {
    async fn get_user(&self, user: UserUuid) -> Result<User, StorageError>;

    async fn create_user(&self, user: NewUser) -> Result<User, StorageError>;

    /// Record a checked-out order against the customer's history.
    async fn append_order(&self, user: UserUuid, order: OrderUuid) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
pub struct PgAccountsRepository {
    pool: PgPool,
}

impl PgAccountsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountsRepository for PgAccountsRepository {
    async fn get_user(&self, user: UserUuid) -> Result<User, StorageError> {
        let mut found = query_as::<Postgres, User>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&self.pool)
            .await?;

        let orders: Vec<Uuid> = query_scalar(GET_USER_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&self.pool)
            .await?;

        found.order_history = orders.into_iter().map(OrderUuid::from_uuid).collect();

        Ok(found)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let created = query_as::<Postgres, User>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(user.name)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn append_order(&self, user: UserUuid, order: OrderUuid) -> Result<(), StorageError> {
        let rows_affected = query(APPEND_ORDER_SQL)
            .bind(user.into_uuid())
            .bind(order.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        let role = role
            .parse::<UserRole>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            role,
            order_history: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
