//! Orders repository.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::StorageError,
    domain::{
        accounts::models::UserUuid,
        catalog::{
            models::{FoodUuid, RestaurantUuid},
            repository::{amount_to_db, try_get_amount},
        },
        orders::{
            models::{Order, OrderUuid, PaymentMethod, PurchasedItem, SubOrder, SubOrderUuid},
            status::{OverallStatus, SubOrderStatus},
        },
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const INSERT_SUB_ORDER_SQL: &str = include_str!("sql/insert_sub_order.sql");
const INSERT_SUB_ORDER_ITEM_SQL: &str = include_str!("sql/insert_sub_order_item.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const GET_SUB_ORDERS_SQL: &str = include_str!("sql/get_sub_orders.sql");
const GET_SUB_ORDER_ITEMS_SQL: &str = include_str!("sql/get_sub_order_items.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const UPDATE_SUB_ORDER_STATUS_SQL: &str = include_str!("sql/update_sub_order_status.sql");

/// Order persistence.
///
/// Status writes are version-checked: `update_statuses` fails with
/// `Conflict` when the order changed since it was read, so two actors
/// racing on the same order cannot silently lose a transition.
#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Persist a freshly assembled order with its sub-orders and items.
    async fn create_order(&self, order: &Order) -> Result<Order, StorageError>;

    async fn get_order(&self, order: OrderUuid) -> Result<Order, StorageError>;

    async fn list_orders(&self, customer: UserUuid) -> Result<Vec<Order>, StorageError>;

    /// Write back the sub-order statuses and the overall status.
    ///
    /// `order.version` must match the stored version; Conflict otherwise.
    async fn update_statuses(&self, order: &Order) -> Result<Order, StorageError>;
}

#[derive(Debug, Clone)]
pub struct PgOrdersRepository {
    pool: PgPool,
}

impl PgOrdersRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn attach_sub_orders(&self, orders: &mut [Order]) -> Result<(), StorageError> {
        if orders.is_empty() {
            return Ok(());
        }

        let order_uuids: Vec<Uuid> = orders.iter().map(|o| o.uuid.into_uuid()).collect();

        let sub_orders = query_as::<Postgres, SubOrderRow>(GET_SUB_ORDERS_SQL)
            .bind(&order_uuids)
            .fetch_all(&self.pool)
            .await?;

        let items = query_as::<Postgres, SubOrderItemRow>(GET_SUB_ORDER_ITEMS_SQL)
            .bind(&order_uuids)
            .fetch_all(&self.pool)
            .await?;

        let mut items_by_sub: FxHashMap<SubOrderUuid, Vec<PurchasedItem>> = FxHashMap::default();

        for row in items {
            items_by_sub
                .entry(row.sub_order_uuid)
                .or_default()
                .push(row.item);
        }

        let mut subs_by_order: FxHashMap<OrderUuid, Vec<SubOrder>> = FxHashMap::default();

        for row in sub_orders {
            let mut sub = row.sub_order;
            sub.items = items_by_sub.remove(&sub.uuid).unwrap_or_default();
            subs_by_order.entry(row.order_uuid).or_default().push(sub);
        }

        for order in orders {
            order.sub_orders = subs_by_order.remove(&order.uuid).unwrap_or_default();
        }

        Ok(())
    }
}

#[async_trait]
impl OrdersRepository for PgOrdersRepository {
    async fn create_order(&self, order: &Order) -> Result<Order, StorageError> {
        let mut tx = self.pool.begin().await?;

        let mut created = query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.customer_uuid.into_uuid())
            .bind(&order.delivery_address)
            .bind(order.payment_method.as_str())
            .bind(amount_to_db(order.total_price)?)
            .bind(order.overall_status.as_str())
            .fetch_one(&mut *tx)
            .await?;

        for (position, sub) in order.sub_orders.iter().enumerate() {
            insert_sub_order(&mut tx, order.uuid, sub, position).await?;
        }

        tx.commit().await?;

        created.sub_orders = order.sub_orders.clone();

        Ok(created)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<Order, StorageError> {
        let found = query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&self.pool)
            .await?;

        let mut orders = [found];
        self.attach_sub_orders(&mut orders).await?;
        let [found] = orders;

        Ok(found)
    }

    async fn list_orders(&self, customer: UserUuid) -> Result<Vec<Order>, StorageError> {
        let mut orders = query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&self.pool)
            .await?;

        self.attach_sub_orders(&mut orders).await?;

        Ok(orders)
    }

    async fn update_statuses(&self, order: &Order) -> Result<Order, StorageError> {
        let mut tx = self.pool.begin().await?;

        let mut updated = query_as::<Postgres, Order>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.overall_status.as_str())
            .bind(amount_to_db(order.version)?)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StorageError::Conflict)?;

        for sub in &order.sub_orders {
            query(UPDATE_SUB_ORDER_STATUS_SQL)
                .bind(order.uuid.into_uuid())
                .bind(sub.uuid.into_uuid())
                .bind(sub.status.as_str())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        updated.sub_orders = order.sub_orders.clone();

        Ok(updated)
    }
}

async fn insert_sub_order(
    tx: &mut Transaction<'_, Postgres>,
    order: OrderUuid,
    sub: &SubOrder,
    position: usize,
) -> Result<(), StorageError> {
    query(INSERT_SUB_ORDER_SQL)
        .bind(sub.uuid.into_uuid())
        .bind(order.into_uuid())
        .bind(sub.restaurant_uuid.into_uuid())
        .bind(&sub.restaurant_name)
        .bind(sub.status.as_str())
        .bind(amount_to_db(sub.subtotal)?)
        .bind(amount_to_db(position as u64)?)
        .execute(&mut **tx)
        .await?;

    for (item_position, item) in sub.items.iter().enumerate() {
        query(INSERT_SUB_ORDER_ITEM_SQL)
            .bind(sub.uuid.into_uuid())
            .bind(order.into_uuid())
            .bind(item.food_uuid.into_uuid())
            .bind(&item.name)
            .bind(amount_to_db(item.unit_price)?)
            .bind(amount_to_db(u64::from(item.quantity))?)
            .bind(item.request.as_deref())
            .bind(amount_to_db(item_position as u64)?)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: UserUuid::from_uuid(row.try_get("customer_uuid")?),
            delivery_address: row.try_get("delivery_address")?,
            payment_method: parse_column::<PaymentMethod>(row, "payment_method")?,
            total_price: try_get_amount(row, "total_price")?,
            overall_status: parse_column::<OverallStatus>(row, "overall_status")?,
            sub_orders: Vec::new(),
            version: try_get_amount(row, "version")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

struct SubOrderRow {
    order_uuid: OrderUuid,
    sub_order: SubOrder,
}

impl<'r> FromRow<'r, PgRow> for SubOrderRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            sub_order: SubOrder {
                uuid: SubOrderUuid::from_uuid(row.try_get("uuid")?),
                restaurant_uuid: RestaurantUuid::from_uuid(row.try_get("restaurant_uuid")?),
                restaurant_name: row.try_get("restaurant_name")?,
                status: parse_column::<SubOrderStatus>(row, "status")?,
                subtotal: try_get_amount(row, "subtotal")?,
                items: Vec::new(),
            },
        })
    }
}

struct SubOrderItemRow {
    sub_order_uuid: SubOrderUuid,
    item: PurchasedItem,
}

impl<'r> FromRow<'r, PgRow> for SubOrderItemRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let quantity = try_get_amount(row, "quantity")?;

        Ok(Self {
            sub_order_uuid: SubOrderUuid::from_uuid(row.try_get("sub_order_uuid")?),
            item: PurchasedItem {
                food_uuid: FoodUuid::from_uuid(row.try_get("food_uuid")?),
                name: row.try_get("name")?,
                unit_price: try_get_amount(row, "unit_price")?,
                quantity: u32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "quantity".to_string(),
                    source: Box::new(e),
                })?,
                request: row.try_get("request")?,
            },
        })
    }
}

fn parse_column<T>(row: &PgRow, col: &str) -> sqlx::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(col)?;

    raw.parse::<T>().map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
