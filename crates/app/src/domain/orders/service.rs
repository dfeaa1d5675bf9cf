//! Orders service: checkout aggregation and status transitions.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{info, warn};

use crate::{
    database::StorageError,
    domain::{
        accounts::{models::UserUuid, repository::AccountsRepository},
        carts::repository::CartsRepository,
        catalog::{models::RestaurantUuid, repository::CatalogRepository},
        orders::{
            errors::OrdersServiceError,
            models::{Checkout, Order, OrderUuid, PurchasedItem, SubOrder, SubOrderUuid},
            repository::OrdersRepository,
            status::{OverallStatus, SubOrderStatus, derive_overall},
        },
    },
};

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the customer's cart into an order.
    ///
    /// Cart items are resolved against the catalog at purchase time and
    /// grouped into one sub-order per restaurant, in the order the
    /// restaurants first appear in the cart. Items whose food has
    /// disappeared from the catalog are dropped; if nothing survives the
    /// checkout fails with `NoValidItems` and the cart is left untouched.
    ///
    /// On success the order is persisted, appended to the customer's order
    /// history and the cart is emptied.
    async fn checkout(
        &self,
        customer: UserUuid,
        checkout: Checkout,
    ) -> Result<Order, OrdersServiceError>;

    /// All of the customer's orders, newest first.
    async fn list_orders(&self, customer: UserUuid) -> Result<Vec<Order>, OrdersServiceError>;

    /// Fetch a single order. Another customer's order is reported as
    /// `NotFound` rather than `Forbidden` so its existence is not leaked.
    async fn track_order(
        &self,
        customer: UserUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;

    /// Move a sub-order one step along the forward chain.
    ///
    /// Only the owner of the sub-order's restaurant may do this, and only
    /// to the single next state. Cancellation is the customer's move and is
    /// rejected here with `Forbidden`.
    async fn advance_sub_order(
        &self,
        actor: UserUuid,
        order: OrderUuid,
        sub_order: SubOrderUuid,
        to: SubOrderStatus,
    ) -> Result<Order, OrdersServiceError>;

    /// Cancel a sub-order that has not started cooking yet.
    async fn cancel_sub_order(
        &self,
        customer: UserUuid,
        order: OrderUuid,
        sub_order: SubOrderUuid,
    ) -> Result<Order, OrdersServiceError>;

    /// Customer-trust escape hatch: force every sub-order to `delivered`
    /// and the order to `completed`, bypassing the transition graph
    /// entirely. Not a normal transition.
    async fn mark_delivered(
        &self,
        customer: UserUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;
}

// Carts rarely span more than a handful of restaurants.
type RestaurantGroups = SmallVec<[(RestaurantUuid, Vec<PurchasedItem>); 4]>;

#[derive(Clone)]
pub struct AppOrdersService {
    orders: Arc<dyn OrdersRepository>,
    carts: Arc<dyn CartsRepository>,
    catalog: Arc<dyn CatalogRepository>,
    accounts: Arc<dyn AccountsRepository>,
}

impl AppOrdersService {
    #[must_use]
    pub fn new(
        orders: Arc<dyn OrdersRepository>,
        carts: Arc<dyn CartsRepository>,
        catalog: Arc<dyn CatalogRepository>,
        accounts: Arc<dyn AccountsRepository>,
    ) -> Self {
        Self {
            orders,
            carts,
            catalog,
            accounts,
        }
    }

    /// Resolve the cart against the catalog and group the surviving items
    /// into one bucket per restaurant, preserving encounter order.
    async fn group_cart_items(
        &self,
        items: &[crate::domain::carts::models::LineItem],
    ) -> Result<RestaurantGroups, OrdersServiceError> {
        let mut groups = RestaurantGroups::new();
        let mut index: FxHashMap<RestaurantUuid, usize> = FxHashMap::default();

        for item in items {
            let food = match self.catalog.get_food(item.food_uuid).await {
                Ok(food) => food,
                Err(StorageError::NotFound) => {
                    warn!(food = %item.food_uuid, "dropping cart item no longer in the catalog");
                    continue;
                }
                Err(other) => return Err(other.into()),
            };

            let purchased = PurchasedItem {
                food_uuid: food.uuid,
                name: food.name,
                unit_price: food.price,
                quantity: item.quantity,
                request: item.request.clone(),
            };

            let slot = *index.entry(food.restaurant_uuid).or_insert_with(|| {
                groups.push((food.restaurant_uuid, Vec::new()));
                groups.len() - 1
            });

            groups[slot].1.push(purchased);
        }

        Ok(groups)
    }
}

#[async_trait]
impl OrdersService for AppOrdersService {
    async fn checkout(
        &self,
        customer: UserUuid,
        checkout: Checkout,
    ) -> Result<Order, OrdersServiceError> {
        let address = checkout.delivery_address.trim();

        if address.is_empty() {
            return Err(OrdersServiceError::MissingDeliveryAddress);
        }

        let cart = match self.carts.get_cart(customer).await {
            Ok(cart) => cart,
            Err(StorageError::NotFound) => return Err(OrdersServiceError::EmptyCart),
            Err(other) => return Err(other.into()),
        };

        if cart.items.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let groups = self.group_cart_items(&cart.items).await?;

        let mut sub_orders = Vec::with_capacity(groups.len());
        let mut total = 0_u64;

        for (restaurant_uuid, items) in groups {
            let restaurant = match self.catalog.get_restaurant(restaurant_uuid).await {
                Ok(restaurant) => restaurant,
                Err(StorageError::NotFound) => {
                    warn!(restaurant = %restaurant_uuid, "dropping sub-order for vanished restaurant");
                    continue;
                }
                Err(other) => return Err(other.into()),
            };

            let subtotal = items.iter().map(PurchasedItem::line_total).sum::<u64>();
            total += subtotal;

            sub_orders.push(SubOrder {
                uuid: SubOrderUuid::new(),
                restaurant_uuid,
                restaurant_name: restaurant.name,
                status: SubOrderStatus::Pending,
                subtotal,
                items,
            });
        }

        if sub_orders.is_empty() {
            return Err(OrdersServiceError::NoValidItems);
        }

        let now = Timestamp::now();

        let order = Order {
            uuid: OrderUuid::new(),
            customer_uuid: customer,
            delivery_address: address.to_string(),
            payment_method: checkout.payment_method.unwrap_or_default(),
            total_price: total,
            overall_status: derive_overall(sub_orders.iter().map(|sub| sub.status)),
            sub_orders,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        let created = self.orders.create_order(&order).await?;

        self.accounts.append_order(customer, created.uuid).await?;

        // Cleared only once the order is durable, so a failed checkout
        // never loses the cart.
        self.carts.clear_cart(customer).await?;

        info!(
            order = %created.uuid,
            customer = %customer,
            sub_orders = created.sub_orders.len(),
            total = created.total_price,
            "checkout complete"
        );

        Ok(created)
    }

    async fn list_orders(&self, customer: UserUuid) -> Result<Vec<Order>, OrdersServiceError> {
        let orders = self.orders.list_orders(customer).await?;

        Ok(orders)
    }

    async fn track_order(
        &self,
        customer: UserUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let order = self.orders.get_order(order).await?;

        if order.customer_uuid != customer {
            return Err(OrdersServiceError::NotFound);
        }

        Ok(order)
    }

    async fn advance_sub_order(
        &self,
        actor: UserUuid,
        order: OrderUuid,
        sub_order: SubOrderUuid,
        to: SubOrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut order = self.orders.get_order(order).await?;

        let (restaurant_uuid, from) = {
            let sub = order
                .sub_order(sub_order)
                .ok_or(OrdersServiceError::SubOrderNotFound)?;

            (sub.restaurant_uuid, sub.status)
        };

        let restaurant = self.catalog.get_restaurant(restaurant_uuid).await?;

        if restaurant.owner_uuid != actor {
            return Err(OrdersServiceError::Forbidden);
        }

        if to == SubOrderStatus::Cancelled {
            // Cancellation is the customer's move.
            return Err(OrdersServiceError::Forbidden);
        }

        if !from.is_forward_step(to) {
            return Err(OrdersServiceError::IllegalTransition { from, to });
        }

        if let Some(sub) = order.sub_order_mut(sub_order) {
            sub.status = to;
        }

        order.overall_status = derive_overall(order.sub_orders.iter().map(|sub| sub.status));

        let updated = self.orders.update_statuses(&order).await?;

        Ok(updated)
    }

    async fn cancel_sub_order(
        &self,
        customer: UserUuid,
        order: OrderUuid,
        sub_order: SubOrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let mut order = self.orders.get_order(order).await?;

        if order.customer_uuid != customer {
            return Err(OrdersServiceError::Forbidden);
        }

        let sub = order
            .sub_order_mut(sub_order)
            .ok_or(OrdersServiceError::SubOrderNotFound)?;

        if !sub.status.is_cancellable() {
            return Err(OrdersServiceError::IllegalTransition {
                from: sub.status,
                to: SubOrderStatus::Cancelled,
            });
        }

        sub.status = SubOrderStatus::Cancelled;
        order.overall_status = derive_overall(order.sub_orders.iter().map(|sub| sub.status));

        let updated = self.orders.update_statuses(&order).await?;

        Ok(updated)
    }

    async fn mark_delivered(
        &self,
        customer: UserUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let mut order = self.orders.get_order(order).await?;

        if order.customer_uuid != customer {
            return Err(OrdersServiceError::Forbidden);
        }

        // Escape hatch: every sub-order is forced to delivered and the
        // overall status set directly, without consulting the transition
        // graph or the derivation.
        for sub in &mut order.sub_orders {
            sub.status = SubOrderStatus::Delivered;
        }

        order.overall_status = OverallStatus::Completed;

        let updated = self.orders.update_statuses(&order).await?;

        info!(order = %updated.uuid, customer = %customer, "order force-completed by customer");

        Ok(updated)
    }
}
