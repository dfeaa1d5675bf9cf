//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::StorageError,
    domain::{
        accounts::models::UserUuid,
        carts::{
            errors::CartsServiceError,
            models::{Cart, LineItem, NewLineItem, ResolvedCart, ResolvedLineItem},
            repository::CartsRepository,
        },
        catalog::{models::FoodUuid, repository::CatalogRepository},
    },
};

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the customer's cart with food references resolved.
    ///
    /// # Errors
    ///
    /// `NotFound` when the customer has never added anything to a cart.
    async fn get_cart(&self, customer: UserUuid) -> Result<ResolvedCart, CartsServiceError>;

    /// Add a line item, creating the cart lazily on first use.
    ///
    /// Adding a food already present merges into the existing line item:
    /// the quantity accumulates and the special request is overwritten only
    /// when the new one is non-empty.
    async fn add_item(
        &self,
        customer: UserUuid,
        item: NewLineItem,
    ) -> Result<ResolvedCart, CartsServiceError>;

    /// Remove the line item for the given food. Removing an absent food is
    /// a no-op, not an error.
    async fn remove_item(
        &self,
        customer: UserUuid,
        food: FoodUuid,
    ) -> Result<ResolvedCart, CartsServiceError>;
}

#[derive(Clone)]
pub struct AppCartsService {
    carts: Arc<dyn CartsRepository>,
    catalog: Arc<dyn CatalogRepository>,
}

impl AppCartsService {
    #[must_use]
    pub fn new(carts: Arc<dyn CartsRepository>, catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { carts, catalog }
    }

    /// Join the cart's line items against the current catalog. Items whose
    /// food has since disappeared are omitted from the view (the stored
    /// cart keeps them; checkout drops them for good).
    async fn resolve(&self, cart: Cart) -> Result<ResolvedCart, CartsServiceError> {
        let mut items = Vec::with_capacity(cart.items.len());
        let mut subtotal = 0_u64;

        for item in cart.items {
            let food = match self.catalog.get_food(item.food_uuid).await {
                Ok(food) => food,
                Err(StorageError::NotFound) => {
                    debug!(food = %item.food_uuid, "skipping cart item with unknown food");
                    continue;
                }
                Err(other) => return Err(other.into()),
            };

            let resolved = ResolvedLineItem {
                food,
                quantity: item.quantity,
                request: item.request,
            };

            subtotal += resolved.line_total();
            items.push(resolved);
        }

        Ok(ResolvedCart {
            customer_uuid: cart.customer_uuid,
            items,
            subtotal,
        })
    }
}

#[async_trait]
impl CartsService for AppCartsService {
    async fn get_cart(&self, customer: UserUuid) -> Result<ResolvedCart, CartsServiceError> {
        let cart = self.carts.get_cart(customer).await?;

        self.resolve(cart).await
    }

    async fn add_item(
        &self,
        customer: UserUuid,
        item: NewLineItem,
    ) -> Result<ResolvedCart, CartsServiceError> {
        if item.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        // The food must exist at add time; later disappearance is handled
        // at resolution and checkout.
        self.catalog
            .get_food(item.food_uuid)
            .await
            .map_err(|e| match e {
                StorageError::NotFound => CartsServiceError::FoodNotFound,
                other => other.into(),
            })?;

        let mut cart = match self.carts.get_cart(customer).await {
            Ok(cart) => cart,
            Err(StorageError::NotFound) => Cart::empty(customer),
            Err(other) => return Err(other.into()),
        };

        let request = item.request.filter(|r| !r.trim().is_empty());

        if let Some(existing) = cart
            .items
            .iter_mut()
            .find(|line| line.food_uuid == item.food_uuid)
        {
            existing.quantity = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or(CartsServiceError::InvalidQuantity)?;

            if request.is_some() {
                existing.request = request;
            }
        } else {
            cart.items.push(LineItem {
                food_uuid: item.food_uuid,
                quantity: item.quantity,
                request,
            });
        }

        let saved = self.carts.save_cart(&cart).await?;

        self.resolve(saved).await
    }

    async fn remove_item(
        &self,
        customer: UserUuid,
        food: FoodUuid,
    ) -> Result<ResolvedCart, CartsServiceError> {
        let mut cart = self.carts.get_cart(customer).await?;

        let before = cart.items.len();
        cart.items.retain(|line| line.food_uuid != food);

        if cart.items.len() == before {
            // Nothing to remove; skip the write entirely.
            return self.resolve(cart).await;
        }

        let saved = self.carts.save_cart(&cart).await?;

        self.resolve(saved).await
    }
}
