//! Catalog service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::StorageError,
    domain::{
        accounts::models::UserUuid,
        catalog::{
            errors::CatalogServiceError,
            models::{Food, FoodUuid, NewFood, NewRestaurant, Restaurant, RestaurantUuid},
            repository::CatalogRepository,
        },
    },
};

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieve a single food by id.
    async fn get_food(&self, food: FoodUuid) -> Result<Food, CatalogServiceError>;

    /// Retrieve every food on the menu.
    async fn list_foods(&self) -> Result<Vec<Food>, CatalogServiceError>;

    /// Create a new food. Only the owner of the target restaurant may do so.
    async fn create_food(&self, actor: UserUuid, food: NewFood)
    -> Result<Food, CatalogServiceError>;

    /// Retrieve a single restaurant by id.
    async fn get_restaurant(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<Restaurant, CatalogServiceError>;

    /// Retrieve every restaurant.
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, CatalogServiceError>;

    /// Register a new restaurant for the given owner.
    async fn create_restaurant(
        &self,
        restaurant: NewRestaurant,
    ) -> Result<Restaurant, CatalogServiceError>;
}

#[derive(Clone)]
pub struct AppCatalogService {
    repository: Arc<dyn CatalogRepository>,
}

impl AppCatalogService {
    #[must_use]
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CatalogService for AppCatalogService {
    async fn get_food(&self, food: FoodUuid) -> Result<Food, CatalogServiceError> {
        self.repository.get_food(food).await.map_err(|e| match e {
            StorageError::NotFound => CatalogServiceError::FoodNotFound,
            other => other.into(),
        })
    }

    async fn list_foods(&self) -> Result<Vec<Food>, CatalogServiceError> {
        Ok(self.repository.list_foods().await?)
    }

    async fn create_food(
        &self,
        actor: UserUuid,
        food: NewFood,
    ) -> Result<Food, CatalogServiceError> {
        if food.name.trim().is_empty() {
            return Err(CatalogServiceError::InvalidData);
        }

        let restaurant = self
            .repository
            .get_restaurant(food.restaurant_uuid)
            .await
            .map_err(|e| match e {
                StorageError::NotFound => CatalogServiceError::RestaurantNotFound,
                other => other.into(),
            })?;

        if restaurant.owner_uuid != actor {
            return Err(CatalogServiceError::Forbidden);
        }

        Ok(self.repository.create_food(food).await?)
    }

    async fn get_restaurant(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<Restaurant, CatalogServiceError> {
        self.repository
            .get_restaurant(restaurant)
            .await
            .map_err(|e| match e {
                StorageError::NotFound => CatalogServiceError::RestaurantNotFound,
                other => other.into(),
            })
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, CatalogServiceError> {
        Ok(self.repository.list_restaurants().await?)
    }

    async fn create_restaurant(
        &self,
        restaurant: NewRestaurant,
    ) -> Result<Restaurant, CatalogServiceError> {
        if restaurant.name.trim().is_empty() {
            return Err(CatalogServiceError::InvalidData);
        }

        Ok(self.repository.create_restaurant(restaurant).await?)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn create_food_requires_restaurant_owner() -> TestResult {
        let ctx = TestContext::new();
        let (owner, restaurant) = ctx.create_owner_with_restaurant("Casa Uno").await?;
        let stranger = ctx.create_customer("Mallory").await?;

        let food = NewFood {
            uuid: FoodUuid::new(),
            name: "Tacos".to_string(),
            price: 8_50,
            category: "mains".to_string(),
            restaurant_uuid: restaurant,
        };

        let result = ctx.catalog.create_food(stranger, food.clone()).await;

        assert!(
            matches!(result, Err(CatalogServiceError::Forbidden)),
            "expected Forbidden, got {result:?}"
        );

        let created = ctx.catalog.create_food(owner, food).await?;

        assert_eq!(created.price, 8_50);
        assert_eq!(created.restaurant_uuid, restaurant);

        Ok(())
    }

    #[tokio::test]
    async fn get_food_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new();

        let result = ctx.catalog.get_food(FoodUuid::new()).await;

        assert!(
            matches!(result, Err(CatalogServiceError::FoodNotFound)),
            "expected FoodNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_food_with_blank_name_is_rejected() -> TestResult {
        let ctx = TestContext::new();
        let (owner, restaurant) = ctx.create_owner_with_restaurant("Casa Dos").await?;

        let result = ctx
            .catalog
            .create_food(
                owner,
                NewFood {
                    uuid: FoodUuid::new(),
                    name: "   ".to_string(),
                    price: 100,
                    category: "mains".to_string(),
                    restaurant_uuid: restaurant,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CatalogServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_foods_returns_created_foods() -> TestResult {
        let ctx = TestContext::new();
        let (owner, restaurant) = ctx.create_owner_with_restaurant("Casa Tres").await?;

        ctx.create_food(owner, restaurant, "Ramen", 11_00).await?;
        ctx.create_food(owner, restaurant, "Gyoza", 4_50).await?;

        let foods = ctx.catalog.list_foods().await?;

        assert_eq!(foods.len(), 2, "both foods should be listed");

        Ok(())
    }
}
