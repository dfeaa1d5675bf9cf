//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AppAuthService, AuthService, PgAuthRepository},
    chat::{ChatRelayConfig, ChatService, HttpChatRelay},
    database,
    domain::{
        accounts::{AccountsService, AppAccountsService, PgAccountsRepository},
        carts::{AppCartsService, CartsService, PgCartsRepository},
        catalog::{AppCatalogService, CatalogService, PgCatalogRepository},
        orders::{AppOrdersService, OrdersService, PgOrdersRepository},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub accounts: Arc<dyn AccountsService>,
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub auth: Arc<dyn AuthService>,
    pub chat: Arc<dyn ChatService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        chat: ChatRelayConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let accounts = Arc::new(PgAccountsRepository::new(pool.clone()));
        let catalog = Arc::new(PgCatalogRepository::new(pool.clone()));
        let carts = Arc::new(PgCartsRepository::new(pool.clone()));
        let orders = Arc::new(PgOrdersRepository::new(pool.clone()));
        let auth = Arc::new(PgAuthRepository::new(pool));

        Ok(Self {
            accounts: Arc::new(AppAccountsService::new(accounts.clone())),
            catalog: Arc::new(AppCatalogService::new(catalog.clone())),
            carts: Arc::new(AppCartsService::new(carts.clone(), catalog.clone())),
            orders: Arc::new(AppOrdersService::new(orders, carts, catalog, accounts)),
            auth: Arc::new(AppAuthService::new(auth)),
            chat: Arc::new(HttpChatRelay::new(chat)),
        })
    }
}
