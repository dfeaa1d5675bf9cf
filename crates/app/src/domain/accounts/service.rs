//! Accounts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::domain::accounts::{
    errors::AccountsServiceError,
    models::{NewUser, User, UserUuid},
    repository::AccountsRepository,
};

#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Retrieve a single user.
    async fn get_user(&self, user: UserUuid) -> Result<User, AccountsServiceError>;

    /// Register a new account.
    async fn create_user(&self, user: NewUser) -> Result<User, AccountsServiceError>;
}

#[derive(Clone)]
pub struct AppAccountsService {
    repository: Arc<dyn AccountsRepository>,
}

impl AppAccountsService {
    #[must_use]
    pub fn new(repository: Arc<dyn AccountsRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl AccountsService for AppAccountsService {
    async fn get_user(&self, user: UserUuid) -> Result<User, AccountsServiceError> {
        Ok(self.repository.get_user(user).await?)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AccountsServiceError> {
        if user.name.trim().is_empty() {
            return Err(AccountsServiceError::InvalidData);
        }

        Ok(self.repository.create_user(user).await?)
    }
}
