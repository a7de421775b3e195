//! Application state for shared services

use std::sync::Arc;

use crate::domain::account::repository::{AccountFilter, AccountPage, Pagination};
use crate::domain::{Account, AccountRepository, DomainError};
use crate::infrastructure::account::{
    AccountService, CreateAccountRequest, PasswordHasher, UpdateAccountRequest,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
}

/// Trait for account service operations
#[async_trait::async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn create(&self, request: CreateAccountRequest) -> Result<Account, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<Account>, DomainError>;
    async fn list(
        &self,
        filter: AccountFilter,
        pagination: Pagination,
    ) -> Result<AccountPage, DomainError>;
    async fn update(&self, id: &str, request: UpdateAccountRequest)
        -> Result<Account, DomainError>;
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
    async fn verify_credentials(&self, email: &str, password: &str)
        -> Result<bool, DomainError>;
}

#[async_trait::async_trait]
impl<R, H> AccountServiceTrait for AccountService<R, H>
where
    R: AccountRepository,
    H: PasswordHasher,
{
    async fn create(&self, request: CreateAccountRequest) -> Result<Account, DomainError> {
        AccountService::create(self, request).await
    }

    async fn get(&self, id: &str) -> Result<Option<Account>, DomainError> {
        AccountService::get(self, id).await
    }

    async fn list(
        &self,
        filter: AccountFilter,
        pagination: Pagination,
    ) -> Result<AccountPage, DomainError> {
        AccountService::list(self, filter, pagination).await
    }

    async fn update(
        &self,
        id: &str,
        request: UpdateAccountRequest,
    ) -> Result<Account, DomainError> {
        AccountService::update(self, id, request).await
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        AccountService::delete(self, id).await
    }

    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<bool, DomainError> {
        AccountService::verify_credentials(self, email, password).await
    }
}
