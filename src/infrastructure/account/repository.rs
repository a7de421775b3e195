//! In-memory account repository implementation
//!
//! Used by the test suite and as a drop-in store when no database is wanted.
//! All state lives behind a single lock so email uniqueness arbitration is
//! atomic with respect to concurrent inserts.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::repository::{AccountFilter, AccountPage, Pagination};
use crate::domain::{
    Account, AccountChanges, AccountId, AccountRepository, DomainError, NewAccount,
};

#[derive(Debug, Default)]
struct Inner {
    /// Keyed by ID; BTreeMap keeps the insertion (ID) order for stable paging
    accounts: BTreeMap<i64, Account>,
    /// email -> account ID
    email_index: HashMap<String, i64>,
    next_id: i64,
}

/// In-memory implementation of [`AccountRepository`]
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, draft: NewAccount) -> Result<Account, DomainError> {
        let mut inner = self.inner.write().await;

        if inner.email_index.contains_key(&draft.email) {
            return Err(DomainError::duplicate_email(draft.email));
        }

        inner.next_id += 1;
        let id = inner.next_id;

        let account = Account::new(
            AccountId::new(id),
            draft.firstname,
            draft.lastname,
            draft.middlename,
            draft.email,
            draft.password_hash,
        );

        inner.email_index.insert(account.email().to_string(), id);
        inner.accounts.insert(id, account.clone());

        Ok(account)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DomainError> {
        let inner = self.inner.read().await;
        Ok(inner.accounts.get(&id.as_i64()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let inner = self.inner.read().await;

        Ok(inner
            .email_index
            .get(email)
            .and_then(|id| inner.accounts.get(id))
            .cloned())
    }

    async fn find_page(
        &self,
        filter: &AccountFilter,
        pagination: Pagination,
    ) -> Result<AccountPage, DomainError> {
        let inner = self.inner.read().await;

        let matching: Vec<&Account> = inner
            .accounts
            .values()
            .filter(|account| filter.matches(account))
            .collect();

        let total = matching.len() as u64;

        let accounts = matching
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .cloned()
            .collect();

        Ok(AccountPage { accounts, total })
    }

    async fn update(&self, id: AccountId, changes: AccountChanges) -> Result<Account, DomainError> {
        let mut inner = self.inner.write().await;

        let current = inner
            .accounts
            .get(&id.as_i64())
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("Account '{}' not found", id)))?;

        // An email change must not collide with another account
        if let Some(new_email) = &changes.email {
            if let Some(owner) = inner.email_index.get(new_email) {
                if *owner != id.as_i64() {
                    return Err(DomainError::duplicate_email(new_email.clone()));
                }
            }
        }

        let mut updated = current.clone();
        updated.apply(&changes);

        if updated.email() != current.email() {
            inner.email_index.remove(current.email());
            inner
                .email_index
                .insert(updated.email().to_string(), id.as_i64());
        }

        inner.accounts.insert(id.as_i64(), updated.clone());

        Ok(updated)
    }

    async fn delete(&self, id: AccountId) -> Result<bool, DomainError> {
        let mut inner = self.inner.write().await;

        match inner.accounts.remove(&id.as_i64()) {
            Some(account) => {
                inner.email_index.remove(account.email());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
