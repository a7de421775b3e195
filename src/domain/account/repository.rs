//! Account repository trait and query types

use async_trait::async_trait;
use std::fmt::Debug;

use super::super::DomainError;
use super::entity::{Account, AccountChanges, AccountId, NewAccount};

/// Default page size when the caller does not specify one
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Optional substring filters for listing accounts
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    /// Match accounts whose firstname contains this fragment
    pub firstname: Option<String>,
    /// Match accounts whose email contains this fragment
    pub email: Option<String>,
}

impl AccountFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_firstname(mut self, fragment: impl Into<String>) -> Self {
        self.firstname = Some(fragment.into());
        self
    }

    pub fn with_email(mut self, fragment: impl Into<String>) -> Self {
        self.email = Some(fragment.into());
        self
    }

    pub fn matches(&self, account: &Account) -> bool {
        if let Some(fragment) = &self.firstname {
            if !account.firstname().contains(fragment.as_str()) {
                return false;
            }
        }

        if let Some(fragment) = &self.email {
            if !account.email().contains(fragment.as_str()) {
                return false;
            }
        }

        true
    }
}

/// 1-based page window over a filtered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Pagination {
    /// Build a window, clamping both values to at least 1.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_LIMIT)
    }
}

/// One page of accounts plus the size of the whole filtered set
#[derive(Debug, Clone)]
pub struct AccountPage {
    pub accounts: Vec<Account>,
    /// Count of the filtered set, not just this page
    pub total: u64,
}

/// Repository trait for account storage.
///
/// Email uniqueness is enforced here, atomically with respect to concurrent
/// inserts; callers must not rely on a check-then-insert of their own.
#[async_trait]
pub trait AccountRepository: Send + Sync + Debug {
    /// Insert a draft, assigning the ID. Fails with
    /// [`DomainError::DuplicateEmail`] when the email is already taken.
    async fn insert(&self, draft: NewAccount) -> Result<Account, DomainError>;

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Filtered, paginated scan in insertion (ID) order. The ordering is
    /// stable across pages while no writes occur.
    async fn find_page(
        &self,
        filter: &AccountFilter,
        pagination: Pagination,
    ) -> Result<AccountPage, DomainError>;

    /// Merge only the fields present in `changes` into the stored record.
    /// Fails with [`DomainError::NotFound`] when the ID does not exist.
    async fn update(&self, id: AccountId, changes: AccountChanges) -> Result<Account, DomainError>;

    /// Returns `false` when no record matched; repeated deletes of a gone ID
    /// observe `false`, never an error.
    async fn delete(&self, id: AccountId) -> Result<bool, DomainError>;
}
