//! Domain types and rules, independent of any transport or storage engine

pub mod account;
pub mod error;

pub use account::{
    Account, AccountChanges, AccountFilter, AccountId, AccountPage, AccountRepository, NewAccount,
    Pagination,
};
pub use error::DomainError;
