//! Account aggregate: entity, validation rules, and the storage trait

pub mod entity;
pub mod repository;
pub mod validation;

pub use entity::{Account, AccountChanges, AccountId, NewAccount};
pub use repository::{AccountFilter, AccountPage, AccountRepository, Pagination};
pub use validation::{
    collect_create_violations, collect_update_violations, validate_email, validate_password,
    validate_required_name, AccountRuleError, MIN_PASSWORD_LENGTH,
};
