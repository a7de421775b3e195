//! Account infrastructure: hashing, storage backends, and the service

pub mod password;
pub mod postgres_repository;
pub mod repository;
pub mod service;

pub use password::{BcryptHasher, PasswordHasher, DEFAULT_WORK_FACTOR};
pub use postgres_repository::PostgresAccountRepository;
pub use repository::InMemoryAccountRepository;
pub use service::{AccountService, CreateAccountRequest, UpdateAccountRequest};
