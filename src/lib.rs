//! Account Service
//!
//! User account storage with:
//! - One-way credential hashing (bcrypt, tunable work factor)
//! - Unique, validated identities (required name fields, unique email)
//! - Field-level partial updates that never corrupt untouched fields
//! - Credential verification that never echoes stored hashes

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use api::state::AppState;
use infrastructure::account::{AccountService, BcryptHasher, PostgresAccountRepository};

/// Create the application state with all services initialized.
///
/// Connects to PostgreSQL (`DATABASE_URL`), applies pending migrations, and
/// wires the repository, hasher, and service together. The store instance is
/// built exactly once here and shared by reference from then on.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

    info!("Connecting to PostgreSQL...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&database_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    info!("PostgreSQL connection established");

    let repository = Arc::new(PostgresAccountRepository::new(pool));
    let hasher = Arc::new(BcryptHasher::with_work_factor(config.hashing.work_factor));
    let account_service = Arc::new(AccountService::new(repository, hasher));

    Ok(AppState { account_service })
}
