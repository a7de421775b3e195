//! PostgreSQL account repository implementation
//!
//! Email uniqueness rides on the `accounts_email_key` unique constraint, so
//! two concurrent inserts of the same address are arbitrated by the database
//! and at most one succeeds. Partial updates merge in SQL via `COALESCE`.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::account::repository::{AccountFilter, AccountPage, Pagination};
use crate::domain::{
    Account, AccountChanges, AccountId, AccountRepository, DomainError, NewAccount,
};

const ACCOUNT_COLUMNS: &str = "id, firstname, lastname, middlename, email, password_hash";

/// PostgreSQL implementation of [`AccountRepository`]
#[derive(Debug, Clone)]
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn insert(&self, draft: NewAccount) -> Result<Account, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO accounts (firstname, lastname, middlename, email, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, firstname, lastname, middlename, email, password_hash
            "#,
        )
        .bind(&draft.firstname)
        .bind(&draft.lastname)
        .bind(&draft.middlename)
        .bind(&draft.email)
        .bind(&draft.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::duplicate_email(&draft.email)
            } else {
                DomainError::storage(format!("Failed to insert account: {}", e))
            }
        })?;

        Ok(row_to_account(&row))
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM accounts WHERE id = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get account: {}", e)))?;

        Ok(row.map(|row| row_to_account(&row)))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM accounts WHERE email = $1",
            ACCOUNT_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get account by email: {}", e)))?;

        Ok(row.map(|row| row_to_account(&row)))
    }

    async fn find_page(
        &self,
        filter: &AccountFilter,
        pagination: Pagination,
    ) -> Result<AccountPage, DomainError> {
        let firstname_pattern = filter.firstname.as_deref().map(contains_pattern);
        let email_pattern = filter.email.as_deref().map(contains_pattern);

        let rows = sqlx::query(
            r#"
            SELECT id, firstname, lastname, middlename, email, password_hash
            FROM accounts
            WHERE ($1::text IS NULL OR firstname LIKE $1)
              AND ($2::text IS NULL OR email LIKE $2)
            ORDER BY id
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(firstname_pattern.as_deref())
        .bind(email_pattern.as_deref())
        .bind(i64::from(pagination.limit))
        .bind(offset_param(pagination))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list accounts: {}", e)))?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM accounts
            WHERE ($1::text IS NULL OR firstname LIKE $1)
              AND ($2::text IS NULL OR email LIKE $2)
            "#,
        )
        .bind(firstname_pattern.as_deref())
        .bind(email_pattern.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to count accounts: {}", e)))?;

        let accounts = rows.iter().map(row_to_account).collect();

        Ok(AccountPage {
            accounts,
            total: total as u64,
        })
    }

    async fn update(&self, id: AccountId, changes: AccountChanges) -> Result<Account, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE accounts
            SET firstname = COALESCE($2, firstname),
                lastname = COALESCE($3, lastname),
                middlename = COALESCE($4, middlename),
                email = COALESCE($5, email),
                password_hash = COALESCE($6, password_hash)
            WHERE id = $1
            RETURNING id, firstname, lastname, middlename, email, password_hash
            "#,
        )
        .bind(id.as_i64())
        .bind(changes.firstname.as_deref())
        .bind(changes.lastname.as_deref())
        .bind(changes.middlename.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.password_hash.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::duplicate_email(changes.email.clone().unwrap_or_default())
            } else {
                DomainError::storage(format!("Failed to update account: {}", e))
            }
        })?;

        match row {
            Some(row) => Ok(row_to_account(&row)),
            None => Err(DomainError::not_found(format!(
                "Account '{}' not found",
                id
            ))),
        }
    }

    async fn delete(&self, id: AccountId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete account: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_account(row: &sqlx::postgres::PgRow) -> Account {
    Account::new(
        AccountId::new(row.get::<i64, _>("id")),
        row.get::<String, _>("firstname"),
        row.get::<String, _>("lastname"),
        row.get::<String, _>("middlename"),
        row.get::<String, _>("email"),
        row.get::<String, _>("password_hash"),
    )
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

/// The page offset can exceed `i64::MAX` for extreme `page`/`limit` values;
/// saturate instead of wrapping into a negative OFFSET.
fn offset_param(pagination: Pagination) -> i64 {
    i64::try_from(pagination.offset()).unwrap_or(i64::MAX)
}

/// Substring filters use a LIKE pattern; `%` and `_` in the fragment are
/// escaped so they match literally.
fn contains_pattern(fragment: &str) -> String {
    let escaped = fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");

    format!("%{}%", escaped)
}
