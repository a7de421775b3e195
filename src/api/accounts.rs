//! Account management endpoints
//!
//! Every outward account view goes through [`AccountResponse`], which has no
//! hash or password field to begin with; a credential can not leak here even
//! if a serializer is misconfigured upstream.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::account::repository::{AccountFilter, Pagination, DEFAULT_PAGE_LIMIT};
use crate::domain::Account;
use crate::infrastructure::account::{CreateAccountRequest, UpdateAccountRequest};

/// Request to create an account. Unknown fields are discarded by serde.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccountApiRequest {
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub middlename: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request to update an account; every field optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAccountApiRequest {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub middlename: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Credential verification request
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyApiRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Sanitized account view - carries no credential material by construction
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub middlename: String,
    pub email: String,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id().as_i64(),
            firstname: account.firstname().to_string(),
            lastname: account.lastname().to_string(),
            middlename: account.middlename().to_string(),
            email: account.email().to_string(),
        }
    }
}

/// List query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAccountsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub firstname: Option<String>,
    pub email: Option<String>,
}

/// List response
#[derive(Debug, Clone, Serialize)]
pub struct ListAccountsResponse {
    pub users: Vec<AccountResponse>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

/// Update response with confirmation message
#[derive(Debug, Clone, Serialize)]
pub struct UpdateAccountResponse {
    pub message: String,
    pub user: AccountResponse,
}

/// Plain confirmation message
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Verification result
#[derive(Debug, Clone, Serialize)]
pub struct VerifyResponse {
    #[serde(rename = "isValid")]
    pub is_valid: bool,
}

/// POST /users
pub async fn create_account(
    State(state): State<AppState>,
    Json(request): Json<CreateAccountApiRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    debug!(email = %request.email, "Creating account");

    let account = state
        .account_service
        .create(CreateAccountRequest {
            firstname: request.firstname,
            lastname: request.lastname,
            middlename: request.middlename,
            email: request.email,
            password: request.password,
        })
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(&account))))
}

/// GET /users
pub async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<ListAccountsQuery>,
) -> Result<Json<ListAccountsResponse>, ApiError> {
    let pagination = Pagination::new(
        query.page.unwrap_or(1),
        query.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
    );

    let mut filter = AccountFilter::new();
    filter.firstname = query.firstname;
    filter.email = query.email;

    debug!(page = pagination.page, limit = pagination.limit, "Listing accounts");

    let page = state
        .account_service
        .list(filter, pagination)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ListAccountsResponse {
        users: page.accounts.iter().map(AccountResponse::from).collect(),
        total: page.total,
        page: pagination.page,
        limit: pagination.limit,
    }))
}

/// GET /users/{id}
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AccountResponse>, ApiError> {
    debug!(id = %id, "Getting account");

    let account = state
        .account_service
        .get(&id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(AccountResponse::from(&account)))
}

/// PUT /users/{id}
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAccountApiRequest>,
) -> Result<Json<UpdateAccountResponse>, ApiError> {
    debug!(id = %id, "Updating account");

    let account = state
        .account_service
        .update(
            &id,
            UpdateAccountRequest {
                firstname: request.firstname,
                lastname: request.lastname,
                middlename: request.middlename,
                email: request.email,
                password: request.password,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UpdateAccountResponse {
        message: "User updated successfully".to_string(),
        user: AccountResponse::from(&account),
    }))
}

/// DELETE /users/{id}
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(id = %id, "Deleting account");

    let deleted = state
        .account_service
        .delete(&id)
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::not_found("User not found"));
    }

    Ok(Json(MessageResponse {
        message: "User deleted successfully.".to_string(),
    }))
}

/// POST /users/verify
pub async fn verify_credentials(
    State(state): State<AppState>,
    Json(request): Json<VerifyApiRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    debug!(email = %request.email, "Verifying credentials");

    let is_valid = state
        .account_service
        .verify_credentials(&request.email, &request.password)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(VerifyResponse { is_valid }))
}
