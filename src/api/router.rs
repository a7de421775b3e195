use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use super::accounts;
use super::health;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .route("/users", post(accounts::create_account))
        .route("/users", get(accounts::list_accounts))
        // /verify before /{id} so the literal segment is not swallowed
        .route("/users/verify", post(accounts::verify_credentials))
        .route("/users/{id}", get(accounts::get_account))
        .route("/users/{id}", put(accounts::update_account))
        .route("/users/{id}", delete(accounts::delete_account))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
