use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, borrow_book, create_book, create_user, get_book, get_user, list_books, list_users,
    return_book,
};

/// Creates the API router with all library endpoints
///
/// Books:
/// - GET /books, POST /books, GET /books/:id
///
/// Users:
/// - GET /users, POST /users, GET /users/:id
///
/// Lending:
/// - POST /users/:id/borrow/:book_id
/// - POST /users/:id/return/:book_id
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/books", get(list_books).post(create_book))
        .route("/books/:id", get(get_book))
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user))
        .route("/users/:id/borrow/:book_id", post(borrow_book))
        .route("/users/:id/return/:book_id", post(return_book))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
