use crate::application::library::{self, ServiceDependencies};
use crate::domain::{
    BookId, UserId,
    commands::{BorrowBook, ReturnBook},
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{
        BookResponse, CreateBookRequest, CreateUserRequest, ReturnBookRequest,
        ScoredBookResponse, UserDetailResponse, UserResponse,
    },
};

// ============================================================================
// State
// ============================================================================

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

// ============================================================================
// Books
// ============================================================================

/// GET /books - 書籍一覧（評価なし）
pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let books = library::list_books(&state.service_deps).await?;

    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// GET /books/:id - 書籍詳細（平均評価付き）
///
/// 評価がまだない場合、scoreは -1。
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ScoredBookResponse>, ApiError> {
    let Path(book_id) = path?;
    let book = library::get_book(&state.service_deps, BookId::new(book_id)).await?;

    Ok(Json(ScoredBookResponse::from(book)))
}

/// POST /books - 書籍を登録
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateBookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let Json(req) = body?;

    let book = library::create_book(&state.service_deps, req.name).await?;

    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

// ============================================================================
// Users
// ============================================================================

/// GET /users - 利用者一覧（貸出履歴なし）
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = library::list_users(&state.service_deps).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /users/:id - 利用者詳細（返却済み・貸出中の書籍付き）
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<UserDetailResponse>, ApiError> {
    let Path(user_id) = path?;
    let user = library::get_user(&state.service_deps, UserId::new(user_id)).await?;

    Ok(Json(UserDetailResponse::from(user)))
}

/// POST /users - 利用者を登録
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let Json(req) = body?;

    let user = library::create_user(&state.service_deps, req.name).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

// ============================================================================
// Lending
// ============================================================================

/// POST /users/:user_id/borrow/:book_id - 書籍を借りる
///
/// 強制されるビジネスルール:
/// - 利用者と書籍が存在すること
/// - 書籍が貸出中でないこと
pub async fn borrow_book(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path((user_id, book_id)) = path?;

    let cmd = BorrowBook {
        user_id: UserId::new(user_id),
        book_id: BookId::new(book_id),
        borrowed_at: chrono::Utc::now(),
    };

    library::borrow_book(&state.service_deps, cmd).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /users/:user_id/return/:book_id - 書籍を返却
///
/// 強制されるビジネスルール:
/// - 評価が1〜10の整数であること
/// - 利用者がその書籍を貸出中であること
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(i64, i64)>, PathRejection>,
    body: Result<Json<ReturnBookRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Path((user_id, book_id)) = path?;
    let Json(req) = body?;

    let cmd = ReturnBook {
        user_id: UserId::new(user_id),
        book_id: BookId::new(book_id),
        returned_at: chrono::Utc::now(),
        score: req.score,
    };

    library::return_book(&state.service_deps, cmd).await?;

    Ok(StatusCode::NO_CONTENT)
}
