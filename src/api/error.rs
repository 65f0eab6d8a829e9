use crate::application::library::LibraryApplicationError;
use crate::domain::ValidationError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(LibraryApplicationError);

impl From<LibraryApplicationError> for ApiError {
    fn from(err: LibraryApplicationError) -> Self {
        ApiError(err)
    }
}

/// JSONとして解釈できないボディは入力値エラーとして扱う
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(LibraryApplicationError::Validation(
            ValidationError::MalformedBody(rejection.body_text()),
        ))
    }
}

/// IDとして解釈できないパスパラメータも入力値エラーとして扱う
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError(LibraryApplicationError::Validation(
            ValidationError::MalformedPath(rejection.body_text()),
        ))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self.0 {
            // 400 Bad Request - 入力値の不備
            LibraryApplicationError::Validation(ref e) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string())
            }

            // 400 Bad Request - 貸出中の書籍は借りられない
            LibraryApplicationError::BookAlreadyBorrowed => (
                StatusCode::BAD_REQUEST,
                "BOOK_ALREADY_BORROWED",
                "Book is already borrowed".to_string(),
            ),

            // 404 Not Found - リクエストされたリソースが存在しない
            LibraryApplicationError::UserNotFound => (
                StatusCode::NOT_FOUND,
                "USER_NOT_FOUND",
                "User not found".to_string(),
            ),
            LibraryApplicationError::BookNotFound => (
                StatusCode::NOT_FOUND,
                "BOOK_NOT_FOUND",
                "Book not found".to_string(),
            ),
            LibraryApplicationError::ActiveBorrowNotFound => (
                StatusCode::NOT_FOUND,
                "ACTIVE_BORROW_NOT_FOUND",
                "Active borrow record not found".to_string(),
            ),

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            LibraryApplicationError::UserRepositoryError(ref e) => {
                tracing::error!("User repository error: {}", e);
                internal_error()
            }
            LibraryApplicationError::BookRepositoryError(ref e) => {
                tracing::error!("Book repository error: {}", e);
                internal_error()
            }
            LibraryApplicationError::BorrowRepositoryError(ref e) => {
                tracing::error!("Borrow repository error: {}", e);
                internal_error()
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}

fn internal_error() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "Internal Server Error".to_string(),
    )
}
