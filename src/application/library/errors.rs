use crate::domain::ValidationError;
use thiserror::Error;

/// 図書館アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum LibraryApplicationError {
    /// 入力値が不正
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 利用者が存在しない
    #[error("User not found")]
    UserNotFound,

    /// 書籍が存在しない
    #[error("Book not found")]
    BookNotFound,

    /// 書籍は既に貸出中
    #[error("Book is already borrowed")]
    BookAlreadyBorrowed,

    /// 利用者・書籍の組に対する貸出中の記録がない
    #[error("Active borrow record not found")]
    ActiveBorrowNotFound,

    /// UserRepositoryのエラー
    #[error("User repository error")]
    UserRepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// BookRepositoryのエラー
    #[error("Book repository error")]
    BookRepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// BorrowRepositoryのエラー
    #[error("Borrow repository error")]
    BorrowRepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, LibraryApplicationError>;
