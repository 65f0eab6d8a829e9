use crate::domain::{
    BookId, Name,
    book::{Book, ScoredBook},
};

use super::dependencies::ServiceDependencies;
use super::errors::{LibraryApplicationError, Result};

/// 全書籍を取得する
///
/// 一覧では評価を計算しない。
pub async fn list_books(deps: &ServiceDependencies) -> Result<Vec<Book>> {
    deps.book_repository
        .list()
        .await
        .map_err(LibraryApplicationError::BookRepositoryError)
}

/// 書籍を評価付きで取得する
///
/// 評価は返却済みの貸出記録の平均（評価がなければ -1）。
pub async fn get_book(deps: &ServiceDependencies, book_id: BookId) -> Result<ScoredBook> {
    let book = deps
        .book_repository
        .find_by_id(book_id)
        .await
        .map_err(LibraryApplicationError::BookRepositoryError)?
        .ok_or(LibraryApplicationError::BookNotFound)?;

    let scores = deps
        .book_repository
        .find_scores(book_id)
        .await
        .map_err(LibraryApplicationError::BookRepositoryError)?;

    Ok(ScoredBook::new(book, &scores))
}

/// 書籍を登録する
///
/// 名前が不正な場合は書き込みを行わずにエラーを返す。
pub async fn create_book(deps: &ServiceDependencies, name: Option<String>) -> Result<Book> {
    let name = Name::parse(name)?;

    let book = deps
        .book_repository
        .create(name)
        .await
        .map_err(LibraryApplicationError::BookRepositoryError)?;

    tracing::info!(book_id = book.id.value(), "book created");
    Ok(book)
}
