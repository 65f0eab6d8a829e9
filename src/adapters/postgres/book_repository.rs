use crate::domain::{BookId, Name, UserScore, book::Book};
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::rows::map_score;

fn map_row_to_book(row: &PgRow) -> Book {
    Book {
        id: BookId::new(row.get("id")),
        name: Name::from_stored(row.get("name")),
    }
}

/// BookRepositoryのPostgreSQL実装
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    /// PostgreSQLコネクションプールから新しいBookRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn list(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query("SELECT id, name FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(map_row_to_book).collect())
    }

    async fn find_by_id(&self, book_id: BookId) -> Result<Option<Book>> {
        let row = sqlx::query("SELECT id, name FROM books WHERE id = $1")
            .bind(book_id.value())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(map_row_to_book))
    }

    async fn create(&self, name: Name) -> Result<Book> {
        let row = sqlx::query("INSERT INTO books (name) VALUES ($1) RETURNING id, name")
            .bind(name.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(map_row_to_book(&row))
    }

    /// 全貸出記録の評価（貸出中はNULL）
    async fn find_scores(&self, book_id: BookId) -> Result<Vec<Option<UserScore>>> {
        let scores: Vec<Option<i16>> =
            sqlx::query_scalar("SELECT user_score FROM borrows WHERE book_id = $1 ORDER BY id")
                .bind(book_id.value())
                .fetch_all(&self.pool)
                .await?;

        scores.into_iter().map(map_score).collect()
    }
}
