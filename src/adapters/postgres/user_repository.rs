use crate::domain::{
    BookId, Name, UserId,
    user::{BorrowHistoryEntry, User},
};
use crate::ports::user_repository::{Result, UserRepository as UserRepositoryTrait};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use super::rows::map_score;

fn map_row_to_user(row: &PgRow) -> User {
    User {
        id: UserId::new(row.get("id")),
        name: Name::from_stored(row.get("name")),
    }
}

/// UserRepositoryのPostgreSQL実装
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// PostgreSQLコネクションプールから新しいUserRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn list(&self) -> Result<Vec<User>> {
        let rows = sqlx::query("SELECT id, name FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(map_row_to_user).collect())
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, name FROM users WHERE id = $1")
            .bind(user_id.value())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(map_row_to_user))
    }

    async fn create(&self, name: Name) -> Result<User> {
        let row = sqlx::query("INSERT INTO users (name) VALUES ($1) RETURNING id, name")
            .bind(name.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(map_row_to_user(&row))
    }

    /// 貸出記録と書籍を結合して取得（貸出記録ID昇順）
    async fn find_borrow_history(&self, user_id: UserId) -> Result<Vec<BorrowHistoryEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT
                br.book_id,
                b.name AS book_name,
                br.return_date,
                br.user_score
            FROM borrows br
            JOIN books b ON b.id = br.book_id
            WHERE br.user_id = $1
            ORDER BY br.id
            "#,
        )
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<BorrowHistoryEntry> {
                Ok(BorrowHistoryEntry {
                    book_id: BookId::new(row.get("book_id")),
                    book_name: Name::from_stored(row.get("book_name")),
                    returned_at: row.get("return_date"),
                    user_score: map_score(row.get("user_score"))?,
                })
            })
            .collect()
    }
}
