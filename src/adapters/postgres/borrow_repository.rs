use crate::domain::{
    BookId, UserId, UserScore,
    borrow::{Borrow, ClosedBorrow, OpenBorrow},
};
use crate::ports::borrow_repository::{
    BorrowRepository as BorrowRepositoryTrait, OpenOutcome, Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::rows::map_row_to_borrow;

fn unexpected_state(borrow: &Borrow) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        format!(
            "borrow {} is in an unexpected state",
            borrow.core().borrow_id.value()
        ),
    ))
}

/// BorrowRepositoryのPostgreSQL実装
///
/// 「書籍ごとに貸出中は1件まで」は部分ユニークインデックス
/// `borrows_one_open_per_book` で保証する。
pub struct BorrowRepository {
    pool: PgPool,
}

impl BorrowRepository {
    /// PostgreSQLコネクションプールから新しいBorrowRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BorrowRepositoryTrait for BorrowRepository {
    /// 貸出記録を作成（貸出中の記録があれば何もしない）
    ///
    /// INSERT ... ON CONFLICT DO NOTHING により確認と作成が1文で完結する。
    /// 行が返らなければ既に貸出中。
    async fn open(
        &self,
        user_id: UserId,
        book_id: BookId,
        borrowed_at: DateTime<Utc>,
    ) -> Result<OpenOutcome> {
        let row = sqlx::query(
            r#"
            INSERT INTO borrows (user_id, book_id, borrow_date)
            VALUES ($1, $2, $3)
            ON CONFLICT (book_id) WHERE return_date IS NULL
            DO NOTHING
            RETURNING id, user_id, book_id, borrow_date, return_date, user_score
            "#,
        )
        .bind(user_id.value())
        .bind(book_id.value())
        .bind(borrowed_at)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(OpenOutcome::AlreadyBorrowed);
        };

        match map_row_to_borrow(&row)? {
            Borrow::Open(open) => Ok(OpenOutcome::Opened(open)),
            other => Err(unexpected_state(&other)),
        }
    }

    /// 貸出中の記録に返却日と評価を設定
    ///
    /// `return_date IS NULL` を条件にしたUPDATE 1文のため、
    /// 並行した返却でも更新されるのは1回だけ。
    async fn close(
        &self,
        user_id: UserId,
        book_id: BookId,
        returned_at: DateTime<Utc>,
        user_score: UserScore,
    ) -> Result<Option<ClosedBorrow>> {
        let row = sqlx::query(
            r#"
            UPDATE borrows
            SET return_date = $3, user_score = $4
            WHERE user_id = $1 AND book_id = $2 AND return_date IS NULL
            RETURNING id, user_id, book_id, borrow_date, return_date, user_score
            "#,
        )
        .bind(user_id.value())
        .bind(book_id.value())
        .bind(returned_at)
        .bind(user_score.value() as i16)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        match map_row_to_borrow(&row)? {
            Borrow::Closed(closed) => Ok(Some(closed)),
            other => Err(unexpected_state(&other)),
        }
    }

    async fn find_open_by_book(&self, book_id: BookId) -> Result<Option<OpenBorrow>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, book_id, borrow_date, return_date, user_score
            FROM borrows
            WHERE book_id = $1 AND return_date IS NULL
            "#,
        )
        .bind(book_id.value())
        .fetch_optional(&self.pool)
        .await?;

        match row.as_ref().map(map_row_to_borrow).transpose()? {
            None => Ok(None),
            Some(Borrow::Open(open)) => Ok(Some(open)),
            Some(other) => Err(unexpected_state(&other)),
        }
    }
}
