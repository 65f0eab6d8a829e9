use chrono::{DateTime, Utc};

use super::{BookId, UserId};

/// コマンド：書籍を借りる
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowBook {
    pub user_id: UserId,
    pub book_id: BookId,
    pub borrowed_at: DateTime<Utc>,
}

/// コマンド：書籍を返却する
///
/// 評価はリクエストの値そのまま。範囲の検証はサービス側で行う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnBook {
    pub user_id: UserId,
    pub book_id: BookId,
    pub returned_at: DateTime<Utc>,
    pub score: Option<i64>,
}
