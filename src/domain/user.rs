use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, Name, UserId, UserScore};

/// 利用者
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: Name,
}

/// 利用者の貸出記録1件（書籍名付き）
///
/// 利用者詳細の貸出履歴を組み立てるための読み取り専用ビュー。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowHistoryEntry {
    pub book_id: BookId,
    pub book_name: Name,
    pub returned_at: Option<DateTime<Utc>>,
    pub user_score: Option<UserScore>,
}

/// 返却済みの書籍
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PastBook {
    pub name: Name,
    pub user_score: Option<UserScore>,
}

/// 貸出中の書籍
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentBook {
    pub id: BookId,
    pub name: Name,
}

/// 利用者の貸出履歴
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BorrowHistory {
    pub past: Vec<PastBook>,
    pub present: Vec<PresentBook>,
}

/// 利用者と貸出履歴
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithHistory {
    pub user: User,
    pub books: BorrowHistory,
}

/// 純粋関数：貸出記録を返却済み・貸出中に振り分ける
///
/// 返却日の有無で判定する。各区分内の順序は入力順を保つ。
pub fn partition_history(entries: Vec<BorrowHistoryEntry>) -> BorrowHistory {
    let mut history = BorrowHistory::default();

    for entry in entries {
        match entry.returned_at {
            Some(_) => history.past.push(PastBook {
                name: entry.book_name,
                user_score: entry.user_score,
            }),
            None => history.present.push(PresentBook {
                id: entry.book_id,
                name: entry.book_name,
            }),
        }
    }

    history
}
