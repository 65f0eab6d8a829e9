use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, BorrowId, CloseBorrowError, InconsistentBorrow, UserId, UserScore};

// ============================================================================
// 型安全な状態パターン
// ============================================================================

/// 貸出記録の共通フィールド
///
/// 作成後に変更されない。利用者・書籍への参照はIDのみ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowCore {
    pub borrow_id: BorrowId,
    pub user_id: UserId,
    pub book_id: BookId,
    pub borrowed_at: DateTime<Utc>,
}

/// 貸出中状態
///
/// ビジネスルール：
/// - 返却日・評価を持たない
/// - 同じ書籍に対して同時に1件まで
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenBorrow {
    #[serde(flatten)]
    pub core: BorrowCore,
}

impl std::ops::Deref for OpenBorrow {
    type Target = BorrowCore;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

/// 返却済み状態
///
/// ビジネスルール：
/// - returned_at と user_score が必須（型で保証）
/// - 以後の操作不可
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedBorrow {
    #[serde(flatten)]
    pub core: BorrowCore,
    pub returned_at: DateTime<Utc>,
    pub user_score: UserScore,
}

impl std::ops::Deref for ClosedBorrow {
    type Target = BorrowCore;

    fn deref(&self) -> &Self::Target {
        &self.core
    }
}

/// 貸出記録の統合型
///
/// 遷移は Open → Closed の一方向のみ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum Borrow {
    Open(OpenBorrow),
    Closed(ClosedBorrow),
}

impl Borrow {
    pub fn core(&self) -> &BorrowCore {
        match self {
            Borrow::Open(open) => &open.core,
            Borrow::Closed(closed) => &closed.core,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Borrow::Open(_))
    }

    pub fn returned_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Borrow::Open(_) => None,
            Borrow::Closed(closed) => Some(closed.returned_at),
        }
    }

    pub fn user_score(&self) -> Option<UserScore> {
        match self {
            Borrow::Open(_) => None,
            Borrow::Closed(closed) => Some(closed.user_score),
        }
    }

    /// ストレージの列の値から貸出記録を復元する
    ///
    /// 返却日と評価は両方あるか、両方ないかのどちらか。
    pub fn from_parts(
        core: BorrowCore,
        returned_at: Option<DateTime<Utc>>,
        user_score: Option<UserScore>,
    ) -> Result<Self, InconsistentBorrow> {
        match (returned_at, user_score) {
            (None, None) => Ok(Borrow::Open(OpenBorrow { core })),
            (Some(returned_at), Some(user_score)) => Ok(Borrow::Closed(ClosedBorrow {
                core,
                returned_at,
                user_score,
            })),
            _ => Err(InconsistentBorrow {
                borrow_id: core.borrow_id.value(),
            }),
        }
    }
}

/// 純粋関数：貸出を開始する
///
/// 貸出中の記録が他にないことの確認はストレージ側の責務
/// （確認と作成を1回の操作で行う必要があるため）。
pub fn open_borrow(
    borrow_id: BorrowId,
    user_id: UserId,
    book_id: BookId,
    borrowed_at: DateTime<Utc>,
) -> OpenBorrow {
    OpenBorrow {
        core: BorrowCore {
            borrow_id,
            user_id,
            book_id,
            borrowed_at,
        },
    }
}

/// 純粋関数：書籍を返却する
///
/// 返却日と評価を同時に設定する。返却済みの記録は再度返却できない。
pub fn close_borrow(
    borrow: Borrow,
    returned_at: DateTime<Utc>,
    user_score: UserScore,
) -> Result<ClosedBorrow, CloseBorrowError> {
    match borrow {
        Borrow::Open(open) => Ok(ClosedBorrow {
            core: open.core,
            returned_at,
            user_score,
        }),
        Borrow::Closed(_) => Err(CloseBorrowError::AlreadyClosed),
    }
}
