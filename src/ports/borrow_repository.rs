use crate::domain::{
    BookId, UserId, UserScore,
    borrow::{ClosedBorrow, OpenBorrow},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 貸出開始の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// 新しい貸出記録を作成した
    Opened(OpenBorrow),
    /// 書籍は既に貸出中（記録は作成していない）
    AlreadyBorrowed,
}

/// 貸出記録リポジトリポート
///
/// 「1冊の書籍に貸出中の記録は同時に1件まで」という不変条件は
/// このポートの実装が保証する。
#[async_trait]
pub trait BorrowRepository: Send + Sync {
    /// 貸出中でなければ新しい貸出記録を作成する
    ///
    /// 貸出中の確認と作成は1回の不可分な操作として行う。
    /// 並行して呼ばれても、同じ書籍に2件目の貸出中記録は作成されない。
    async fn open(
        &self,
        user_id: UserId,
        book_id: BookId,
        borrowed_at: DateTime<Utc>,
    ) -> Result<OpenOutcome>;

    /// 利用者・書籍の組に対する貸出中の記録を返却済みにする
    ///
    /// 返却日と評価は1回の書き込みで設定する。
    /// 貸出中の記録がなければ `None`（返却済みの記録は変更しない）。
    async fn close(
        &self,
        user_id: UserId,
        book_id: BookId,
        returned_at: DateTime<Utc>,
        user_score: UserScore,
    ) -> Result<Option<ClosedBorrow>>;

    /// 書籍の貸出中の記録を取得する
    ///
    /// 貸出状況を確認するための参照用。貸出・返却の処理はこれを使わず、
    /// `open` / `close` の結果だけで判断する。
    async fn find_open_by_book(&self, book_id: BookId) -> Result<Option<OpenBorrow>>;
}
