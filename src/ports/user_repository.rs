use crate::domain::{
    Name, UserId,
    user::{BorrowHistoryEntry, User},
};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 利用者リポジトリポート
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 全利用者を取得する（ID昇順）
    async fn list(&self) -> Result<Vec<User>>;

    /// IDで利用者を取得する
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>>;

    /// 利用者を作成する
    ///
    /// IDはストレージが採番する。
    async fn create(&self, name: Name) -> Result<User>;

    /// 利用者の全貸出記録を書籍名付きで取得する
    ///
    /// 貸出記録ID昇順（作成順）で返す。
    async fn find_borrow_history(&self, user_id: UserId) -> Result<Vec<BorrowHistoryEntry>>;
}
