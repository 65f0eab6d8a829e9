use crate::domain::{BookId, Name, UserScore, book::Book};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 書籍リポジトリポート
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// 全書籍を取得する（ID昇順）
    async fn list(&self) -> Result<Vec<Book>>;

    /// IDで書籍を取得する
    async fn find_by_id(&self, book_id: BookId) -> Result<Option<Book>>;

    /// 書籍を作成する
    ///
    /// IDはストレージが採番する。
    async fn create(&self, name: Name) -> Result<Book>;

    /// 書籍の全貸出記録の評価を取得する
    ///
    /// 貸出中の記録は `None` として含まれる。
    async fn find_scores(&self, book_id: BookId) -> Result<Vec<Option<UserScore>>>;
}
