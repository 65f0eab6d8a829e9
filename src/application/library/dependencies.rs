use crate::ports::*;
use std::sync::Arc;

/// サービスの依存関係
///
/// ストレージへのハンドルはここにまとめ、各サービス関数へ引数として渡す。
/// プロセス起動時に1度だけ作成する。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub user_repository: Arc<dyn UserRepository>,
    pub book_repository: Arc<dyn BookRepository>,
    pub borrow_repository: Arc<dyn BorrowRepository>,
}
