use thiserror::Error;

/// 入力値のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 名前が指定されていない
    #[error("\"name\" is required")]
    NameRequired,

    /// 名前が空文字列
    #[error("\"name\" is not allowed to be empty")]
    NameEmpty,

    /// 評価が指定されていない
    #[error("\"score\" is required")]
    ScoreRequired,

    /// 評価が1〜10の範囲外
    #[error("\"score\" must be between 1 and 10, got {0}")]
    ScoreOutOfRange(i64),

    /// リクエストボディの形式が不正
    #[error("{0}")]
    MalformedBody(String),

    /// パスパラメータが整数として解釈できない
    #[error("{0}")]
    MalformedPath(String),
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CloseBorrowError {
    /// 既に返却済み
    #[error("borrow is already closed")]
    AlreadyClosed,
}

/// ストレージの行から貸出記録を復元できない
///
/// 返却日と評価は常に同時に設定されるため、片方だけの行は不整合。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("inconsistent borrow record {borrow_id}: return date and score must be set together")]
pub struct InconsistentBorrow {
    pub borrow_id: i64,
}
