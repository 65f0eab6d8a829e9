use serde::{Deserialize, Serialize};

use super::ValidationError;

/// 利用者ID - ストレージが自動採番する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 書籍ID - ストレージが自動採番する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(i64);

impl BookId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 貸出記録ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BorrowId(i64);

impl BorrowId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// 表示名（利用者名・書籍名で共用）
///
/// 不変条件：空文字列ではない。
/// `parse` を通さずに作成できないため、永続化される名前は常に妥当。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// リクエストの値から名前を作成する
    ///
    /// 値がない場合は `NameRequired`、空文字列の場合は `NameEmpty`。
    /// 前後の空白は保持する（入力をそのまま保存する）。
    pub fn parse(value: Option<String>) -> Result<Self, ValidationError> {
        match value {
            None => Err(ValidationError::NameRequired),
            Some(name) if name.is_empty() => Err(ValidationError::NameEmpty),
            Some(name) => Ok(Self(name)),
        }
    }

    /// ストレージから読み込んだ値を復元する
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// 返却時の評価（1〜10）
///
/// 不変条件：1以上10以下。
/// 型システムでこの制約を強制し、範囲外の値を作成できないようにする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserScore(u8);

impl UserScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// リクエストの値から評価を作成する
    pub fn parse(value: Option<i64>) -> Result<Self, ValidationError> {
        let value = value.ok_or(ValidationError::ScoreRequired)?;
        Self::try_from(value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for UserScore {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::ScoreOutOfRange(value))
        }
    }
}

impl From<UserScore> for i64 {
    fn from(score: UserScore) -> Self {
        score.0 as i64
    }
}
