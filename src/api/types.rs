use serde::{Deserialize, Deserializer, Serialize, de};

use crate::domain::{
    book::{Book, ScoredBook},
    user::{PastBook, PresentBook, User, UserWithHistory},
};

/// 書籍登録リクエスト（POST /books）
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateBookRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// 利用者登録リクエスト（POST /users）
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// 返却リクエスト（POST /users/:user_id/return/:book_id）
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReturnBookRequest {
    #[serde(default, deserialize_with = "integral_number")]
    pub score: Option<i64>,
}

/// JSONの数値を整数として読む
///
/// `8.0` のように小数部が0の数値は整数として受け付ける。文字列は受け付けない。
fn integral_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<serde_json::Number>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Some(value) = number.as_i64() {
        return Ok(Some(value));
    }

    match number.as_f64() {
        Some(value) if value.is_finite() && value.fract() == 0.0 => Ok(Some(value as i64)),
        _ => Err(de::Error::custom(format!(
            "\"score\" must be an integer, got {number}"
        ))),
    }
}

/// 書籍レスポンス（GET /books, POST /books）
#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: i64,
    pub name: String,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.value(),
            name: book.name.into_inner(),
        }
    }
}

/// 評価付き書籍レスポンス（GET /books/:id）
///
/// 評価がない場合、scoreは -1。
#[derive(Debug, Serialize, Deserialize)]
pub struct ScoredBookResponse {
    pub id: i64,
    pub name: String,
    pub score: f64,
}

impl From<ScoredBook> for ScoredBookResponse {
    fn from(book: ScoredBook) -> Self {
        Self {
            id: book.id.value(),
            name: book.name.into_inner(),
            score: book.score,
        }
    }
}

/// 利用者レスポンス（GET /users, POST /users）
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.value(),
            name: user.name.into_inner(),
        }
    }
}

/// 返却済みの書籍
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PastBookResponse {
    pub name: String,
    pub user_score: Option<u8>,
}

impl From<PastBook> for PastBookResponse {
    fn from(book: PastBook) -> Self {
        Self {
            name: book.name.into_inner(),
            user_score: book.user_score.map(|s| s.value()),
        }
    }
}

/// 貸出中の書籍
#[derive(Debug, Serialize, Deserialize)]
pub struct PresentBookResponse {
    pub id: i64,
    pub name: String,
}

impl From<PresentBook> for PresentBookResponse {
    fn from(book: PresentBook) -> Self {
        Self {
            id: book.id.value(),
            name: book.name.into_inner(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserBooksResponse {
    pub past: Vec<PastBookResponse>,
    pub present: Vec<PresentBookResponse>,
}

/// 利用者詳細レスポンス（GET /users/:id）
#[derive(Debug, Serialize, Deserialize)]
pub struct UserDetailResponse {
    pub id: i64,
    pub name: String,
    pub books: UserBooksResponse,
}

impl From<UserWithHistory> for UserDetailResponse {
    fn from(detail: UserWithHistory) -> Self {
        Self {
            id: detail.user.id.value(),
            name: detail.user.name.into_inner(),
            books: UserBooksResponse {
                past: detail.books.past.into_iter().map(Into::into).collect(),
                present: detail.books.present.into_iter().map(Into::into).collect(),
            },
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_score(body: &str) -> Result<Option<i64>, serde_json::Error> {
        serde_json::from_str::<ReturnBookRequest>(body).map(|req| req.score)
    }

    #[test]
    fn test_return_request_accepts_whole_numbers() {
        assert_eq!(parse_score(r#"{"score": 8}"#).unwrap(), Some(8));
        assert_eq!(parse_score(r#"{"score": 8.0}"#).unwrap(), Some(8));
        // 範囲の検証はサービス側
        assert_eq!(parse_score(r#"{"score": 11}"#).unwrap(), Some(11));
    }

    #[test]
    fn test_return_request_missing_score_is_none() {
        assert_eq!(parse_score("{}").unwrap(), None);
        assert_eq!(parse_score(r#"{"score": null}"#).unwrap(), None);
    }

    #[test]
    fn test_return_request_rejects_fractions_and_strings() {
        assert!(parse_score(r#"{"score": 7.5}"#).is_err());
        assert!(parse_score(r#"{"score": "8"}"#).is_err());
        assert!(parse_score(r#"{"score": true}"#).is_err());
    }
}
