use crate::domain::{
    BookId, BorrowId, InconsistentBorrow, UserId, UserScore,
    borrow::{Borrow, BorrowCore},
};
use sqlx::{Row, postgres::PgRow};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// SMALLINTの評価を値オブジェクトに変換する
///
/// CHECK制約により範囲外の値は保存されないが、読み込み時にも検証する。
pub(super) fn map_score(raw: Option<i16>) -> Result<Option<UserScore>, BoxError> {
    raw.map(|value| UserScore::try_from(value as i64).map_err(|e| Box::new(e) as BoxError))
        .transpose()
}

/// borrowsテーブルの行をBorrowに変換する
pub(super) fn map_row_to_borrow(row: &PgRow) -> Result<Borrow, BoxError> {
    let core = BorrowCore {
        borrow_id: BorrowId::new(row.get("id")),
        user_id: UserId::new(row.get("user_id")),
        book_id: BookId::new(row.get("book_id")),
        borrowed_at: row.get("borrow_date"),
    };

    let user_score = map_score(row.get("user_score"))?;

    Borrow::from_parts(core, row.get("return_date"), user_score)
        .map_err(|e: InconsistentBorrow| Box::new(e) as BoxError)
}
