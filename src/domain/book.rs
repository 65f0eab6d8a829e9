use serde::{Deserialize, Serialize};

use super::{BookId, Name, UserScore};

/// 評価がまだ1件もないことを表す値
///
/// 平均0点とは区別される。
pub const NO_SCORE: f64 = -1.0;

/// 書籍
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub name: Name,
}

/// 評価付きの書籍（詳細表示用）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredBook {
    pub id: BookId,
    pub name: Name,
    pub score: f64,
}

impl ScoredBook {
    /// 書籍と、その書籍の全貸出記録の評価から作成する
    pub fn new(book: Book, scores: &[Option<UserScore>]) -> Self {
        Self {
            id: book.id,
            name: book.name,
            score: average_score(scores),
        }
    }
}

/// 純粋関数：平均評価を計算する
///
/// 評価のない（貸出中の）記録は除外する。
/// 評価が1件もなければ `NO_SCORE`、あれば小数点以下2桁に四捨五入した平均。
pub fn average_score(scores: &[Option<UserScore>]) -> f64 {
    let (sum, count) = scores
        .iter()
        .flatten()
        .fold((0u64, 0u64), |(sum, count), score| {
            (sum + score.value() as u64, count + 1)
        });

    if count == 0 {
        return NO_SCORE;
    }

    round_to_hundredths(sum as f64 / count as f64)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(value: i64) -> Option<UserScore> {
        Some(UserScore::try_from(value).unwrap())
    }

    #[test]
    fn test_average_score_without_scores_is_sentinel() {
        assert_eq!(average_score(&[]), NO_SCORE);
        // 貸出中の記録のみ
        assert_eq!(average_score(&[None, None]), NO_SCORE);
    }

    #[test]
    fn test_average_score_ignores_open_borrows() {
        assert_eq!(average_score(&[score(8), None]), 8.0);
        assert_eq!(average_score(&[None, score(4), score(6), None]), 5.0);
    }

    #[test]
    fn test_average_score_rounds_to_two_decimals() {
        // 10 / 3 = 3.333...
        assert_eq!(average_score(&[score(1), score(4), score(5)]), 3.33);
        // 20 / 3 = 6.666...
        assert_eq!(average_score(&[score(6), score(7), score(7)]), 6.67);
        // 中間値は0から遠い方へ丸める
        assert_eq!(round_to_hundredths(0.875), 0.88);
    }

    #[test]
    fn test_scored_book_carries_identity() {
        let book = Book {
            id: BookId::new(3),
            name: Name::from_stored("Dune".to_string()),
        };

        let scored = ScoredBook::new(book, &[score(9), score(8)]);

        assert_eq!(scored.id, BookId::new(3));
        assert_eq!(scored.name.as_str(), "Dune");
        assert_eq!(scored.score, 8.5);
    }
}
