use crate::domain::{UserScore, borrow::OpenBorrow, commands::*};
use crate::ports::OpenOutcome;

use super::dependencies::ServiceDependencies;
use super::errors::{LibraryApplicationError, Result};

/// 書籍を借りる
///
/// ビジネスルール：
/// - 利用者が存在すること
/// - 書籍が存在すること
/// - 書籍が貸出中でないこと
///
/// # 一貫性保証
///
/// 貸出中かどうかの確認と貸出記録の作成は、リポジトリの1回の操作
/// （`BorrowRepository::open`）で行う。同じ書籍への並行リクエストのうち
/// 成功するのは1件だけで、残りは `BookAlreadyBorrowed` になる。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `cmd` - 貸出コマンド
///
/// # 戻り値
/// 作成された貸出中の記録
pub async fn borrow_book(deps: &ServiceDependencies, cmd: BorrowBook) -> Result<OpenBorrow> {
    // 1. 利用者の存在確認
    deps.user_repository
        .find_by_id(cmd.user_id)
        .await
        .map_err(LibraryApplicationError::UserRepositoryError)?
        .ok_or(LibraryApplicationError::UserNotFound)?;

    // 2. 書籍の存在確認
    deps.book_repository
        .find_by_id(cmd.book_id)
        .await
        .map_err(LibraryApplicationError::BookRepositoryError)?
        .ok_or(LibraryApplicationError::BookNotFound)?;

    // 3. 貸出中でなければ貸出記録を作成（不可分）
    let outcome = deps
        .borrow_repository
        .open(cmd.user_id, cmd.book_id, cmd.borrowed_at)
        .await
        .map_err(LibraryApplicationError::BorrowRepositoryError)?;

    match outcome {
        OpenOutcome::Opened(borrow) => {
            tracing::info!(
                borrow_id = borrow.borrow_id.value(),
                user_id = cmd.user_id.value(),
                book_id = cmd.book_id.value(),
                "book borrowed"
            );
            Ok(borrow)
        }
        OpenOutcome::AlreadyBorrowed => {
            tracing::warn!(
                user_id = cmd.user_id.value(),
                book_id = cmd.book_id.value(),
                "book is already borrowed"
            );
            Err(LibraryApplicationError::BookAlreadyBorrowed)
        }
    }
}

/// 書籍を返却する
///
/// ビジネスルール：
/// - 評価が1〜10の整数であること
/// - 利用者・書籍の組に対する貸出中の記録があること
/// - 返却日と評価は同時に設定される（返却済みの記録は再返却不可）
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `cmd` - 返却コマンド
pub async fn return_book(deps: &ServiceDependencies, cmd: ReturnBook) -> Result<()> {
    // 1. 評価の検証（不正なら書き込みを行わない）
    let score = UserScore::parse(cmd.score)?;

    // 2. 貸出中の記録を返却済みにする（1回の書き込み）
    let closed = deps
        .borrow_repository
        .close(cmd.user_id, cmd.book_id, cmd.returned_at, score)
        .await
        .map_err(LibraryApplicationError::BorrowRepositoryError)?
        .ok_or(LibraryApplicationError::ActiveBorrowNotFound)?;

    tracing::info!(
        borrow_id = closed.borrow_id.value(),
        user_id = cmd.user_id.value(),
        book_id = cmd.book_id.value(),
        user_score = closed.user_score.value(),
        "book returned"
    );

    Ok(())
}
