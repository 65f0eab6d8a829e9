use crate::domain::{
    BookId, BorrowId, UserId,
    book::Book,
    borrow::Borrow,
    user::User,
};
use std::sync::{Mutex, MutexGuard};

/// インメモリのテーブル群
#[derive(Debug, Default)]
pub(super) struct Tables {
    pub users: Vec<User>,
    pub books: Vec<Book>,
    pub borrows: Vec<Borrow>,
    next_user_id: i64,
    next_book_id: i64,
    next_borrow_id: i64,
}

impl Tables {
    pub fn next_user_id(&mut self) -> UserId {
        self.next_user_id += 1;
        UserId::new(self.next_user_id)
    }

    pub fn next_book_id(&mut self) -> BookId {
        self.next_book_id += 1;
        BookId::new(self.next_book_id)
    }

    pub fn next_borrow_id(&mut self) -> BorrowId {
        self.next_borrow_id += 1;
        BorrowId::new(self.next_borrow_id)
    }
}

/// 3つのリポジトリが共有するインメモリストア
///
/// 全テーブルを1つのロックで保護する。
/// 貸出中の確認と作成のような複合操作もロックを保持したまま行うため不可分。
/// IDは1から採番する。
#[derive(Debug, Default)]
pub struct LibraryStore {
    tables: Mutex<Tables>,
}

impl LibraryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn lock(&self) -> MutexGuard<'_, Tables> {
        // 各操作の書き込みは1回のみ。poison後も内容は一貫している
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
