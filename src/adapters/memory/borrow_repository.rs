use crate::domain::{
    BookId, UserId, UserScore,
    borrow::{self, Borrow, ClosedBorrow, OpenBorrow},
};
use crate::ports::borrow_repository::{
    BorrowRepository as BorrowRepositoryTrait, OpenOutcome, Result,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

use super::store::LibraryStore;

/// Referential integrity violations, mirroring the foreign keys of the SQL schema
#[derive(Debug, Error)]
pub enum MemoryStoreError {
    #[error("user {0} does not exist")]
    MissingUser(i64),
    #[error("book {0} does not exist")]
    MissingBook(i64),
}

/// In-memory implementation of BorrowRepository
///
/// Check-and-insert runs under the store lock, so at most one open borrow
/// per book can ever exist.
pub struct BorrowRepository {
    store: Arc<LibraryStore>,
}

impl BorrowRepository {
    pub fn new(store: Arc<LibraryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BorrowRepositoryTrait for BorrowRepository {
    async fn open(
        &self,
        user_id: UserId,
        book_id: BookId,
        borrowed_at: DateTime<Utc>,
    ) -> Result<OpenOutcome> {
        let mut tables = self.store.lock();

        if !tables.users.iter().any(|u| u.id == user_id) {
            return Err(Box::new(MemoryStoreError::MissingUser(user_id.value())));
        }
        if !tables.books.iter().any(|b| b.id == book_id) {
            return Err(Box::new(MemoryStoreError::MissingBook(book_id.value())));
        }

        let already_borrowed = tables
            .borrows
            .iter()
            .any(|b| b.is_open() && b.core().book_id == book_id);
        if already_borrowed {
            return Ok(OpenOutcome::AlreadyBorrowed);
        }

        let borrow_id = tables.next_borrow_id();
        let open = borrow::open_borrow(borrow_id, user_id, book_id, borrowed_at);
        tables.borrows.push(Borrow::Open(open.clone()));

        Ok(OpenOutcome::Opened(open))
    }

    async fn close(
        &self,
        user_id: UserId,
        book_id: BookId,
        returned_at: DateTime<Utc>,
        user_score: UserScore,
    ) -> Result<Option<ClosedBorrow>> {
        let mut tables = self.store.lock();

        let Some(slot) = tables.borrows.iter_mut().find(|b| {
            matches!(b, Borrow::Open(open) if open.user_id == user_id && open.book_id == book_id)
        }) else {
            return Ok(None);
        };

        let closed = borrow::close_borrow(slot.clone(), returned_at, user_score)?;
        *slot = Borrow::Closed(closed.clone());

        Ok(Some(closed))
    }

    async fn find_open_by_book(&self, book_id: BookId) -> Result<Option<OpenBorrow>> {
        let tables = self.store.lock();
        Ok(tables.borrows.iter().find_map(|b| match b {
            Borrow::Open(open) if open.book_id == book_id => Some(open.clone()),
            _ => None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{BookRepository, UserRepository};
    use crate::domain::Name;
    use crate::ports::{BookRepository as _, UserRepository as _};

    async fn seeded() -> (BorrowRepository, UserId, UserId, BookId) {
        let store = Arc::new(LibraryStore::new());
        let users = UserRepository::new(store.clone());
        let books = BookRepository::new(store.clone());

        let alice = users.create(Name::from_stored("Alice".into())).await.unwrap();
        let bob = users.create(Name::from_stored("Bob".into())).await.unwrap();
        let dune = books.create(Name::from_stored("Dune".into())).await.unwrap();

        (BorrowRepository::new(store), alice.id, bob.id, dune.id)
    }

    #[tokio::test]
    async fn test_open_rejects_second_open_borrow() {
        let (repo, alice, bob, dune) = seeded().await;

        let first = repo.open(alice, dune, Utc::now()).await.unwrap();
        assert!(matches!(first, OpenOutcome::Opened(_)));

        let second = repo.open(bob, dune, Utc::now()).await.unwrap();
        assert_eq!(second, OpenOutcome::AlreadyBorrowed);

        let open = repo.find_open_by_book(dune).await.unwrap().unwrap();
        assert_eq!(open.user_id, alice);
    }

    #[tokio::test]
    async fn test_open_requires_existing_references() {
        let (repo, alice, _, dune) = seeded().await;

        assert!(repo.open(UserId::new(99), dune, Utc::now()).await.is_err());
        assert!(repo.open(alice, BookId::new(99), Utc::now()).await.is_err());
    }

    #[tokio::test]
    async fn test_close_only_matches_open_borrow_of_same_user() {
        let (repo, alice, bob, dune) = seeded().await;
        let score = UserScore::try_from(7).unwrap();
        repo.open(alice, dune, Utc::now()).await.unwrap();

        // 別の利用者は返却できない
        assert!(repo.close(bob, dune, Utc::now(), score).await.unwrap().is_none());

        let closed = repo.close(alice, dune, Utc::now(), score).await.unwrap();
        assert_eq!(closed.map(|c| c.user_score), Some(score));

        // 二重返却はできない
        assert!(repo.close(alice, dune, Utc::now(), score).await.unwrap().is_none());
        assert!(repo.find_open_by_book(dune).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_book_can_be_borrowed_again_after_return() {
        let (repo, alice, bob, dune) = seeded().await;
        let score = UserScore::try_from(9).unwrap();

        repo.open(alice, dune, Utc::now()).await.unwrap();
        repo.close(alice, dune, Utc::now(), score).await.unwrap();

        let reopened = repo.open(bob, dune, Utc::now()).await.unwrap();
        assert!(matches!(reopened, OpenOutcome::Opened(_)));

        let open = repo.find_open_by_book(dune).await.unwrap().unwrap();
        assert_eq!(open.user_id, bob);
    }

    #[tokio::test]
    async fn test_close_targets_open_record_among_returned_ones() {
        let (repo, alice, _, dune) = seeded().await;
        let first = UserScore::try_from(3).unwrap();
        let second = UserScore::try_from(10).unwrap();

        repo.open(alice, dune, Utc::now()).await.unwrap();
        repo.close(alice, dune, Utc::now(), first).await.unwrap();
        let OpenOutcome::Opened(reopened) = repo.open(alice, dune, Utc::now()).await.unwrap()
        else {
            panic!("expected a new borrow");
        };

        let closed = repo
            .close(alice, dune, Utc::now(), second)
            .await
            .unwrap()
            .expect("open borrow should be closed");
        assert_eq!(closed.borrow_id, reopened.borrow_id);
        assert_eq!(closed.user_score, second);

        // 返却済みの記録は書き換えない
        let tables = repo.store.lock();
        let scores: Vec<_> = tables.borrows.iter().map(|b| b.user_score()).collect();
        assert_eq!(scores, vec![Some(first), Some(second)]);
    }
}
