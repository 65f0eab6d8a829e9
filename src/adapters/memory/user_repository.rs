use crate::domain::{
    Name, UserId,
    user::{BorrowHistoryEntry, User},
};
use crate::ports::user_repository::{Result, UserRepository as UserRepositoryTrait};
use async_trait::async_trait;
use std::sync::Arc;

use super::store::LibraryStore;

/// In-memory implementation of UserRepository
pub struct UserRepository {
    store: Arc<LibraryStore>,
}

impl UserRepository {
    pub fn new(store: Arc<LibraryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.store.lock().users.clone())
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>> {
        let tables = self.store.lock();
        Ok(tables.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn create(&self, name: Name) -> Result<User> {
        let mut tables = self.store.lock();
        let user = User {
            id: tables.next_user_id(),
            name,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    /// Join borrows with book names, keeping insertion order
    async fn find_borrow_history(&self, user_id: UserId) -> Result<Vec<BorrowHistoryEntry>> {
        let tables = self.store.lock();

        let entries = tables
            .borrows
            .iter()
            .filter(|b| b.core().user_id == user_id)
            .filter_map(|borrow| {
                let book_id = borrow.core().book_id;
                tables
                    .books
                    .iter()
                    .find(|book| book.id == book_id)
                    .map(|book| BorrowHistoryEntry {
                        book_id,
                        book_name: book.name.clone(),
                        returned_at: borrow.returned_at(),
                        user_score: borrow.user_score(),
                    })
            })
            .collect();

        Ok(entries)
    }
}
