use crate::domain::{BookId, Name, UserScore, book::Book};
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result};
use async_trait::async_trait;
use std::sync::Arc;

use super::store::LibraryStore;

/// In-memory implementation of BookRepository
pub struct BookRepository {
    store: Arc<LibraryStore>,
}

impl BookRepository {
    pub fn new(store: Arc<LibraryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn list(&self) -> Result<Vec<Book>> {
        Ok(self.store.lock().books.clone())
    }

    async fn find_by_id(&self, book_id: BookId) -> Result<Option<Book>> {
        let tables = self.store.lock();
        Ok(tables.books.iter().find(|b| b.id == book_id).cloned())
    }

    async fn create(&self, name: Name) -> Result<Book> {
        let mut tables = self.store.lock();
        let book = Book {
            id: tables.next_book_id(),
            name,
        };
        tables.books.push(book.clone());
        Ok(book)
    }

    async fn find_scores(&self, book_id: BookId) -> Result<Vec<Option<UserScore>>> {
        let tables = self.store.lock();
        Ok(tables
            .borrows
            .iter()
            .filter(|b| b.core().book_id == book_id)
            .map(|b| b.user_score())
            .collect())
    }
}
