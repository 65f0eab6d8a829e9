pub mod book_repository;
pub mod borrow_repository;
pub mod user_repository;

pub use book_repository::BookRepository;
pub use borrow_repository::{BorrowRepository, OpenOutcome};
pub use user_repository::UserRepository;
