pub mod book_repository;
pub mod borrow_repository;
pub mod store;
pub mod user_repository;

pub use book_repository::BookRepository;
pub use borrow_repository::BorrowRepository;
pub use store::LibraryStore;
pub use user_repository::UserRepository;
