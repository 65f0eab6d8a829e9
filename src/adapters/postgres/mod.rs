pub mod book_repository;
pub mod borrow_repository;
pub mod user_repository;

mod rows;

// パブリックに型を再エクスポート
pub use book_repository::BookRepository as PostgresBookRepository;
pub use borrow_repository::BorrowRepository as PostgresBorrowRepository;
pub use user_repository::UserRepository as PostgresUserRepository;
