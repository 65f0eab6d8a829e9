mod catalog_service;
mod dependencies;
mod errors;
mod lending_service;
mod membership_service;

pub use catalog_service::{create_book, get_book, list_books};
pub use dependencies::ServiceDependencies;
pub use errors::{LibraryApplicationError, Result};
pub use lending_service::{borrow_book, return_book};
pub use membership_service::{create_user, get_user, list_users};
