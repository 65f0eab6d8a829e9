pub mod book;
pub mod borrow;
pub mod commands;
pub mod errors;
pub mod user;
pub mod value_objects;

pub use errors::*;
pub use value_objects::*;
