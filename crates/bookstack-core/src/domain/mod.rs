//! Domain entities - the core business objects.

mod book;

mod user;

pub use book::{Author, Book, NewBook, ensure_owner};
pub use user::{NewUser, User};
