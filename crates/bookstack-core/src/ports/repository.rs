use async_trait::async_trait;

use crate::domain::{Book, NewBook, NewUser, User};
use crate::error::DomainError;

/// Credential store: persists user accounts.
///
/// Uniqueness of username/email/phone is pre-checked here for friendly
/// error kinds, but the storage-level unique constraints are the actual
/// guarantee under concurrent signups.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Conflicts are reported in priority order:
    /// username, then email, then phone number.
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Resolve a username to exactly one account. Zero or multiple matches
    /// both fail closed with [`DomainError::UserNotFound`].
    async fn find_by_username(&self, username: &str) -> Result<User, DomainError>;

    /// Existence probe used for pre-checks.
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError>;
}

/// Catalog store: persists books and their table-of-contents entries.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Insert a book and its contents in payload order.
    async fn create(&self, book: NewBook) -> Result<Book, DomainError>;

    /// Fetch one book with its contents populated.
    async fn find_by_id(&self, id: i32) -> Result<Book, DomainError>;

    /// Every book in the catalog, contents populated. Unbounded by design.
    async fn list_all(&self) -> Result<Vec<Book>, DomainError>;

    /// Overwrite name and category if `username` owns book `id`. Both
    /// fields are always written; empty strings are valid values.
    async fn update_owned(
        &self,
        username: &str,
        id: i32,
        name: &str,
        category: &str,
    ) -> Result<(), DomainError>;

    /// Delete book `id` if `username` owns it. Contents cascade.
    async fn delete_owned(&self, username: &str, id: i32) -> Result<(), DomainError>;
}
