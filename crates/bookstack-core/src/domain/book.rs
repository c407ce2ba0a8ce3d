use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Author details embedded in a book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    pub nationality: String,
}

/// Book entity - a catalog item owned by exactly one user.
///
/// `contents` is the flat, ordered list of table-of-contents labels; the
/// relational rows backing it stay inside the storage adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub volume: i32,
    pub published_at: NaiveDate,
    pub summary: String,
    pub publisher: String,
    pub author: Author,
    pub user_id: i32,
    pub contents: Vec<String>,
}

/// A book before the store has assigned an id. `user_id` is always the
/// authenticated requester; clients cannot choose the owner.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub name: String,
    pub category: String,
    pub volume: i32,
    pub published_at: NaiveDate,
    pub summary: String,
    pub publisher: String,
    pub author: Author,
    pub user_id: i32,
    pub contents: Vec<String>,
}

/// The single authorization predicate for mutating a book: the acting user
/// must be the recorded owner. Applied identically by update and delete;
/// ownership never transfers, so there is nothing else to check.
pub fn ensure_owner(owner_id: i32, actor_id: i32) -> Result<(), DomainError> {
    if owner_id == actor_id {
        Ok(())
    } else {
        Err(DomainError::PermissionDenied)
    }
}
