use serde::{Deserialize, Serialize};

/// User entity - an account that can own books.
///
/// Accounts are immutable after signup: there is no update or delete path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub gender: String,
}

/// A user candidate before the store has assigned an id.
///
/// `password_hash` is the already-hashed password; the plaintext never
/// crosses this boundary.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub gender: String,
}
