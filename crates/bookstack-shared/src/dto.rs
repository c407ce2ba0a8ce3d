//! Data Transfer Objects - request/response types for the API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request to sign up a new account. The password travels in plaintext and
/// is hashed at rest; no format or strength checks are applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub gender: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Author fields embedded in book payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorDto {
    pub first_name: String,
    pub last_name: String,
    pub birthday: NaiveDate,
    pub nationality: String,
}

/// Book creation payload: the book's direct fields and the flat
/// table-of-contents label list, interleaved in one JSON object.
/// The owner is never part of the payload; it is taken from the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookRequest {
    pub name: String,
    pub category: String,
    pub volume: i32,
    pub published_at: NaiveDate,
    pub summary: String,
    pub publisher: String,
    pub author: AuthorDto,
    #[serde(default)]
    pub table_of_contents: Vec<String>,
}

/// Book read response. The persisted content rows are flattened back into
/// `table_of_contents`; the owner id is not serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub volume: i32,
    pub published_at: NaiveDate,
    pub table_of_contents: Vec<String>,
    pub summary: String,
    pub publisher: String,
    pub author: AuthorDto,
}

/// Update payload: exactly these two fields, both always overwritten.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookRequest {
    pub name: String,
    pub category: String,
}
