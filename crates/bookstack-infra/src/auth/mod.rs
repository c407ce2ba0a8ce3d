//! Authentication implementations.

mod jwt;
mod password;

pub use jwt::{JwtTokenService, SigningKey};
pub use password::{Argon2PasswordService, PasswordConfig};
