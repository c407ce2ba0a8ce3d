//! Authentication ports: token issuing/verification and password hashing.

/// Claims carried by a bearer token. Nothing beyond the username and the
/// expiry is asserted; there are no roles or sessions.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub username: String,
    pub exp: i64,
}

/// Token service: turns a verified login into a bearer credential and a
/// presented credential back into a username. Stateless - no revocation
/// list exists, expiry is the only invalidation path.
pub trait TokenService: Send + Sync {
    /// Mint a signed token asserting `username` until now + TTL.
    fn issue(&self, username: &str) -> Result<String, AuthError>;

    /// Verify a presented token and return its claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("empty token string")]
    EmptyToken,

    #[error("invalid token")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("can not validate the token")]
    Unverifiable,

    #[error("incorrect password")]
    IncorrectPassword,

    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Signing error: {0}")]
    Signing(String),
}
