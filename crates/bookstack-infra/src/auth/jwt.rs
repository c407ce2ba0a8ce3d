//! JWT token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use bookstack_core::ports::{AuthError, TokenClaims, TokenService};

/// Symmetric signing key, generated fresh at every process start and held
/// only in memory. A restart therefore invalidates every outstanding
/// token; that is the intended scope, not something to persist away.
pub struct SigningKey([u8; 32]);

impl SigningKey {
    /// Draw 32 bytes from the OS RNG.
    pub fn generate() -> Self {
        use rand::RngCore;

        let mut key = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut key);
        Self(key)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    username: String,
    exp: i64,
}

/// HS256 token service. Claims carry only the username and the expiry.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: TimeDelta,
}

impl JwtTokenService {
    pub fn new(key: &SigningKey, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            ttl: TimeDelta::minutes(ttl_minutes),
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, username: &str) -> Result<String, AuthError> {
        let claims = Claims {
            username: username.to_string(),
            exp: (Utc::now() + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }

        // Expiry is exact; no leeway window.
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AuthError::InvalidSignature
                    }
                    _ => AuthError::Unverifiable,
                }
            })?;

        Ok(TokenClaims {
            username: token_data.claims.username,
            exp: token_data.claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtTokenService {
        JwtTokenService::new(&SigningKey::generate(), 10)
    }

    #[test]
    fn issue_and_verify_round_trip() {
        let service = service();

        let token = service.issue("alice").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.username, "alice");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn empty_token_is_rejected() {
        let result = service().verify("");
        assert!(matches!(result.unwrap_err(), AuthError::EmptyToken));
    }

    #[test]
    fn token_from_another_key_fails_signature_check() {
        let issuer = service();
        let verifier = service();

        let token = issuer.issue("alice").unwrap();
        let result = verifier.verify(&token);

        assert!(matches!(result.unwrap_err(), AuthError::InvalidSignature));
    }

    #[test]
    fn expired_token_is_rejected() {
        let key = SigningKey::generate();
        let issuer = JwtTokenService::new(&key, -1);
        let verifier = JwtTokenService::new(&key, 10);

        let token = issuer.issue("alice").unwrap();
        let result = verifier.verify(&token);

        assert!(matches!(result.unwrap_err(), AuthError::Expired));
    }

    #[test]
    fn garbage_token_is_unverifiable() {
        let result = service().verify("not-a-jwt");
        assert!(matches!(result.unwrap_err(), AuthError::Unverifiable));
    }
}
