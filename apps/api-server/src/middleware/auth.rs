//! Authentication middleware and extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header};
use std::future::{Ready, ready};
use std::sync::Arc;

use bookstack_core::ports::{AuthError, TokenService};
use bookstack_shared::MessageResponse;

/// Authenticated identity extractor.
///
/// Use this in handlers to require a valid bearer token:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.username)
/// }
/// ```
/// The token asserts a username only; handlers that need the account
/// resolve it through the user repository on every request.
#[derive(Debug, Clone)]
pub struct Identity {
    pub username: String,
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match &self.0 {
            AuthError::EmptyToken
            | AuthError::InvalidSignature
            | AuthError::Expired
            | AuthError::Unverifiable
            | AuthError::IncorrectPassword => actix_web::http::StatusCode::UNAUTHORIZED,
            _ => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let body = match &self.0 {
            AuthError::Hashing(detail) | AuthError::Signing(detail) => {
                tracing::error!("Internal auth fault: {}", detail);
                MessageResponse::new("internal server error")
            }
            caller_fault => MessageResponse::new(caller_fault.to_string()),
        };

        actix_web::HttpResponse::build(self.status_code()).json(body)
    }
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token_service = match req.app_data::<actix_web::web::Data<Arc<dyn TokenService>>>() {
            Some(service) => service,
            None => {
                tracing::error!("TokenService not found in app data");
                return ready(Err(AuthenticationError(AuthError::Signing(
                    "server configuration error".to_string(),
                ))));
            }
        };

        // A missing or blank header is the empty-token case.
        let auth_header = match req.headers().get(header::AUTHORIZATION) {
            Some(value) => value,
            None => return ready(Err(AuthenticationError(AuthError::EmptyToken))),
        };

        let auth_str = match auth_header.to_str() {
            Ok(s) => s,
            Err(_) => return ready(Err(AuthenticationError(AuthError::Unverifiable))),
        };

        // Accept both a bare token and the "Bearer <token>" form.
        let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

        match token_service.verify(token) {
            Ok(claims) => ready(Ok(Identity {
                username: claims.username,
            })),
            Err(e) => ready(Err(AuthenticationError(e))),
        }
    }
}
