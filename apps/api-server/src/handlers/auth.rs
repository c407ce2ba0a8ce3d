//! Signup and login handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use bookstack_core::domain::NewUser;
use bookstack_core::error::DomainError;
use bookstack_core::ports::{AuthError, PasswordService, TokenService};
use bookstack_shared::MessageResponse;
use bookstack_shared::dto::{LoginRequest, SignupRequest, TokenResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/auth/signup
///
/// No format or strength validation beyond uniqueness; the credential
/// store reports conflicts in username/email/phone priority order.
pub async fn signup(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let password_hash = password_service.hash(&req.password).map_err(AppError::from)?;

    state
        .users
        .create(NewUser {
            username: req.username,
            email: req.email,
            password_hash,
            first_name: req.first_name,
            last_name: req.last_name,
            phone_number: req.phone_number,
            gender: req.gender,
        })
        .await?;

    Ok(HttpResponse::Created().json(MessageResponse::new("user has been created")))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = match state.users.find_by_username(&req.username).await {
        Ok(user) => user,
        Err(DomainError::UserNotFound) => {
            return Err(AppError::Unauthorized("no such username exists".to_string()));
        }
        Err(other) => return Err(other.into()),
    };

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(AppError::from)?;
    if !valid {
        return Err(AuthError::IncorrectPassword.into());
    }

    let token = token_service.issue(&user.username).map_err(AppError::from)?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token: token,
    }))
}
