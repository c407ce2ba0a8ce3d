//! # Bookstack API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;

use bookstack_core::ports::{PasswordService, TokenService};
use bookstack_infra::auth::{Argon2PasswordService, JwtTokenService, SigningKey};
use config::AppConfig;
use middleware::error::{json_error_handler, path_error_handler};
use state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::from_env()?;

    tracing::info!(
        "Starting Bookstack API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::init(&config.database).await?;

    // The signing key lives only in this process; a restart invalidates
    // every outstanding token.
    let signing_key = SigningKey::generate();
    let token_service: Arc<dyn TokenService> =
        Arc::new(JwtTokenService::new(&signing_key, config.jwt_exp_minutes));
    let password_service: Arc<dyn PasswordService> =
        Arc::new(Argon2PasswordService::new(&config.password)?);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(token_service.clone()))
            .app_data(web::Data::new(password_service.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,api_server=debug,bookstack_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
