//! Application state - shared across all handlers.

use std::sync::Arc;

use migration::MigratorTrait;

use bookstack_core::ports::{BookRepository, UserRepository};
use bookstack_infra::database::{
    DatabaseConfig, DatabaseConnections, PostgresBookRepository, PostgresUserRepository,
};

/// Shared application state: the store handles behind their ports.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub books: Arc<dyn BookRepository>,
}

impl AppState {
    /// Connect the pool, bootstrap the schema (create-if-missing), and wire
    /// up the PostgreSQL repositories.
    pub async fn init(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let connections = DatabaseConnections::init(config).await?;

        migration::Migrator::up(&connections.main, None).await?;
        tracing::info!("Schema bootstrap complete");

        Ok(Self {
            users: Arc::new(PostgresUserRepository::new(connections.main.clone())),
            books: Arc::new(PostgresBookRepository::new(connections.main)),
        })
    }

    /// Assemble state from pre-built repositories. Used by tests.
    pub fn with_repos(users: Arc<dyn UserRepository>, books: Arc<dyn BookRepository>) -> Self {
        Self { users, books }
    }
}
