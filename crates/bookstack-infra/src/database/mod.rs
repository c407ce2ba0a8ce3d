//! Database adapters: connection management and PostgreSQL repositories.

mod connections;
pub mod entity;
mod postgres_repo;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use postgres_repo::{PostgresBookRepository, PostgresUserRepository};
