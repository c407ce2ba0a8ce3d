//! SeaORM entities for the catalog schema.

pub mod book;
pub mod content;
pub mod user;
