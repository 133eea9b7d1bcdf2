// SwipeMatch Infrastructure - SQLite Adapter
// Implements: Datastore

mod connection;
mod datastore;
mod error;
mod migration;

pub use connection::create_pool;
pub use datastore::SqliteDatastore;
pub use migration::{current_schema_version, run_migrations};

// Note: sqlx::Error conversion goes through error::map_sqlx_error
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
