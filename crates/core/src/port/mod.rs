// Port Layer - Interfaces for external dependencies

pub mod datastore;
pub mod time_provider;

// Re-exports
pub use datastore::Datastore;
pub use time_provider::TimeProvider;
