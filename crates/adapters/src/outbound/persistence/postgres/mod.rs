//! PostgreSQL persistence.

pub mod account_store;
pub mod models;

pub use account_store::PgAccountStore;
