//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod database;
mod in_memory_user_repository;
mod postgres_user_repository;
mod store_config;

pub use database::connect_and_migrate;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use postgres_user_repository::PostgresUserRepository;
pub use store_config::{StoreConfig, init_tracing};
