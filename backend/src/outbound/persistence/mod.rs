//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows and domain entities and turn
//! domain [`Predicate`](crate::domain::query::Predicate)s into SQL. Row
//! structs and table definitions stay private to this module.
//!
//! # Example
//!
//! ```no_run
//! use mailadmin::outbound::persistence::{DbPool, DieselDirectoryRepository, PoolConfig};
//!
//! # async fn connect() -> Result<(), mailadmin::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/directory")).await?;
//! let directory = DieselDirectoryRepository::new(pool);
//! # let _ = directory;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_directory_repository;
mod diesel_domain_repository;
mod diesel_parameter_store;
mod migrations;
mod models;
mod pool;
mod predicate_sql;
mod schema;

pub use diesel_directory_repository::DieselDirectoryRepository;
pub use diesel_domain_repository::DieselDomainRepository;
pub use diesel_parameter_store::DieselParameterStore;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
