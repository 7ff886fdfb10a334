//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` and a `bb8` pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Uniqueness rules live in the domain services; adapters
//!   only report which unique index a write violated.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel and pool failures map to the port
//!   error enums.
//!
//! # Example
//!
//! ```no_run
//! use company_api::outbound::persistence::{DbPool, DieselCompanyRepository, PoolConfig};
//!
//! # async fn example() -> Result<(), company_api::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/companies")).await?;
//! let companies = DieselCompanyRepository::new(pool);
//! # let _ = companies;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_company_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_company_repository::DieselCompanyRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{
    MIGRATIONS, MigrationError, run_pending_migrations, run_pending_migrations_blocking,
};
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
