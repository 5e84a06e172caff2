//! # citas-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `citas-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `citas-app` (for port traits) and `citas-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod appointment_repo;
mod error;
mod pool;
mod user_repo;

pub use appointment_repo::SqliteAppointmentRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
pub use user_repo::SqliteUserRepository;
