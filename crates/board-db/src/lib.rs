//! # board-db
//!
//! Storage layer implementing the repository traits from `board-core`.
//!
//! Two backends are provided:
//!
//! - PostgreSQL via SQLx (`PgUserRepository`, `PgMessageRepository`),
//!   used when a `DATABASE_URL` is configured.
//! - In-memory (`MemUserRepository`, `MemMessageRepository`), used when
//!   no database is configured. Data lives for the process lifetime only.

pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{MemMessageRepository, MemUserRepository};
pub use pool::{create_pool, DatabaseConfig, PgPool};
pub use repositories::{PgMessageRepository, PgUserRepository};
