//! Database layer for the shelf platform.
//!
//! Provides SQLite connection pooling (via `r2d2`), WAL-mode initialization,
//! and embedded SQL migrations. Every table used by the storage adapters is
//! created through the migrations managed here.
//!
//! # Design decisions
//!
//! - **SQLite with WAL mode**: shelf runs as a single self-contained server
//!   process; WAL allows concurrent readers with a single writer, which
//!   matches the web tier's access pattern.
//! - **`r2d2` connection pool**: bounded connection reuse without manual
//!   lifetime management. Every storage adapter holds a clone of the pool.
//! - **Embedded migrations**: SQL files are compiled into the binary via
//!   `include_str!`, so the schema ships with the code that depends on it
//!   and cannot drift from it.

mod migrations;
mod pool;

pub use migrations::{run_migrations, MigrationError};
pub use pool::{create_pool, DbPool, PoolError, PoolSettings};
