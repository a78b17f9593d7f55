//! Error types for the storage layer.

use shelf_db::MigrationError;

/// Errors that can occur during storage operations.
///
/// `NotFound` is the only variant callers are expected to branch on; it is
/// what single-record lookups return when no row matches. Everything else is
/// an opaque failure to be propagated.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No record matches the given key.
    #[error("not found: {0}")]
    NotFound(String),

    /// A database operation failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Checking out a pooled connection failed.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// JSON serialization or deserialization failed.
    #[error("json serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A partial update named a field that does not exist.
    #[error("unknown user field: {0}")]
    UnknownField(String),

    /// Schema initialization failed during bootstrap.
    #[error("schema initialization failed: {0}")]
    Migration(#[from] MigrationError),
}

impl StorageError {
    /// Returns true if this error is the NotFound condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
