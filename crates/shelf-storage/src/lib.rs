//! Persistence layer for the shelf file-browsing platform.
//!
//! Four store adapters over one shared SQLite pool:
//!
//! - [`UserStore`]: user account CRUD, with permissions, command lists and
//!   sort preferences JSON-encoded into text columns.
//! - [`SettingsStore`]: the global settings and server configuration
//!   singleton documents. Absent documents read as defaults.
//! - [`AuthStore`]: the active authentication-method configuration.
//!   An absent document is NotFound, which callers treat as the first-run
//!   signal.
//! - [`ShareStore`]: share link CRUD, queryable by hash, owner, and
//!   (path, owner).
//!
//! [`Storage::open`] wires the adapters together after running the schema
//! migrations, and is safe to call on every process start. Each operation
//! checks out a pooled connection and issues a single statement; there is no
//! cross-operation transaction scope, and concurrent access is handled
//! entirely by the pool and SQLite itself.

use serde::{Deserialize, Serialize};
use shelf_db::{run_migrations, DbPool};

mod auth;
mod error;
mod kv;
mod settings;
mod share;
mod users;

pub use auth::AuthStore;
pub use error::StorageError;
pub use settings::SettingsStore;
pub use share::ShareStore;
pub use users::{UserField, UserStore};

use kv::KvTable;

const KEY_VERSION: &str = "version";

/// Current schema version, recorded in the config table on every open.
const SCHEMA_VERSION: u32 = 2;

/// The version marker document stored under [`KEY_VERSION`].
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
struct VersionMarker {
    version: u32,
}

/// Aggregate handle over every store adapter.
///
/// Cheap to clone; all clones share the same underlying pool.
#[derive(Clone)]
pub struct Storage {
    /// User account storage.
    pub users: UserStore,
    /// Settings and server configuration storage.
    pub settings: SettingsStore,
    /// Authentication-method configuration storage.
    pub auth: AuthStore,
    /// Share link storage.
    pub share: ShareStore,
}

impl Storage {
    /// Opens the storage layer over the given pool.
    ///
    /// Runs all pending schema migrations and upserts the version marker
    /// before any adapter is handed out. Idempotent: opening an
    /// already-initialized database applies nothing and succeeds.
    ///
    /// # Errors
    ///
    /// Any migration or version-marker failure aborts the whole open and is
    /// returned to the caller; the process startup sequence decides what to
    /// do with it.
    pub fn open(pool: DbPool) -> Result<Self, StorageError> {
        let conn = pool.get()?;
        let applied = run_migrations(&conn)?;
        kv::put(
            &conn,
            KvTable::Config,
            KEY_VERSION,
            &VersionMarker {
                version: SCHEMA_VERSION,
            },
        )?;
        drop(conn);

        if applied > 0 {
            tracing::info!(applied, version = SCHEMA_VERSION, "storage schema initialized");
        } else {
            tracing::debug!(version = SCHEMA_VERSION, "storage schema up to date");
        }

        Ok(Self {
            users: UserStore::new(pool.clone()),
            settings: SettingsStore::new(pool.clone()),
            auth: AuthStore::new(pool.clone()),
            share: ShareStore::new(pool),
        })
    }
}
