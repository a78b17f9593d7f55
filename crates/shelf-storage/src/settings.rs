//! Application settings and server configuration storage.
//!
//! Two independent singleton documents in the `settings` table. Reading a
//! document that has never been saved returns its default value; an
//! unconfigured instance is still a valid instance. Saves always replace
//! the whole document; there is no partial update.

use shelf_db::DbPool;
use shelf_types::{ServerConfig, Settings};

use crate::error::StorageError;
use crate::kv::{self, KvTable};

const KEY_SETTINGS: &str = "settings";
const KEY_SERVER: &str = "server";

/// Store for the global settings and server configuration documents.
#[derive(Clone)]
pub struct SettingsStore {
    pool: DbPool,
}

impl SettingsStore {
    pub(crate) fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Retrieves the global settings, or defaults if never saved.
    pub fn get(&self) -> Result<Settings, StorageError> {
        let conn = self.pool.get()?;
        Ok(kv::get(&conn, KvTable::Settings, KEY_SETTINGS)?.unwrap_or_default())
    }

    /// Replaces the global settings document.
    pub fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        let conn = self.pool.get()?;
        kv::put(&conn, KvTable::Settings, KEY_SETTINGS, settings)
    }

    /// Retrieves the server configuration, or defaults if never saved.
    pub fn get_server(&self) -> Result<ServerConfig, StorageError> {
        let conn = self.pool.get()?;
        Ok(kv::get(&conn, KvTable::Settings, KEY_SERVER)?.unwrap_or_default())
    }

    /// Replaces the server configuration document.
    pub fn save_server(&self, config: &ServerConfig) -> Result<(), StorageError> {
        let conn = self.pool.get()?;
        kv::put(&conn, KvTable::Settings, KEY_SERVER, config)
    }
}
