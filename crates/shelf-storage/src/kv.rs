//! Keyed JSON document storage.
//!
//! Both the `config` and `settings` tables are key-value tables holding one
//! JSON document per key. This module is the single primitive the singleton
//! stores (settings, server config, auth config, version marker) are built
//! on: get a document by key, or upsert it wholesale.

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

/// The key-value tables documents can live in.
///
/// A closed enum rather than a table-name string: callers can never steer
/// the query outside these two tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KvTable {
    /// The generic `config` table (auth config, version marker).
    Config,
    /// The `settings` table (application settings, server config).
    Settings,
}

impl KvTable {
    fn name(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Settings => "settings",
        }
    }
}

/// Reads and deserializes the document stored under `key`.
///
/// Returns `Ok(None)` when no row exists; the caller decides whether absence
/// means "defaults" or "not found".
pub(crate) fn get<T: DeserializeOwned>(
    conn: &Connection,
    table: KvTable,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let sql = format!("SELECT value FROM {} WHERE key_name = ?1", table.name());
    let raw: Option<String> = conn.query_row(&sql, [key], |row| row.get(0)).optional()?;

    match raw {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Serializes `value` and upserts it under `key`.
pub(crate) fn put<T: Serialize>(
    conn: &Connection,
    table: KvTable,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    let sql = format!(
        "INSERT INTO {} (key_name, value) VALUES (?1, ?2)
         ON CONFLICT(key_name) DO UPDATE SET value = excluded.value",
        table.name()
    );
    conn.execute(&sql, params![key, json])?;
    Ok(())
}
