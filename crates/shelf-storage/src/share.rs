//! Share link storage.
//!
//! Links are keyed by their hash. Expiry is data, not behavior: this store
//! returns expired links like any others, and the serving layer decides
//! whether a link is still valid. The one place expiry matters here is
//! [`ShareStore::get_permanent`], which selects specifically the
//! never-expiring link for a (path, owner) pair.

use rusqlite::{params, OptionalExtension, Row};
use shelf_db::DbPool;
use shelf_types::ShareLink;

use crate::error::StorageError;

const SHARE_COLUMNS: &str = "hash, user_id, path, expire";

/// Store for share link records.
#[derive(Clone)]
pub struct ShareStore {
    pool: DbPool,
}

impl ShareStore {
    pub(crate) fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Lists every share link.
    pub fn all(&self) -> Result<Vec<ShareLink>, StorageError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!("SELECT {SHARE_COLUMNS} FROM shares"))?;

        let rows = stmt.query_map([], map_row_to_link)?;
        let mut links = Vec::new();
        for row in rows {
            links.push(row?);
        }
        Ok(links)
    }

    /// Lists all links owned by the given user.
    pub fn find_by_user(&self, user_id: i64) -> Result<Vec<ShareLink>, StorageError> {
        let conn = self.pool.get()?;
        let mut stmt =
            conn.prepare(&format!("SELECT {SHARE_COLUMNS} FROM shares WHERE user_id = ?1"))?;

        let rows = stmt.query_map([user_id], map_row_to_link)?;
        let mut links = Vec::new();
        for row in rows {
            links.push(row?);
        }
        Ok(links)
    }

    /// Retrieves one link by hash.
    pub fn get_by_hash(&self, hash: &str) -> Result<ShareLink, StorageError> {
        let conn = self.pool.get()?;
        conn.query_row(
            &format!("SELECT {SHARE_COLUMNS} FROM shares WHERE hash = ?1"),
            [hash],
            map_row_to_link,
        )
        .optional()?
        .ok_or_else(|| StorageError::NotFound(format!("share '{hash}'")))
    }

    /// Retrieves the permanent (never-expiring) link for the exact
    /// (path, owner) pair, if one exists.
    pub fn get_permanent(&self, path: &str, user_id: i64) -> Result<ShareLink, StorageError> {
        let conn = self.pool.get()?;
        conn.query_row(
            &format!(
                "SELECT {SHARE_COLUMNS} FROM shares
                 WHERE path = ?1 AND user_id = ?2 AND expire = 0
                 LIMIT 1"
            ),
            params![path, user_id],
            map_row_to_link,
        )
        .optional()?
        .ok_or_else(|| {
            StorageError::NotFound(format!("permanent share for '{path}' by user {user_id}"))
        })
    }

    /// Lists all links for the exact (path, owner) pair.
    pub fn find_by_path(&self, path: &str, user_id: i64) -> Result<Vec<ShareLink>, StorageError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SHARE_COLUMNS} FROM shares WHERE path = ?1 AND user_id = ?2"
        ))?;

        let rows = stmt.query_map(params![path, user_id], map_row_to_link)?;
        let mut links = Vec::new();
        for row in rows {
            links.push(row?);
        }
        Ok(links)
    }

    /// Saves a link, inserting or updating in place keyed on hash.
    pub fn save(&self, link: &ShareLink) -> Result<(), StorageError> {
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO shares (hash, user_id, path, expire)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(hash) DO UPDATE SET
                 user_id = excluded.user_id,
                 path = excluded.path,
                 expire = excluded.expire",
            params![link.hash, link.user_id, link.path, link.expire],
        )?;
        Ok(())
    }

    /// Deletes a link by hash. Deleting an absent hash is not an error.
    pub fn delete(&self, hash: &str) -> Result<(), StorageError> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM shares WHERE hash = ?1", [hash])?;
        Ok(())
    }
}

fn map_row_to_link(row: &Row) -> rusqlite::Result<ShareLink> {
    Ok(ShareLink {
        hash: row.get(0)?,
        user_id: row.get(1)?,
        path: row.get(2)?,
        expire: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Storage;
    use shelf_db::{create_pool, PoolSettings};

    fn setup() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let db_path = dir.path().join("shelf.db");
        let pool = create_pool(db_path.to_str().expect("utf-8 path"), PoolSettings::default())
            .expect("should create pool");
        let storage = Storage::open(pool).expect("should open storage");
        (dir, storage)
    }

    fn link(hash: &str, user_id: i64, path: &str, expire: i64) -> ShareLink {
        ShareLink {
            hash: hash.to_string(),
            user_id,
            path: path.to_string(),
            expire,
        }
    }

    #[test]
    fn save_and_get_by_hash() {
        let (_dir, storage) = setup();
        let original = link("h1", 1, "/docs/report.pdf", 1_893_456_000);

        storage.share.save(&original).expect("save should succeed");
        let stored = storage.share.get_by_hash("h1").expect("get should succeed");
        assert_eq!(stored, original);
    }

    #[test]
    fn save_existing_hash_updates_mutable_columns() {
        let (_dir, storage) = setup();
        storage
            .share
            .save(&link("h1", 1, "/docs", 0))
            .expect("first save");
        storage
            .share
            .save(&link("h1", 2, "/videos", 500))
            .expect("second save");

        let stored = storage.share.get_by_hash("h1").expect("get");
        assert_eq!(stored.user_id, 2);
        assert_eq!(stored.path, "/videos");
        assert_eq!(stored.expire, 500);

        let all = storage.share.all().expect("all");
        assert_eq!(all.len(), 1, "upsert should not duplicate the row");
    }

    #[test]
    fn save_then_delete_then_get_is_not_found() {
        let (_dir, storage) = setup();
        storage
            .share
            .save(&link("h1", 1, "/docs", 0))
            .expect("save should succeed");

        storage.share.delete("h1").expect("delete should succeed");
        let err = storage.share.get_by_hash("h1").unwrap_err();
        assert!(err.is_not_found(), "expected NotFound, got {err:?}");

        // Deleting again is a no-op, not an error.
        storage.share.delete("h1").expect("repeat delete is ok");
    }

    #[test]
    fn list_operations_return_empty_not_error() {
        let (_dir, storage) = setup();
        assert!(storage.share.all().expect("all").is_empty());
        assert!(storage.share.find_by_user(1).expect("by user").is_empty());
        assert!(storage
            .share
            .find_by_path("/docs", 1)
            .expect("by path")
            .is_empty());
    }

    #[test]
    fn find_by_user_filters_by_owner() {
        let (_dir, storage) = setup();
        storage.share.save(&link("h1", 1, "/a", 0)).expect("save");
        storage.share.save(&link("h2", 1, "/b", 100)).expect("save");
        storage.share.save(&link("h3", 2, "/a", 0)).expect("save");

        let links = storage.share.find_by_user(1).expect("find");
        assert_eq!(links.len(), 2);
        assert!(links.iter().all(|l| l.user_id == 1));
    }

    #[test]
    fn get_permanent_selects_only_the_non_expiring_link() {
        let (_dir, storage) = setup();
        storage
            .share
            .save(&link("expiring", 1, "/docs", 1_893_456_000))
            .expect("save");
        storage
            .share
            .save(&link("permanent", 1, "/docs", 0))
            .expect("save");
        storage
            .share
            .save(&link("other-owner", 2, "/docs", 0))
            .expect("save");
        storage
            .share
            .save(&link("other-path", 1, "/videos", 0))
            .expect("save");

        let found = storage
            .share
            .get_permanent("/docs", 1)
            .expect("get_permanent should succeed");
        assert_eq!(found.hash, "permanent");
        assert!(found.is_permanent());

        let err = storage.share.get_permanent("/music", 1).unwrap_err();
        assert!(err.is_not_found(), "expected NotFound, got {err:?}");
    }

    #[test]
    fn find_by_path_returns_all_links_for_the_pair() {
        let (_dir, storage) = setup();
        storage.share.save(&link("h1", 1, "/docs", 0)).expect("save");
        storage.share.save(&link("h2", 1, "/docs", 100)).expect("save");
        storage.share.save(&link("h3", 2, "/docs", 0)).expect("save");

        let links = storage.share.find_by_path("/docs", 1).expect("find");
        assert_eq!(links.len(), 2);
        assert!(links.iter().all(|l| l.path == "/docs" && l.user_id == 1));
    }
}
