//! Authentication-method configuration storage.
//!
//! A single document under the fixed key `"auther"` in the generic config
//! table. Unlike settings, an absent document is an error: the caller uses
//! the NotFound condition to detect a first run and enter setup. The stored
//! JSON carries a discriminator field, so the active method variant is
//! chosen by the document itself.

use shelf_db::DbPool;
use shelf_types::AuthConfig;

use crate::error::StorageError;
use crate::kv::{self, KvTable};

const KEY_AUTHER: &str = "auther";

/// Store for the active authentication-method configuration.
#[derive(Clone)]
pub struct AuthStore {
    pool: DbPool,
}

impl AuthStore {
    pub(crate) fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Retrieves the stored authentication configuration.
    ///
    /// Fails with NotFound if no configuration has been saved yet.
    pub fn get(&self) -> Result<AuthConfig, StorageError> {
        let conn = self.pool.get()?;
        kv::get(&conn, KvTable::Config, KEY_AUTHER)?
            .ok_or_else(|| StorageError::NotFound(format!("config key '{KEY_AUTHER}'")))
    }

    /// Replaces the stored authentication configuration.
    pub fn save(&self, config: &AuthConfig) -> Result<(), StorageError> {
        let conn = self.pool.get()?;
        kv::put(&conn, KvTable::Config, KEY_AUTHER, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Storage;
    use shelf_db::{create_pool, PoolSettings};
    use shelf_types::{HookAuthConfig, JsonAuthConfig, ProxyAuthConfig, RecaptchaConfig};

    fn setup() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let db_path = dir.path().join("shelf.db");
        let pool = create_pool(db_path.to_str().expect("utf-8 path"), PoolSettings::default())
            .expect("should create pool");
        let storage = Storage::open(pool).expect("should open storage");
        (dir, storage)
    }

    #[test]
    fn unsaved_auth_config_is_not_found() {
        let (_dir, storage) = setup();
        let err = storage.auth.get().unwrap_err();
        assert!(err.is_not_found(), "expected NotFound, got {err:?}");
    }

    #[test]
    fn each_variant_round_trips() {
        let (_dir, storage) = setup();

        let configs = [
            AuthConfig::Json(JsonAuthConfig {
                recaptcha: Some(RecaptchaConfig {
                    host: "https://www.google.com/recaptcha/api/siteverify".to_string(),
                    key: "site-key".to_string(),
                    secret: "shared-secret".to_string(),
                }),
            }),
            AuthConfig::Proxy(ProxyAuthConfig {
                header: "Remote-User".to_string(),
            }),
            AuthConfig::Hook(HookAuthConfig {
                command: "/usr/local/bin/check-login".to_string(),
            }),
            AuthConfig::None,
        ];

        for config in configs {
            storage.auth.save(&config).expect("save should succeed");
            let stored = storage.auth.get().expect("get should succeed");
            assert_eq!(stored, config);
        }
    }

    #[test]
    fn save_switches_the_active_method() {
        let (_dir, storage) = setup();

        storage
            .auth
            .save(&AuthConfig::Json(JsonAuthConfig::default()))
            .expect("save json");
        storage
            .auth
            .save(&AuthConfig::Proxy(ProxyAuthConfig {
                header: "X-Auth-User".to_string(),
            }))
            .expect("save proxy");

        match storage.auth.get().expect("get") {
            AuthConfig::Proxy(proxy) => assert_eq!(proxy.header, "X-Auth-User"),
            other => panic!("expected proxy config, got {other:?}"),
        }
    }
}
