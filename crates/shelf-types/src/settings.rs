//! Application settings and server configuration documents.
//!
//! Both are stored as singleton JSON documents. A document that has never
//! been saved reads back as its `Default` value, so every field here must
//! have a sensible zero value and tolerate absent keys on deserialization.

use serde::{Deserialize, Serialize};

use crate::{Permissions, Sorting};

/// Global application settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Allow self-service account creation.
    pub signup: bool,
    /// Create a home directory under `user_home_base_path` for new users.
    pub create_user_dir: bool,
    /// Base path for per-user home directories.
    pub user_home_base_path: String,
    /// Minimum accepted password length at account creation.
    pub minimum_password_length: usize,
    /// Template applied to newly created users.
    pub defaults: UserDefaults,
    /// Branding overrides for the web UI.
    pub branding: Branding,
    /// Shell used to run user commands (e.g. `["/bin/sh", "-c"]`).
    pub shell: Vec<String>,
}

/// Per-user defaults applied when an account is created.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDefaults {
    /// Default filesystem scope.
    pub scope: String,
    /// Default UI locale.
    pub locale: String,
    /// Default single-click behavior.
    pub single_click: bool,
    /// Default sort preference.
    pub sorting: Sorting,
    /// Default capability flags.
    pub perm: Permissions,
    /// Default allowed commands.
    pub commands: Vec<String>,
}

/// Branding overrides for the web UI.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    /// Instance display name.
    pub name: String,
    /// Hide links to external sites when true.
    pub disable_external: bool,
    /// Path to a directory with custom branding assets.
    pub files: String,
    /// Color theme identifier.
    pub theme: String,
}

/// HTTP server configuration.
///
/// Kept separate from [`Settings`] because it is read once at process start,
/// while settings may be reloaded at runtime.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Filesystem root served to users.
    pub root: String,
    /// URL prefix the application is mounted under.
    pub base_url: String,
    /// Listen address.
    pub address: String,
    /// Listen port.
    pub port: String,
    /// Log destination ("stdout" or a file path).
    pub log: String,
    /// TLS private key path. Empty disables TLS.
    pub tls_key: String,
    /// TLS certificate path. Empty disables TLS.
    pub tls_cert: String,
    /// Serve image thumbnails.
    pub enable_thumbnails: bool,
    /// Allow command execution for users with the execute permission.
    pub enable_exec: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_round_trip() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).expect("should serialize");
        let back: Settings = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(back, settings);
    }

    #[test]
    fn settings_tolerates_partial_document() {
        let settings: Settings =
            serde_json::from_str(r#"{"signup":true,"shell":["/bin/bash","-c"]}"#)
                .expect("should parse partial document");
        assert!(settings.signup);
        assert_eq!(settings.shell, vec!["/bin/bash", "-c"]);
        assert_eq!(settings.defaults, UserDefaults::default());
    }

    #[test]
    fn server_config_empty_document_is_default() {
        let config: ServerConfig = serde_json::from_str("{}").expect("should parse");
        assert_eq!(config, ServerConfig::default());
    }
}
