//! Shared domain types for the shelf file-browsing platform.
//!
//! This crate provides the data model used across the shelf workspace:
//! user accounts, share links, application settings, server configuration,
//! and authentication-method configuration. All types are plain serde
//! structures with no database coupling; the storage crate decides how
//! they are persisted.
//!
//! No crate in the workspace depends on anything *except* `shelf-types` for
//! cross-cutting type definitions. This keeps the dependency graph clean and
//! prevents circular dependencies.

use serde::{Deserialize, Serialize};

mod auth;
mod settings;

pub use auth::{AuthConfig, HookAuthConfig, JsonAuthConfig, ProxyAuthConfig, RecaptchaConfig};
pub use settings::{Branding, ServerConfig, Settings, UserDefaults};

/// Capability flags for a user account.
///
/// Each flag gates one class of filesystem action. Flags are independent of
/// each other except `admin`, which upstream layers treat as implying the
/// rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Permissions {
    /// Full administrative access.
    pub admin: bool,
    /// Can execute configured shell commands.
    pub execute: bool,
    /// Can create files and directories.
    pub create: bool,
    /// Can rename files and directories.
    pub rename: bool,
    /// Can modify file contents.
    pub modify: bool,
    /// Can delete files and directories.
    pub delete: bool,
    /// Can create share links.
    pub share: bool,
    /// Can download files and directories.
    pub download: bool,
}

/// Directory listing sort preference.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sorting {
    /// Attribute to sort by (e.g. "name", "size", "modified").
    pub by: String,
    /// Ascending order when true.
    pub asc: bool,
}

/// A user account.
///
/// `id` is assigned by storage on first save; a zero `id` means the user has
/// not been persisted yet. `password` is an opaque hash; this layer never
/// sees plaintext credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Storage-assigned numeric identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Hashed password, opaque to this layer.
    pub password: String,
    /// Filesystem scope path the user is confined to.
    pub scope: String,
    /// Capability flags.
    pub perm: Permissions,
    /// Shell commands the user may run.
    pub commands: Vec<String>,
    /// Directory listing sort preference.
    pub sorting: Sorting,
    /// UI locale code (e.g. "en", "pt-br").
    pub locale: String,
    /// Open files with a single click instead of a double click.
    pub single_click: bool,
}

/// A shareable link to a path inside a user's scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLink {
    /// Unique link hash, used in share URLs. Immutable once created.
    pub hash: String,
    /// ID of the owning user.
    pub user_id: i64,
    /// Shared filesystem path.
    pub path: String,
    /// Expiry as unix seconds. Zero means the link never expires.
    pub expire: i64,
}

impl ShareLink {
    /// Returns true if this link never expires.
    pub fn is_permanent(&self) -> bool {
        self.expire == 0
    }
}
