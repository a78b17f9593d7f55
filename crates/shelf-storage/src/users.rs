//! User account storage.
//!
//! Users are stored one per row with the structured sub-fields (permissions,
//! allowed commands, sort preference) JSON-encoded into text columns.
//! Lookups come in two statically-typed flavors, by id and by username, and
//! partial updates go through [`UserField`], a closed enum of the updatable
//! columns, so a constructed `UserField` can only ever name a real column.

use std::str::FromStr;

use rusqlite::types::ToSql;
use rusqlite::{params, OptionalExtension, Row};
use shelf_db::DbPool;
use shelf_types::{Permissions, Sorting, User};

use crate::error::StorageError;

const USER_COLUMNS: &str =
    "id, username, password, fs_path, perm, commands, sorting, locale, single_click";

/// Store for user account records.
#[derive(Clone)]
pub struct UserStore {
    pool: DbPool,
}

/// An updatable user field, mapped to its column at compile time.
///
/// `id` and `username` are deliberately absent: both are identity, not
/// state, and never change through a partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Password,
    Scope,
    Perm,
    Commands,
    Sorting,
    Locale,
    SingleClick,
}

impl UserField {
    fn column(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Scope => "fs_path",
            Self::Perm => "perm",
            Self::Commands => "commands",
            Self::Sorting => "sorting",
            Self::Locale => "locale",
            Self::SingleClick => "single_click",
        }
    }

    /// Extracts the bind value for this field from `user`, JSON-encoding the
    /// structured fields.
    fn bind_value(self, user: &User) -> Result<Box<dyn ToSql>, StorageError> {
        Ok(match self {
            Self::Password => Box::new(user.password.clone()),
            Self::Scope => Box::new(user.scope.clone()),
            Self::Perm => Box::new(serde_json::to_string(&user.perm)?),
            Self::Commands => Box::new(serde_json::to_string(&user.commands)?),
            Self::Sorting => Box::new(serde_json::to_string(&user.sorting)?),
            Self::Locale => Box::new(user.locale.clone()),
            Self::SingleClick => Box::new(user.single_click),
        })
    }
}

impl FromStr for UserField {
    type Err = StorageError;

    /// Resolves a field name to its identifier, failing with
    /// [`StorageError::UnknownField`] before any SQL is issued.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "password" => Ok(Self::Password),
            "scope" => Ok(Self::Scope),
            "perm" => Ok(Self::Perm),
            "commands" => Ok(Self::Commands),
            "sorting" => Ok(Self::Sorting),
            "locale" => Ok(Self::Locale),
            "single_click" => Ok(Self::SingleClick),
            _ => Err(StorageError::UnknownField(s.to_string())),
        }
    }
}

impl UserStore {
    pub(crate) fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Retrieves a user by numeric id.
    pub fn get_by_id(&self, id: i64) -> Result<User, StorageError> {
        let conn = self.pool.get()?;
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            [id],
            map_row_to_user,
        )
        .optional()?
        .ok_or_else(|| StorageError::NotFound(format!("user id {id}")))
    }

    /// Retrieves a user by username.
    pub fn get_by_username(&self, username: &str) -> Result<User, StorageError> {
        let conn = self.pool.get()?;
        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
            [username],
            map_row_to_user,
        )
        .optional()?
        .ok_or_else(|| StorageError::NotFound(format!("user '{username}'")))
    }

    /// Lists all users with every field populated, ordered by id.
    pub fn list(&self) -> Result<Vec<User>, StorageError> {
        let conn = self.pool.get()?;
        let mut stmt =
            conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id ASC"))?;

        let rows = stmt.query_map([], map_row_to_user)?;
        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    /// Saves a user, inserting or updating in place keyed on username.
    ///
    /// On username conflict the existing row's mutable columns are
    /// overwritten; its id and username are untouched. The caller's `id`
    /// field is ignored; the database owns id assignment.
    pub fn save(&self, user: &User) -> Result<(), StorageError> {
        let perm_json = serde_json::to_string(&user.perm)?;
        let commands_json = serde_json::to_string(&user.commands)?;
        let sorting_json = serde_json::to_string(&user.sorting)?;

        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO users (
                username, password, fs_path, perm, commands, sorting, locale, single_click
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(username) DO UPDATE SET
                password = excluded.password,
                fs_path = excluded.fs_path,
                perm = excluded.perm,
                commands = excluded.commands,
                sorting = excluded.sorting,
                locale = excluded.locale,
                single_click = excluded.single_click",
            params![
                user.username,
                user.password,
                user.scope,
                perm_json,
                commands_json,
                sorting_json,
                user.locale,
                user.single_click,
            ],
        )?;
        Ok(())
    }

    /// Deletes a user by id. Deleting an absent id is not an error.
    pub fn delete_by_id(&self, id: i64) -> Result<(), StorageError> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM users WHERE id = ?1", [id])?;
        Ok(())
    }

    /// Deletes a user by username. Deleting an absent username is not an
    /// error.
    pub fn delete_by_username(&self, username: &str) -> Result<(), StorageError> {
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM users WHERE username = ?1", [username])?;
        Ok(())
    }

    /// Writes only the named fields of `user`, keyed on its id.
    ///
    /// An empty field list behaves as a full [`save`](Self::save). Updating
    /// an id with no row writes nothing and is not an error, matching the
    /// delete operations.
    pub fn update(&self, user: &User, fields: &[UserField]) -> Result<(), StorageError> {
        if fields.is_empty() {
            return self.save(user);
        }

        let mut set_parts: Vec<String> = Vec::with_capacity(fields.len());
        let mut values: Vec<Box<dyn ToSql>> = Vec::with_capacity(fields.len() + 1);
        for (idx, field) in fields.iter().enumerate() {
            set_parts.push(format!("{} = ?{}", field.column(), idx + 1));
            values.push(field.bind_value(user)?);
        }

        let sql = format!(
            "UPDATE users SET {} WHERE id = ?{}",
            set_parts.join(", "),
            fields.len() + 1
        );
        values.push(Box::new(user.id));

        let params: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
        let conn = self.pool.get()?;
        conn.execute(&sql, params.as_slice())?;
        Ok(())
    }
}

fn map_row_to_user(row: &Row) -> rusqlite::Result<User> {
    let perm_json: String = row.get(4)?;
    let perm: Permissions = serde_json::from_str(&perm_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let commands_json: String = row.get(5)?;
    let commands: Vec<String> = serde_json::from_str(&commands_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let sorting_json: String = row.get(6)?;
    let sorting: Sorting = serde_json::from_str(&sorting_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
        scope: row.get(3)?,
        perm,
        commands,
        sorting,
        locale: row.get(7)?,
        single_click: row.get(8)?,
    })
}
