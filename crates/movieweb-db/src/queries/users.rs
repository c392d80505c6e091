//! User CRUD operations.

use movieweb_common::{Error, Result, User, UserId};
use rusqlite::{Connection, OptionalExtension};

use crate::errors::{is_unique_violation, map_sqlite_error};
use crate::rows::{user_from_row, USER_COLUMNS};

/// Insert a user and return it. The username must already be normalized.
pub fn create_user(conn: &Connection, username: &str) -> Result<User> {
    conn.execute("INSERT INTO users (username) VALUES (?1)", [username])
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::duplicate_username(username)
            } else {
                map_sqlite_error(e)
            }
        })?;

    Ok(User {
        id: UserId::new(conn.last_insert_rowid()),
        username: username.to_string(),
    })
}

/// Get a user by primary key.
pub fn get_user_by_id(conn: &Connection, id: UserId) -> Result<Option<User>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        [id.get()],
        user_from_row,
    )
    .optional()
    .map_err(map_sqlite_error)
}

/// Get a user by username.
pub fn get_user_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
        [username],
        user_from_row,
    )
    .optional()
    .map_err(map_sqlite_error)
}

/// List all users ordered by username.
pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY username ASC, id ASC"
        ))
        .map_err(map_sqlite_error)?;
    let rows = stmt
        .query_map([], user_from_row)
        .map_err(map_sqlite_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(map_sqlite_error)?;
    Ok(rows)
}

/// Number of users in the table.
pub fn count_users(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
        .map_err(map_sqlite_error)
}

/// Whether a user with this id exists.
pub fn user_exists(conn: &Connection, id: UserId) -> Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM users WHERE id = ?1",
        [id.get()],
        |row| row.get(0),
    )
    .map_err(map_sqlite_error)
}

/// Delete a user by ID. Movies and reviews go with it through the foreign
/// keys. Returns true if a row was deleted.
pub fn delete_user(conn: &Connection, id: UserId) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM users WHERE id = ?1", [id.get()])
        .map_err(map_sqlite_error)?;
    Ok(n > 0)
}
