//! Embedded SQL migrations and runner.
//!
//! Migrations are stored as `&str` constants and executed in order. A
//! `schema_migrations` table tracks which versions have been applied, so
//! running the migrations on every start-up is safe.

use movieweb_common::{Error, Result};
use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::errors::map_sqlite_error;

/// V1: users, their movies, and reviews.
///
/// Movies belong to exactly one user. Deleting a user removes their movies
/// and reviews; deleting a movie removes its reviews.
const V1_INITIAL: &str = r#"
CREATE TABLE users (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE CHECK (length(trim(username)) > 0)
);

CREATE TABLE movies (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id  INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    title    TEXT NOT NULL CHECK (length(trim(title)) > 0),
    director TEXT NOT NULL DEFAULT '',
    year     INTEGER NOT NULL,
    rating   REAL NOT NULL CHECK (rating BETWEEN 0 AND 10)
);

CREATE TABLE reviews (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    movie_id   INTEGER NOT NULL REFERENCES movies(id) ON DELETE CASCADE,
    text       TEXT NOT NULL DEFAULT '',
    rating     REAL NOT NULL CHECK (rating BETWEEN 0 AND 10),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX idx_movies_user    ON movies(user_id);
CREATE INDEX idx_reviews_user   ON reviews(user_id, created_at);
CREATE INDEX idx_reviews_movie  ON reviews(movie_id, created_at);
"#;

/// Ordered list of (version, sql) pairs.
const MIGRATIONS: &[(i64, &str)] = &[(1, V1_INITIAL)];

/// Bring the schema on `conn` up to [`latest_version`].
///
/// Idempotent: versions recorded in `schema_migrations` are skipped, so this
/// runs on every start-up. Each version is checked and applied under the
/// database write lock, which makes concurrent callers on one file apply it
/// exactly once. Returns how many versions this call applied.
pub fn run_migrations(conn: &Connection) -> Result<usize> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
    .map_err(map_sqlite_error)?;

    let mut applied = 0;
    for &(version, sql) in MIGRATIONS {
        if apply_once(conn, version, sql)? {
            tracing::info!("Applied migration V{}", version);
            applied += 1;
        }
    }
    Ok(applied)
}

fn apply_once(conn: &Connection, version: i64, sql: &str) -> Result<bool> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(map_sqlite_error)?;

    let recorded: bool = tx
        .query_row(
            "SELECT COUNT(*) > 0 FROM schema_migrations WHERE version = ?1",
            [version],
            |row| row.get(0),
        )
        .map_err(map_sqlite_error)?;
    if recorded {
        return Ok(false);
    }

    tx.execute_batch(sql)
        .map_err(|e| Error::internal(format!("Migration V{version} failed: {e}")))?;
    tx.execute("INSERT INTO schema_migrations (version) VALUES (?1)", [version])
        .map_err(map_sqlite_error)?;
    tx.commit().map_err(map_sqlite_error)?;
    Ok(true)
}

/// Highest applied migration version, or 0 for a fresh database.
pub fn current_version(conn: &Connection) -> Result<i64> {
    let has_table: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master \
             WHERE type = 'table' AND name = 'schema_migrations'",
            [],
            |row| row.get(0),
        )
        .map_err(map_sqlite_error)?;
    if !has_table {
        return Ok(0);
    }

    conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_migrations", [], |row| {
        row.get(0)
    })
    .map_err(map_sqlite_error)
}

/// The latest version embedded in this build.
pub fn latest_version() -> i64 {
    MIGRATIONS.last().map(|&(v, _)| v).unwrap_or(0)
}
