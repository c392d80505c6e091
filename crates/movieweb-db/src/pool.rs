//! Connection pool management for SQLite via r2d2.
//!
//! Every connection handed out by the pool has foreign keys enforced and a
//! busy timeout set, so lock contention waits before surfacing as a
//! transient error.

use std::path::Path;
use std::time::Duration;

use movieweb_common::{Error, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::errors::map_pool_error;
use crate::migrations;

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Tunables for [`init_pool_with`].
#[derive(Debug, Clone, Copy)]
pub struct PoolOptions {
    /// Maximum number of pooled connections.
    pub max_size: u32,
    /// How long a connection waits on a locked database before giving up.
    pub busy_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_size: 4,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

/// Initialize a database pool backed by a file on disk with default options.
pub fn init_pool(db_path: &str) -> Result<DbPool> {
    init_pool_with(db_path, &PoolOptions::default())
}

/// Initialize a database pool backed by a file on disk.
///
/// Creates the parent directory and the SQLite file if they do not exist,
/// enables foreign keys and WAL journal mode on every new connection, and
/// runs pending migrations.
pub fn init_pool_with(db_path: &str, options: &PoolOptions) -> Result<DbPool> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::internal(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }

    let busy_timeout = options.busy_timeout;
    let manager = SqliteConnectionManager::file(db_path).with_init(move |conn| {
        conn.busy_timeout(busy_timeout)?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;",
        )
    });

    build_and_migrate(manager, options.max_size)
}

/// Initialize an in-memory database pool (useful for tests).
///
/// Each call creates a uniquely-named shared-cache in-memory database so
/// that parallel tests do not interfere with each other, while all
/// connections *within* a single pool still share state.
pub fn init_memory_pool() -> Result<DbPool> {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let uri = format!("file:movieweb_mem_{n}?mode=memory&cache=shared");

    let busy_timeout = PoolOptions::default().busy_timeout;
    let manager = SqliteConnectionManager::file(uri).with_init(move |conn| {
        conn.busy_timeout(busy_timeout)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
    });

    build_and_migrate(manager, PoolOptions::default().max_size)
}

fn build_and_migrate(manager: SqliteConnectionManager, max_size: u32) -> Result<DbPool> {
    let pool = Pool::builder()
        .max_size(max_size)
        .build(manager)
        .map_err(|e| Error::internal(format!("Failed to create connection pool: {e}")))?;

    let conn = get_conn(&pool)?;
    migrations::run_migrations(&conn)?;

    Ok(pool)
}

/// Convenience helper to get a connection from the pool.
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get().map_err(map_pool_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_memory_pool() {
        let pool = init_memory_pool().unwrap();
        assert_eq!(pool.max_size(), 4);
    }

    #[test]
    fn test_get_conn() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        let fk: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn test_memory_pools_are_isolated() {
        let a = init_memory_pool().unwrap();
        let b = init_memory_pool().unwrap();

        get_conn(&a)
            .unwrap()
            .execute("INSERT INTO users (username) VALUES ('only-in-a')", [])
            .unwrap();

        let count: i64 = get_conn(&b)
            .unwrap()
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_file_pool_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("movieweb.db");
        let options = PoolOptions {
            max_size: 2,
            ..PoolOptions::default()
        };

        let pool = init_pool_with(path.to_str().unwrap(), &options).unwrap();
        assert_eq!(pool.max_size(), 2);
        assert!(path.exists());

        let mode: String = get_conn(&pool)
            .unwrap()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }
}
