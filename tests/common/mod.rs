//! Shared test harness for integration tests.
//!
//! Provides [`stores`], which builds one instance of every backend so a
//! test body can assert the same contract against each of them, and
//! [`TempDb`] for tests that need a database file on disk.

#![allow(dead_code)]

use std::path::PathBuf;

use movieweb_common::{MovieDetails, MovieStore};
use movieweb_db::pool::PoolOptions;
use movieweb_db::{MemoryStore, SqliteStore};
use tempfile::TempDir;

/// One fresh, empty instance of every store implementation.
pub fn stores() -> Vec<Box<dyn MovieStore>> {
    vec![
        Box::new(SqliteStore::open_in_memory().expect("failed to create in-memory sqlite store")),
        Box::new(MemoryStore::new()),
    ]
}

pub fn inception() -> MovieDetails {
    MovieDetails::new("Inception", "Christopher Nolan", 2010, 8.8)
}

/// A temporary directory holding a SQLite database file.
pub struct TempDb {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TempDb {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("movieweb.db");
        Self { dir, path }
    }

    pub fn path_str(&self) -> &str {
        self.path.to_str().expect("temp path is not UTF-8")
    }

    /// Open a new store on the file, running schema initialization.
    pub fn open(&self) -> SqliteStore {
        SqliteStore::open(self.path_str(), &PoolOptions::default())
            .expect("failed to open sqlite store")
    }
}
