use movieweb_db::pool::PoolOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Which [`MovieStore`](movieweb_common::MovieStore) implementation to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// SQLite database file on disk
    #[default]
    Sqlite,
    /// Process-local store; nothing is persisted
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: Backend,

    /// SQLite database file (`~` is expanded)
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    /// Maximum pooled SQLite connections
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// How long a write waits on a locked database before failing
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Insert sample users and movies when the user table is empty
    #[serde(default)]
    pub seed_sample_data: bool,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("data/movieweb.db")
}

fn default_pool_size() -> u32 {
    4
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            path: default_db_path(),
            pool_size: default_pool_size(),
            busy_timeout_ms: default_busy_timeout_ms(),
            seed_sample_data: false,
        }
    }
}

impl DatabaseConfig {
    /// The database path with a leading `~` expanded.
    pub fn resolved_path(&self) -> PathBuf {
        let raw = self.path.to_string_lossy();
        PathBuf::from(shellexpand::tilde(raw.as_ref()).as_ref())
    }

    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            max_size: self.pool_size,
            busy_timeout: Duration::from_millis(self.busy_timeout_ms),
        }
    }
}
