//! Store selection at start-up.
//!
//! The configured backend is constructed once here and handed to callers as
//! an `Arc<dyn MovieStore>`; nothing else in the application names a
//! concrete store type.

use std::sync::Arc;

use movieweb_common::{MovieStore, Result};
use movieweb_db::{MemoryStore, SqliteStore};

use crate::config::{Backend, DatabaseConfig};
use crate::seed;

/// Build the store described by `config`, applying migrations and, when
/// enabled, sample data.
pub fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn MovieStore>> {
    let store: Arc<dyn MovieStore> = match config.backend {
        Backend::Sqlite => {
            let path = config.resolved_path();
            Arc::new(SqliteStore::open(
                &path.to_string_lossy(),
                &config.pool_options(),
            )?)
        }
        Backend::Memory => Arc::new(MemoryStore::new()),
    };
    tracing::info!("Using {} store", store.backend_name());

    if config.seed_sample_data {
        seed::seed_sample_data(store.as_ref())?;
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_backend_with_seed() {
        let config = DatabaseConfig {
            backend: Backend::Memory,
            seed_sample_data: true,
            ..DatabaseConfig::default()
        };
        let store = open_store(&config).unwrap();
        assert_eq!(store.backend_name(), "memory");
        assert_eq!(store.list_users().unwrap().len(), 4);
    }

    #[test]
    fn sqlite_backend_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: dir.path().join("movies.db"),
            ..DatabaseConfig::default()
        };
        let store = open_store(&config).unwrap();
        assert_eq!(store.backend_name(), "sqlite");
        assert!(store.list_users().unwrap().is_empty());
        assert!(dir.path().join("movies.db").exists());
    }

    #[test]
    fn concurrent_seeded_startups_seed_once() {
        use std::sync::Barrier;

        for _ in 0..10 {
            let dir = tempfile::tempdir().unwrap();
            let config = DatabaseConfig {
                path: dir.path().join("movies.db"),
                seed_sample_data: true,
                ..DatabaseConfig::default()
            };
            let barrier = Barrier::new(2);

            let results: Vec<_> = std::thread::scope(|s| {
                let handles: Vec<_> = (0..2)
                    .map(|_| {
                        s.spawn(|| {
                            barrier.wait();
                            open_store(&config).map(|store| store.list_users())
                        })
                    })
                    .collect();
                handles.into_iter().map(|h| h.join().unwrap()).collect()
            });

            for result in results {
                let users = result.unwrap().unwrap();
                assert_eq!(users.len(), 4);
            }

            let store = open_store(&config).unwrap();
            let alice = store.get_user_by_username("Alice").unwrap().unwrap();
            assert_eq!(store.list_movies_for_user(alice.id).unwrap().len(), 3);
        }
    }
}
