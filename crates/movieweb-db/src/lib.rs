//! movieweb-db: store implementations for the movieweb persistence contract.
//!
//! This crate provides two [`MovieStore`](movieweb_common::MovieStore)
//! backends:
//!
//! - [`SqliteStore`]: SQLite with rusqlite, r2d2 connection pooling and
//!   embedded migrations
//! - [`MemoryStore`]: a process-local store for tests and throwaway runs
//!
//! # Modules
//!
//! - `migrations` - Database schema migrations
//! - `pool` - Connection pool management
//! - `queries` - Per-table SQL operations
//! - `errors` - Translation of driver errors into the common taxonomy
//!
//! # Example
//!
//! ```
//! use movieweb_common::{MovieDetails, MovieStore};
//! use movieweb_db::SqliteStore;
//!
//! let store = SqliteStore::open_in_memory().unwrap();
//! let alice = store.create_user("alice").unwrap();
//! let movie = store
//!     .add_movie(alice.id, &MovieDetails::new("Heat", "Michael Mann", 1995, 8.3))
//!     .unwrap();
//! assert_eq!(store.list_movies_for_user(alice.id).unwrap(), vec![movie]);
//! ```

pub mod errors;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod queries;
mod rows;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
