//! Database query modules.
//!
//! Each module holds the SQL for one table and works on a plain
//! `&rusqlite::Connection`, so callers decide the transaction boundaries:
//! - users: user CRUD
//! - movies: movies owned by a user
//! - reviews: reviews of movies, newest first

pub mod movies;
pub mod reviews;
pub mod users;
