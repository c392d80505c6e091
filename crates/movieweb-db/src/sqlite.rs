//! SQLite-backed [`MovieStore`].
//!
//! Every call checks a connection out of the pool and returns it when the
//! guard drops. Mutations run inside an IMMEDIATE transaction so the write
//! lock is taken up front; a failure anywhere inside rolls everything back.

use movieweb_common::models::{next_timestamp, normalize_username, timestamp_now, validate_rating};
use movieweb_common::{
    Error, Movie, MovieDetails, MovieId, MovieStore, Result, Review, ReviewId, User, UserId,
};
use rusqlite::{Connection, TransactionBehavior};

use crate::errors::map_sqlite_error;
use crate::pool::{self, DbPool, PoolOptions, PooledConnection};
use crate::queries::{movies, reviews, users};

/// Store over an r2d2 pool of SQLite connections.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Open (creating if needed) the database file at `path` and apply any
    /// pending migrations.
    pub fn open(path: &str, options: &PoolOptions) -> Result<Self> {
        let pool = pool::init_pool_with(path, options)?;
        tracing::info!("Opened SQLite store at {}", path);
        Ok(Self { pool })
    }

    /// Private in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            pool: pool::init_memory_pool()?,
        })
    }

    fn conn(&self) -> Result<PooledConnection> {
        pool::get_conn(&self.pool)
    }

    /// Run `f` in a write transaction, committing only if it succeeds.
    fn write<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let mut conn = self.conn()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(map_sqlite_error)?;
        let value = f(&tx)?;
        tx.commit().map_err(map_sqlite_error)?;
        Ok(value)
    }
}

impl MovieStore for SqliteStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.conn()?;
        users::list_users(&conn)
    }

    fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let conn = self.conn()?;
        users::get_user_by_id(&conn, id)
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = self.conn()?;
        users::get_user_by_username(&conn, username.trim())
    }

    fn create_user(&self, username: &str) -> Result<User> {
        let username = normalize_username(username)?;
        let user = self.write(|conn| users::create_user(conn, &username))?;
        tracing::debug!("Created user {} ({})", user.id, user.username);
        Ok(user)
    }

    fn delete_user(&self, id: UserId) -> Result<()> {
        self.write(|conn| {
            if !users::delete_user(conn, id)? {
                return Err(Error::not_found("user", id));
            }
            Ok(())
        })?;
        tracing::debug!("Deleted user {}", id);
        Ok(())
    }

    fn list_movies_for_user(&self, user_id: UserId) -> Result<Vec<Movie>> {
        let conn = self.conn()?;
        movies::list_movies_for_user(&conn, user_id)
    }

    fn get_movie(&self, id: MovieId) -> Result<Option<Movie>> {
        let conn = self.conn()?;
        movies::get_movie_by_id(&conn, id)
    }

    fn add_movie(&self, user_id: UserId, details: &MovieDetails) -> Result<Movie> {
        let details = details.normalized()?;
        let movie = self.write(|conn| {
            if !users::user_exists(conn, user_id)? {
                return Err(Error::not_found("user", user_id));
            }
            movies::insert_movie(conn, user_id, &details)
        })?;
        tracing::debug!(
            "Added movie {} '{}' for user {}",
            movie.id,
            movie.title,
            user_id
        );
        Ok(movie)
    }

    fn update_movie(&self, id: MovieId, details: &MovieDetails) -> Result<Movie> {
        let details = details.normalized()?;
        let movie = self.write(|conn| {
            if !movies::update_movie(conn, id, &details)? {
                return Err(Error::not_found("movie", id));
            }
            movies::get_movie_by_id(conn, id)?.ok_or_else(|| Error::not_found("movie", id))
        })?;
        tracing::debug!("Updated movie {}", id);
        Ok(movie)
    }

    fn delete_movie(&self, id: MovieId) -> Result<()> {
        self.write(|conn| {
            if !movies::delete_movie(conn, id)? {
                return Err(Error::not_found("movie", id));
            }
            Ok(())
        })?;
        tracing::debug!("Deleted movie {}", id);
        Ok(())
    }

    fn list_reviews_for_movie(&self, movie_id: MovieId) -> Result<Vec<Review>> {
        let conn = self.conn()?;
        reviews::list_reviews_for_movie(&conn, movie_id)
    }

    fn list_reviews_for_user(&self, user_id: UserId) -> Result<Vec<Review>> {
        let conn = self.conn()?;
        reviews::list_reviews_for_user(&conn, user_id)
    }

    fn get_review(&self, id: ReviewId) -> Result<Option<Review>> {
        let conn = self.conn()?;
        reviews::get_review_by_id(&conn, id)
    }

    fn add_review(
        &self,
        user_id: UserId,
        movie_id: MovieId,
        text: &str,
        rating: f64,
    ) -> Result<Review> {
        validate_rating(rating)?;
        let review = self.write(|conn| {
            if !users::user_exists(conn, user_id)? {
                return Err(Error::not_found("user", user_id));
            }
            if !movies::movie_exists(conn, movie_id)? {
                return Err(Error::not_found("movie", movie_id));
            }
            reviews::insert_review(conn, user_id, movie_id, text, rating, timestamp_now())
        })?;
        tracing::debug!(
            "Added review {} by user {} for movie {}",
            review.id,
            user_id,
            movie_id
        );
        Ok(review)
    }

    fn update_review(&self, id: ReviewId, text: &str, rating: f64) -> Result<Review> {
        validate_rating(rating)?;
        let review = self.write(|conn| {
            let existing = reviews::get_review_by_id(conn, id)?
                .ok_or_else(|| Error::not_found("review", id))?;
            let updated_at = next_timestamp(existing.updated_at);
            reviews::update_review(conn, id, text, rating, updated_at)?;
            Ok(Review {
                text: text.to_string(),
                rating,
                updated_at,
                ..existing
            })
        })?;
        tracing::debug!("Updated review {}", id);
        Ok(review)
    }

    fn delete_review(&self, id: ReviewId) -> Result<()> {
        self.write(|conn| {
            if !reviews::delete_review(conn, id)? {
                return Err(Error::not_found("review", id));
            }
            Ok(())
        })?;
        tracing::debug!("Deleted review {}", id);
        Ok(())
    }

    fn seed_if_empty(&self, usernames: &[&str], owned: &[MovieDetails]) -> Result<bool> {
        let usernames = usernames
            .iter()
            .map(|name| normalize_username(name))
            .collect::<Result<Vec<_>>>()?;
        let details = owned
            .iter()
            .map(MovieDetails::normalized)
            .collect::<Result<Vec<_>>>()?;

        self.write(|conn| {
            if users::count_users(conn)? > 0 {
                return Ok(false);
            }
            let mut owner = None;
            for name in &usernames {
                let user = users::create_user(conn, name)?;
                owner.get_or_insert(user.id);
            }
            if let Some(owner) = owner {
                for movie in &details {
                    movies::insert_movie(conn, owner, movie)?;
                }
            }
            Ok(true)
        })
    }
}
