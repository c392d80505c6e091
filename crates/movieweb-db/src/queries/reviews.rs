//! Review CRUD operations.

use chrono::{DateTime, Utc};
use movieweb_common::{MovieId, Result, Review, ReviewId, UserId};
use rusqlite::{Connection, OptionalExtension};

use crate::errors::map_sqlite_error;
use crate::rows::{format_timestamp, review_from_row, REVIEW_COLUMNS};

/// Insert a review created at `now`; `updated_at` starts equal to it.
pub fn insert_review(
    conn: &Connection,
    user_id: UserId,
    movie_id: MovieId,
    text: &str,
    rating: f64,
    now: DateTime<Utc>,
) -> Result<Review> {
    let stamp = format_timestamp(&now);
    conn.execute(
        "INSERT INTO reviews (user_id, movie_id, text, rating, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        rusqlite::params![user_id.get(), movie_id.get(), text, rating, stamp],
    )
    .map_err(map_sqlite_error)?;

    Ok(Review {
        id: ReviewId::new(conn.last_insert_rowid()),
        user_id,
        movie_id,
        text: text.to_string(),
        rating,
        created_at: now,
        updated_at: now,
    })
}

/// Get a review by primary key.
pub fn get_review_by_id(conn: &Connection, id: ReviewId) -> Result<Option<Review>> {
    conn.query_row(
        &format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?1"),
        [id.get()],
        review_from_row,
    )
    .optional()
    .map_err(map_sqlite_error)
}

fn list_where(conn: &Connection, column: &str, value: i64) -> Result<Vec<Review>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE {column} = ?1
             ORDER BY created_at DESC, id DESC"
        ))
        .map_err(map_sqlite_error)?;
    let rows = stmt
        .query_map([value], review_from_row)
        .map_err(map_sqlite_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(map_sqlite_error)?;
    Ok(rows)
}

/// Reviews of a movie, newest first.
pub fn list_reviews_for_movie(conn: &Connection, movie_id: MovieId) -> Result<Vec<Review>> {
    list_where(conn, "movie_id", movie_id.get())
}

/// Reviews written by a user, newest first.
pub fn list_reviews_for_user(conn: &Connection, user_id: UserId) -> Result<Vec<Review>> {
    list_where(conn, "user_id", user_id.get())
}

/// Replace text and rating and stamp `updated_at`. Returns false if the
/// review is missing.
pub fn update_review(
    conn: &Connection,
    id: ReviewId,
    text: &str,
    rating: f64,
    updated_at: DateTime<Utc>,
) -> Result<bool> {
    let n = conn
        .execute(
            "UPDATE reviews SET text = ?1, rating = ?2, updated_at = ?3 WHERE id = ?4",
            rusqlite::params![text, rating, format_timestamp(&updated_at), id.get()],
        )
        .map_err(map_sqlite_error)?;
    Ok(n > 0)
}

/// Delete a review. Returns true if a row was deleted.
pub fn delete_review(conn: &Connection, id: ReviewId) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM reviews WHERE id = ?1", [id.get()])
        .map_err(map_sqlite_error)?;
    Ok(n > 0)
}
