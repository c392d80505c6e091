//! Row mapping between SQLite and the common models.
//!
//! Timestamps are stored as RFC 3339 text in UTC with microsecond precision,
//! which keeps them lexicographically sortable.

use chrono::{DateTime, SecondsFormat, Utc};
use movieweb_common::{Movie, MovieId, Review, ReviewId, User, UserId};
use rusqlite::types::Type;
use rusqlite::Row;

pub(crate) const USER_COLUMNS: &str = "id, username";

pub(crate) const MOVIE_COLUMNS: &str = "id, user_id, title, director, year, rating";

pub(crate) const REVIEW_COLUMNS: &str =
    "id, user_id, movie_id, text, rating, created_at, updated_at";

pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let s: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: UserId::new(row.get(0)?),
        username: row.get(1)?,
    })
}

pub(crate) fn movie_from_row(row: &Row) -> rusqlite::Result<Movie> {
    Ok(Movie {
        id: MovieId::new(row.get(0)?),
        user_id: UserId::new(row.get(1)?),
        title: row.get(2)?,
        director: row.get(3)?,
        year: row.get(4)?,
        rating: row.get(5)?,
    })
}

pub(crate) fn review_from_row(row: &Row) -> rusqlite::Result<Review> {
    Ok(Review {
        id: ReviewId::new(row.get(0)?),
        user_id: UserId::new(row.get(1)?),
        movie_id: MovieId::new(row.get(2)?),
        text: row.get(3)?,
        rating: row.get(4)?,
        created_at: parse_timestamp(row, 5)?,
        updated_at: parse_timestamp(row, 6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamps_keep_microseconds_and_sort() {
        let early = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let late = early + chrono::Duration::microseconds(1);

        let a = format_timestamp(&early);
        let b = format_timestamp(&late);
        assert_eq!(a, "2024-01-02T03:04:05.000000Z");
        assert!(a < b);
    }
}
