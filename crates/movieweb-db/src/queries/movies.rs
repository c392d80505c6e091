//! Movie CRUD operations.
//!
//! Movies are owned by exactly one user via `user_id`.

use movieweb_common::{Movie, MovieDetails, MovieId, Result, UserId};
use rusqlite::{Connection, OptionalExtension};

use crate::errors::map_sqlite_error;
use crate::rows::{movie_from_row, MOVIE_COLUMNS};

/// Insert a movie for `user_id` and return it.
pub fn insert_movie(conn: &Connection, user_id: UserId, details: &MovieDetails) -> Result<Movie> {
    conn.execute(
        "INSERT INTO movies (user_id, title, director, year, rating)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            user_id.get(),
            details.title,
            details.director,
            details.year,
            details.rating,
        ],
    )
    .map_err(map_sqlite_error)?;

    Ok(Movie {
        id: MovieId::new(conn.last_insert_rowid()),
        user_id,
        title: details.title.clone(),
        director: details.director.clone(),
        year: details.year,
        rating: details.rating,
    })
}

/// Get a movie by primary key.
pub fn get_movie_by_id(conn: &Connection, id: MovieId) -> Result<Option<Movie>> {
    conn.query_row(
        &format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = ?1"),
        [id.get()],
        movie_from_row,
    )
    .optional()
    .map_err(map_sqlite_error)
}

/// List the movies owned by a user, ordered by title.
pub fn list_movies_for_user(conn: &Connection, user_id: UserId) -> Result<Vec<Movie>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE user_id = ?1 ORDER BY title ASC, id ASC"
        ))
        .map_err(map_sqlite_error)?;
    let rows = stmt
        .query_map([user_id.get()], movie_from_row)
        .map_err(map_sqlite_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(map_sqlite_error)?;
    Ok(rows)
}

/// Whether a movie with this id exists.
pub fn movie_exists(conn: &Connection, id: MovieId) -> Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM movies WHERE id = ?1",
        [id.get()],
        |row| row.get(0),
    )
    .map_err(map_sqlite_error)
}

/// Overwrite every descriptive field. Returns false if the movie is missing.
pub fn update_movie(conn: &Connection, id: MovieId, details: &MovieDetails) -> Result<bool> {
    let n = conn
        .execute(
            "UPDATE movies SET title = ?1, director = ?2, year = ?3, rating = ?4 WHERE id = ?5",
            rusqlite::params![
                details.title,
                details.director,
                details.year,
                details.rating,
                id.get(),
            ],
        )
        .map_err(map_sqlite_error)?;
    Ok(n > 0)
}

/// Delete a movie (and, through the foreign key, its reviews).
pub fn delete_movie(conn: &Connection, id: MovieId) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM movies WHERE id = ?1", [id.get()])
        .map_err(map_sqlite_error)?;
    Ok(n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::init_memory_pool;
    use crate::queries::users::create_user;

    fn inception() -> MovieDetails {
        MovieDetails::new("Inception", "Christopher Nolan", 2010, 8.8)
    }

    #[test]
    fn insert_and_get() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let user = create_user(&conn, "alice").unwrap();

        let movie = insert_movie(&conn, user.id, &inception()).unwrap();
        assert_eq!(movie.id, MovieId::new(1));

        let found = get_movie_by_id(&conn, movie.id).unwrap().unwrap();
        assert_eq!(found, movie);
        assert!(movie_exists(&conn, movie.id).unwrap());
    }

    #[test]
    fn insert_for_missing_user_fails() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let err = insert_movie(&conn, UserId::new(42), &inception()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn list_only_own_movies_sorted() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let alice = create_user(&conn, "alice").unwrap();
        let bob = create_user(&conn, "bob").unwrap();

        insert_movie(&conn, alice.id, &MovieDetails::new("Zodiac", "David Fincher", 2007, 7.7))
            .unwrap();
        insert_movie(&conn, alice.id, &inception()).unwrap();
        insert_movie(&conn, bob.id, &MovieDetails::new("Alien", "Ridley Scott", 1979, 8.5))
            .unwrap();

        let titles: Vec<_> = list_movies_for_user(&conn, alice.id)
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, ["Inception", "Zodiac"]);
    }

    #[test]
    fn update_and_delete() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let user = create_user(&conn, "alice").unwrap();
        let movie = insert_movie(&conn, user.id, &inception()).unwrap();

        let changed = MovieDetails::new("Inception", "C. Nolan", 2010, 9.0);
        assert!(update_movie(&conn, movie.id, &changed).unwrap());
        let found = get_movie_by_id(&conn, movie.id).unwrap().unwrap();
        assert_eq!(found.details(), changed);

        assert!(delete_movie(&conn, movie.id).unwrap());
        assert!(!delete_movie(&conn, movie.id).unwrap());
        assert!(!update_movie(&conn, movie.id, &changed).unwrap());
    }

    #[test]
    fn deleting_user_cascades_to_movies() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let user = create_user(&conn, "alice").unwrap();
        let movie = insert_movie(&conn, user.id, &inception()).unwrap();

        crate::queries::users::delete_user(&conn, user.id).unwrap();
        assert!(get_movie_by_id(&conn, movie.id).unwrap().is_none());
    }
}
