//! Sample data for development databases.

use movieweb_common::{MovieDetails, MovieStore, Result};

const SAMPLE_USERS: &[&str] = &["Alice", "Bob", "Charlie", "Diana"];

/// Movies given to the first sample user.
const SAMPLE_MOVIES: &[(&str, &str, i32, f64)] = &[
    ("The Shawshank Redemption", "Frank Darabont", 1994, 9.3),
    ("The Godfather", "Francis Ford Coppola", 1972, 9.2),
    ("Inception", "Christopher Nolan", 2010, 8.8),
];

/// Insert the sample users and movies if the store has no users yet.
///
/// Safe to call from several processes at once: the store performs the
/// check and the inserts atomically. Returns whether anything was inserted.
pub fn seed_sample_data(store: &dyn MovieStore) -> Result<bool> {
    let movies: Vec<MovieDetails> = SAMPLE_MOVIES
        .iter()
        .map(|&(title, director, year, rating)| MovieDetails::new(title, director, year, rating))
        .collect();

    let seeded = store.seed_if_empty(SAMPLE_USERS, &movies)?;
    if seeded {
        tracing::info!(
            "Seeded {} sample users and {} sample movies",
            SAMPLE_USERS.len(),
            SAMPLE_MOVIES.len()
        );
    } else {
        tracing::debug!("Store already has users; skipping sample data");
    }
    Ok(seeded)
}
