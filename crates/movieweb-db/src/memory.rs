//! Process-local [`MovieStore`] kept entirely in memory.
//!
//! Mirrors the SQLite store's semantics (ids starting at 1 and never reused,
//! unique usernames, cascading deletes, ordering) so the two are
//! interchangeable. Nothing survives the process.

use std::collections::BTreeMap;

use movieweb_common::models::{
    next_timestamp, normalize_username, timestamp_now, validate_rating,
};
use movieweb_common::{
    Error, Movie, MovieDetails, MovieId, MovieStore, Result, Review, ReviewId, User, UserId,
};
use parking_lot::RwLock;

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    movies: BTreeMap<MovieId, Movie>,
    reviews: BTreeMap<ReviewId, Review>,
    last_user_id: i64,
    last_movie_id: i64,
    last_review_id: i64,
}

impl Tables {
    fn newest_first(mut reviews: Vec<Review>) -> Vec<Review> {
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        reviews
    }
}

/// In-memory store guarded by a single read/write lock.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MovieStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let tables = self.tables.read();
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username).then(a.id.cmp(&b.id)));
        Ok(users)
    }

    fn get_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.tables.read().users.get(&id).cloned())
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let username = username.trim();
        Ok(self
            .tables
            .read()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    fn create_user(&self, username: &str) -> Result<User> {
        let username = normalize_username(username)?;
        let mut tables = self.tables.write();
        if tables.users.values().any(|u| u.username == username) {
            return Err(Error::duplicate_username(username));
        }

        tables.last_user_id += 1;
        let user = User {
            id: UserId::new(tables.last_user_id),
            username,
        };
        tables.users.insert(user.id, user.clone());
        tracing::debug!("Created user {} ({})", user.id, user.username);
        Ok(user)
    }

    fn delete_user(&self, id: UserId) -> Result<()> {
        let mut tables = self.tables.write();
        if tables.users.remove(&id).is_none() {
            return Err(Error::not_found("user", id));
        }

        tables.movies.retain(|_, m| m.user_id != id);
        let Tables {
            movies, reviews, ..
        } = &mut *tables;
        reviews.retain(|_, r| r.user_id != id && movies.contains_key(&r.movie_id));
        tracing::debug!("Deleted user {}", id);
        Ok(())
    }

    fn list_movies_for_user(&self, user_id: UserId) -> Result<Vec<Movie>> {
        let tables = self.tables.read();
        let mut movies: Vec<Movie> = tables
            .movies
            .values()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        movies.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(movies)
    }

    fn get_movie(&self, id: MovieId) -> Result<Option<Movie>> {
        Ok(self.tables.read().movies.get(&id).cloned())
    }

    fn add_movie(&self, user_id: UserId, details: &MovieDetails) -> Result<Movie> {
        let details = details.normalized()?;
        let mut tables = self.tables.write();
        if !tables.users.contains_key(&user_id) {
            return Err(Error::not_found("user", user_id));
        }

        tables.last_movie_id += 1;
        let movie = Movie {
            id: MovieId::new(tables.last_movie_id),
            user_id,
            title: details.title,
            director: details.director,
            year: details.year,
            rating: details.rating,
        };
        tables.movies.insert(movie.id, movie.clone());
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
        let mut tables = self.tables.write();
        let movie = tables
            .movies
            .get_mut(&id)
            .ok_or_else(|| Error::not_found("movie", id))?;

        movie.title = details.title;
        movie.director = details.director;
        movie.year = details.year;
        movie.rating = details.rating;
        tracing::debug!("Updated movie {}", id);
        Ok(movie.clone())
    }

    fn delete_movie(&self, id: MovieId) -> Result<()> {
        let mut tables = self.tables.write();
        if tables.movies.remove(&id).is_none() {
            return Err(Error::not_found("movie", id));
        }
        tables.reviews.retain(|_, r| r.movie_id != id);
        tracing::debug!("Deleted movie {}", id);
        Ok(())
    }

    fn list_reviews_for_movie(&self, movie_id: MovieId) -> Result<Vec<Review>> {
        let tables = self.tables.read();
        let reviews = tables
            .reviews
            .values()
            .filter(|r| r.movie_id == movie_id)
            .cloned()
            .collect();
        Ok(Tables::newest_first(reviews))
    }

    fn list_reviews_for_user(&self, user_id: UserId) -> Result<Vec<Review>> {
        let tables = self.tables.read();
        let reviews = tables
            .reviews
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        Ok(Tables::newest_first(reviews))
    }

    fn get_review(&self, id: ReviewId) -> Result<Option<Review>> {
        Ok(self.tables.read().reviews.get(&id).cloned())
    }

    fn add_review(
        &self,
        user_id: UserId,
        movie_id: MovieId,
        text: &str,
        rating: f64,
    ) -> Result<Review> {
        validate_rating(rating)?;
        let mut tables = self.tables.write();
        if !tables.users.contains_key(&user_id) {
            return Err(Error::not_found("user", user_id));
        }
        if !tables.movies.contains_key(&movie_id) {
            return Err(Error::not_found("movie", movie_id));
        }

        tables.last_review_id += 1;
        let now = timestamp_now();
        let review = Review {
            id: ReviewId::new(tables.last_review_id),
            user_id,
            movie_id,
            text: text.to_string(),
            rating,
            created_at: now,
            updated_at: now,
        };
        tables.reviews.insert(review.id, review.clone());
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
        let mut tables = self.tables.write();
        let review = tables
            .reviews
            .get_mut(&id)
            .ok_or_else(|| Error::not_found("review", id))?;

        review.text = text.to_string();
        review.rating = rating;
        review.updated_at = next_timestamp(review.updated_at);
        tracing::debug!("Updated review {}", id);
        Ok(review.clone())
    }

    fn delete_review(&self, id: ReviewId) -> Result<()> {
        if self.tables.write().reviews.remove(&id).is_none() {
            return Err(Error::not_found("review", id));
        }
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

        let mut tables = self.tables.write();
        if !tables.users.is_empty() {
            return Ok(false);
        }
        for (i, name) in usernames.iter().enumerate() {
            if usernames[..i].contains(name) {
                return Err(Error::duplicate_username(name.as_str()));
            }
        }

        let mut owner = None;
        for username in usernames {
            tables.last_user_id += 1;
            let id = UserId::new(tables.last_user_id);
            tables.users.insert(id, User { id, username });
            owner.get_or_insert(id);
        }
        if let Some(user_id) = owner {
            for details in details {
                tables.last_movie_id += 1;
                let id = MovieId::new(tables.last_movie_id);
                let movie = Movie {
                    id,
                    user_id,
                    title: details.title,
                    director: details.director,
                    year: details.year,
                    rating: details.rating,
                };
                tables.movies.insert(id, movie);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();
        let first = store.create_user("alice").unwrap();
        store.delete_user(first.id).unwrap();
        let second = store.create_user("alice").unwrap();
        assert_eq!(first.id, UserId::new(1));
        assert_eq!(second.id, UserId::new(2));
    }

    #[test]
    fn seed_with_repeated_name_inserts_nothing() {
        let store = MemoryStore::new();
        let err = store.seed_if_empty(&["ann", "bo", "ann"], &[]).unwrap_err();
        assert_eq!(err, Error::duplicate_username("ann"));
        assert!(store.list_users().unwrap().is_empty());
    }

    #[test]
    fn delete_user_removes_reviews_on_their_movies() {
        let store = MemoryStore::new();
        let alice = store.create_user("alice").unwrap();
        let bob = store.create_user("bob").unwrap();
        let movie = store
            .add_movie(alice.id, &MovieDetails::new("Heat", "Michael Mann", 1995, 8.3))
            .unwrap();
        let bobs_review = store.add_review(bob.id, movie.id, "Tense", 8.0).unwrap();

        store.delete_user(alice.id).unwrap();
        assert!(store.get_movie(movie.id).unwrap().is_none());
        assert!(store.get_review(bobs_review.id).unwrap().is_none());
        assert!(store.get_user(bob.id).unwrap().is_some());
    }
}
