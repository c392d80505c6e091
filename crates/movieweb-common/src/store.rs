//! The persistence contract.
//!
//! Everything outside the store crates talks to storage through
//! [`MovieStore`]. Implementations are chosen once at start-up and handed to
//! consumers explicitly (usually as `Arc<dyn MovieStore>`).
//!
//! Every method is a single atomic unit: mutations either commit with all of
//! their side effects or leave the store untouched. Lookups by id return
//! `Ok(None)` for missing rows; mutations report missing rows as
//! [`Error::NotFound`](crate::Error::NotFound).

use crate::error::Result;
use crate::ids::{MovieId, ReviewId, UserId};
use crate::models::{Movie, MovieDetails, Review, User};

/// Read/write operations over users, movies and reviews.
pub trait MovieStore: Send + Sync {
    /// Short backend name for logging.
    fn backend_name(&self) -> &'static str;

    // ---------------------------------------------------------------------
    // Users
    // ---------------------------------------------------------------------

    /// All users, ordered by username.
    fn list_users(&self) -> Result<Vec<User>>;

    fn get_user(&self, id: UserId) -> Result<Option<User>>;

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Create a user. Fails with `InvalidInput` for a blank name and
    /// `DuplicateUsername` if the name is taken.
    fn create_user(&self, username: &str) -> Result<User>;

    /// Delete a user together with their movies and reviews.
    fn delete_user(&self, id: UserId) -> Result<()>;

    // ---------------------------------------------------------------------
    // Movies
    // ---------------------------------------------------------------------

    /// Movies owned by the user, ordered by title. Empty when there are none.
    fn list_movies_for_user(&self, user_id: UserId) -> Result<Vec<Movie>>;

    fn get_movie(&self, id: MovieId) -> Result<Option<Movie>>;

    /// Add a movie to a user's list.
    fn add_movie(&self, user_id: UserId, details: &MovieDetails) -> Result<Movie>;

    /// Replace every descriptive field of a movie.
    fn update_movie(&self, id: MovieId, details: &MovieDetails) -> Result<Movie>;

    /// Delete a movie and the reviews that reference it.
    fn delete_movie(&self, id: MovieId) -> Result<()>;

    // ---------------------------------------------------------------------
    // Reviews
    // ---------------------------------------------------------------------

    /// Reviews of a movie, newest first.
    fn list_reviews_for_movie(&self, movie_id: MovieId) -> Result<Vec<Review>>;

    /// Reviews written by a user, newest first.
    fn list_reviews_for_user(&self, user_id: UserId) -> Result<Vec<Review>>;

    fn get_review(&self, id: ReviewId) -> Result<Option<Review>>;

    /// Add a review. Both the user and the movie must exist.
    fn add_review(
        &self,
        user_id: UserId,
        movie_id: MovieId,
        text: &str,
        rating: f64,
    ) -> Result<Review>;

    /// Replace the text and rating of a review and advance `updated_at`.
    fn update_review(&self, id: ReviewId, text: &str, rating: f64) -> Result<Review>;

    fn delete_review(&self, id: ReviewId) -> Result<()>;

    // ---------------------------------------------------------------------
    // Bulk
    // ---------------------------------------------------------------------

    /// Create `usernames` and give the first of them `movies`, but only if
    /// the store has no users yet.
    ///
    /// The emptiness check and every insert form one atomic unit, so
    /// concurrent callers seed at most once and a failure leaves no partial
    /// data. Returns whether anything was inserted.
    fn seed_if_empty(&self, usernames: &[&str], movies: &[MovieDetails]) -> Result<bool>;
}
