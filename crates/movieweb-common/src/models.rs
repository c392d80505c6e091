//! Entity records and the input rules every store applies.
//!
//! Movies are owned directly by a user through `user_id`; reviews reference a
//! user and a movie but never decide ownership.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ids::{MovieId, ReviewId, UserId};

/// Lowest accepted rating for movies and reviews.
pub const RATING_MIN: f64 = 0.0;

/// Highest accepted rating for movies and reviews.
pub const RATING_MAX: f64 = 10.0;

/// A user of the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

/// A movie on a user's list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub user_id: UserId,
    pub title: String,
    pub director: String,
    pub year: i32,
    pub rating: f64,
}

impl Movie {
    /// The descriptive fields of this movie, e.g. as a base for an update.
    pub fn details(&self) -> MovieDetails {
        MovieDetails {
            title: self.title.clone(),
            director: self.director.clone(),
            year: self.year,
            rating: self.rating,
        }
    }
}

/// The complete set of descriptive movie fields.
///
/// Used for both inserts and updates. Updates replace every field; callers
/// that only want to change one field start from [`Movie::details`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub title: String,
    pub director: String,
    pub year: i32,
    pub rating: f64,
}

impl MovieDetails {
    pub fn new(
        title: impl Into<String>,
        director: impl Into<String>,
        year: i32,
        rating: f64,
    ) -> Self {
        Self {
            title: title.into(),
            director: director.into(),
            year,
            rating,
        }
    }

    /// Check the fields without modifying them.
    pub fn validate(&self) -> Result<()> {
        self.normalized().map(|_| ())
    }

    /// Return a trimmed copy, or `InvalidInput` if any field is unusable.
    pub fn normalized(&self) -> Result<Self> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Error::invalid_input("movie title must not be empty"));
        }
        if self.year <= 0 {
            return Err(Error::invalid_input(format!(
                "movie year must be positive, got {}",
                self.year
            )));
        }
        validate_rating(self.rating)?;

        Ok(Self {
            title: title.to_string(),
            director: self.director.trim().to_string(),
            year: self.year,
            rating: self.rating,
        })
    }
}

/// A user's review of a movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub text: String,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Trim a username and reject blank ones.
pub fn normalize_username(username: &str) -> Result<String> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_input("username must not be empty"));
    }
    Ok(trimmed.to_string())
}

/// Reject ratings outside `RATING_MIN..=RATING_MAX` (NaN included).
pub fn validate_rating(rating: f64) -> Result<()> {
    if !rating.is_finite() || !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(Error::invalid_input(format!(
            "rating must be between {RATING_MIN} and {RATING_MAX}, got {rating}"
        )));
    }
    Ok(())
}

/// Current time at the precision the stores persist (microseconds).
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Timestamp for an update of a row last touched at `previous`.
///
/// Always strictly later than `previous`, even when the clock has not moved
/// or went backwards.
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = timestamp_now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_username() {
        assert_eq!(normalize_username("  alice ").unwrap(), "alice");
        assert!(matches!(
            normalize_username("   "),
            Err(Error::InvalidInput(_))
        ));
        assert!(normalize_username("").is_err());
    }

    #[test]
    fn test_movie_details_normalized() {
        let details = MovieDetails::new(" Heat ", " Michael Mann ", 1995, 8.3);
        let normalized = details.normalized().unwrap();
        assert_eq!(normalized.title, "Heat");
        assert_eq!(normalized.director, "Michael Mann");
    }

    #[test]
    fn test_movie_details_rejects_bad_fields() {
        assert!(MovieDetails::new("", "x", 2000, 5.0).validate().is_err());
        assert!(MovieDetails::new("Title", "x", 0, 5.0).validate().is_err());
        assert!(MovieDetails::new("Title", "x", 2000, 10.5).validate().is_err());
        assert!(MovieDetails::new("Title", "", 2000, 0.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(10.0).is_ok());
        assert!(validate_rating(9.5).is_ok());
        assert!(validate_rating(-0.1).is_err());
        assert!(validate_rating(f64::NAN).is_err());
        assert!(validate_rating(f64::INFINITY).is_err());
    }

    #[test]
    fn test_next_timestamp_is_strictly_later() {
        let future = timestamp_now() + Duration::seconds(60);
        let next = next_timestamp(future);
        assert_eq!(next, future + Duration::microseconds(1));

        let past = timestamp_now() - Duration::seconds(60);
        assert!(next_timestamp(past) > past);
    }

    #[test]
    fn test_movie_details_roundtrip_from_movie() {
        let movie = Movie {
            id: MovieId::new(1),
            user_id: UserId::new(1),
            title: "Inception".into(),
            director: "Christopher Nolan".into(),
            year: 2010,
            rating: 8.8,
        };
        assert_eq!(
            movie.details(),
            MovieDetails::new("Inception", "Christopher Nolan", 2010, 8.8)
        );
    }
}
