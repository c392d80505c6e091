//! Rendering of store results for the terminal.

use anyhow::Result;
use movieweb_common::{Movie, Review, User};
use serde::Serialize;

pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn emit_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn users(&self, users: &[User]) -> Result<()> {
        if self.json {
            return self.emit_json(users);
        }
        if users.is_empty() {
            println!("No users.");
        }
        for user in users {
            println!("{:>4}  {}", user.id, user.username);
        }
        Ok(())
    }

    pub fn user(&self, user: &User) -> Result<()> {
        if self.json {
            return self.emit_json(user);
        }
        println!("User {}: {}", user.id, user.username);
        Ok(())
    }

    pub fn movies(&self, movies: &[Movie]) -> Result<()> {
        if self.json {
            return self.emit_json(movies);
        }
        if movies.is_empty() {
            println!("No movies.");
        }
        for movie in movies {
            println!(
                "{:>4}  {} ({}) by {} - {:.1}",
                movie.id, movie.title, movie.year, movie.director, movie.rating
            );
        }
        Ok(())
    }

    pub fn movie(&self, movie: &Movie) -> Result<()> {
        if self.json {
            return self.emit_json(movie);
        }
        println!("Movie {}: {} ({})", movie.id, movie.title, movie.year);
        println!("  Director: {}", movie.director);
        println!("  Rating:   {:.1}", movie.rating);
        println!("  Owner:    user {}", movie.user_id);
        Ok(())
    }

    pub fn reviews(&self, reviews: &[Review]) -> Result<()> {
        if self.json {
            return self.emit_json(reviews);
        }
        if reviews.is_empty() {
            println!("No reviews.");
        }
        for review in reviews {
            println!(
                "{:>4}  user {} on movie {}: {:.1} \"{}\"",
                review.id, review.user_id, review.movie_id, review.rating, review.text
            );
        }
        Ok(())
    }

    pub fn review(&self, review: &Review) -> Result<()> {
        if self.json {
            return self.emit_json(review);
        }
        println!(
            "Review {} by user {} on movie {}",
            review.id, review.user_id, review.movie_id
        );
        println!("  Rating:  {:.1}", review.rating);
        println!("  Text:    {}", review.text);
        println!("  Created: {}", review.created_at.to_rfc3339());
        println!("  Updated: {}", review.updated_at.to_rfc3339());
        Ok(())
    }

    /// Confirmation for operations without a result value.
    pub fn done(&self, message: &str) -> Result<()> {
        if self.json {
            return self.emit_json(&serde_json::json!({ "status": "ok", "message": message }));
        }
        println!("{message}");
        Ok(())
    }
}
