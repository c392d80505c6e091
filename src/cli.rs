use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "movieweb")]
#[command(author, version, about = "Track movie lists and reviews per user")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or upgrade the database schema
    Init,

    /// Manage users
    #[command(subcommand)]
    Users(UserCommand),

    /// Manage a user's movies
    #[command(subcommand)]
    Movies(MovieCommand),

    /// Manage reviews
    #[command(subcommand)]
    Reviews(ReviewCommand),

    /// Display version information
    Version,
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// List all users
    List,
    /// Show one user
    Show { id: i64 },
    /// Create a user
    Add { username: String },
    /// Delete a user with their movies and reviews
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum MovieCommand {
    /// List a user's movies
    List { user_id: i64 },
    /// Show one movie
    Show { id: i64 },
    /// Add a movie to a user's list
    Add {
        user_id: i64,
        #[command(flatten)]
        fields: MovieFields,
    },
    /// Update a movie; omitted fields keep their current value
    Update {
        id: i64,
        #[command(flatten)]
        fields: MovieUpdateFields,
    },
    /// Delete a movie and its reviews
    Delete { id: i64 },
}

#[derive(Args)]
pub struct MovieFields {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub director: String,
    #[arg(long)]
    pub year: i32,
    #[arg(long)]
    pub rating: f64,
}

#[derive(Args)]
pub struct MovieUpdateFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub director: Option<String>,
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long)]
    pub rating: Option<f64>,
}

#[derive(Subcommand)]
pub enum ReviewCommand {
    /// Reviews of a movie, newest first
    ForMovie { movie_id: i64 },
    /// Reviews by a user, newest first
    ForUser { user_id: i64 },
    /// Show one review
    Show { id: i64 },
    /// Review a movie
    Add {
        user_id: i64,
        movie_id: i64,
        #[arg(long, default_value = "")]
        text: String,
        #[arg(long)]
        rating: f64,
    },
    /// Replace a review's text and rating
    Update {
        id: i64,
        #[arg(long)]
        text: String,
        #[arg(long)]
        rating: f64,
    },
    /// Delete a review
    Delete { id: i64 },
}
