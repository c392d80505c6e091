mod cli;
mod output;

use movieweb::{config, store};
use movieweb_common::{MovieDetails, MovieId, MovieStore, ReviewId, UserId};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, MovieCommand, ReviewCommand, UserCommand};
use output::Output;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "movieweb=debug,movieweb_db=debug,movieweb_common=debug".to_string()
        } else {
            "movieweb=warn,movieweb_db=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Version = cli.command {
        println!("movieweb {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = config::load_config_or_default(cli.config.as_deref())?;
    let store = store::open_store(&config.database).context("Failed to open store")?;
    let out = Output::new(cli.json);

    match cli.command {
        Commands::Init => out.done(&format!(
            "Database ready ({} backend)",
            store.backend_name()
        )),
        Commands::Users(cmd) => run_users(store.as_ref(), &out, cmd),
        Commands::Movies(cmd) => run_movies(store.as_ref(), &out, cmd),
        Commands::Reviews(cmd) => run_reviews(store.as_ref(), &out, cmd),
        Commands::Version => Ok(()),
    }
}

fn run_users(store: &dyn MovieStore, out: &Output, cmd: UserCommand) -> Result<()> {
    match cmd {
        UserCommand::List => out.users(&store.list_users()?),
        UserCommand::Show { id } => {
            let user = store
                .get_user(UserId::new(id))?
                .with_context(|| format!("user {id} not found"))?;
            out.user(&user)
        }
        UserCommand::Add { username } => out.user(&store.create_user(&username)?),
        UserCommand::Delete { id } => {
            store.delete_user(UserId::new(id))?;
            out.done(&format!("Deleted user {id}"))
        }
    }
}

fn run_movies(store: &dyn MovieStore, out: &Output, cmd: MovieCommand) -> Result<()> {
    match cmd {
        MovieCommand::List { user_id } => {
            out.movies(&store.list_movies_for_user(UserId::new(user_id))?)
        }
        MovieCommand::Show { id } => {
            let movie = store
                .get_movie(MovieId::new(id))?
                .with_context(|| format!("movie {id} not found"))?;
            out.movie(&movie)
        }
        MovieCommand::Add { user_id, fields } => {
            let details =
                MovieDetails::new(fields.title, fields.director, fields.year, fields.rating);
            out.movie(&store.add_movie(UserId::new(user_id), &details)?)
        }
        MovieCommand::Update { id, fields } => {
            // The store replaces every field, so fill gaps from the current row.
            let id = MovieId::new(id);
            let current = store
                .get_movie(id)?
                .with_context(|| format!("movie {id} not found"))?;
            let mut details = current.details();
            if let Some(title) = fields.title {
                details.title = title;
            }
            if let Some(director) = fields.director {
                details.director = director;
            }
            if let Some(year) = fields.year {
                details.year = year;
            }
            if let Some(rating) = fields.rating {
                details.rating = rating;
            }
            out.movie(&store.update_movie(id, &details)?)
        }
        MovieCommand::Delete { id } => {
            store.delete_movie(MovieId::new(id))?;
            out.done(&format!("Deleted movie {id}"))
        }
    }
}

fn run_reviews(store: &dyn MovieStore, out: &Output, cmd: ReviewCommand) -> Result<()> {
    match cmd {
        ReviewCommand::ForMovie { movie_id } => {
            out.reviews(&store.list_reviews_for_movie(MovieId::new(movie_id))?)
        }
        ReviewCommand::ForUser { user_id } => {
            out.reviews(&store.list_reviews_for_user(UserId::new(user_id))?)
        }
        ReviewCommand::Show { id } => {
            let review = store
                .get_review(ReviewId::new(id))?
                .with_context(|| format!("review {id} not found"))?;
            out.review(&review)
        }
        ReviewCommand::Add {
            user_id,
            movie_id,
            text,
            rating,
        } => out.review(&store.add_review(
            UserId::new(user_id),
            MovieId::new(movie_id),
            &text,
            rating,
        )?),
        ReviewCommand::Update { id, text, rating } => {
            out.review(&store.update_review(ReviewId::new(id), &text, rating)?)
        }
        ReviewCommand::Delete { id } => {
            store.delete_review(ReviewId::new(id))?;
            out.done(&format!("Deleted review {id}"))
        }
    }
}
