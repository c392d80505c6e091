//! movieweb-common: entity types, typed IDs, errors and the persistence contract.
//!
//! This crate is the foundational dependency for the other movieweb crates.
//! It knows nothing about any particular storage technology:
//!
//! - **Typed IDs**: integer newtypes for users, movies and reviews
//! - **Models**: the `User`, `Movie` and `Review` records plus input validation
//! - **Store contract**: the [`MovieStore`] trait every backend implements
//! - **Error handling**: the error taxonomy shared by all backends
//!
//! # Examples
//!
//! ```
//! use movieweb_common::{Error, MovieDetails, Result};
//!
//! let details = MovieDetails::new("Inception", "Christopher Nolan", 2010, 8.8);
//! assert!(details.validate().is_ok());
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_found("movie", 42))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod ids;
pub mod models;
pub mod store;

pub use error::{Error, Result};
pub use ids::*;
pub use models::*;
pub use store::MovieStore;
