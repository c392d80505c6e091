//! Typed ID wrappers providing compile-time safety for entity identifiers.
//!
//! Each ID is a newtype over the `i64` row id the store assigns on insert,
//! preventing accidental misuse (e.g., passing a `MovieId` where a
//! `ReviewId` is expected). IDs are never generated by callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Generate a newtype ID wrapper over `i64`.
///
/// The macro produces a struct with:
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - transparent `Serialize` / `Deserialize`
/// - `Display` and `FromStr` delegating to the inner integer
/// - `From<i64>` and `Into<i64>` conversions
macro_rules! typed_id {
    ($($(#[doc = $doc:expr])* $name:ident),+ $(,)?) => {
        $(
            $(#[doc = $doc])*
            #[derive(
                Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
            )]
            #[serde(transparent)]
            pub struct $name(i64);

            impl $name {
                /// Wrap a raw row id.
                #[must_use]
                pub const fn new(raw: i64) -> Self {
                    Self(raw)
                }

                /// Return the raw row id.
                #[must_use]
                pub const fn get(self) -> i64 {
                    self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl FromStr for $name {
                type Err = std::num::ParseIntError;

                fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                    s.parse::<i64>().map(Self)
                }
            }

            impl From<i64> for $name {
                fn from(raw: i64) -> Self {
                    Self(raw)
                }
            }

            impl From<$name> for i64 {
                fn from(id: $name) -> Self {
                    id.0
                }
            }
        )+
    };
}

typed_id!(
    /// Unique identifier for a user.
    UserId,
    /// Unique identifier for a movie.
    MovieId,
    /// Unique identifier for a review.
    ReviewId,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let id = MovieId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!("42".parse::<MovieId>().unwrap(), id);
        assert!("forty-two".parse::<MovieId>().is_err());
    }

    #[test]
    fn test_raw_conversions() {
        let id = UserId::from(7);
        assert_eq!(id.get(), 7);
        assert_eq!(i64::from(id), 7);
    }

    #[test]
    fn test_serde_transparent() {
        let id = ReviewId::new(3);
        assert_eq!(serde_json::to_string(&id).unwrap(), "3");
        let back: ReviewId = serde_json::from_str("3").unwrap();
        assert_eq!(back, id);
    }
}
