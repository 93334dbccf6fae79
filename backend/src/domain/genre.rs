//! Genres group questions by topic.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::GenreId;

/// Maximum genre name length in characters.
pub const GENRE_NAME_MAX: usize = 50;

/// Validation errors returned by [`GenreName::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreNameValidationError {
    Empty,
    TooLong { max: usize },
}

impl fmt::Display for GenreNameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "genre name is required"),
            Self::TooLong { max } => write!(f, "genre name must be {max} characters or less"),
        }
    }
}

impl std::error::Error for GenreNameValidationError {}

/// Validated genre name.
///
/// ## Invariants
/// - Trimmed and non-empty.
/// - At most [`GENRE_NAME_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenreName(String);

impl GenreName {
    /// Trim and validate a raw name.
    ///
    /// # Examples
    /// ```
    /// use quiz_backend::domain::GenreName;
    ///
    /// assert_eq!(GenreName::new("  History ").unwrap().as_ref(), "History");
    /// assert!(GenreName::new("   ").is_err());
    /// ```
    pub fn new(raw: &str) -> Result<Self, GenreNameValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GenreNameValidationError::Empty);
        }
        if trimmed.chars().count() > GENRE_NAME_MAX {
            return Err(GenreNameValidationError::TooLong {
                max: GENRE_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for GenreName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Genre awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGenre {
    pub name: GenreName,
}

/// Stored genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Genre {
    pub id: GenreId,
    #[schema(example = "History")]
    pub name: String,
}
