//! Questions authored by users.
//!
//! A question is owned by the user who created it. Only that user may revise
//! or delete it; see [`crate::domain::ensure_owner`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{GenreId, QuestionId, UserId};

/// Maximum question title length in characters.
pub const QUESTION_TITLE_MAX: usize = 200;

/// Validation errors returned by [`QuestionTitle::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionTitleValidationError {
    Empty,
    TooLong { max: usize },
}

impl fmt::Display for QuestionTitleValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "title is required"),
            Self::TooLong { max } => write!(f, "title must be {max} characters or less"),
        }
    }
}

impl std::error::Error for QuestionTitleValidationError {}

/// Validated question title.
///
/// ## Invariants
/// - Non-empty once trimmed.
/// - At most [`QUESTION_TITLE_MAX`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionTitle(String);

impl QuestionTitle {
    /// Validate a raw title. Surrounding whitespace is removed.
    pub fn new(raw: &str) -> Result<Self, QuestionTitleValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QuestionTitleValidationError::Empty);
        }
        if trimmed.chars().count() > QUESTION_TITLE_MAX {
            return Err(QuestionTitleValidationError::TooLong {
                max: QUESTION_TITLE_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for QuestionTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<QuestionTitle> for String {
    fn from(value: QuestionTitle) -> Self {
        value.0
    }
}

/// Question awaiting persistence. Counters start at zero in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub genre_id: GenreId,
    pub owner_id: UserId,
    pub title: QuestionTitle,
    pub body: String,
    pub explanation: String,
    pub created_at: DateTime<Utc>,
}

/// Owner-editable fields of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRevision {
    pub title: QuestionTitle,
    pub body: String,
    pub explanation: String,
}

/// Stored question.
///
/// Serialized with snake_case keys; the owner appears as `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    pub id: QuestionId,
    pub genre_id: GenreId,
    #[serde(rename = "user_id")]
    #[schema(value_type = String)]
    pub owner_id: UserId,
    #[schema(example = "Which year did the Berlin Wall fall?")]
    pub title: String,
    pub body: String,
    pub explanation: String,
    pub created_at: DateTime<Utc>,
    pub views: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
}

impl Question {
    /// Apply an owner revision. Identity, ownership, timestamps and counters
    /// are left untouched.
    pub fn revise(&mut self, revision: QuestionRevision) {
        self.title = revision.title.into();
        self.body = revision.body;
        self.explanation = revision.explanation;
    }
}
