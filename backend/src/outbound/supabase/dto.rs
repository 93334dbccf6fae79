//! Wire shapes for PostgREST rows and GoTrue responses.
//!
//! Rows decode leniently: nullable text columns become empty strings and
//! missing counters become zero. Conversion into domain entities re-checks
//! identifiers so a malformed row surfaces as a decode error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{
    Account, Answer, AnswerId, Choice, ChoiceId, Genre, GenreId, NewAnswer, NewChoice, NewGenre,
    NewQuestion, Question, QuestionId, UserId,
};

use super::client::RestError;

fn id<T: TryFrom<i64>>(raw: i64, column: &str) -> Result<T, RestError> {
    T::try_from(raw).map_err(|_| RestError::decode(format!("invalid {column} `{raw}` in row")))
}

fn user_id(raw: String, column: &str) -> Result<UserId, RestError> {
    UserId::new(raw).map_err(|err| RestError::decode(format!("invalid {column} in row: {err}")))
}

#[derive(Debug, Deserialize)]
pub(super) struct GenreRow {
    id: i64,
    name: String,
}

impl TryFrom<GenreRow> for Genre {
    type Error = RestError;

    fn try_from(row: GenreRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: id::<GenreId>(row.id, "id")?,
            name: row.name,
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct GenreInsert<'a> {
    name: &'a str,
}

impl<'a> From<&'a NewGenre> for GenreInsert<'a> {
    fn from(genre: &'a NewGenre) -> Self {
        Self {
            name: genre.name.as_ref(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct QuestionRow {
    id: i64,
    genre_id: i64,
    user_id: String,
    title: String,
    #[serde(default)]
    body: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    views: Option<u32>,
    #[serde(default)]
    correct_count: Option<u32>,
    #[serde(default)]
    incorrect_count: Option<u32>,
}

impl TryFrom<QuestionRow> for Question {
    type Error = RestError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: id::<QuestionId>(row.id, "id")?,
            genre_id: id::<GenreId>(row.genre_id, "genre_id")?,
            owner_id: user_id(row.user_id, "user_id")?,
            title: row.title,
            body: row.body.unwrap_or_default(),
            explanation: row.explanation.unwrap_or_default(),
            created_at: row.created_at,
            views: row.views.unwrap_or_default(),
            correct_count: row.correct_count.unwrap_or_default(),
            incorrect_count: row.incorrect_count.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct QuestionInsert<'a> {
    genre_id: i64,
    user_id: &'a str,
    title: &'a str,
    body: &'a str,
    explanation: &'a str,
    created_at: DateTime<Utc>,
    views: u32,
    correct_count: u32,
    incorrect_count: u32,
}

impl<'a> From<&'a NewQuestion> for QuestionInsert<'a> {
    fn from(question: &'a NewQuestion) -> Self {
        Self {
            genre_id: question.genre_id.get(),
            user_id: question.owner_id.as_ref(),
            title: question.title.as_ref(),
            body: question.body.as_str(),
            explanation: question.explanation.as_str(),
            created_at: question.created_at,
            views: 0,
            correct_count: 0,
            incorrect_count: 0,
        }
    }
}

/// Owner-editable question columns.
#[derive(Debug, Serialize)]
pub(super) struct QuestionPatch<'a> {
    title: &'a str,
    body: &'a str,
    explanation: &'a str,
}

impl<'a> From<&'a Question> for QuestionPatch<'a> {
    fn from(question: &'a Question) -> Self {
        Self {
            title: question.title.as_str(),
            body: question.body.as_str(),
            explanation: question.explanation.as_str(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ChoiceRow {
    id: i64,
    question_id: i64,
    text: String,
    #[serde(default)]
    is_correct: bool,
}

impl TryFrom<ChoiceRow> for Choice {
    type Error = RestError;

    fn try_from(row: ChoiceRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: id::<ChoiceId>(row.id, "id")?,
            question_id: id::<QuestionId>(row.question_id, "question_id")?,
            text: row.text,
            is_correct: row.is_correct,
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ChoiceWrite<'a> {
    question_id: i64,
    text: &'a str,
    is_correct: bool,
}

impl<'a> From<&'a NewChoice> for ChoiceWrite<'a> {
    fn from(choice: &'a NewChoice) -> Self {
        Self {
            question_id: choice.question_id.get(),
            text: choice.text.as_str(),
            is_correct: choice.is_correct,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AnswerRow {
    id: i64,
    user_id: String,
    question_id: i64,
    choice_id: i64,
    answered_at: DateTime<Utc>,
}

impl TryFrom<AnswerRow> for Answer {
    type Error = RestError;

    fn try_from(row: AnswerRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: id::<AnswerId>(row.id, "id")?,
            user_id: user_id(row.user_id, "user_id")?,
            question_id: id::<QuestionId>(row.question_id, "question_id")?,
            choice_id: id::<ChoiceId>(row.choice_id, "choice_id")?,
            answered_at: row.answered_at,
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct AnswerInsert<'a> {
    user_id: &'a str,
    question_id: i64,
    choice_id: i64,
    answered_at: DateTime<Utc>,
}

impl<'a> From<&'a NewAnswer> for AnswerInsert<'a> {
    fn from(answer: &'a NewAnswer) -> Self {
        Self {
            user_id: answer.user_id.as_ref(),
            question_id: answer.question_id.get(),
            choice_id: answer.choice_id.get(),
            answered_at: answer.answered_at,
        }
    }
}

/// Convert every decoded row, failing on the first malformed one.
pub(super) fn convert_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, RestError>
where
    T: TryFrom<R, Error = RestError>,
{
    rows.into_iter().map(T::try_from).collect()
}

/// GoTrue user object.
#[derive(Debug, Deserialize)]
pub(super) struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: Map<String, Value>,
}

impl AuthUser {
    pub(super) fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

impl TryFrom<AuthUser> for Account {
    type Error = RestError;

    fn try_from(user: AuthUser) -> Result<Self, Self::Error> {
        let username = user
            .user_metadata
            .get("username")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        Ok(Self {
            id: user_id(user.id, "user id")?,
            email: user.email.unwrap_or_default(),
            username,
        })
    }
}

/// Token grant returned by sign-in and, when auto-confirm is on, sign-up.
#[derive(Debug, Deserialize)]
pub(super) struct TokenGrant {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}

/// Sign-up answers with a session when auto-confirm is enabled and with the
/// bare user otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum SignUpResponse {
    Session(TokenGrant),
    User(AuthUser),
}

impl SignUpResponse {
    pub(super) fn into_user(self) -> AuthUser {
        match self {
            Self::Session(grant) => grant.user,
            Self::User(user) => user,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AdminUserPage {
    #[serde(default)]
    pub users: Vec<AuthUser>,
}

#[derive(Debug, Serialize)]
pub(super) struct SignUpBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub data: SignUpMetadata<'a>,
}

#[derive(Debug, Serialize)]
pub(super) struct SignUpMetadata<'a> {
    pub username: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct PasswordGrantBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}
