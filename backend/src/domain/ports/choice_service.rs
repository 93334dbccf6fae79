//! Driving port for choice use-cases.

use async_trait::async_trait;

use crate::domain::{Choice, ChoiceId, Credential, Error, QuestionId};

/// Request to attach a choice to a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateChoiceRequest {
    pub question_id: i64,
    pub text: String,
    pub is_correct: bool,
    pub credential: Credential,
}

/// Request to replace an existing choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateChoiceRequest {
    pub id: ChoiceId,
    pub question_id: i64,
    pub text: String,
    pub is_correct: bool,
    pub credential: Credential,
}

/// Domain use-case port for choices.
///
/// Choices have no owner; mutations only require a caller credential.
#[async_trait]
pub trait ChoiceService: Send + Sync {
    async fn list_choices(&self, question_id: QuestionId) -> Result<Vec<Choice>, Error>;

    async fn create_choice(&self, request: CreateChoiceRequest) -> Result<Choice, Error>;

    /// Fails `NOT_FOUND` when the store has no such choice.
    async fn update_choice(&self, request: UpdateChoiceRequest) -> Result<Choice, Error>;

    async fn delete_choice(&self, id: ChoiceId, credential: Credential) -> Result<(), Error>;
}
