//! Driving port for question use-cases.

use async_trait::async_trait;

use crate::domain::{Credential, Error, Question, QuestionId, UserId};

/// Request to create a question owned by `owner_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateQuestionRequest {
    pub genre_id: i64,
    pub owner_id: UserId,
    pub title: String,
    pub body: String,
    pub explanation: String,
    pub credential: Credential,
}

/// Request to revise a question on behalf of `caller_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateQuestionRequest {
    pub id: QuestionId,
    pub title: String,
    pub body: String,
    pub explanation: String,
    pub caller_id: UserId,
    pub credential: Credential,
}

/// Request to delete a question on behalf of `caller_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteQuestionRequest {
    pub id: QuestionId,
    pub caller_id: UserId,
    pub credential: Credential,
}

/// Domain use-case port for questions.
#[async_trait]
pub trait QuestionService: Send + Sync {
    async fn create_question(&self, request: CreateQuestionRequest) -> Result<Question, Error>;

    /// Fails `NOT_FOUND` when absent and `FORBIDDEN` for anyone but the owner.
    async fn update_question(&self, request: UpdateQuestionRequest) -> Result<Question, Error>;

    /// Fails `NOT_FOUND` when absent and `FORBIDDEN` for anyone but the owner.
    async fn delete_question(&self, request: DeleteQuestionRequest) -> Result<(), Error>;

    /// Fails `NOT_FOUND` when absent.
    async fn get_question(&self, id: QuestionId) -> Result<Question, Error>;

    async fn list_questions(&self) -> Result<Vec<Question>, Error>;

    async fn questions_by_owner(
        &self,
        owner: UserId,
        credential: Credential,
    ) -> Result<Vec<Question>, Error>;
}
