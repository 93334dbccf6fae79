//! Driving port for answer use-cases.

use async_trait::async_trait;

use crate::domain::{Answer, Credential, Error, QuestionId, UserId};

/// Request to record `caller_id` choosing `choice_id` for `question_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAnswerRequest {
    pub question_id: i64,
    pub choice_id: i64,
    pub caller_id: UserId,
    pub credential: Credential,
}

/// Domain use-case port for answers.
#[async_trait]
pub trait AnswerService: Send + Sync {
    async fn submit_answer(&self, request: CreateAnswerRequest) -> Result<Answer, Error>;

    async fn answers_by_user(&self, user_id: UserId) -> Result<Vec<Answer>, Error>;

    async fn answers_by_question(&self, question_id: QuestionId) -> Result<Vec<Answer>, Error>;
}
