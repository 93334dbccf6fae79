//! Port for answer persistence. Answers are append-only.

use async_trait::async_trait;

use crate::domain::{Answer, Credential, NewAnswer, QuestionId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by answer repository adapters.
    pub enum AnswerRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "answer repository connection failed: {message}",
        /// The store rejected or failed the request.
        Query { message: String } =>
            "answer repository query failed: {message}",
        /// The store answered with a payload that could not be decoded.
        Decode { message: String } =>
            "answer repository returned an undecodable payload: {message}",
    }
}

/// Port for answer storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Persist an answer and return it with its store-assigned id.
    async fn create(
        &self,
        answer: &NewAnswer,
        credential: &Credential,
    ) -> Result<Answer, AnswerRepositoryError>;

    /// Answers submitted by `user_id`.
    async fn list_by_user(
        &self,
        user_id: &UserId,
        credential: &Credential,
    ) -> Result<Vec<Answer>, AnswerRepositoryError>;

    /// Answers submitted for `question_id`.
    async fn list_by_question(
        &self,
        question_id: QuestionId,
        credential: &Credential,
    ) -> Result<Vec<Answer>, AnswerRepositoryError>;
}
