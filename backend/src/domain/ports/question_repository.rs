//! Port for question persistence.

use async_trait::async_trait;

use crate::domain::{Credential, NewQuestion, Question, QuestionId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by question repository adapters.
    pub enum QuestionRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "question repository connection failed: {message}",
        /// The store rejected or failed the request.
        Query { message: String } =>
            "question repository query failed: {message}",
        /// The store answered with a payload that could not be decoded.
        Decode { message: String } =>
            "question repository returned an undecodable payload: {message}",
    }
}

/// Port for question storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Every stored question.
    async fn list_all(
        &self,
        credential: &Credential,
    ) -> Result<Vec<Question>, QuestionRepositoryError>;

    /// Question with this id, or `None` when absent.
    async fn find_by_id(
        &self,
        id: QuestionId,
        credential: &Credential,
    ) -> Result<Option<Question>, QuestionRepositoryError>;

    /// Questions created by `owner`.
    async fn list_by_owner(
        &self,
        owner: &UserId,
        credential: &Credential,
    ) -> Result<Vec<Question>, QuestionRepositoryError>;

    /// Persist a question and return it with its store-assigned id.
    async fn create(
        &self,
        question: &NewQuestion,
        credential: &Credential,
    ) -> Result<Question, QuestionRepositoryError>;

    /// Write back the owner-editable fields of `question`.
    ///
    /// Only `title`, `body` and `explanation` are sent to the store.
    async fn update(
        &self,
        question: &Question,
        credential: &Credential,
    ) -> Result<Question, QuestionRepositoryError>;

    /// Remove the question with this id.
    async fn delete(
        &self,
        id: QuestionId,
        credential: &Credential,
    ) -> Result<(), QuestionRepositoryError>;
}
