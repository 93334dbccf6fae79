//! Port for choice persistence.

use async_trait::async_trait;

use crate::domain::{Choice, ChoiceId, Credential, NewChoice, QuestionId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by choice repository adapters.
    pub enum ChoiceRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "choice repository connection failed: {message}",
        /// The store rejected or failed the request.
        Query { message: String } =>
            "choice repository query failed: {message}",
        /// The store answered with a payload that could not be decoded.
        Decode { message: String } =>
            "choice repository returned an undecodable payload: {message}",
    }
}

/// Port for choice storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChoiceRepository: Send + Sync {
    /// Choices attached to `question_id`.
    async fn list_by_question(
        &self,
        question_id: QuestionId,
        credential: &Credential,
    ) -> Result<Vec<Choice>, ChoiceRepositoryError>;

    /// Persist a choice and return it with its store-assigned id.
    async fn create(
        &self,
        choice: &NewChoice,
        credential: &Credential,
    ) -> Result<Choice, ChoiceRepositoryError>;

    /// Replace the fields of choice `id`.
    ///
    /// Returns `None` when no choice with that id is visible to `credential`.
    async fn update(
        &self,
        id: ChoiceId,
        choice: &NewChoice,
        credential: &Credential,
    ) -> Result<Option<Choice>, ChoiceRepositoryError>;

    /// Remove choice `id`. Removing an absent choice is not an error.
    async fn delete(
        &self,
        id: ChoiceId,
        credential: &Credential,
    ) -> Result<(), ChoiceRepositoryError>;
}
