//! Choice domain service.
//!
//! Choices are not owned, so this service forwards to the store after basic
//! id validation and leaves row level policy to the store.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    ChoiceRepository, ChoiceRepositoryError, ChoiceService, CreateChoiceRequest,
    UpdateChoiceRequest,
};
use crate::domain::{Choice, ChoiceId, Credential, Error, NewChoice, QuestionId};

/// Choice service implementing [`ChoiceService`].
#[derive(Clone)]
pub struct ChoiceServiceImpl<R> {
    choices: Arc<R>,
}

impl<R> ChoiceServiceImpl<R> {
    /// Create a new service with the given repository.
    pub fn new(choices: Arc<R>) -> Self {
        Self { choices }
    }
}

fn map_repository_error(error: ChoiceRepositoryError) -> Error {
    Error::internal(error.to_string())
}

fn draft(question_id: i64, text: String, is_correct: bool) -> Result<NewChoice, Error> {
    let question_id = QuestionId::new(question_id)
        .map_err(|_| Error::validation("question_id", "question_id is required"))?;
    Ok(NewChoice {
        question_id,
        text,
        is_correct,
    })
}

#[async_trait]
impl<R> ChoiceService for ChoiceServiceImpl<R>
where
    R: ChoiceRepository,
{
    async fn list_choices(&self, question_id: QuestionId) -> Result<Vec<Choice>, Error> {
        self.choices
            .list_by_question(question_id, &Credential::Anonymous)
            .await
            .map_err(map_repository_error)
    }

    async fn create_choice(&self, request: CreateChoiceRequest) -> Result<Choice, Error> {
        let choice = draft(request.question_id, request.text, request.is_correct)?;
        self.choices
            .create(&choice, &request.credential)
            .await
            .map_err(map_repository_error)
    }

    async fn update_choice(&self, request: UpdateChoiceRequest) -> Result<Choice, Error> {
        let choice = draft(request.question_id, request.text, request.is_correct)?;
        self.choices
            .update(request.id, &choice, &request.credential)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("choice not found"))
    }

    async fn delete_choice(&self, id: ChoiceId, credential: Credential) -> Result<(), Error> {
        self.choices
            .delete(id, &credential)
            .await
            .map_err(map_repository_error)
    }
}
