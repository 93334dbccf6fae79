//! Question domain service.
//!
//! Owns title validation, creation timestamps and the ownership rule that
//! only a question's creator may revise or delete it.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    CreateQuestionRequest, DeleteQuestionRequest, QuestionRepository, QuestionRepositoryError,
    QuestionService, UpdateQuestionRequest,
};
use crate::domain::{
    Credential, Error, GenreId, NewQuestion, Question, QuestionId, QuestionRevision,
    QuestionTitle, UserId, ensure_owner,
};

const NOT_OWNER_MESSAGE: &str = "you can only modify your own questions";

/// Question service implementing [`QuestionService`].
#[derive(Clone)]
pub struct QuestionServiceImpl<R> {
    questions: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> QuestionServiceImpl<R> {
    /// Create a new service with the given repository and clock.
    pub fn new(questions: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { questions, clock }
    }
}

fn map_repository_error(error: QuestionRepositoryError) -> Error {
    Error::internal(error.to_string())
}

fn parse_title(raw: &str) -> Result<QuestionTitle, Error> {
    QuestionTitle::new(raw).map_err(|err| Error::validation("title", err.to_string()))
}

impl<R> QuestionServiceImpl<R>
where
    R: QuestionRepository,
{
    async fn fetch_existing(
        &self,
        id: QuestionId,
        credential: &Credential,
    ) -> Result<Question, Error> {
        self.questions
            .find_by_id(id, credential)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("question not found"))
    }
}

#[async_trait]
impl<R> QuestionService for QuestionServiceImpl<R>
where
    R: QuestionRepository,
{
    async fn create_question(&self, request: CreateQuestionRequest) -> Result<Question, Error> {
        let genre_id = GenreId::new(request.genre_id)
            .map_err(|_| Error::validation("genre_id", "genre_id is required"))?;
        let title = parse_title(&request.title)?;

        let draft = NewQuestion {
            genre_id,
            owner_id: request.owner_id,
            title,
            body: request.body,
            explanation: request.explanation,
            created_at: self.clock.utc(),
        };
        self.questions
            .create(&draft, &request.credential)
            .await
            .map_err(map_repository_error)
    }

    async fn update_question(&self, request: UpdateQuestionRequest) -> Result<Question, Error> {
        let title = parse_title(&request.title)?;
        let mut question = self.fetch_existing(request.id, &request.credential).await?;
        ensure_owner(&question.owner_id, &request.caller_id, NOT_OWNER_MESSAGE)?;

        question.revise(QuestionRevision {
            title,
            body: request.body,
            explanation: request.explanation,
        });
        self.questions
            .update(&question, &request.credential)
            .await
            .map_err(map_repository_error)
    }

    async fn delete_question(&self, request: DeleteQuestionRequest) -> Result<(), Error> {
        let question = self.fetch_existing(request.id, &request.credential).await?;
        ensure_owner(&question.owner_id, &request.caller_id, NOT_OWNER_MESSAGE)?;

        self.questions
            .delete(question.id, &request.credential)
            .await
            .map_err(map_repository_error)?;
        info!(question_id = %question.id, "question deleted");
        Ok(())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Question, Error> {
        self.fetch_existing(id, &Credential::Anonymous).await
    }

    async fn list_questions(&self) -> Result<Vec<Question>, Error> {
        self.questions
            .list_all(&Credential::Anonymous)
            .await
            .map_err(map_repository_error)
    }

    async fn questions_by_owner(
        &self,
        owner: UserId,
        credential: Credential,
    ) -> Result<Vec<Question>, Error> {
        self.questions
            .list_by_owner(&owner, &credential)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "question_service_tests.rs"]
mod tests;
