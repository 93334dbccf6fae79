//! Answer domain service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    AnswerRepository, AnswerRepositoryError, AnswerService, CreateAnswerRequest,
};
use crate::domain::{Answer, ChoiceId, Credential, Error, NewAnswer, QuestionId, UserId};

/// Answer service implementing [`AnswerService`].
#[derive(Clone)]
pub struct AnswerServiceImpl<R> {
    answers: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> AnswerServiceImpl<R> {
    /// Create a new service with the given repository and clock.
    pub fn new(answers: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { answers, clock }
    }
}

fn map_repository_error(error: AnswerRepositoryError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl<R> AnswerService for AnswerServiceImpl<R>
where
    R: AnswerRepository,
{
    async fn submit_answer(&self, request: CreateAnswerRequest) -> Result<Answer, Error> {
        let question_id = QuestionId::new(request.question_id)
            .map_err(|_| Error::validation("question_id", "question_id is required"))?;
        let choice_id = ChoiceId::new(request.choice_id)
            .map_err(|_| Error::validation("choice_id", "choice_id is required"))?;

        let answer = NewAnswer {
            user_id: request.caller_id,
            question_id,
            choice_id,
            answered_at: self.clock.utc(),
        };
        self.answers
            .create(&answer, &request.credential)
            .await
            .map_err(map_repository_error)
    }

    async fn answers_by_user(&self, user_id: UserId) -> Result<Vec<Answer>, Error> {
        self.answers
            .list_by_user(&user_id, &Credential::Anonymous)
            .await
            .map_err(map_repository_error)
    }

    async fn answers_by_question(&self, question_id: QuestionId) -> Result<Vec<Answer>, Error> {
        self.answers
            .list_by_question(question_id, &Credential::Anonymous)
            .await
            .map_err(map_repository_error)
    }
}
