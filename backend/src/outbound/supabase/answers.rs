//! PostgREST-backed `AnswerRepository` adapter.

use async_trait::async_trait;

use crate::domain::ports::{AnswerRepository, AnswerRepositoryError};
use crate::domain::{Answer, Credential, NewAnswer, QuestionId, UserId};

use super::client::{SupabaseClient, eq, impl_from_rest_error};
use super::dto::{AnswerInsert, AnswerRow, convert_rows};

const TABLE: &str = "answers";

impl_from_rest_error!(AnswerRepositoryError);

/// Answer storage in the `answers` table.
#[derive(Clone)]
pub struct SupabaseAnswerRepository {
    client: SupabaseClient,
}

impl SupabaseAnswerRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    async fn select(
        &self,
        filters: &[(&str, String)],
        credential: &Credential,
    ) -> Result<Vec<Answer>, AnswerRepositoryError> {
        let rows: Vec<AnswerRow> = self.client.select(TABLE, filters, credential).await?;
        Ok(convert_rows(rows)?)
    }
}

#[async_trait]
impl AnswerRepository for SupabaseAnswerRepository {
    async fn create(
        &self,
        answer: &NewAnswer,
        credential: &Credential,
    ) -> Result<Answer, AnswerRepositoryError> {
        let row: AnswerRow = self
            .client
            .insert(TABLE, &AnswerInsert::from(answer), credential)
            .await?;
        Ok(Answer::try_from(row)?)
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        credential: &Credential,
    ) -> Result<Vec<Answer>, AnswerRepositoryError> {
        self.select(&[("user_id", eq(user_id))], credential).await
    }

    async fn list_by_question(
        &self,
        question_id: QuestionId,
        credential: &Credential,
    ) -> Result<Vec<Answer>, AnswerRepositoryError> {
        self.select(&[("question_id", eq(question_id))], credential)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BearerToken, ChoiceId};
    use crate::outbound::supabase::client::test_support::client_for;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn create_posts_the_answer_row() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/answers"))
            .and(body_json(json!({
                "user_id": "player",
                "question_id": 3,
                "choice_id": 7,
                "answered_at": "2024-05-01T10:00:00Z"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
                "id": 11,
                "user_id": "player",
                "question_id": 3,
                "choice_id": 7,
                "answered_at": "2024-05-01T10:00:00Z"
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let repo = SupabaseAnswerRepository::new(client_for(&server));
        let answered_at = Utc
            .with_ymd_and_hms(2024, 5, 1, 10, 0, 0)
            .single()
            .expect("valid timestamp");
        let answer = repo
            .create(
                &NewAnswer {
                    user_id: UserId::new("player").expect("valid user id"),
                    question_id: QuestionId::new(3).expect("valid id"),
                    choice_id: ChoiceId::new(7).expect("valid id"),
                    answered_at,
                },
                &Credential::Caller(BearerToken::new("jwt")),
            )
            .await
            .expect("insert succeeds");
        assert_eq!(answer.id.get(), 11);
        assert_eq!(answer.answered_at, answered_at);
    }

    #[tokio::test]
    async fn list_by_user_filters_on_user_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/answers"))
            .and(query_param("user_id", "eq.player"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let repo = SupabaseAnswerRepository::new(client_for(&server));
        let answers = repo
            .list_by_user(
                &UserId::new("player").expect("valid user id"),
                &Credential::Anonymous,
            )
            .await
            .expect("listing succeeds");
        assert!(answers.is_empty());
    }
}
