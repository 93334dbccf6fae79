//! PostgREST-backed `QuestionRepository` adapter.

use async_trait::async_trait;

use crate::domain::ports::{QuestionRepository, QuestionRepositoryError};
use crate::domain::{Credential, NewQuestion, Question, QuestionId, UserId};

use super::client::{SupabaseClient, eq, impl_from_rest_error};
use super::dto::{QuestionInsert, QuestionPatch, QuestionRow, convert_rows};

const TABLE: &str = "questions";

impl_from_rest_error!(QuestionRepositoryError);

/// Question storage in the `questions` table.
#[derive(Clone)]
pub struct SupabaseQuestionRepository {
    client: SupabaseClient,
}

impl SupabaseQuestionRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    async fn select(
        &self,
        filters: &[(&str, String)],
        credential: &Credential,
    ) -> Result<Vec<Question>, QuestionRepositoryError> {
        let rows: Vec<QuestionRow> = self.client.select(TABLE, filters, credential).await?;
        Ok(convert_rows(rows)?)
    }
}

#[async_trait]
impl QuestionRepository for SupabaseQuestionRepository {
    async fn list_all(
        &self,
        credential: &Credential,
    ) -> Result<Vec<Question>, QuestionRepositoryError> {
        self.select(&[], credential).await
    }

    async fn find_by_id(
        &self,
        id: QuestionId,
        credential: &Credential,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        let questions = self.select(&[("id", eq(id))], credential).await?;
        Ok(questions.into_iter().next())
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
        credential: &Credential,
    ) -> Result<Vec<Question>, QuestionRepositoryError> {
        self.select(&[("user_id", eq(owner))], credential).await
    }

    async fn create(
        &self,
        question: &NewQuestion,
        credential: &Credential,
    ) -> Result<Question, QuestionRepositoryError> {
        let row: QuestionRow = self
            .client
            .insert(TABLE, &QuestionInsert::from(question), credential)
            .await?;
        Ok(Question::try_from(row)?)
    }

    async fn update(
        &self,
        question: &Question,
        credential: &Credential,
    ) -> Result<Question, QuestionRepositoryError> {
        let rows: Vec<QuestionRow> = self
            .client
            .update(
                TABLE,
                &[("id", eq(question.id))],
                &QuestionPatch::from(question),
                credential,
            )
            .await?;
        let updated: Vec<Question> = convert_rows(rows)?;
        updated.into_iter().next().ok_or_else(|| {
            QuestionRepositoryError::query(format!("question {} was not updated", question.id))
        })
    }

    async fn delete(
        &self,
        id: QuestionId,
        credential: &Credential,
    ) -> Result<(), QuestionRepositoryError> {
        Ok(self.client.delete(TABLE, &[("id", eq(id))], credential).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BearerToken;
    use crate::outbound::supabase::client::test_support::client_for;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn row(id: i64, owner: &str) -> serde_json::Value {
        json!({
            "id": id,
            "genre_id": 1,
            "user_id": owner,
            "title": "Largest planet?",
            "body": "Pick one",
            "explanation": "Jupiter is largest",
            "created_at": "2024-05-01T10:00:00Z",
            "views": 4,
            "correct_count": 2,
            "incorrect_count": 1
        })
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_empty_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/questions"))
            .and(query_param("id", "eq.77"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let repo = SupabaseQuestionRepository::new(client_for(&server));
        let id = QuestionId::new(77).expect("valid id");
        let found = repo
            .find_by_id(id, &Credential::Anonymous)
            .await
            .expect("lookup succeeds");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn list_by_owner_filters_on_user_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/questions"))
            .and(query_param("user_id", "eq.owner-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([row(1, "owner-1")])))
            .expect(1)
            .mount(&server)
            .await;

        let repo = SupabaseQuestionRepository::new(client_for(&server));
        let owner = UserId::new("owner-1").expect("valid user id");
        let questions = repo
            .list_by_owner(&owner, &Credential::Anonymous)
            .await
            .expect("listing succeeds");
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].views, 4);
    }

    #[tokio::test]
    async fn update_sends_only_editable_columns() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/questions"))
            .and(query_param("id", "eq.1"))
            .and(body_json(json!({
                "title": "Largest planet?",
                "body": "Pick one",
                "explanation": "Jupiter is largest"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([row(1, "owner-1")])))
            .expect(1)
            .mount(&server)
            .await;

        let repo = SupabaseQuestionRepository::new(client_for(&server));
        let question = Question::try_from(
            serde_json::from_value::<QuestionRow>(row(1, "owner-1")).expect("row decodes"),
        )
        .expect("row converts");
        let updated = repo
            .update(&question, &Credential::Caller(BearerToken::new("jwt")))
            .await
            .expect("update succeeds");
        assert_eq!(updated, question);
    }

    #[tokio::test]
    async fn update_without_returned_rows_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let repo = SupabaseQuestionRepository::new(client_for(&server));
        let question = Question::try_from(
            serde_json::from_value::<QuestionRow>(row(5, "owner-1")).expect("row decodes"),
        )
        .expect("row converts");
        let err = repo
            .update(&question, &Credential::Caller(BearerToken::new("jwt")))
            .await
            .expect_err("nothing updated");
        assert!(matches!(err, QuestionRepositoryError::Query { .. }));
    }
}
