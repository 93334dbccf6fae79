//! PostgREST-backed `ChoiceRepository` adapter.

use async_trait::async_trait;

use crate::domain::ports::{ChoiceRepository, ChoiceRepositoryError};
use crate::domain::{Choice, ChoiceId, Credential, NewChoice, QuestionId};

use super::client::{SupabaseClient, eq, impl_from_rest_error};
use super::dto::{ChoiceRow, ChoiceWrite, convert_rows};

const TABLE: &str = "choices";

impl_from_rest_error!(ChoiceRepositoryError);

/// Choice storage in the `choices` table.
#[derive(Clone)]
pub struct SupabaseChoiceRepository {
    client: SupabaseClient,
}

impl SupabaseChoiceRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChoiceRepository for SupabaseChoiceRepository {
    async fn list_by_question(
        &self,
        question_id: QuestionId,
        credential: &Credential,
    ) -> Result<Vec<Choice>, ChoiceRepositoryError> {
        let rows: Vec<ChoiceRow> = self
            .client
            .select(TABLE, &[("question_id", eq(question_id))], credential)
            .await?;
        Ok(convert_rows(rows)?)
    }

    async fn create(
        &self,
        choice: &NewChoice,
        credential: &Credential,
    ) -> Result<Choice, ChoiceRepositoryError> {
        let row: ChoiceRow = self
            .client
            .insert(TABLE, &ChoiceWrite::from(choice), credential)
            .await?;
        Ok(Choice::try_from(row)?)
    }

    async fn update(
        &self,
        id: ChoiceId,
        choice: &NewChoice,
        credential: &Credential,
    ) -> Result<Option<Choice>, ChoiceRepositoryError> {
        let rows: Vec<ChoiceRow> = self
            .client
            .update(TABLE, &[("id", eq(id))], &ChoiceWrite::from(choice), credential)
            .await?;
        let updated: Vec<Choice> = convert_rows(rows)?;
        Ok(updated.into_iter().next())
    }

    async fn delete(&self, id: ChoiceId, credential: &Credential) -> Result<(), ChoiceRepositoryError> {
        Ok(self.client.delete(TABLE, &[("id", eq(id))], credential).await?)
    }
}
