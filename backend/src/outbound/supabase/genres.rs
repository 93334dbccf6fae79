//! PostgREST-backed `GenreRepository` adapter.

use async_trait::async_trait;

use crate::domain::ports::{GenreRepository, GenreRepositoryError};
use crate::domain::{Credential, Genre, GenreName, NewGenre};

use super::client::{SupabaseClient, eq, impl_from_rest_error};
use super::dto::{GenreInsert, GenreRow, convert_rows};

const TABLE: &str = "genres";

impl_from_rest_error!(GenreRepositoryError);

/// Genre storage in the `genres` table.
#[derive(Clone)]
pub struct SupabaseGenreRepository {
    client: SupabaseClient,
}

impl SupabaseGenreRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GenreRepository for SupabaseGenreRepository {
    async fn list_all(&self, credential: &Credential) -> Result<Vec<Genre>, GenreRepositoryError> {
        let rows: Vec<GenreRow> = self.client.select(TABLE, &[], credential).await?;
        Ok(convert_rows(rows)?)
    }

    async fn find_by_name(
        &self,
        name: &GenreName,
        credential: &Credential,
    ) -> Result<Option<Genre>, GenreRepositoryError> {
        let rows: Vec<GenreRow> = self
            .client
            .select(TABLE, &[("name", eq(name.as_ref()))], credential)
            .await?;
        let genres: Vec<Genre> = convert_rows(rows)?;
        Ok(genres.into_iter().next())
    }

    async fn create(
        &self,
        genre: &NewGenre,
        credential: &Credential,
    ) -> Result<Genre, GenreRepositoryError> {
        let row: GenreRow = self
            .client
            .insert(TABLE, &GenreInsert::from(genre), credential)
            .await?;
        Ok(Genre::try_from(row)?)
    }
}
