//! Genre domain service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    CreateGenreRequest, GenreRepository, GenreRepositoryError, GenreService,
};
use crate::domain::{Credential, Error, Genre, GenreName, NewGenre, Resource};

/// Genre service implementing [`GenreService`].
#[derive(Clone)]
pub struct GenreServiceImpl<R> {
    genres: Arc<R>,
}

impl<R> GenreServiceImpl<R> {
    /// Create a new service with the given repository.
    pub fn new(genres: Arc<R>) -> Self {
        Self { genres }
    }
}

fn map_repository_error(error: GenreRepositoryError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl<R> GenreService for GenreServiceImpl<R>
where
    R: GenreRepository,
{
    async fn create_genre(&self, request: CreateGenreRequest) -> Result<Genre, Error> {
        let name = GenreName::new(&request.name)
            .map_err(|err| Error::validation("name", err.to_string()))?;

        if let Some(existing) = self
            .genres
            .find_by_name(&name, &request.credential)
            .await
            .map_err(map_repository_error)?
        {
            debug!(genre_id = %existing.id, "genre name already taken");
            return Err(Error::already_exists(
                Resource::Genre,
                "genre already exists",
            ));
        }

        self.genres
            .create(&NewGenre { name }, &request.credential)
            .await
            .map_err(map_repository_error)
    }

    async fn list_genres(&self) -> Result<Vec<Genre>, Error> {
        self.genres
            .list_all(&Credential::Anonymous)
            .await
            .map_err(map_repository_error)
    }
}
