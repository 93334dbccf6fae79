//! Driving port for genre use-cases.

use async_trait::async_trait;

use crate::domain::{Credential, Error, Genre};

/// Request to create a genre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateGenreRequest {
    pub name: String,
    pub credential: Credential,
}

/// Domain use-case port for genres.
#[async_trait]
pub trait GenreService: Send + Sync {
    /// Validate the name, reject duplicates and persist.
    async fn create_genre(&self, request: CreateGenreRequest) -> Result<Genre, Error>;

    /// All genres, unpaginated.
    async fn list_genres(&self) -> Result<Vec<Genre>, Error>;
}
