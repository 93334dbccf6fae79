//! Port for genre persistence.

use async_trait::async_trait;

use crate::domain::{Credential, Genre, GenreName, NewGenre};

use super::define_port_error;

define_port_error! {
    /// Errors raised by genre repository adapters.
    pub enum GenreRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "genre repository connection failed: {message}",
        /// The store rejected or failed the request.
        Query { message: String } =>
            "genre repository query failed: {message}",
        /// The store answered with a payload that could not be decoded.
        Decode { message: String } =>
            "genre repository returned an undecodable payload: {message}",
    }
}

/// Port for genre storage and retrieval.
///
/// Every operation runs under the supplied [`Credential`] so the store can
/// apply its row level policy.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenreRepository: Send + Sync {
    /// Every stored genre, unfiltered.
    async fn list_all(&self, credential: &Credential) -> Result<Vec<Genre>, GenreRepositoryError>;

    /// Genre with exactly this name, or `None`.
    async fn find_by_name(
        &self,
        name: &GenreName,
        credential: &Credential,
    ) -> Result<Option<Genre>, GenreRepositoryError>;

    /// Persist a genre and return it with its store-assigned id.
    async fn create(
        &self,
        genre: &NewGenre,
        credential: &Credential,
    ) -> Result<Genre, GenreRepositoryError>;
}
