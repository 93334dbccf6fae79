//! Builds the HTTP state from the hosted backend adapters.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use thiserror::Error;

use quiz_backend::config::SupabaseConfig;
use quiz_backend::domain::{
    AnswerServiceImpl, AuthServiceImpl, ChoiceServiceImpl, GenreServiceImpl, QuestionServiceImpl,
};
use quiz_backend::inbound::http::state::HttpState;
use quiz_backend::outbound::supabase::{
    SupabaseAnswerRepository, SupabaseChoiceRepository, SupabaseClient, SupabaseGenreRepository,
    SupabaseIdentityProvider, SupabaseQuestionRepository,
};

/// Failures raised while assembling the server.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build outbound http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),
}

/// Wire every service to its hosted backend adapter.
///
/// All adapters share one connection pool through the cloned client.
pub fn build_http_state(config: SupabaseConfig) -> Result<HttpState, StartupError> {
    let client = SupabaseClient::new(Arc::new(config))?;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    Ok(HttpState {
        genres: Arc::new(GenreServiceImpl::new(Arc::new(
            SupabaseGenreRepository::new(client.clone()),
        ))),
        questions: Arc::new(QuestionServiceImpl::new(
            Arc::new(SupabaseQuestionRepository::new(client.clone())),
            clock.clone(),
        )),
        choices: Arc::new(ChoiceServiceImpl::new(Arc::new(
            SupabaseChoiceRepository::new(client.clone()),
        ))),
        answers: Arc::new(AnswerServiceImpl::new(
            Arc::new(SupabaseAnswerRepository::new(client.clone())),
            clock.clone(),
        )),
        auth: Arc::new(AuthServiceImpl::new(
            Arc::new(SupabaseIdentityProvider::new(client)),
            clock,
        )),
    })
}
