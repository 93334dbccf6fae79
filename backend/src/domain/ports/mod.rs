//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`IdentityProvider`]) are implemented by
//! outbound adapters. Driving ports (`*Service`) are called by inbound
//! adapters and implemented by the domain services.

mod macros;
pub(crate) use macros::define_port_error;

mod answer_repository;
mod answer_service;
mod auth_service;
mod choice_repository;
mod choice_service;
mod genre_repository;
mod genre_service;
mod identity_provider;
mod question_repository;
mod question_service;

#[cfg(test)]
pub use answer_repository::MockAnswerRepository;
pub use answer_repository::{AnswerRepository, AnswerRepositoryError};
pub use answer_service::{AnswerService, CreateAnswerRequest};
pub use auth_service::{AuthService, SignInRequest, SignUpRequest};
#[cfg(test)]
pub use choice_repository::MockChoiceRepository;
pub use choice_repository::{ChoiceRepository, ChoiceRepositoryError};
pub use choice_service::{ChoiceService, CreateChoiceRequest, UpdateChoiceRequest};
#[cfg(test)]
pub use genre_repository::MockGenreRepository;
pub use genre_repository::{GenreRepository, GenreRepositoryError};
pub use genre_service::{CreateGenreRequest, GenreService};
#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{IdentityProvider, IdentityProviderError};
#[cfg(test)]
pub use question_repository::MockQuestionRepository;
pub use question_repository::{QuestionRepository, QuestionRepositoryError};
pub use question_service::{
    CreateQuestionRequest, DeleteQuestionRequest, QuestionService, UpdateQuestionRequest,
};
