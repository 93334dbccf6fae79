//! Domain primitives, use-cases and ports.
//!
//! Purpose: define strongly typed quiz entities and the services that
//! validate and authorise every mutation before it reaches a repository.
//!
//! Public surface:
//! - [`Error`]: closed error taxonomy shared by every use-case.
//! - [`resolve_identity`] and [`authorize`]: caller identity and ownership.
//! - Entities: [`Genre`], [`Question`], [`Choice`], [`Answer`], [`Account`].
//! - Services: `*ServiceImpl` types implementing the driving ports in
//!   [`ports`].

pub mod answer;
pub mod answer_service;
pub mod auth;
pub mod auth_service;
pub mod choice;
pub mod choice_service;
pub mod error;
pub mod genre;
pub mod genre_service;
pub mod identity;
pub mod ids;
pub mod policy;
pub mod ports;
pub mod question;
pub mod question_service;
pub mod trace_id;

pub use self::answer::{Answer, NewAnswer};
pub use self::answer_service::AnswerServiceImpl;
pub use self::auth::{
    Account, AuthSession, IssuedSession, LoginCredentials, LoginValidationError, PASSWORD_MIN,
    SessionExpiry, SignUpDetails, SignUpValidationError,
};
pub use self::auth_service::AuthServiceImpl;
pub use self::choice::{Choice, NewChoice};
pub use self::choice_service::ChoiceServiceImpl;
pub use self::error::{DomainErrorCode, Error, Resource};
pub use self::genre::{GENRE_NAME_MAX, Genre, GenreName, GenreNameValidationError, NewGenre};
pub use self::genre_service::GenreServiceImpl;
pub use self::identity::{
    BearerToken, Credential, UserId, UserIdValidationError, resolve_identity,
};
pub use self::ids::{AnswerId, ChoiceId, GenreId, IdValidationError, QuestionId};
pub use self::policy::{Access, authorize, ensure_owner};
pub use self::question::{
    NewQuestion, QUESTION_TITLE_MAX, Question, QuestionRevision, QuestionTitle,
    QuestionTitleValidationError,
};
pub use self::question_service::QuestionServiceImpl;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
