//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on driving ports and stay testable without network I/O.

use std::sync::Arc;

use crate::domain::ports::{AnswerService, AuthService, ChoiceService, GenreService, QuestionService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub genres: Arc<dyn GenreService>,
    pub questions: Arc<dyn QuestionService>,
    pub choices: Arc<dyn ChoiceService>,
    pub answers: Arc<dyn AnswerService>,
    pub auth: Arc<dyn AuthService>,
}
