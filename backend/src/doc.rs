//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `inbound::http`, the resource and
//! envelope schemas, and the bearer security scheme. Swagger UI serves it in
//! debug builds and `cargo run --bin openapi-dump` prints it.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Account, Answer, Choice, Genre, Question};
use crate::inbound::http::accounts::{AuthRequest, AuthResponse, LogoutResponse};
use crate::inbound::http::answers::CreateAnswerBody;
use crate::inbound::http::choices::{ChoiceBody, ChoicesResponse};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::genres::CreateGenreBody;
use crate::inbound::http::questions::{CreateQuestionBody, UpdateQuestionBody};

/// Name of the bearer security scheme.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /api/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Quiz backend API",
        description = "Genres, questions, choices and answers for a quiz service."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::accounts::sign_up,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::genres::list_genres,
        crate::inbound::http::genres::create_genre,
        crate::inbound::http::questions::list_questions,
        crate::inbound::http::questions::create_question,
        crate::inbound::http::questions::get_question,
        crate::inbound::http::questions::update_question,
        crate::inbound::http::questions::delete_question,
        crate::inbound::http::questions::my_questions,
        crate::inbound::http::answers::submit_answer,
        crate::inbound::http::answers::answers_by_question,
        crate::inbound::http::answers::answers_by_user,
        crate::inbound::http::choices::list_choices,
        crate::inbound::http::choices::create_choice,
        crate::inbound::http::choices::update_choice,
        crate::inbound::http::choices::delete_choice,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Account,
        Answer,
        AuthRequest,
        AuthResponse,
        Choice,
        ChoiceBody,
        ChoicesResponse,
        CreateAnswerBody,
        CreateGenreBody,
        CreateQuestionBody,
        ErrorBody,
        Genre,
        LogoutResponse,
        Question,
        UpdateQuestionBody,
    )),
    tags(
        (name = "auth", description = "Sign-up, login and logout"),
        (name = "genres", description = "Question categories"),
        (name = "questions", description = "Quiz questions and ownership"),
        (name = "choices", description = "Answer options of a question"),
        (name = "answers", description = "Recorded answers"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
