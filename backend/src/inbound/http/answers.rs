//! Answer handlers.
//!
//! ```text
//! POST /api/answers {"question_id":1,"choice_id":2}
//! GET  /api/questions/{id}/answers
//! GET  /api/users/{user_id}/answers
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::ports::CreateAnswerRequest;
use crate::domain::{Answer, Error, QuestionId, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Body of `POST /api/answers`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAnswerBody {
    #[serde(default)]
    #[schema(example = 1)]
    pub question_id: i64,
    #[serde(default)]
    #[schema(example = 2)]
    pub choice_id: i64,
}

/// Record the caller's answer to a question.
#[utoipa::path(
    post,
    path = "/api/answers",
    request_body = CreateAnswerBody,
    responses(
        (status = 201, description = "Answer recorded", body = Answer),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 401, description = "Authentication required", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["answers"],
    operation_id = "submitAnswer"
)]
#[post("/answers")]
pub async fn submit_answer(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    payload: web::Json<CreateAnswerBody>,
) -> ApiResult<HttpResponse> {
    let CreateAnswerBody {
        question_id,
        choice_id,
    } = payload.into_inner();
    let (caller_id, credential) = caller.into_parts();
    let answer = state
        .answers
        .submit_answer(CreateAnswerRequest {
            question_id,
            choice_id,
            caller_id,
            credential,
        })
        .await?;
    Ok(HttpResponse::Created().json(answer))
}

/// Answers recorded for a question.
#[utoipa::path(
    get,
    path = "/api/questions/{id}/answers",
    params(("id" = i64, Path, description = "Question id")),
    responses(
        (status = 200, description = "Answers", body = [Answer]),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["answers"],
    operation_id = "answersByQuestion",
    security([])
)]
#[get("/questions/{id}/answers")]
pub async fn answers_by_question(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Vec<Answer>>> {
    let question_id: QuestionId = parse_id(path.into_inner(), FieldName::new("id"))?;
    Ok(web::Json(state.answers.answers_by_question(question_id).await?))
}

/// Answers recorded by a user.
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/answers",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Answers", body = [Answer]),
        (status = 400, description = "Invalid user id", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["answers"],
    operation_id = "answersByUser",
    security([])
)]
#[get("/users/{user_id}/answers")]
pub async fn answers_by_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<Answer>>> {
    let user_id = UserId::new(path.into_inner())
        .map_err(|err| Error::validation("user_id", err.to_string()))?;
    Ok(web::Json(state.answers.answers_by_user(user_id).await?))
}
