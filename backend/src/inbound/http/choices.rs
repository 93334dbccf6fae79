//! Choice handlers.
//!
//! ```text
//! GET    /api/choices/{question_id}
//! POST   /api/choices {"question_id":1,"text":"Paris","is_correct":true}
//! PUT    /api/choices/{id} {"question_id":1,"text":"Lyon","is_correct":false}
//! DELETE /api/choices/{id}
//! ```
//!
//! Choices carry no owner. Mutations only require an authenticated caller;
//! the store's row-level policy decides the rest.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateChoiceRequest, UpdateChoiceRequest};
use crate::domain::{Choice, ChoiceId, QuestionId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

/// Body of `POST /api/choices` and `PUT /api/choices/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChoiceBody {
    #[serde(default)]
    #[schema(example = 1)]
    pub question_id: i64,
    #[serde(default)]
    #[schema(example = "Paris")]
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// Choices of one question.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChoicesResponse {
    pub choices: Vec<Choice>,
}

/// List the choices of a question.
#[utoipa::path(
    get,
    path = "/api/choices/{question_id}",
    params(("question_id" = i64, Path, description = "Question id")),
    responses(
        (status = 200, description = "Choices", body = ChoicesResponse),
        (status = 400, description = "Invalid question id", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["choices"],
    operation_id = "listChoices",
    security([])
)]
#[get("/choices/{question_id}")]
pub async fn list_choices(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ChoicesResponse>> {
    let question_id: QuestionId = parse_id(path.into_inner(), FieldName::new("question_id"))?;
    let choices = state.choices.list_choices(question_id).await?;
    Ok(web::Json(ChoicesResponse { choices }))
}

/// Attach a choice to a question.
#[utoipa::path(
    post,
    path = "/api/choices",
    request_body = ChoiceBody,
    responses(
        (status = 201, description = "Choice created", body = Choice),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 401, description = "Authentication required", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["choices"],
    operation_id = "createChoice"
)]
#[post("/choices")]
pub async fn create_choice(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    payload: web::Json<ChoiceBody>,
) -> ApiResult<HttpResponse> {
    let ChoiceBody {
        question_id,
        text,
        is_correct,
    } = payload.into_inner();
    let choice = state
        .choices
        .create_choice(CreateChoiceRequest {
            question_id,
            text,
            is_correct,
            credential: caller.credential(),
        })
        .await?;
    Ok(HttpResponse::Created().json(choice))
}

/// Replace the fields of a choice.
#[utoipa::path(
    put,
    path = "/api/choices/{id}",
    params(("id" = i64, Path, description = "Choice id")),
    request_body = ChoiceBody,
    responses(
        (status = 200, description = "Choice updated", body = Choice),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 401, description = "Authentication required", body = ErrorBody),
        (status = 404, description = "No such choice", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["choices"],
    operation_id = "updateChoice"
)]
#[put("/choices/{id}")]
pub async fn update_choice(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<i64>,
    payload: web::Json<ChoiceBody>,
) -> ApiResult<web::Json<Choice>> {
    let id: ChoiceId = parse_id(path.into_inner(), FieldName::new("id"))?;
    let ChoiceBody {
        question_id,
        text,
        is_correct,
    } = payload.into_inner();
    let choice = state
        .choices
        .update_choice(UpdateChoiceRequest {
            id,
            question_id,
            text,
            is_correct,
            credential: caller.credential(),
        })
        .await?;
    Ok(web::Json(choice))
}

/// Remove a choice.
#[utoipa::path(
    delete,
    path = "/api/choices/{id}",
    params(("id" = i64, Path, description = "Choice id")),
    responses(
        (status = 204, description = "Choice deleted"),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 401, description = "Authentication required", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["choices"],
    operation_id = "deleteChoice"
)]
#[delete("/choices/{id}")]
pub async fn delete_choice(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id: ChoiceId = parse_id(path.into_inner(), FieldName::new("id"))?;
    state.choices.delete_choice(id, caller.credential()).await?;
    Ok(HttpResponse::NoContent().finish())
}
