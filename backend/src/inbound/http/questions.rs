//! Question handlers.
//!
//! ```text
//! GET    /api/questions
//! POST   /api/questions {"genre_id":1,"title":"...","body":"...","explanation":"..."}
//! GET    /api/questions/{id}
//! PUT    /api/questions/{id} {"title":"...","body":"...","explanation":"..."}
//! DELETE /api/questions/{id}
//! GET    /api/my-questions
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::ports::{CreateQuestionRequest, DeleteQuestionRequest, UpdateQuestionRequest};
use crate::domain::{Question, QuestionId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_id};

const ID: FieldName = FieldName::new("id");

/// Body of `POST /api/questions`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateQuestionBody {
    #[serde(default)]
    #[schema(example = 1)]
    pub genre_id: i64,
    #[serde(default)]
    #[schema(example = "Which planet is largest?")]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub explanation: String,
}

/// Body of `PUT /api/questions/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateQuestionBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub explanation: String,
}

/// List every question.
#[utoipa::path(
    get,
    path = "/api/questions",
    responses(
        (status = 200, description = "Questions", body = [Question]),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["questions"],
    operation_id = "listQuestions",
    security([])
)]
#[get("/questions")]
pub async fn list_questions(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Question>>> {
    Ok(web::Json(state.questions.list_questions().await?))
}

/// Create a question owned by the caller.
#[utoipa::path(
    post,
    path = "/api/questions",
    request_body = CreateQuestionBody,
    responses(
        (status = 201, description = "Question created", body = Question),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 401, description = "Authentication required", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["questions"],
    operation_id = "createQuestion"
)]
#[post("/questions")]
pub async fn create_question(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    payload: web::Json<CreateQuestionBody>,
) -> ApiResult<HttpResponse> {
    let CreateQuestionBody {
        genre_id,
        title,
        body,
        explanation,
    } = payload.into_inner();
    let (owner_id, credential) = caller.into_parts();
    let question = state
        .questions
        .create_question(CreateQuestionRequest {
            genre_id,
            owner_id,
            title,
            body,
            explanation,
            credential,
        })
        .await?;
    Ok(HttpResponse::Created().json(question))
}

/// Fetch one question.
#[utoipa::path(
    get,
    path = "/api/questions/{id}",
    params(("id" = i64, Path, description = "Question id")),
    responses(
        (status = 200, description = "Question", body = Question),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "No such question", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["questions"],
    operation_id = "getQuestion",
    security([])
)]
#[get("/questions/{id}")]
pub async fn get_question(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Question>> {
    let id: QuestionId = parse_id(path.into_inner(), ID)?;
    Ok(web::Json(state.questions.get_question(id).await?))
}

/// Replace the title, body and explanation of a question the caller owns.
#[utoipa::path(
    put,
    path = "/api/questions/{id}",
    params(("id" = i64, Path, description = "Question id")),
    request_body = UpdateQuestionBody,
    responses(
        (status = 200, description = "Question updated", body = Question),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 401, description = "Authentication required", body = ErrorBody),
        (status = 403, description = "Caller does not own the question", body = ErrorBody),
        (status = 404, description = "No such question", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["questions"],
    operation_id = "updateQuestion"
)]
#[put("/questions/{id}")]
pub async fn update_question(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<i64>,
    payload: web::Json<UpdateQuestionBody>,
) -> ApiResult<web::Json<Question>> {
    let id = parse_id(path.into_inner(), ID)?;
    let UpdateQuestionBody {
        title,
        body,
        explanation,
    } = payload.into_inner();
    let (caller_id, credential) = caller.into_parts();
    let question = state
        .questions
        .update_question(UpdateQuestionRequest {
            id,
            title,
            body,
            explanation,
            caller_id,
            credential,
        })
        .await?;
    Ok(web::Json(question))
}

/// Delete a question the caller owns.
#[utoipa::path(
    delete,
    path = "/api/questions/{id}",
    params(("id" = i64, Path, description = "Question id")),
    responses(
        (status = 204, description = "Question deleted"),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 401, description = "Authentication required", body = ErrorBody),
        (status = 403, description = "Caller does not own the question", body = ErrorBody),
        (status = 404, description = "No such question", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["questions"],
    operation_id = "deleteQuestion"
)]
#[delete("/questions/{id}")]
pub async fn delete_question(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(path.into_inner(), ID)?;
    let (caller_id, credential) = caller.into_parts();
    state
        .questions
        .delete_question(DeleteQuestionRequest {
            id,
            caller_id,
            credential,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Questions created by the caller.
#[utoipa::path(
    get,
    path = "/api/my-questions",
    responses(
        (status = 200, description = "Caller's questions", body = [Question]),
        (status = 401, description = "Authentication required", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["questions"],
    operation_id = "myQuestions"
)]
#[get("/my-questions")]
pub async fn my_questions(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
) -> ApiResult<web::Json<Vec<Question>>> {
    let (owner, credential) = caller.into_parts();
    Ok(web::Json(
        state.questions.questions_by_owner(owner, credential).await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{TestApp, bearer, json_body};
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    async fn create_as(app: &TestApp, user: &str, title: &str) -> Question {
        let res = app
            .call(
                actix_test::TestRequest::post()
                    .uri("/api/questions")
                    .insert_header((AUTHORIZATION, bearer(user)))
                    .set_json(json!({
                        "genre_id": 1,
                        "title": title,
                        "body": "Pick one",
                        "explanation": "Because"
                    })),
            )
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        actix_test::read_body_json(res).await
    }

    #[actix_web::test]
    async fn created_questions_are_owned_by_the_caller() {
        let app = TestApp::new();
        let question = create_as(&app, "alice", "  Largest planet?  ").await;
        assert_eq!(question.owner_id.as_ref(), "alice");
        assert_eq!(question.title, "Largest planet?");
        assert_eq!(question.views, 0);

        let res = app
            .call(actix_test::TestRequest::get().uri(&format!("/api/questions/{}", question.id)))
            .await;
        let body: Value = json_body(res).await;
        assert_eq!(body["user_id"], "alice");
        assert_eq!(body["correct_count"], 0);
    }

    #[actix_web::test]
    async fn missing_genre_is_a_validation_error() {
        let app = TestApp::new();
        let res = app
            .call(
                actix_test::TestRequest::post()
                    .uri("/api/questions")
                    .insert_header((AUTHORIZATION, bearer("alice")))
                    .set_json(json!({ "title": "No genre" })),
            )
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await["field"], "genre_id");
    }

    #[actix_web::test]
    async fn others_cannot_delete() {
        let app = TestApp::new();
        let question = create_as(&app, "alice", "Largest planet?").await;

        let res = app
            .call(
                actix_test::TestRequest::delete()
                    .uri(&format!("/api/questions/{}", question.id))
                    .insert_header((AUTHORIZATION, bearer("bob"))),
            )
            .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(json_body(res).await["code"], "FORBIDDEN");
        assert_eq!(app.store().question_count().await, 1);
    }

    #[actix_web::test]
    async fn owners_can_update_and_delete() {
        let app = TestApp::new();
        let question = create_as(&app, "alice", "Largest planet?").await;
        let uri = format!("/api/questions/{}", question.id);

        let res = app
            .call(
                actix_test::TestRequest::put()
                    .uri(&uri)
                    .insert_header((AUTHORIZATION, bearer("alice")))
                    .set_json(json!({
                        "title": "Smallest planet?",
                        "body": "Pick one",
                        "explanation": "Mercury"
                    })),
            )
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let updated: Question = actix_test::read_body_json(res).await;
        assert_eq!(updated.title, "Smallest planet?");
        assert_eq!(updated.created_at, question.created_at);

        let res = app
            .call(
                actix_test::TestRequest::delete()
                    .uri(&uri)
                    .insert_header((AUTHORIZATION, bearer("alice"))),
            )
            .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let res = app.call(actix_test::TestRequest::get().uri(&uri)).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn others_cannot_update() {
        let app = TestApp::new();
        let question = create_as(&app, "alice", "Largest planet?").await;

        let res = app
            .call(
                actix_test::TestRequest::put()
                    .uri(&format!("/api/questions/{}", question.id))
                    .insert_header((AUTHORIZATION, bearer("bob")))
                    .set_json(json!({ "title": "Hijacked" })),
            )
            .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = app
            .call(actix_test::TestRequest::get().uri(&format!("/api/questions/{}", question.id)))
            .await;
        let unchanged: Question = actix_test::read_body_json(res).await;
        assert_eq!(unchanged.title, "Largest planet?");
    }

    #[actix_web::test]
    async fn my_questions_lists_only_the_callers() {
        let app = TestApp::new();
        create_as(&app, "alice", "One").await;
        create_as(&app, "bob", "Two").await;
        create_as(&app, "alice", "Three").await;

        let res = app
            .call(
                actix_test::TestRequest::get()
                    .uri("/api/my-questions")
                    .insert_header((AUTHORIZATION, bearer("alice"))),
            )
            .await;
        let mine: Vec<Question> = actix_test::read_body_json(res).await;
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|q| q.owner_id.as_ref() == "alice"));
    }

    #[actix_web::test]
    async fn non_numeric_ids_are_validation_errors() {
        let app = TestApp::new();
        let res = app
            .call(actix_test::TestRequest::get().uri("/api/questions/abc"))
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res).await["field"], "id");
    }

    #[actix_web::test]
    async fn zero_ids_are_validation_errors() {
        let app = TestApp::new();
        let res = app.call(actix_test::TestRequest::get().uri("/api/questions/0")).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
