//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Resource;
use actix_web::body::to_bytes;
use rstest::rstest;

async fn body_of(response: HttpResponse) -> ErrorBody {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error JSON deserialisation succeeds")
}

#[rstest]
#[case(Error::validation("name", "genre name is required"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("question not found"), StatusCode::NOT_FOUND)]
#[case(Error::forbidden("not yours"), StatusCode::FORBIDDEN)]
#[case(Error::unauthorized("missing token"), StatusCode::UNAUTHORIZED)]
#[case(Error::invalid_token("bad token"), StatusCode::UNAUTHORIZED)]
#[case(Error::auth_failed("invalid credentials"), StatusCode::UNAUTHORIZED)]
#[case(Error::already_exists(Resource::Genre, "genre exists"), StatusCode::CONFLICT)]
#[case(Error::already_exists(Resource::User, "user exists"), StatusCode::CONFLICT)]
#[case(Error::internal("db down"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[actix_web::test]
async fn validation_errors_report_the_field() {
    let response = ResponseError::error_response(&Error::validation("title", "title is required"));
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_of(response).await;
    assert_eq!(body.error, "Bad Request");
    assert_eq!(body.message, "title is required");
    assert_eq!(body.code.as_deref(), Some("VALIDATION_ERROR"));
    assert_eq!(body.field.as_deref(), Some("title"));
    assert!(body.trace_id.is_none());
}

#[actix_web::test]
async fn domain_errors_report_their_code() {
    let body = body_of(ResponseError::error_response(&Error::already_exists(
        Resource::Genre,
        "genre already exists",
    )))
    .await;
    assert_eq!(body.error, "Conflict");
    assert_eq!(body.code.as_deref(), Some("GENRE_EXISTS"));
    assert!(body.field.is_none());
}

#[actix_web::test]
async fn internal_errors_are_redacted() {
    let body = body_of(ResponseError::error_response(&Error::internal(
        "connection refused by 10.0.0.4",
    )))
    .await;
    assert_eq!(body.message, "Internal server error");
    assert_eq!(body.code.as_deref(), Some("INTERNAL_ERROR"));
}

#[actix_web::test]
async fn scoped_trace_ids_are_echoed() {
    let trace_id: TraceId = "00000000-0000-0000-0000-000000000001"
        .parse()
        .expect("valid UUID");
    let response = TraceId::scope(trace_id, async {
        ResponseError::error_response(&Error::forbidden("nope"))
    })
    .await;

    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace id header")
        .to_str()
        .expect("ascii header")
        .to_owned();
    assert_eq!(header, trace_id.to_string());

    let body = body_of(response).await;
    assert_eq!(body.trace_id.as_deref(), Some(header.as_str()));
}

#[test]
fn actix_errors_become_internal() {
    let err = actix_web::error::ErrorBadGateway("upstream");
    let mapped = Error::from(err);
    assert_eq!(mapped.code(), "INTERNAL_ERROR");
}
