//! End-to-end flows through the `/api` surface backed by the in-memory store.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self as actix_test, TestRequest};
use actix_web::{App, web};
use quiz_backend::Trace;
use quiz_backend::inbound::http::configure;
use quiz_backend::inbound::http::validation::{json_config, path_config};
use quiz_backend::test_support::{InMemoryStore, bearer_for, http_state_for};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::new())
}

async fn init_app(
    store: &Arc<InMemoryStore>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(http_state_for(store)))
            .app_data(json_config())
            .app_data(path_config())
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

fn authorization(user_id: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", bearer_for(user_id)))
}

async fn send<S>(app: &S, req: TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let res = actix_test::call_service(app, req.to_request()).await;
    let status = res.status();
    let body = actix_test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body is JSON")
    };
    (status, value)
}

#[rstest]
#[actix_web::test]
async fn sign_up_then_author_a_question(store: Arc<InMemoryStore>) {
    let app = init_app(&store).await;

    let (status, session) = send(
        &app,
        TestRequest::post().uri("/api/auth/signup").set_json(json!({
            "email": "ada@example.com",
            "password": "hunter22",
            "username": "ada"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(session["user"]["email"], "ada@example.com");
    let token = session["token"].as_str().expect("token").to_owned();
    let user_id = session["user"]["id"].as_str().expect("user id").to_owned();

    let (status, login) = send(
        &app,
        TestRequest::post().uri("/api/auth/login").set_json(json!({
            "email": "ADA@example.com",
            "password": "hunter22"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["user"]["id"], user_id.as_str());

    let (status, genre) = send(
        &app,
        TestRequest::post()
            .uri("/api/genres")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({ "name": "History" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, question) = send(
        &app,
        TestRequest::post()
            .uri("/api/questions")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({
                "genre_id": genre["id"],
                "title": "When did the Berlin Wall fall?",
                "body": "",
                "explanation": "November 1989."
            })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(question["user_id"], user_id.as_str());

    let (status, mine) = send(
        &app,
        TestRequest::get()
            .uri("/api/my-questions")
            .insert_header(("Authorization", format!("Bearer {token}"))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().map(Vec::len), Some(1));
}

#[rstest]
#[actix_web::test]
async fn duplicate_genre_names_conflict(store: Arc<InMemoryStore>) {
    let app = init_app(&store).await;
    let create = || {
        TestRequest::post()
            .uri("/api/genres")
            .insert_header(authorization("user-a"))
            .set_json(json!({ "name": "Science" }))
    };

    let (first, _) = send(&app, create()).await;
    assert_eq!(first, StatusCode::CREATED);

    let (status, body) = send(&app, create()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "GENRE_EXISTS");
}

#[rstest]
#[actix_web::test]
async fn only_the_owner_can_delete_a_question(store: Arc<InMemoryStore>) {
    let app = init_app(&store).await;

    let (_, genre) = send(
        &app,
        TestRequest::post()
            .uri("/api/genres")
            .insert_header(authorization("user-a"))
            .set_json(json!({ "name": "Geography" })),
    )
    .await;
    let (_, question) = send(
        &app,
        TestRequest::post()
            .uri("/api/questions")
            .insert_header(authorization("user-a"))
            .set_json(json!({ "genre_id": genre["id"], "title": "Capital of Peru?" })),
    )
    .await;
    let uri = format!("/api/questions/{}", question["id"]);

    let (status, body) = send(
        &app,
        TestRequest::delete()
            .uri(&uri)
            .insert_header(authorization("user-b")),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
    assert_eq!(store.question_count().await, 1);

    let (status, _) = send(
        &app,
        TestRequest::delete()
            .uri(&uri)
            .insert_header(authorization("user-a")),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(store.question_count().await, 0);
}

#[rstest]
#[actix_web::test]
async fn wrong_password_is_an_auth_failure(store: Arc<InMemoryStore>) {
    store
        .register("ada@example.com", "hunter22", "ada")
        .await
        .expect("fixture account registers");
    let app = init_app(&store).await;

    let (status, body) = send(
        &app,
        TestRequest::post().uri("/api/auth/login").set_json(json!({
            "email": "ada@example.com",
            "password": "wrong-password"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH_FAILED");
}

#[rstest]
#[case::missing(None, "UNAUTHORIZED")]
#[case::garbage(Some("Bearer not-a-jwt"), "INVALID_TOKEN")]
#[actix_web::test]
async fn protected_routes_need_a_readable_token(
    store: Arc<InMemoryStore>,
    #[case] header: Option<&str>,
    #[case] expected_code: &str,
) {
    let app = init_app(&store).await;
    let mut req = TestRequest::get().uri("/api/my-questions");
    if let Some(value) = header {
        req = req.insert_header(("Authorization", value));
    }

    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], expected_code);
}

#[rstest]
#[case::blank_genre("/api/genres", json!({ "name": "  " }), "name")]
#[case::missing_genre_id("/api/questions", json!({ "title": "Why?" }), "genre_id")]
#[case::blank_title("/api/questions", json!({ "genre_id": 1, "title": "" }), "title")]
#[case::missing_choice("/api/answers", json!({ "question_id": 1 }), "choice_id")]
#[actix_web::test]
async fn invalid_payloads_name_the_field(
    store: Arc<InMemoryStore>,
    #[case] uri: &str,
    #[case] payload: Value,
    #[case] field: &str,
) {
    let app = init_app(&store).await;

    let (status, body) = send(
        &app,
        TestRequest::post()
            .uri(uri)
            .insert_header(authorization("user-a"))
            .set_json(payload),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["field"], field);
}

#[rstest]
#[actix_web::test]
async fn anonymous_reads_are_public(store: Arc<InMemoryStore>) {
    let app = init_app(&store).await;

    let (status, genres) = send(&app, TestRequest::get().uri("/api/genres")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(genres, json!([]));

    let (status, body) = send(&app, TestRequest::get().uri("/api/questions/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}
