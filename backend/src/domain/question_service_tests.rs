//! Tests for the question service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockQuestionRepository;
use crate::domain::{BearerToken, DomainErrorCode};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0)
        .single()
        .expect("valid timestamp")
}

fn make_service(repo: MockQuestionRepository) -> QuestionServiceImpl<MockQuestionRepository> {
    QuestionServiceImpl::new(
        Arc::new(repo),
        Arc::new(FixtureClock {
            utc_now: fixture_timestamp(),
        }),
    )
}

fn user(raw: &str) -> UserId {
    UserId::new(raw).expect("fixture user id")
}

fn caller_credential() -> Credential {
    Credential::Caller(BearerToken::new("caller-token"))
}

#[fixture]
fn stored() -> Question {
    Question {
        id: QuestionId::new(7).expect("id"),
        genre_id: GenreId::new(3).expect("id"),
        owner_id: user("alice"),
        title: "Original".into(),
        body: "body".into(),
        explanation: "because".into(),
        created_at: fixture_timestamp(),
        views: 12,
        correct_count: 4,
        incorrect_count: 2,
    }
}

fn create_request(genre_id: i64, title: &str) -> CreateQuestionRequest {
    CreateQuestionRequest {
        genre_id,
        owner_id: user("alice"),
        title: title.to_owned(),
        body: "What is 2 + 2?".into(),
        explanation: "Arithmetic.".into(),
        credential: caller_credential(),
    }
}

fn update_request(caller: &str, title: &str) -> UpdateQuestionRequest {
    UpdateQuestionRequest {
        id: QuestionId::new(7).expect("id"),
        title: title.to_owned(),
        body: "new body".into(),
        explanation: "new explanation".into(),
        caller_id: user(caller),
        credential: caller_credential(),
    }
}

#[tokio::test]
async fn create_stamps_clock_time_and_owner() {
    let mut repo = MockQuestionRepository::new();
    repo.expect_create()
        .withf(|draft, credential| {
            draft.created_at == fixture_timestamp()
                && draft.owner_id.as_ref() == "alice"
                && draft.title.as_ref() == "Sum"
                && credential.bearer().map(BearerToken::expose) == Some("caller-token")
        })
        .times(1)
        .return_once(|draft, _| {
            Ok(Question {
                id: QuestionId::new(1).expect("id"),
                genre_id: draft.genre_id,
                owner_id: draft.owner_id.clone(),
                title: draft.title.as_ref().to_owned(),
                body: draft.body.clone(),
                explanation: draft.explanation.clone(),
                created_at: draft.created_at,
                views: 0,
                correct_count: 0,
                incorrect_count: 0,
            })
        });

    let question = make_service(repo)
        .create_question(create_request(3, " Sum "))
        .await
        .expect("created");
    assert_eq!(question.created_at, fixture_timestamp());
    assert_eq!(
        (question.views, question.correct_count, question.incorrect_count),
        (0, 0, 0)
    );
}

#[rstest]
#[case(0, "Sum", "genre_id")]
#[case(3, "", "title")]
#[case(3, "   ", "title")]
#[case(3, &"t".repeat(201), "title")]
#[tokio::test]
async fn create_rejects_invalid_input(
    #[case] genre_id: i64,
    #[case] title: &str,
    #[case] field: &str,
) {
    let mut repo = MockQuestionRepository::new();
    repo.expect_create().never();

    let err = make_service(repo)
        .create_question(create_request(genre_id, title))
        .await
        .expect_err("validation error");
    assert_eq!(err.field(), Some(field));
}

#[rstest]
#[tokio::test]
async fn owner_can_revise(stored: Question) {
    let mut repo = MockQuestionRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_, _| Ok(Some(stored)));
    repo.expect_update()
        .withf(|question, _| {
            question.title == "Revised"
                && question.body == "new body"
                && question.views == 12
                && question.owner_id.as_ref() == "alice"
        })
        .times(1)
        .return_once(|question, _| Ok(question.clone()));

    let updated = make_service(repo)
        .update_question(update_request("alice", "Revised"))
        .await
        .expect("owner update");
    assert_eq!(updated.explanation, "new explanation");
    assert_eq!(updated.created_at, fixture_timestamp());
}

#[rstest]
#[tokio::test]
async fn stranger_cannot_revise(stored: Question) {
    let mut repo = MockQuestionRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_, _| Ok(Some(stored)));
    repo.expect_update().never();

    let err = make_service(repo)
        .update_question(update_request("mallory", "Hijacked"))
        .await
        .expect_err("forbidden");
    assert_eq!(err.domain_code(), Some(DomainErrorCode::Forbidden));
}

#[tokio::test]
async fn update_rejects_bad_title_before_fetching() {
    let mut repo = MockQuestionRepository::new();
    repo.expect_find_by_id().never();
    repo.expect_update().never();

    let err = make_service(repo)
        .update_question(update_request("alice", &"t".repeat(201)))
        .await
        .expect_err("validation error");
    assert_eq!(err.field(), Some("title"));
}

#[tokio::test]
async fn update_of_missing_question_is_not_found() {
    let mut repo = MockQuestionRepository::new();
    repo.expect_find_by_id().return_once(|_, _| Ok(None));
    repo.expect_update().never();

    let err = make_service(repo)
        .update_question(update_request("alice", "Revised"))
        .await
        .expect_err("missing");
    assert_eq!(err.domain_code(), Some(DomainErrorCode::NotFound));
}

#[rstest]
#[case("alice", true)]
#[case("bob", false)]
#[tokio::test]
async fn delete_enforces_ownership(stored: Question, #[case] caller: &str, #[case] allowed: bool) {
    let mut repo = MockQuestionRepository::new();
    repo.expect_find_by_id()
        .return_once(move |_, _| Ok(Some(stored)));
    repo.expect_delete()
        .times(usize::from(allowed))
        .returning(|_, _| Ok(()));

    let result = make_service(repo)
        .delete_question(DeleteQuestionRequest {
            id: QuestionId::new(7).expect("id"),
            caller_id: user(caller),
            credential: caller_credential(),
        })
        .await;

    match (allowed, result) {
        (true, Ok(())) => {}
        (false, Err(err)) => assert_eq!(err.domain_code(), Some(DomainErrorCode::Forbidden)),
        (expected, other) => panic!("allowed={expected} but got {other:?}"),
    }
}

#[tokio::test]
async fn get_missing_question_is_not_found() {
    let mut repo = MockQuestionRepository::new();
    repo.expect_find_by_id()
        .withf(|_, credential| *credential == Credential::Anonymous)
        .return_once(|_, _| Ok(None));

    let err = make_service(repo)
        .get_question(QuestionId::new(99).expect("id"))
        .await
        .expect_err("missing");
    assert_eq!(err.code(), "NOT_FOUND");
}

#[tokio::test]
async fn store_failures_are_internal() {
    let mut repo = MockQuestionRepository::new();
    repo.expect_list_all()
        .return_once(|_| Err(QuestionRepositoryError::query("status 500")));

    let err = make_service(repo)
        .list_questions()
        .await
        .expect_err("store failure");
    assert!(matches!(err, Error::Internal { .. }));
}

#[tokio::test]
async fn lists_questions_by_owner_with_caller_credential() {
    let mut repo = MockQuestionRepository::new();
    repo.expect_list_by_owner()
        .withf(|owner, credential| owner.as_ref() == "alice" && credential.bearer().is_some())
        .return_once(|_, _| Ok(Vec::new()));

    let questions = make_service(repo)
        .questions_by_owner(user("alice"), caller_credential())
        .await
        .expect("list");
    assert!(questions.is_empty());
}
