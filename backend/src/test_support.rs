//! In-memory adapters for exercising the HTTP stack without Supabase.
//!
//! [`InMemoryStore`] implements every repository port and the identity
//! provider. Like the real store it rejects anonymous writes, but it applies
//! no per-row policies; ownership is enforced by the domain services.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Duration;
use mockable::{Clock, DefaultClock};
use serde_json::json;
use tokio::sync::Mutex;
use zeroize::Zeroizing;

use crate::domain::ports::{
    AnswerRepository, AnswerRepositoryError, ChoiceRepository, ChoiceRepositoryError,
    GenreRepository, GenreRepositoryError, IdentityProvider, IdentityProviderError,
    QuestionRepository, QuestionRepositoryError,
};
use crate::domain::{
    Account, Answer, AnswerId, AnswerServiceImpl, AuthServiceImpl, BearerToken, Choice, ChoiceId,
    ChoiceServiceImpl, Credential, Genre, GenreId, GenreName, GenreServiceImpl, IssuedSession,
    LoginCredentials, NewAnswer, NewChoice, NewGenre, NewQuestion, Question, QuestionId,
    QuestionServiceImpl, SessionExpiry, SignUpDetails, UserId,
};
use crate::inbound::http::state::HttpState;

const ANONYMOUS_WRITE: &str = "permission denied for anonymous writes";

/// Unsigned three-segment token whose claims carry `sub = user_id`.
///
/// # Examples
/// ```
/// use quiz_backend::domain::{BearerToken, resolve_identity};
/// use quiz_backend::test_support::bearer_for;
///
/// let token = BearerToken::new(bearer_for("user-7"));
/// assert_eq!(resolve_identity(&token).unwrap().as_ref(), "user-7");
/// ```
pub fn bearer_for(user_id: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(json!({ "alg": "none", "typ": "JWT" }).to_string());
    let claims = URL_SAFE_NO_PAD.encode(json!({ "sub": user_id }).to_string());
    format!("{header}.{claims}.unsigned")
}

struct StoredAccount {
    account: Account,
    password: Zeroizing<String>,
}

#[derive(Default)]
struct StoreState {
    next_id: i64,
    genres: Vec<Genre>,
    questions: Vec<Question>,
    choices: Vec<Choice>,
    answers: Vec<Answer>,
    accounts: Vec<StoredAccount>,
}

impl StoreState {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared in-memory backend.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored questions.
    pub async fn question_count(&self) -> usize {
        self.state.lock().await.questions.len()
    }

    /// Register an account directly, bypassing sign-up validation.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<Account, IdentityProviderError> {
        let mut state = self.state.lock().await;
        let raw = state.allocate();
        let id = UserId::new(format!("user-{raw}"))
            .map_err(|err| IdentityProviderError::decode(err.to_string()))?;
        let account = Account {
            id,
            email: email.to_owned(),
            username: username.to_owned(),
        };
        state.accounts.push(StoredAccount {
            account: account.clone(),
            password: Zeroizing::new(password.to_owned()),
        });
        Ok(account)
    }
}

fn reject_anonymous(credential: &Credential) -> Result<(), String> {
    match credential {
        Credential::Anonymous => Err(ANONYMOUS_WRITE.to_owned()),
        Credential::Caller(_) => Ok(()),
    }
}

fn id_of<T: TryFrom<i64>>(raw: i64) -> Result<T, String> {
    T::try_from(raw).map_err(|_| format!("allocated non-positive id {raw}"))
}

#[async_trait]
impl GenreRepository for InMemoryStore {
    async fn list_all(&self, _credential: &Credential) -> Result<Vec<Genre>, GenreRepositoryError> {
        Ok(self.state.lock().await.genres.clone())
    }

    async fn find_by_name(
        &self,
        name: &GenreName,
        _credential: &Credential,
    ) -> Result<Option<Genre>, GenreRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .genres
            .iter()
            .find(|genre| genre.name == name.as_ref())
            .cloned())
    }

    async fn create(
        &self,
        genre: &NewGenre,
        credential: &Credential,
    ) -> Result<Genre, GenreRepositoryError> {
        reject_anonymous(credential).map_err(GenreRepositoryError::query)?;
        let mut state = self.state.lock().await;
        let raw = state.allocate();
        let stored = Genre {
            id: id_of::<GenreId>(raw).map_err(GenreRepositoryError::decode)?,
            name: genre.name.as_ref().to_owned(),
        };
        state.genres.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl QuestionRepository for InMemoryStore {
    async fn list_all(
        &self,
        _credential: &Credential,
    ) -> Result<Vec<Question>, QuestionRepositoryError> {
        Ok(self.state.lock().await.questions.clone())
    }

    async fn find_by_id(
        &self,
        id: QuestionId,
        _credential: &Credential,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        let state = self.state.lock().await;
        Ok(state.questions.iter().find(|q| q.id == id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
        _credential: &Credential,
    ) -> Result<Vec<Question>, QuestionRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .questions
            .iter()
            .filter(|q| &q.owner_id == owner)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        question: &NewQuestion,
        credential: &Credential,
    ) -> Result<Question, QuestionRepositoryError> {
        reject_anonymous(credential).map_err(QuestionRepositoryError::query)?;
        let mut state = self.state.lock().await;
        let raw = state.allocate();
        let stored = Question {
            id: id_of::<QuestionId>(raw).map_err(QuestionRepositoryError::decode)?,
            genre_id: question.genre_id,
            owner_id: question.owner_id.clone(),
            title: question.title.as_ref().to_owned(),
            body: question.body.clone(),
            explanation: question.explanation.clone(),
            created_at: question.created_at,
            views: 0,
            correct_count: 0,
            incorrect_count: 0,
        };
        state.questions.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        question: &Question,
        credential: &Credential,
    ) -> Result<Question, QuestionRepositoryError> {
        reject_anonymous(credential).map_err(QuestionRepositoryError::query)?;
        let mut state = self.state.lock().await;
        let stored = state
            .questions
            .iter_mut()
            .find(|q| q.id == question.id)
            .ok_or_else(|| {
                QuestionRepositoryError::query(format!("question {} was not updated", question.id))
            })?;
        stored.title.clone_from(&question.title);
        stored.body.clone_from(&question.body);
        stored.explanation.clone_from(&question.explanation);
        Ok(stored.clone())
    }

    async fn delete(
        &self,
        id: QuestionId,
        credential: &Credential,
    ) -> Result<(), QuestionRepositoryError> {
        reject_anonymous(credential).map_err(QuestionRepositoryError::query)?;
        self.state.lock().await.questions.retain(|q| q.id != id);
        Ok(())
    }
}

#[async_trait]
impl ChoiceRepository for InMemoryStore {
    async fn list_by_question(
        &self,
        question_id: QuestionId,
        _credential: &Credential,
    ) -> Result<Vec<Choice>, ChoiceRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .choices
            .iter()
            .filter(|c| c.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        choice: &NewChoice,
        credential: &Credential,
    ) -> Result<Choice, ChoiceRepositoryError> {
        reject_anonymous(credential).map_err(ChoiceRepositoryError::query)?;
        let mut state = self.state.lock().await;
        let raw = state.allocate();
        let stored = Choice {
            id: id_of::<ChoiceId>(raw).map_err(ChoiceRepositoryError::decode)?,
            question_id: choice.question_id,
            text: choice.text.clone(),
            is_correct: choice.is_correct,
        };
        state.choices.push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: ChoiceId,
        choice: &NewChoice,
        credential: &Credential,
    ) -> Result<Option<Choice>, ChoiceRepositoryError> {
        reject_anonymous(credential).map_err(ChoiceRepositoryError::query)?;
        let mut state = self.state.lock().await;
        Ok(state.choices.iter_mut().find(|c| c.id == id).map(|stored| {
            stored.question_id = choice.question_id;
            stored.text.clone_from(&choice.text);
            stored.is_correct = choice.is_correct;
            stored.clone()
        }))
    }

    async fn delete(&self, id: ChoiceId, credential: &Credential) -> Result<(), ChoiceRepositoryError> {
        reject_anonymous(credential).map_err(ChoiceRepositoryError::query)?;
        self.state.lock().await.choices.retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl AnswerRepository for InMemoryStore {
    async fn create(
        &self,
        answer: &NewAnswer,
        credential: &Credential,
    ) -> Result<Answer, AnswerRepositoryError> {
        reject_anonymous(credential).map_err(AnswerRepositoryError::query)?;
        let mut state = self.state.lock().await;
        let raw = state.allocate();
        let stored = Answer {
            id: id_of::<AnswerId>(raw).map_err(AnswerRepositoryError::decode)?,
            user_id: answer.user_id.clone(),
            question_id: answer.question_id,
            choice_id: answer.choice_id,
            answered_at: answer.answered_at,
        };
        state.answers.push(stored.clone());
        Ok(stored)
    }

    async fn list_by_user(
        &self,
        user_id: &UserId,
        _credential: &Credential,
    ) -> Result<Vec<Answer>, AnswerRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .answers
            .iter()
            .filter(|a| &a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_by_question(
        &self,
        question_id: QuestionId,
        _credential: &Credential,
    ) -> Result<Vec<Answer>, AnswerRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .answers
            .iter()
            .filter(|a| a.question_id == question_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl IdentityProvider for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, IdentityProviderError> {
        let state = self.state.lock().await;
        Ok(state
            .accounts
            .iter()
            .find(|stored| stored.account.email.eq_ignore_ascii_case(email))
            .map(|stored| stored.account.clone()))
    }

    async fn create_account(
        &self,
        details: &SignUpDetails,
    ) -> Result<Account, IdentityProviderError> {
        if self.find_by_email(details.email()).await?.is_some() {
            return Err(IdentityProviderError::already_registered(
                "User already registered",
            ));
        }
        self.register(details.email(), details.password(), details.username())
            .await
    }

    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<IssuedSession, IdentityProviderError> {
        let state = self.state.lock().await;
        let stored = state
            .accounts
            .iter()
            .find(|stored| {
                stored.account.email.eq_ignore_ascii_case(credentials.email())
                    && stored.password.as_str() == credentials.password()
            })
            .ok_or_else(|| IdentityProviderError::rejected("Invalid login credentials"))?;
        Ok(IssuedSession {
            account: stored.account.clone(),
            access_token: BearerToken::new(bearer_for(stored.account.id.as_ref())),
            refresh_token: Zeroizing::new(format!("refresh-{}", stored.account.id)),
            expiry: SessionExpiry::After(Duration::hours(1)),
        })
    }

    async fn sign_out(&self, _token: &BearerToken) -> Result<(), IdentityProviderError> {
        Ok(())
    }
}

/// HTTP state whose services all run against `store`.
pub fn http_state_for(store: &Arc<InMemoryStore>) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    HttpState {
        genres: Arc::new(GenreServiceImpl::new(Arc::clone(store))),
        questions: Arc::new(QuestionServiceImpl::new(Arc::clone(store), clock.clone())),
        choices: Arc::new(ChoiceServiceImpl::new(Arc::clone(store))),
        answers: Arc::new(AnswerServiceImpl::new(Arc::clone(store), clock.clone())),
        auth: Arc::new(AuthServiceImpl::new(Arc::clone(store), clock)),
    }
}
