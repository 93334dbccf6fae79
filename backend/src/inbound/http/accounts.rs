//! Account handlers: sign-up, login and logout.
//!
//! ```text
//! POST /api/auth/signup {"email":"ada@example.com","password":"hunter22","username":"ada"}
//! POST /api/auth/login  {"email":"ada@example.com","password":"hunter22"}
//! POST /api/auth/logout (Authorization: Bearer <token>)
//! ```

use std::fmt;

use actix_web::http::header::AUTHORIZATION;
use actix_web::{HttpRequest, HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::ports::{SignInRequest, SignUpRequest};
use crate::domain::{Account, AuthSession};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;

/// Sign-up and login request body. `username` is only read by sign-up.
#[derive(Deserialize, ToSchema)]
pub struct AuthRequest {
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "hunter22")]
    pub password: String,
    #[serde(default)]
    #[schema(example = "ada")]
    pub username: String,
}

/// Session issued by sign-up and login.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub refresh_token: String,
    pub user: Account,
    /// Expiry as Unix seconds.
    #[schema(example = 1_717_171_717)]
    pub expires_at: i64,
}

impl fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthRequest")
            .field("email", &self.email)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("user", &self.user)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            token: session.access_token.expose().to_owned(),
            refresh_token: session.refresh_token.as_str().to_owned(),
            user: session.account,
            expires_at: session.expires_at.timestamp(),
        }
    }
}

/// Confirmation returned by logout.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LogoutResponse {
    #[schema(example = "Logged out successfully")]
    pub message: String,
}

/// Register an account and log it in.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = AuthRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 401, description = "Login after sign-up failed", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "signUp",
    security([])
)]
#[post("/auth/signup")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    payload: web::Json<AuthRequest>,
) -> ApiResult<HttpResponse> {
    let AuthRequest {
        email,
        password,
        username,
    } = payload.into_inner();
    let session = state
        .auth
        .sign_up(SignUpRequest {
            email,
            password: Zeroizing::new(password),
            username,
        })
        .await?;
    Ok(HttpResponse::Created().json(AuthResponse::from(session)))
}

/// Exchange email and password for a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = AuthRequest,
    responses(
        (status = 200, description = "Logged in", body = AuthResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<AuthRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let AuthRequest {
        email, password, ..
    } = payload.into_inner();
    let session = state
        .auth
        .sign_in(SignInRequest {
            email,
            password: Zeroizing::new(password),
        })
        .await?;
    Ok(web::Json(AuthResponse::from(session)))
}

/// Invalidate the session behind the presented bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = LogoutResponse),
        (status = 400, description = "Token missing", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<web::Json<LogoutResponse>> {
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    state.auth.sign_out(authorization).await?;
    Ok(web::Json(LogoutResponse {
        message: "Logged out successfully".to_owned(),
    }))
}
