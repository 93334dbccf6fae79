//! Driving port for sign-up, sign-in and sign-out.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::{AuthSession, Error};

/// Raw sign-up input.
#[derive(Clone)]
pub struct SignUpRequest {
    pub email: String,
    pub password: Zeroizing<String>,
    pub username: String,
}

/// Raw sign-in input.
#[derive(Clone)]
pub struct SignInRequest {
    pub email: String,
    pub password: Zeroizing<String>,
}

/// Domain use-case port for authentication.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register an account and log straight in. Fails `USER_EXISTS` when the
    /// email is taken.
    async fn sign_up(&self, request: SignUpRequest) -> Result<AuthSession, Error>;

    /// Any provider refusal collapses to `AUTH_FAILED`.
    async fn sign_in(&self, request: SignInRequest) -> Result<AuthSession, Error>;

    /// Invalidate the session behind an `Authorization` header value. A
    /// leading `Bearer ` scheme is optional.
    async fn sign_out(&self, authorization: &str) -> Result<(), Error>;
}
