//! Authentication domain service backed by the identity provider port.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    AuthService, IdentityProvider, IdentityProviderError, SignInRequest, SignUpRequest,
};
use crate::domain::{
    AuthSession, BearerToken, Error, LoginCredentials, Resource, SignUpDetails,
};

const AUTH_FAILED_MESSAGE: &str = "invalid credentials or email not confirmed";

/// Authentication service implementing [`AuthService`].
#[derive(Clone)]
pub struct AuthServiceImpl<P> {
    provider: Arc<P>,
    clock: Arc<dyn Clock>,
}

impl<P> AuthServiceImpl<P> {
    /// Create a new service with the given identity provider and clock.
    pub fn new(provider: Arc<P>, clock: Arc<dyn Clock>) -> Self {
        Self { provider, clock }
    }
}

impl<P> AuthServiceImpl<P>
where
    P: IdentityProvider,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error> {
        match self.provider.authenticate(credentials).await {
            Ok(issued) => Ok(AuthSession::from_issued(issued, self.clock.utc())),
            Err(error) => {
                warn!(%error, "identity provider refused login");
                Err(Error::auth_failed(AUTH_FAILED_MESSAGE))
            }
        }
    }
}

fn user_exists() -> Error {
    Error::already_exists(Resource::User, "user with this email already exists")
}

#[async_trait]
impl<P> AuthService for AuthServiceImpl<P>
where
    P: IdentityProvider,
{
    async fn sign_up(&self, request: SignUpRequest) -> Result<AuthSession, Error> {
        let details =
            SignUpDetails::try_from_parts(&request.email, &request.password, &request.username)
                .map_err(|err| Error::validation(err.field(), err.to_string()))?;

        let existing = self
            .provider
            .find_by_email(details.email())
            .await
            .map_err(|err| Error::internal(err.to_string()))?;
        if existing.is_some() {
            return Err(user_exists());
        }

        let account = self
            .provider
            .create_account(&details)
            .await
            .map_err(|err| match err {
                IdentityProviderError::AlreadyRegistered { .. } => user_exists(),
                other => Error::internal(other.to_string()),
            })?;
        info!(user_id = %account.id, "account registered");

        self.login(&details.login_credentials()).await
    }

    async fn sign_in(&self, request: SignInRequest) -> Result<AuthSession, Error> {
        let credentials = LoginCredentials::try_from_parts(&request.email, &request.password)
            .map_err(|err| Error::validation(err.field(), err.to_string()))?;
        self.login(&credentials).await
    }

    async fn sign_out(&self, authorization: &str) -> Result<(), Error> {
        let token = BearerToken::from_authorization_header(authorization)
            .ok_or_else(|| Error::validation("token", "token is required"))?;
        self.provider
            .sign_out(&token)
            .await
            .map_err(|err| Error::internal(err.to_string()))
    }
}
