//! Port for the external identity provider.
//!
//! The provider owns credential verification, session issuance and account
//! storage. The domain only asks it to perform those operations.

use async_trait::async_trait;

use crate::domain::{Account, BearerToken, IssuedSession, LoginCredentials, SignUpDetails};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityProviderError {
        /// The provider could not be reached.
        Connection { message: String } =>
            "identity provider connection failed: {message}",
        /// The provider refused the request, for example bad credentials or an
        /// unconfirmed email address.
        Rejected { message: String } =>
            "identity provider rejected the request: {message}",
        /// The email address is already registered.
        AlreadyRegistered { message: String } =>
            "account already registered: {message}",
        /// The provider answered with a payload that could not be decoded.
        Decode { message: String } =>
            "identity provider returned an undecodable payload: {message}",
    }
}

/// Port for account creation, authentication and sign-out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Account registered under `email`, matched case-insensitively.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, IdentityProviderError>;

    /// Register a new account.
    async fn create_account(
        &self,
        details: &SignUpDetails,
    ) -> Result<Account, IdentityProviderError>;

    /// Exchange credentials for a session.
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<IssuedSession, IdentityProviderError>;

    /// Invalidate the session behind `token`.
    async fn sign_out(&self, token: &BearerToken) -> Result<(), IdentityProviderError>;
}
