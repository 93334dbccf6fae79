//! GoTrue-backed `IdentityProvider` adapter.
//!
//! Registration and account lookup use the service-role key. Password
//! grants use the public key, and sign-out forwards the caller's own token.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use reqwest::Method;
use tracing::debug;
use zeroize::Zeroizing;

use crate::domain::ports::{IdentityProvider, IdentityProviderError};
use crate::domain::{
    Account, BearerToken, Credential, IssuedSession, LoginCredentials, SessionExpiry,
    SignUpDetails,
};

use super::client::{RestError, SupabaseClient, decode_json};
use super::dto::{
    AdminUserPage, PasswordGrantBody, SignUpBody, SignUpMetadata, SignUpResponse, TokenGrant,
};

const DUPLICATE_MARKERS: [&str; 3] = ["user_already_exists", "already registered", "email_exists"];

/// Accounts requested per page of the admin user listing.
const ADMIN_PAGE_SIZE: usize = 100;

impl From<RestError> for IdentityProviderError {
    fn from(error: RestError) -> Self {
        match error {
            RestError::Connection { message } => Self::connection(message),
            RestError::Decode { message } => Self::decode(message),
            RestError::Status { body, .. } if is_duplicate(&body) => {
                Self::already_registered(body)
            }
            RestError::Status { status, body } if status >= 500 => {
                Self::connection(format!("status {status}: {body}"))
            }
            rejected @ RestError::Status { .. } => Self::rejected(rejected.to_string()),
        }
    }
}

/// Only an explicit duplicate marker counts; GoTrue also answers 422 for weak
/// passwords and other validation failures.
fn is_duplicate(body: &str) -> bool {
    let lowered = body.to_lowercase();
    DUPLICATE_MARKERS.iter().any(|marker| lowered.contains(marker))
}

fn session_expiry(grant: &TokenGrant) -> SessionExpiry {
    if let Some(at) = grant
        .expires_at
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    {
        return SessionExpiry::At(at);
    }
    grant
        .expires_in
        .map_or(SessionExpiry::Unspecified, |secs| {
            SessionExpiry::After(Duration::seconds(secs))
        })
}

/// Account management through the Supabase auth API.
#[derive(Clone)]
pub struct SupabaseIdentityProvider {
    client: SupabaseClient,
}

impl SupabaseIdentityProvider {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, IdentityProviderError> {
        let wanted = email.to_lowercase();
        let page_size = ADMIN_PAGE_SIZE.to_string();
        let mut page = 1_u32;
        loop {
            let mut url = self.client.auth_url("admin/users")?;
            url.query_pairs_mut()
                .append_pair("filter", email)
                .append_pair("page", &page.to_string())
                .append_pair("per_page", &page_size);
            let body = self
                .client
                .send(self.client.admin_request(Method::GET, url))
                .await?;
            let listing: AdminUserPage = decode_json(&body)?;
            let fetched = listing.users.len();

            if let Some(user) = listing
                .users
                .into_iter()
                .find(|user| user.email().is_some_and(|found| found.to_lowercase() == wanted))
            {
                return Account::try_from(user)
                    .map(Some)
                    .map_err(IdentityProviderError::from);
            }
            if fetched < ADMIN_PAGE_SIZE {
                return Ok(None);
            }
            debug!(page, "exact email match not on this page, fetching next");
            page += 1;
        }
    }

    async fn create_account(
        &self,
        details: &SignUpDetails,
    ) -> Result<Account, IdentityProviderError> {
        let url = self.client.auth_url("signup")?;
        let request = self
            .client
            .admin_request(Method::POST, url)
            .json(&SignUpBody {
                email: details.email(),
                password: details.password(),
                data: SignUpMetadata {
                    username: details.username(),
                },
            });
        let body = self.client.send(request).await?;
        let response: SignUpResponse = decode_json(&body)?;
        let account = Account::try_from(response.into_user())?;
        debug!(user_id = %account.id, "account registered");
        Ok(account)
    }

    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<IssuedSession, IdentityProviderError> {
        let mut url = self.client.auth_url("token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");
        let request = self
            .client
            .request(Method::POST, url, &Credential::Anonymous)
            .json(&PasswordGrantBody {
                email: credentials.email(),
                password: credentials.password(),
            });
        let body = self.client.send(request).await?;
        let grant: TokenGrant = decode_json(&body)?;

        let expiry = session_expiry(&grant);
        let TokenGrant {
            access_token,
            refresh_token,
            user,
            ..
        } = grant;
        Ok(IssuedSession {
            account: Account::try_from(user)?,
            access_token: BearerToken::new(access_token),
            refresh_token: Zeroizing::new(refresh_token.unwrap_or_default()),
            expiry,
        })
    }

    async fn sign_out(&self, token: &BearerToken) -> Result<(), IdentityProviderError> {
        let url = self.client.auth_url("logout")?;
        let request = self
            .client
            .request(Method::POST, url, &Credential::Caller(token.clone()));
        self.client.send(request).await?;
        Ok(())
    }
}
