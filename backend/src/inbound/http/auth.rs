//! Caller authentication for HTTP handlers.
//!
//! Handlers that act on behalf of a user take an [`AuthenticatedCaller`]
//! argument. Extraction reads the `Authorization` header and resolves the
//! caller's identity before the handler body runs.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::domain::{BearerToken, Credential, Error, UserId, resolve_identity};

/// Identity and credential of the caller behind a request.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller {
    user_id: UserId,
    token: BearerToken,
}

impl AuthenticatedCaller {
    /// Resolve the caller from the `Authorization` header of `req`.
    ///
    /// A missing or empty header is `UNAUTHORIZED`; a credential whose
    /// claims cannot be read is `INVALID_TOKEN`.
    pub fn from_request_headers(req: &HttpRequest) -> Result<Self, Error> {
        let token = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(BearerToken::from_authorization_header)
            .ok_or_else(|| Error::unauthorized("authorization token is required"))?;
        let user_id = resolve_identity(&token)?;
        Ok(Self { user_id, token })
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Credential to forward to the data store.
    pub fn credential(&self) -> Credential {
        Credential::Caller(self.token.clone())
    }

    /// Split into the caller's identity and credential.
    pub fn into_parts(self) -> (UserId, Credential) {
        (self.user_id, Credential::Caller(self.token))
    }
}

impl FromRequest for AuthenticatedCaller {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_request_headers(req).map_err(actix_web::Error::from))
    }
}
