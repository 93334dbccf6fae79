//! Caller identity primitives and the bearer credential resolver.
//!
//! The identity provider signs and verifies credentials. This module only
//! reads the `sub` claim out of a credential the provider already issued, so
//! the core never re-implements verification.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::Error;

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdValidationError {
    Empty,
    SurroundingWhitespace,
}

impl fmt::Display for UserIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "user id must not be empty"),
            Self::SurroundingWhitespace => {
                write!(f, "user id must not have leading or trailing whitespace")
            }
        }
    }
}

impl std::error::Error for UserIdValidationError {}

/// Opaque subject identifier issued by the identity provider.
///
/// ## Invariants
/// - Non-empty.
/// - No leading or trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserIdValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserIdValidationError::Empty);
        }
        if id.trim() != id {
            return Err(UserIdValidationError::SurroundingWhitespace);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

const BEARER_PREFIX: &str = "Bearer ";

/// Bearer credential presented by a caller.
///
/// The raw value is wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Wrap an already stripped credential.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Build a credential from an `Authorization` header value.
    ///
    /// A leading `Bearer ` scheme is removed when present. Returns `None` when
    /// nothing remains.
    ///
    /// # Examples
    /// ```
    /// use quiz_backend::domain::BearerToken;
    ///
    /// let token = BearerToken::from_authorization_header("Bearer abc").unwrap();
    /// assert_eq!(token.expose(), "abc");
    /// assert!(BearerToken::from_authorization_header("Bearer ").is_none());
    /// ```
    pub fn from_authorization_header(header: &str) -> Option<Self> {
        let raw = header.strip_prefix(BEARER_PREFIX).unwrap_or(header);
        if raw.is_empty() {
            None
        } else {
            Some(Self::new(raw))
        }
    }

    /// Raw credential for forwarding to the identity provider or data store.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Credential a repository call is evaluated under.
///
/// Anonymous calls fall back to the public API key so the store applies its
/// read-only policy. Caller calls forward the caller's own credential so row
/// level policies see the real user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Credential {
    #[default]
    Anonymous,
    Caller(BearerToken),
}

impl Credential {
    /// Bearer token to forward, if the call is made on behalf of a caller.
    pub fn bearer(&self) -> Option<&BearerToken> {
        match self {
            Self::Anonymous => None,
            Self::Caller(token) => Some(token),
        }
    }
}

impl From<BearerToken> for Credential {
    fn from(value: BearerToken) -> Self {
        Self::Caller(value)
    }
}

/// Extract the caller's [`UserId`] from the `sub` claim of a bearer credential.
///
/// Every decoding failure collapses to `INVALID_TOKEN`. Signatures are not
/// checked here; the data store verifies them on every forwarded call.
///
/// # Examples
/// ```
/// use quiz_backend::domain::{BearerToken, DomainErrorCode, resolve_identity};
///
/// // {"sub":"user-1"}
/// let token = BearerToken::new("e30.eyJzdWIiOiJ1c2VyLTEifQ.sig");
/// assert_eq!(resolve_identity(&token).unwrap().as_ref(), "user-1");
///
/// let err = resolve_identity(&BearerToken::new("not-a-jwt")).unwrap_err();
/// assert_eq!(err.domain_code(), Some(DomainErrorCode::InvalidToken));
/// ```
pub fn resolve_identity(token: &BearerToken) -> Result<UserId, Error> {
    let mut segments = token.expose().split('.');
    let (Some(_header), Some(claims), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(Error::invalid_token("token must have three segments"));
    };

    let decoded = URL_SAFE_NO_PAD
        .decode(claims.trim_end_matches('='))
        .map_err(|_| Error::invalid_token("token claims are not valid base64url"))?;
    let claims: Map<String, Value> = serde_json::from_slice(&decoded)
        .map_err(|_| Error::invalid_token("token claims are not a JSON object"))?;

    let subject = claims
        .get("sub")
        .and_then(Value::as_str)
        .filter(|sub| !sub.is_empty())
        .ok_or_else(|| Error::invalid_token("token has no subject"))?;

    UserId::new(subject).map_err(|err| Error::invalid_token(format!("invalid subject: {err}")))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::DomainErrorCode;
    use rstest::rstest;

    fn token_with_claims(claims: &str) -> BearerToken {
        let encoded = URL_SAFE_NO_PAD.encode(claims);
        BearerToken::new(format!("eyJhbGciOiJIUzI1NiJ9.{encoded}.signature"))
    }

    #[test]
    fn resolves_subject_claim() {
        let token = token_with_claims(r#"{"sub":"5b7c","role":"authenticated"}"#);
        let user = resolve_identity(&token).expect("valid token");
        assert_eq!(user.as_ref(), "5b7c");
    }

    #[test]
    fn tolerates_padded_claims_segment() {
        let encoded = base64::engine::general_purpose::URL_SAFE.encode(r#"{"sub":"abc"}"#);
        assert!(encoded.ends_with('='), "fixture should carry padding");
        let token = BearerToken::new(format!("h.{encoded}.s"));
        assert_eq!(
            resolve_identity(&token).expect("padded token").as_ref(),
            "abc"
        );
    }

    #[rstest]
    #[case::one_segment(BearerToken::new("abc"))]
    #[case::two_segments(BearerToken::new("abc.def"))]
    #[case::four_segments(BearerToken::new("a.b.c.d"))]
    #[case::bad_base64(BearerToken::new("a.!!!.c"))]
    #[case::not_json(token_with_claims("plain text"))]
    #[case::json_array(token_with_claims(r#"["sub"]"#))]
    #[case::missing_sub(token_with_claims(r#"{"role":"anon"}"#))]
    #[case::numeric_sub(token_with_claims(r#"{"sub":42}"#))]
    #[case::empty_sub(token_with_claims(r#"{"sub":""}"#))]
    fn malformed_tokens_are_invalid(#[case] token: BearerToken) {
        let err = resolve_identity(&token).expect_err("token must be rejected");
        assert_eq!(err.domain_code(), Some(DomainErrorCode::InvalidToken));
    }

    #[rstest]
    #[case("Bearer abc", Some("abc"))]
    #[case("abc", Some("abc"))]
    #[case("Bearer ", None)]
    #[case("", None)]
    fn strips_bearer_scheme(#[case] header: &str, #[case] expected: Option<&str>) {
        let token = BearerToken::from_authorization_header(header);
        assert_eq!(token.as_ref().map(BearerToken::expose), expected);
    }

    #[test]
    fn debug_output_is_redacted() {
        let token = BearerToken::new("secret-value");
        assert!(!format!("{token:?}").contains("secret-value"));
    }

    #[rstest]
    #[case("", UserIdValidationError::Empty)]
    #[case(" abc", UserIdValidationError::SurroundingWhitespace)]
    fn rejects_invalid_user_ids(#[case] raw: &str, #[case] expected: UserIdValidationError) {
        assert_eq!(UserId::new(raw).expect_err("invalid id"), expected);
    }
}
