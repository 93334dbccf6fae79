//! Authentication primitives: sign-up details, login credentials and the
//! sessions the identity provider issues.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::{BearerToken, UserId};

/// Minimum password length in characters accepted at sign-up.
pub const PASSWORD_MIN: usize = 6;

/// Session lifetime assumed when the provider reports no expiry.
pub const DEFAULT_SESSION_LIFETIME_HOURS: i64 = 24;

/// Domain error returned when sign-up payload values are invalid.
///
/// Variants are listed in the order they are checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpValidationError {
    EmptyEmail,
    EmptyPassword,
    PasswordTooShort { min: usize },
    EmptyUsername,
    InvalidEmail,
}

impl SignUpValidationError {
    /// Request field the failure refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyPassword | Self::PasswordTooShort { .. } => "password",
            Self::EmptyUsername => "username",
        }
    }
}

impl fmt::Display for SignUpValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email is required"),
            Self::EmptyPassword => write!(f, "password is required"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::EmptyUsername => write!(f, "username is required"),
            Self::InvalidEmail => write!(f, "invalid email format"),
        }
    }
}

impl std::error::Error for SignUpValidationError {}

/// Validated account registration details.
///
/// ## Invariants
/// - `email` is trimmed, non-empty and contains `@`.
/// - `password` has at least [`PASSWORD_MIN`] characters. Whitespace is kept.
/// - `username` is trimmed and non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct SignUpDetails {
    email: String,
    password: Zeroizing<String>,
    username: String,
}

impl SignUpDetails {
    /// Construct registration details from raw inputs.
    ///
    /// # Examples
    /// ```
    /// use quiz_backend::domain::{SignUpDetails, SignUpValidationError};
    ///
    /// let details = SignUpDetails::try_from_parts("ada@example.com", "hunter22", "ada").unwrap();
    /// assert_eq!(details.username(), "ada");
    ///
    /// let err = SignUpDetails::try_from_parts("ada@example.com", "abc", "ada").unwrap_err();
    /// assert_eq!(err, SignUpValidationError::PasswordTooShort { min: 6 });
    /// ```
    pub fn try_from_parts(
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<Self, SignUpValidationError> {
        let email = email.trim();
        let username = username.trim();
        if email.is_empty() {
            return Err(SignUpValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(SignUpValidationError::EmptyPassword);
        }
        if password.chars().count() < PASSWORD_MIN {
            return Err(SignUpValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if username.is_empty() {
            return Err(SignUpValidationError::EmptyUsername);
        }
        if !email.contains('@') {
            return Err(SignUpValidationError::InvalidEmail);
        }

        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            username: username.to_owned(),
        })
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Credentials for the immediate login that follows registration.
    pub fn login_credentials(&self) -> LoginCredentials {
        LoginCredentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

impl fmt::Debug for SignUpDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpDetails")
            .field("email", &self.email)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl LoginValidationError {
    /// Request field the failure refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail => "email",
            Self::EmptyPassword => "password",
        }
    }
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email is required"),
            Self::EmptyPassword => write!(f, "password is required"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email address identifying the account.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Account as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Account {
    #[schema(value_type = String)]
    pub id: UserId,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "ada")]
    pub username: String,
}

/// Expiry information attached to a freshly issued session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExpiry {
    /// Absolute expiry reported by the provider.
    At(DateTime<Utc>),
    /// Relative lifetime reported by the provider.
    After(Duration),
    /// The provider said nothing about expiry.
    Unspecified,
}

impl SessionExpiry {
    /// Absolute expiry, measured from `now` when only a lifetime is known.
    ///
    /// # Examples
    /// ```
    /// use chrono::{Duration, TimeZone, Utc};
    /// use quiz_backend::domain::SessionExpiry;
    ///
    /// let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    /// assert_eq!(SessionExpiry::Unspecified.resolve(now), now + Duration::hours(24));
    /// ```
    pub fn resolve(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::At(at) => at,
            Self::After(lifetime) => now + lifetime,
            Self::Unspecified => now + Duration::hours(DEFAULT_SESSION_LIFETIME_HOURS),
        }
    }
}

/// Session returned by the identity provider before expiry is resolved.
#[derive(Clone)]
pub struct IssuedSession {
    pub account: Account,
    pub access_token: BearerToken,
    pub refresh_token: Zeroizing<String>,
    pub expiry: SessionExpiry,
}

impl fmt::Debug for IssuedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedSession")
            .field("account", &self.account)
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

/// Authenticated session handed back to the caller after sign-up or sign-in.
#[derive(Clone)]
pub struct AuthSession {
    pub account: Account,
    pub access_token: BearerToken,
    pub refresh_token: Zeroizing<String>,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    /// Resolve the expiry of an issued session against `now`.
    pub fn from_issued(issued: IssuedSession, now: DateTime<Utc>) -> Self {
        Self {
            account: issued.account,
            access_token: issued.access_token,
            refresh_token: issued.refresh_token,
            expires_at: issued.expiry.resolve(now),
        }
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("account", &self.account)
            .field("expires_at", &self.expires_at)
            .finish_non_exhaustive()
    }
}
