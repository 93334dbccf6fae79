//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses with a single exhaustive match, so adding a variant forces every
//! adapter to decide how to present it.

use std::fmt;

/// Resource kinds that can collide on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Genre,
    Question,
    Choice,
    Answer,
    User,
}

impl Resource {
    /// Stable machine-readable code reported when a resource already exists.
    pub const fn exists_code(self) -> &'static str {
        match self {
            Self::Genre => "GENRE_EXISTS",
            Self::Question => "QUESTION_EXISTS",
            Self::Choice => "CHOICE_EXISTS",
            Self::Answer => "ANSWER_EXISTS",
            Self::User => "USER_EXISTS",
        }
    }
}

/// Closed set of domain failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainErrorCode {
    /// The requested resource does not exist.
    NotFound,
    /// The caller is authenticated but does not own the resource.
    Forbidden,
    /// No caller credential was supplied.
    Unauthorized,
    /// The supplied bearer credential could not be decoded.
    InvalidToken,
    /// The identity provider refused the credentials.
    AuthFailed,
    /// A resource with the same natural key is already stored.
    AlreadyExists(Resource),
}

impl DomainErrorCode {
    /// Stable wire representation, for example `NOT_FOUND` or `GENRE_EXISTS`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Forbidden => "FORBIDDEN",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::AuthFailed => "AUTH_FAILED",
            Self::AlreadyExists(resource) => resource.exists_code(),
        }
    }
}

impl fmt::Display for DomainErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure raised by use-cases and the identity resolver.
///
/// ## Variants
/// - [`Error::Validation`]: caller input broke a precondition. Always the
///   caller's fault.
/// - [`Error::Domain`]: a business rule rejected the request.
/// - [`Error::Internal`]: anything else. The message is for logs only and is
///   never shown to callers.
///
/// # Examples
/// ```
/// use quiz_backend::domain::{DomainErrorCode, Error};
///
/// let err = Error::forbidden("you do not own this question");
/// assert_eq!(err.domain_code(), Some(DomainErrorCode::Forbidden));
/// assert_eq!(err.code(), "FORBIDDEN");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{field}: {message}")]
    Validation { field: String, message: String },
    #[error("{code}: {message}")]
    Domain {
        code: DomainErrorCode,
        message: String,
    },
    #[error("internal error: {message}")]
    Internal { message: String },
}

/// Code reported for validation failures.
pub const VALIDATION_ERROR_CODE: &str = "VALIDATION_ERROR";
/// Code reported for internal failures.
pub const INTERNAL_ERROR_CODE: &str = "INTERNAL_ERROR";

impl Error {
    /// Input for `field` failed validation.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// A business rule rejected the request.
    pub fn domain(code: DomainErrorCode, message: impl Into<String>) -> Self {
        Self::Domain {
            code,
            message: message.into(),
        }
    }

    /// Convenience constructor for [`DomainErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::domain(DomainErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`DomainErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::domain(DomainErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`DomainErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::domain(DomainErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`DomainErrorCode::InvalidToken`].
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::domain(DomainErrorCode::InvalidToken, message)
    }

    /// Convenience constructor for [`DomainErrorCode::AuthFailed`].
    pub fn auth_failed(message: impl Into<String>) -> Self {
        Self::domain(DomainErrorCode::AuthFailed, message)
    }

    /// Convenience constructor for [`DomainErrorCode::AlreadyExists`].
    pub fn already_exists(resource: Resource, message: impl Into<String>) -> Self {
        Self::domain(DomainErrorCode::AlreadyExists(resource), message)
    }

    /// Opaque failure; `message` is logged, never returned to callers.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Domain code when this is a [`Error::Domain`] failure.
    pub fn domain_code(&self) -> Option<DomainErrorCode> {
        match self {
            Self::Domain { code, .. } => Some(*code),
            Self::Validation { .. } | Self::Internal { .. } => None,
        }
    }

    /// Stable machine-readable code for every variant.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => VALIDATION_ERROR_CODE,
            Self::Domain { code, .. } => code.as_str(),
            Self::Internal { .. } => INTERNAL_ERROR_CODE,
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::Domain { message, .. }
            | Self::Internal { message } => message.as_str(),
        }
    }

    /// Field that failed validation, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field.as_str()),
            Self::Domain { .. } | Self::Internal { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Error::not_found("x"), "NOT_FOUND")]
    #[case(Error::forbidden("x"), "FORBIDDEN")]
    #[case(Error::unauthorized("x"), "UNAUTHORIZED")]
    #[case(Error::invalid_token("x"), "INVALID_TOKEN")]
    #[case(Error::auth_failed("x"), "AUTH_FAILED")]
    #[case(Error::already_exists(Resource::Genre, "x"), "GENRE_EXISTS")]
    #[case(Error::already_exists(Resource::User, "x"), "USER_EXISTS")]
    #[case(Error::validation("name", "x"), "VALIDATION_ERROR")]
    #[case(Error::internal("x"), "INTERNAL_ERROR")]
    fn codes_are_stable(#[case] error: Error, #[case] expected: &str) {
        assert_eq!(error.code(), expected);
    }

    #[test]
    fn validation_exposes_field_and_message() {
        let err = Error::validation("title", "title is required");
        assert_eq!(err.field(), Some("title"));
        assert_eq!(err.message(), "title is required");
        assert_eq!(err.domain_code(), None);
        assert_eq!(err.to_string(), "title: title is required");
    }

    #[test]
    fn domain_errors_have_no_field() {
        let err = Error::not_found("question not found");
        assert_eq!(err.field(), None);
        assert_eq!(err.domain_code(), Some(DomainErrorCode::NotFound));
        assert_eq!(err.to_string(), "NOT_FOUND: question not found");
    }
}
