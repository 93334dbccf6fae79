//! Shared validation helpers for inbound HTTP adapters.
//!
//! Extractor failures (malformed JSON, unparsable path segments) are turned
//! into validation errors here so they share the error envelope.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, PathError};
use actix_web::web;

use crate::domain::Error;

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

/// Validate a positive store identifier taken from the path or body.
pub(crate) fn parse_id<T: TryFrom<i64>>(raw: i64, field: FieldName) -> Result<T, Error> {
    let name = field.as_str();
    T::try_from(raw)
        .map_err(|_| Error::validation(name, format!("{name} must be a positive integer")))
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "request body must be application/json".to_owned(),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "request body is too large".to_owned()
        }
        other => format!("invalid request body: {other}"),
    };
    Error::validation("body", message).into()
}

fn path_error(err: PathError, req: &HttpRequest) -> actix_web::Error {
    let field = req
        .match_info()
        .iter()
        .next()
        .map_or_else(|| "path".to_owned(), |(name, _)| name.to_owned());
    let message = match err {
        PathError::Deserialize(_) => format!("{field} must be a positive integer"),
        other => other.to_string(),
    };
    Error::validation(field, message).into()
}

/// JSON extractor configuration reporting malformed bodies as validation errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

/// Path extractor configuration reporting malformed segments as validation errors.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}
