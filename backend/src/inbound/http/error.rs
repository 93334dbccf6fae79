//! HTTP adapter mapping for domain errors.
//!
//! The domain error stays HTTP-agnostic. This module is the single place
//! where a failure becomes a status code and a JSON envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{DomainErrorCode, Error, TRACE_ID_HEADER, TraceId};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

/// JSON envelope returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Reason phrase of the HTTP status.
    #[schema(example = "Forbidden")]
    pub error: String,
    /// Human-readable description.
    #[schema(example = "you can only modify your own questions")]
    pub message: String,
    /// Stable machine-readable code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "FORBIDDEN")]
    pub code: Option<String>,
    /// Request field that failed validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Identifier correlating the response with server logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::Validation { .. } => StatusCode::BAD_REQUEST,
        Error::Domain { code, .. } => match code {
            DomainErrorCode::NotFound => StatusCode::NOT_FOUND,
            DomainErrorCode::Forbidden => StatusCode::FORBIDDEN,
            DomainErrorCode::Unauthorized
            | DomainErrorCode::InvalidToken
            | DomainErrorCode::AuthFailed => StatusCode::UNAUTHORIZED,
            DomainErrorCode::AlreadyExists(_) => StatusCode::CONFLICT,
        },
        Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn body_for(error: &Error, status: StatusCode, trace_id: Option<TraceId>) -> ErrorBody {
    let message = match error {
        Error::Internal { .. } => REDACTED_MESSAGE.to_owned(),
        Error::Validation { .. } | Error::Domain { .. } => error.message().to_owned(),
    };
    ErrorBody {
        error: status
            .canonical_reason()
            .unwrap_or(REDACTED_MESSAGE)
            .to_owned(),
        message,
        code: Some(error.code().to_owned()),
        field: error.field().map(str::to_owned),
        trace_id: trace_id.map(|id| id.to_string()),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let trace_id = TraceId::current();
        if let Error::Internal { message } = self {
            let trace = trace_id.map(|id| id.to_string()).unwrap_or_default();
            error!(trace_id = %trace, %message, "request failed with an internal error");
        }

        let mut builder = HttpResponse::build(status);
        if let Some(id) = trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.to_string()));
        }
        builder.json(body_for(self, status, trace_id))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests;
