//! Shared reqwest transport for the Supabase adapters.
//!
//! This type owns transport details only: URL construction, the API key and
//! bearer headers, HTTP status checks and JSON decoding. Resource adapters
//! build on it and translate [`RestError`] into their port errors.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::SupabaseConfig;
use crate::domain::Credential;

const API_KEY_HEADER: &str = "apikey";
const PREFER_HEADER: &str = "Prefer";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Transport-level failure shared by every Supabase adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RestError {
    /// The request never produced a response.
    #[error("{message}")]
    Connection { message: String },
    /// The backend answered with a non-success status.
    #[error("status {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body did not match the expected shape.
    #[error("{message}")]
    Decode { message: String },
}

impl RestError {
    /// HTTP status of a [`RestError::Status`] failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Connection { .. } | Self::Decode { .. } => None,
        }
    }

    pub(super) fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Translate [`RestError`] into a repository port error with the usual
/// `Connection`/`Query`/`Decode` variants.
macro_rules! impl_from_rest_error {
    ($($port_error:ty),* $(,)?) => {
        $(
            impl From<$crate::outbound::supabase::client::RestError> for $port_error {
                fn from(error: $crate::outbound::supabase::client::RestError) -> Self {
                    use $crate::outbound::supabase::client::RestError;
                    match error {
                        RestError::Connection { message } => Self::connection(message),
                        status @ RestError::Status { .. } => Self::query(status.to_string()),
                        RestError::Decode { message } => Self::decode(message),
                    }
                }
            }
        )*
    };
}

pub(super) use impl_from_rest_error;

/// HTTP client bound to one Supabase project.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    config: Arc<SupabaseConfig>,
}

impl SupabaseClient {
    /// Build a client using a reqwest client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: Arc<SupabaseConfig>) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self, path: &str) -> Result<Url, RestError> {
        self.config
            .base_url
            .join(path)
            .map_err(|err| RestError::Connection {
                message: format!("invalid endpoint `{path}`: {err}"),
            })
    }

    /// PostgREST endpoint for `table` with `filters` appended as query pairs.
    pub(super) fn table_url(&self, table: &str, filters: &[(&str, String)]) -> Result<Url, RestError> {
        let mut url = self.endpoint(&format!("rest/v1/{table}"))?;
        if !filters.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in filters {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// GoTrue endpoint below `auth/v1/`.
    pub(super) fn auth_url(&self, path: &str) -> Result<Url, RestError> {
        self.endpoint(&format!("auth/v1/{path}"))
    }

    /// Request evaluated under `credential`.
    ///
    /// The public key always goes in `apikey`. The caller's own token, or the
    /// public key for anonymous calls, goes in `Authorization`.
    pub(super) fn request(&self, method: Method, url: Url, credential: &Credential) -> RequestBuilder {
        let bearer = credential
            .bearer()
            .map_or(self.config.anon_key.as_str(), |token| token.expose());
        self.http
            .request(method, url)
            .header(API_KEY_HEADER, self.config.anon_key.as_str())
            .header(AUTHORIZATION, bearer_header(bearer))
    }

    /// Request authorised with the service-role key.
    pub(super) fn admin_request(&self, method: Method, url: Url) -> RequestBuilder {
        let key = self.config.service_role_key.as_str();
        self.http
            .request(method, url)
            .header(API_KEY_HEADER, key)
            .header(AUTHORIZATION, bearer_header(key))
    }

    /// Send `request` and return the body of a successful response.
    pub(super) async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, RestError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            debug!(status = status.as_u16(), "supabase call failed");
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }

    /// `GET` rows from `table`.
    pub(super) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
        credential: &Credential,
    ) -> Result<Vec<T>, RestError> {
        let url = self.table_url(table, &with_select_all(filters))?;
        let body = self.send(self.request(Method::GET, url, credential)).await?;
        decode_json(&body)
    }

    /// `POST` one row to `table` and return the stored representation.
    pub(super) async fn insert<B, T>(
        &self,
        table: &str,
        row: &B,
        credential: &Credential,
    ) -> Result<T, RestError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.table_url(table, &[])?;
        let request = self
            .request(Method::POST, url, credential)
            .header(PREFER_HEADER, RETURN_REPRESENTATION)
            .json(row);
        let rows: Vec<T> = decode_json(&self.send(request).await?)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RestError::decode(format!("insert into {table} returned no rows")))
    }

    /// `PATCH` rows of `table` matching `filters` and return them.
    pub(super) async fn update<B, T>(
        &self,
        table: &str,
        filters: &[(&str, String)],
        patch: &B,
        credential: &Credential,
    ) -> Result<Vec<T>, RestError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.table_url(table, filters)?;
        let request = self
            .request(Method::PATCH, url, credential)
            .header(PREFER_HEADER, RETURN_REPRESENTATION)
            .json(patch);
        decode_json(&self.send(request).await?)
    }

    /// `DELETE` rows of `table` matching `filters`.
    pub(super) async fn delete(
        &self,
        table: &str,
        filters: &[(&str, String)],
        credential: &Credential,
    ) -> Result<(), RestError> {
        let url = self.table_url(table, filters)?;
        self.send(self.request(Method::DELETE, url, credential))
            .await
            .map(|_| ())
    }
}

/// PostgREST `eq.` filter value.
pub(super) fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

fn with_select_all<'a>(filters: &[(&'a str, String)]) -> Vec<(&'a str, String)> {
    let mut query = vec![("select", "*".to_owned())];
    query.extend(filters.iter().cloned());
    query
}

fn bearer_header(token: &str) -> HeaderValue {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .unwrap_or_else(|_| HeaderValue::from_static("Bearer"));
    value.set_sensitive(true);
    value
}

pub(super) fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, RestError> {
    serde_json::from_slice(body)
        .map_err(|error| RestError::decode(format!("invalid JSON payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> RestError {
    let message = if error.is_timeout() {
        format!("request timed out: {error}")
    } else {
        error.to_string()
    };
    RestError::Connection { message }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RestError {
    RestError::Status {
        status: status.as_u16(),
        body: body_preview(body),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
