//! Application configuration loaded via OrthoConfig.
//!
//! [`AppSettings`] is the raw layered input (CLI flags, `QUIZ_*` environment
//! variables, config files). [`AppSettings::validate`] turns it into the
//! immutable [`AppConfig`] that is built once at startup and shared by
//! reference with every adapter.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

const DEFAULT_HOST: &str = "0.0.0.0";

/// Errors raised while validating configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required setting was not supplied.
    #[error("missing required setting `{0}`")]
    Missing(&'static str),
    /// The backend URL could not be parsed.
    #[error("invalid supabase url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// The bind host is not an IP address.
    #[error("invalid host `{0}`")]
    InvalidHost(String),
    /// The request timeout must be positive.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Raw configuration values.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "QUIZ")]
pub struct AppSettings {
    /// Base URL of the hosted backend, for example `https://abc.supabase.co`.
    pub supabase_url: Option<String>,
    /// Public API key sent on every call.
    pub supabase_anon_key: Option<String>,
    /// Privileged key used only for account administration.
    pub supabase_service_role_key: Option<String>,
    /// Listener address.
    pub host: Option<String>,
    /// Listener port.
    #[ortho_config(default = 8088)]
    pub port: u16,
    /// Overall timeout for outbound calls, in seconds.
    #[ortho_config(default = 30)]
    pub request_timeout_secs: u64,
}

impl AppSettings {
    /// Configured host, falling back to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Validate the raw settings into an [`AppConfig`].
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a required value is missing or malformed.
    pub fn validate(&self) -> Result<AppConfig, ConfigError> {
        let raw_url = required(self.supabase_url.as_deref(), "supabase_url")?;
        let anon_key = required(self.supabase_anon_key.as_deref(), "supabase_anon_key")?;
        let service_role_key = required(
            self.supabase_service_role_key.as_deref(),
            "supabase_service_role_key",
        )?;

        let host: IpAddr = self
            .host()
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.host().to_owned()))?;
        let timeout_secs = self.request_timeout_secs;
        if timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(AppConfig {
            bind_addr: SocketAddr::new(host, self.port),
            supabase: SupabaseConfig {
                base_url: parse_base_url(raw_url)?,
                anon_key: Zeroizing::new(anon_key.to_owned()),
                service_role_key: Zeroizing::new(service_role_key.to_owned()),
                request_timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, ConfigError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

/// Parse the backend URL and make sure relative joins keep its path.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: raw.to_owned(),
        reason,
    };
    let mut url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("url cannot be used as a base".to_owned()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Connection settings for the hosted identity and data backend.
#[derive(Clone)]
pub struct SupabaseConfig {
    /// Base URL, always ending in `/`.
    pub base_url: Url,
    pub anon_key: Zeroizing<String>,
    pub service_role_key: Zeroizing<String>,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("base_url", &self.base_url.as_str())
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

/// Validated, immutable application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub supabase: SupabaseConfig,
}
