//! Credential discovery for the Text-to-Speech API.
//!
//! The client never manages credentials itself. It picks up whatever is
//! already configured for the caller, first match wins:
//!
//! 1. an explicit API key, then `GOOGLE_API_KEY`
//! 2. an explicit OAuth access token, then `GOOGLE_OAUTH_ACCESS_TOKEN`
//! 3. `gcloud auth application-default print-access-token`

use std::fmt;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tokio::process::Command;
use tracing::debug;

use super::error::{Error, Result};

/// Environment variable holding an API key.
pub const ENV_API_KEY: &str = "GOOGLE_API_KEY";

/// Environment variable holding an OAuth 2.0 access token.
pub const ENV_ACCESS_TOKEN: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

/// Environment variable naming the project billed for the request.
pub const ENV_QUOTA_PROJECT: &str = "GOOGLE_CLOUD_QUOTA_PROJECT";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Credentials attached to every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// API key, sent as `x-goog-api-key`.
    ApiKey(String),
    /// OAuth 2.0 access token, sent as `Authorization: Bearer`.
    AccessToken(String),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(***)"),
            Credentials::AccessToken(_) => f.write_str("AccessToken(***)"),
        }
    }
}

impl Credentials {
    /// Picks credentials from explicit values, falling back to the environment.
    ///
    /// Returns `None` when neither an API key nor an access token is available.
    pub fn from_env_with(api_key: Option<&str>, access_token: Option<&str>) -> Option<Self> {
        let env_key = std::env::var(ENV_API_KEY).ok();
        let env_token = std::env::var(ENV_ACCESS_TOKEN).ok();
        Self::choose(
            non_empty(api_key).or(non_empty(env_key.as_deref())),
            non_empty(access_token).or(non_empty(env_token.as_deref())),
        )
    }

    /// Resolves credentials, shelling out to `gcloud` as the last resort.
    pub async fn discover(api_key: Option<&str>, access_token: Option<&str>) -> Result<Self> {
        if let Some(creds) = Self::from_env_with(api_key, access_token) {
            debug!(credentials = ?creds, "using configured credentials");
            return Ok(creds);
        }
        Self::from_gcloud().await
    }

    /// Asks the gcloud CLI for an application-default access token.
    pub async fn from_gcloud() -> Result<Self> {
        debug!("requesting access token from gcloud");
        let output = Command::new("gcloud")
            .args(["auth", "application-default", "print-access-token"])
            .output()
            .await
            .map_err(|e| {
                Error::Auth(format!(
                    "no credentials: set {ENV_API_KEY} or {ENV_ACCESS_TOKEN}, or install gcloud ({e})"
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Auth(format!(
                "gcloud print-access-token failed: {}",
                stderr.trim()
            )));
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(Error::Auth("gcloud returned an empty access token".to_string()));
        }
        Ok(Credentials::AccessToken(token))
    }

    /// Inserts the authentication header for these credentials.
    pub(crate) fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        match self {
            Credentials::ApiKey(key) => {
                headers.insert(API_KEY_HEADER, header_value(key)?);
            }
            Credentials::AccessToken(token) => {
                headers.insert(AUTHORIZATION, header_value(&format!("Bearer {token}"))?);
            }
        }
        Ok(())
    }

    fn choose(api_key: Option<&str>, access_token: Option<&str>) -> Option<Self> {
        if let Some(key) = api_key {
            return Some(Credentials::ApiKey(key.to_string()));
        }
        access_token.map(|token| Credentials::AccessToken(token.to_string()))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub(crate) fn header_value(value: &str) -> Result<HeaderValue> {
    let mut value =
        HeaderValue::from_str(value).map_err(|e| Error::Config(format!("invalid header: {e}")))?;
    value.set_sensitive(true);
    Ok(value)
}
