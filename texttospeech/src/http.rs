//! HTTP transport for the Text-to-Speech REST API.

use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT},
    Client as ReqwestClient, Response,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use super::{
    auth::{header_value, Credentials},
    error::{Error, Result},
};

const USER_AGENT_VALUE: &str = concat!("gcptts-rust/", env!("CARGO_PKG_VERSION"));
const QUOTA_PROJECT_HEADER: &str = "x-goog-user-project";

/// HTTP client for the Text-to-Speech API.
pub struct HttpClient {
    client: ReqwestClient,
    base_url: String,
    credentials: Credentials,
    quota_project: Option<String>,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// Without a timeout the request waits as long as the transport allows.
    pub fn new(
        base_url: String,
        credentials: Credentials,
        quota_project: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            credentials,
            quota_project,
        })
    }

    /// Returns the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a single JSON POST request and decodes the JSON response.
    ///
    /// There is no retry: the first failure is returned to the caller.
    pub async fn post<T, R>(&self, path: &str, body: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "sending request");

        let response = self
            .client
            .post(&url)
            .headers(self.default_headers()?)
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Returns default headers for API requests.
    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        self.credentials.apply(&mut headers)?;
        if let Some(project) = &self.quota_project {
            headers.insert(QUOTA_PROJECT_HEADER, header_value(project)?);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        Ok(headers)
    }

    /// Handles the API response.
    async fn handle_response<R>(&self, response: Response) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let status = response.status();
        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "received response");

        if !status.is_success() {
            return Err(parse_error(&body, status.as_u16()));
        }

        serde_json::from_slice(&body).map_err(Error::from)
    }
}

/// Google API error envelope: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Parses an error response body.
pub(crate) fn parse_error(body: &[u8], http_status: u16) -> Error {
    if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) {
        let code = if envelope.error.code == 0 {
            http_status
        } else {
            envelope.error.code
        };
        return Error::api(code, envelope.error.status, envelope.error.message);
    }

    Error::api(
        http_status,
        String::new(),
        String::from_utf8_lossy(body).trim().to_string(),
    )
}
