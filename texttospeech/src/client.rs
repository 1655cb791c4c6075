//! Text-to-Speech API client.

use std::sync::Arc;
use std::time::Duration;

use super::{
    auth::{Credentials, ENV_QUOTA_PROJECT},
    error::{Error, Result},
    http::HttpClient,
    speech::SpeechService,
};

/// Default Text-to-Speech API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://texttospeech.googleapis.com";

/// Text-to-Speech API client.
///
/// The client owns its HTTP connection pool; dropping it closes every
/// connection it opened.
///
/// # Example
///
/// ```rust,ignore
/// use gcptts_texttospeech::{Client, Credentials};
///
/// let client = Client::builder(Credentials::ApiKey("your-api-key".into()))
///     .endpoint("eu-texttospeech.googleapis.com")
///     .build()?;
///
/// let response = client.speech().synthesize(&request).await?;
/// ```
pub struct Client {
    http: Arc<HttpClient>,
}

impl Client {
    /// Creates a client for the default endpoint.
    pub fn new(credentials: Credentials) -> Result<Self> {
        ClientBuilder::new(credentials).build()
    }

    /// Creates a new client builder for more configuration options.
    pub fn builder(credentials: Credentials) -> ClientBuilder {
        ClientBuilder::new(credentials)
    }

    /// Returns the resolved endpoint URL.
    pub fn endpoint(&self) -> &str {
        self.http.base_url()
    }

    /// Returns the speech synthesis service.
    pub fn speech(&self) -> SpeechService {
        SpeechService::new(self.http.clone())
    }
}

/// Builder for creating a Text-to-Speech client.
pub struct ClientBuilder {
    credentials: Credentials,
    endpoint: Option<String>,
    quota_project: Option<String>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Creates a new client builder.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: None,
            quota_project: None,
            timeout: None,
        }
    }

    /// Overrides the service endpoint.
    ///
    /// Accepts a full URL (`http://127.0.0.1:8080`) or a bare
    /// `host[:port]`, which is reached over https. Empty keeps the default.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the project billed for requests (`x-goog-user-project`).
    pub fn quota_project(mut self, project: impl Into<String>) -> Self {
        self.quota_project = Some(project.into());
        self
    }

    /// Sets an overall request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<Client> {
        let base_url = normalize_endpoint(self.endpoint.as_deref())?;
        let quota_project = self
            .quota_project
            .or_else(|| std::env::var(ENV_QUOTA_PROJECT).ok())
            .filter(|p| !p.trim().is_empty());

        let http = HttpClient::new(base_url, self.credentials, quota_project, self.timeout)?;

        Ok(Client {
            http: Arc::new(http),
        })
    }
}

/// Turns an endpoint override into a base URL without a trailing slash.
pub fn normalize_endpoint(endpoint: Option<&str>) -> Result<String> {
    let endpoint = endpoint.map(str::trim).unwrap_or_default();
    if endpoint.is_empty() {
        return Ok(DEFAULT_ENDPOINT.to_string());
    }

    let url = if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("https://{endpoint}")
    };
    let url = url.trim_end_matches('/');

    let host = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or_default();
    if host.is_empty() {
        return Err(Error::Config(format!("invalid service endpoint: {endpoint:?}")));
    }

    Ok(url.to_string())
}
