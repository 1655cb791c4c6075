//! Read input, synthesize it, write the audio.

use std::time::Duration;

use anyhow::Context as _;
use gcptts_cli::{load_config, mask_api_key, Context};
use gcptts_texttospeech::{
    AudioConfig, AudioEncoding, Client, Credentials, Error, SynthesisInput,
    SynthesizeSpeechRequest, VoiceSelectionParams,
};
use tracing::{debug, info};

use crate::{settings::SynthesisConfiguration, Cli};

/// Connection settings for a single synthesis call.
#[derive(Debug, Clone)]
pub struct Session {
    pub credentials: Credentials,
    pub endpoint: Option<String>,
    pub quota_project: Option<String>,
    pub timeout: Option<Duration>,
}

impl Session {
    /// Combines the command line with the selected config context.
    ///
    /// The command line endpoint wins over the context's.
    pub async fn resolve(
        config: &SynthesisConfiguration,
        ctx: Option<&Context>,
    ) -> anyhow::Result<Self> {
        let api_key = ctx.map(|c| c.api_key.as_str()).filter(|k| !k.is_empty());
        let access_token = ctx.map(|c| c.access_token.as_str()).filter(|t| !t.is_empty());
        if let Some(key) = api_key {
            debug!(api_key = %mask_api_key(key), "using api key from context");
        }

        let credentials = Credentials::discover(api_key, access_token)
            .await
            .map_err(explain)?;

        let endpoint = config.service_endpoint.clone().or_else(|| {
            ctx.map(|c| c.endpoint.clone())
                .filter(|e| !e.trim().is_empty())
        });

        Ok(Self {
            credentials,
            endpoint,
            quota_project: ctx
                .map(|c| c.quota_project.clone())
                .filter(|p| !p.is_empty()),
            timeout: ctx.and_then(Context::timeout),
        })
    }
}

/// Maps the configuration and input text to a synthesis request.
///
/// Values are copied as they are; range checks happen in
/// [`SynthesisConfiguration::validate`].
pub fn build_request(config: &SynthesisConfiguration, text: String) -> SynthesizeSpeechRequest {
    let input = if config.ssml {
        SynthesisInput::Ssml(text)
    } else {
        SynthesisInput::Text(text)
    };

    SynthesizeSpeechRequest {
        input,
        voice: VoiceSelectionParams::new(&config.language_code, &config.voice_name),
        audio_config: AudioConfig {
            audio_encoding: AudioEncoding::Mp3,
            pitch: Some(config.pitch),
            speaking_rate: Some(config.speaking_rate),
            volume_gain_db: Some(config.volume_gain_db),
            ..Default::default()
        },
    }
}

/// Performs one synthesis call and returns the audio bytes.
///
/// The client is created for this call only and dropped before returning,
/// which closes its connections whether the call succeeded or not.
pub async fn synthesize(
    request: &SynthesizeSpeechRequest,
    session: &Session,
) -> gcptts_texttospeech::Result<Vec<u8>> {
    let mut builder = Client::builder(session.credentials.clone());
    if let Some(endpoint) = &session.endpoint {
        builder = builder.endpoint(endpoint);
    }
    if let Some(project) = &session.quota_project {
        builder = builder.quota_project(project);
    }
    if let Some(timeout) = session.timeout {
        builder = builder.timeout(timeout);
    }

    let client = builder.build()?;
    debug!(endpoint = client.endpoint(), "session opened");

    let result = client.speech().synthesize(request).await;
    drop(client);
    debug!("session closed");

    result.map(|resp| resp.audio)
}

/// Runs the whole command: validate, read, synthesize, write.
pub async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = SynthesisConfiguration::from_cli(cli);
    config.validate()?;
    debug!(?config, "synthesis configuration");

    let file_config = load_config(cli.config.as_deref()).context("failed to load config")?;
    let ctx = file_config.resolve_context(cli.context.as_deref())?;
    if let Some(ctx) = ctx {
        debug!(context = %ctx.name, "using context");
    }

    let text = config.input.read_to_string()?;
    let request = build_request(&config, text);

    let session = Session::resolve(&config, ctx).await?;
    let audio = synthesize(&request, &session).await.map_err(explain)?;

    config.output.write_all(&audio)?;
    info!(bytes = audio.len(), output = %config.output, "audio written");

    Ok(())
}

/// Attaches a hint for the failures a user can fix locally.
fn explain(err: Error) -> anyhow::Error {
    let hint = if err.is_unauthenticated() {
        Some("set GOOGLE_API_KEY or GOOGLE_OAUTH_ACCESS_TOKEN, or run `gcloud auth application-default login`")
    } else if err.is_permission_denied() {
        Some("make sure the Text-to-Speech API is enabled for the project")
    } else if err.is_invalid_argument() {
        Some("check the language code, voice name and audio parameters")
    } else {
        None
    };

    match hint {
        Some(hint) => anyhow::Error::new(err).context(format!("speech synthesis failed ({hint})")),
        None => anyhow::Error::new(err).context("speech synthesis failed"),
    }
}
