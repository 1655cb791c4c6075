//! Speech synthesis service.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    error::{Error, Result},
    http::HttpClient,
    types::{AudioEncoding, SsmlVoiceGender},
};

const SYNTHESIZE_PATH: &str = "/v1/text:synthesize";

/// Speech synthesis service.
pub struct SpeechService {
    http: Arc<HttpClient>,
}

impl SpeechService {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Synthesizes speech and returns the decoded audio.
    ///
    /// The service returns `audioContent` base64-encoded; the bytes in the
    /// response are already decoded and ready to be written to a file.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let request = SynthesizeSpeechRequest {
    ///     input: SynthesisInput::Text("Hello, World!".to_string()),
    ///     voice: VoiceSelectionParams::new("en-US", "en-US-Wavenet-A"),
    ///     audio_config: AudioConfig::default(),
    /// };
    ///
    /// let response = client.speech().synthesize(&request).await?;
    /// ```
    pub async fn synthesize(
        &self,
        request: &SynthesizeSpeechRequest,
    ) -> Result<SynthesizeSpeechResponse> {
        debug!(
            input = request.input.kind(),
            language_code = %request.voice.language_code,
            voice_name = %request.voice.name,
            encoding = request.audio_config.audio_encoding.as_str(),
            "synthesizing speech"
        );

        let api_resp: SynthesizeApiResponse = self.http.post(SYNTHESIZE_PATH, request).await?;

        if api_resp.audio_content.is_empty() {
            return Err(Error::Other("response contained no audio content".to_string()));
        }

        let audio = BASE64.decode(api_resp.audio_content.trim())?;
        debug!(bytes = audio.len(), "decoded audio content");

        Ok(SynthesizeSpeechResponse { audio })
    }
}

// ==================== Request/Response Types ====================

/// Request for speech synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeSpeechRequest {
    /// Text or SSML to synthesize.
    pub input: SynthesisInput,

    /// Voice selection.
    pub voice: VoiceSelectionParams,

    /// Audio output configuration.
    pub audio_config: AudioConfig,
}

/// Synthesis input. Exactly one of `text` or `ssml` is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisInput {
    /// Plain text.
    Text(String),
    /// SSML markup, e.g. `<speak>Hi</speak>`.
    Ssml(String),
}

impl SynthesisInput {
    /// Returns the wire tag of this input.
    pub fn kind(&self) -> &'static str {
        match self {
            SynthesisInput::Text(_) => "text",
            SynthesisInput::Ssml(_) => "ssml",
        }
    }

    /// Returns true if the input is SSML markup.
    pub fn is_ssml(&self) -> bool {
        matches!(self, SynthesisInput::Ssml(_))
    }
}

/// Voice selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceSelectionParams {
    /// BCP-47 language code, e.g. `en-US`.
    pub language_code: String,

    /// Voice name, e.g. `en-US-Wavenet-A`. Empty lets the service choose.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Preferred voice gender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssml_gender: Option<SsmlVoiceGender>,
}

impl VoiceSelectionParams {
    /// Creates a voice selection from a language code and voice name.
    pub fn new(language_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
            name: name.into(),
            ssml_gender: None,
        }
    }
}

/// Audio output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
    /// Output encoding.
    pub audio_encoding: AudioEncoding,

    /// Pitch in semitones, [-20.0, 20.0].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,

    /// Speaking rate, [0.25, 4.0]. 1.0 is the voice's native speed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaking_rate: Option<f64>,

    /// Volume gain in dB, [-96.0, 16.0].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_gain_db: Option<f64>,

    /// Output sample rate. The voice's native rate is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_rate_hertz: Option<u32>,

    /// Audio effect profiles applied after synthesis.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects_profile_id: Vec<String>,
}

/// Response from speech synthesis.
#[derive(Debug, Clone, Default)]
pub struct SynthesizeSpeechResponse {
    /// Decoded audio bytes in the requested encoding.
    pub audio: Vec<u8>,
}

// ==================== Internal Types ====================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeApiResponse {
    #[serde(default)]
    audio_content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_format() {
        let request = SynthesizeSpeechRequest {
            input: SynthesisInput::Text("Hello, World!".into()),
            voice: VoiceSelectionParams::new("en-US", "en-US-Wavenet-A"),
            audio_config: AudioConfig {
                pitch: Some(-3.0),
                speaking_rate: Some(1.0),
                volume_gain_db: Some(0.0),
                ..Default::default()
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "input": {"text": "Hello, World!"},
                "voice": {"languageCode": "en-US", "name": "en-US-Wavenet-A"},
                "audioConfig": {
                    "audioEncoding": "MP3",
                    "pitch": -3.0,
                    "speakingRate": 1.0,
                    "volumeGainDb": 0.0
                }
            })
        );
    }

    #[test]
    fn test_ssml_input_tag() {
        let value = serde_json::to_value(SynthesisInput::Ssml("<speak>Hi</speak>".into())).unwrap();
        assert_eq!(value, json!({"ssml": "<speak>Hi</speak>"}));
        assert!(value.get("text").is_none());
    }

    #[test]
    fn test_empty_voice_name_omitted() {
        let value = serde_json::to_value(VoiceSelectionParams::new("de-DE", "")).unwrap();
        assert_eq!(value, json!({"languageCode": "de-DE"}));
    }

    #[test]
    fn test_optional_audio_fields() {
        let config = AudioConfig {
            audio_encoding: AudioEncoding::Linear16,
            sample_rate_hertz: Some(24000),
            effects_profile_id: vec!["headphone-class-device".into()],
            ..Default::default()
        };
        let value = serde_json::to_value(config).unwrap();
        assert_eq!(
            value,
            json!({
                "audioEncoding": "LINEAR16",
                "sampleRateHertz": 24000,
                "effectsProfileId": ["headphone-class-device"]
            })
        );
    }
}
