//! Common types for the Text-to-Speech API.

use serde::{Deserialize, Serialize};

// ==================== Audio Encoding ====================

/// Audio encoding of the synthesized payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AudioEncoding {
    /// MP3 at 32kbps.
    #[default]
    Mp3,
    /// Uncompressed 16-bit signed little-endian samples with a WAV header.
    Linear16,
    /// Opus in an Ogg container.
    OggOpus,
    /// 8-bit G.711 mu-law samples.
    Mulaw,
    /// 8-bit G.711 A-law samples.
    Alaw,
}

impl AudioEncoding {
    /// Returns the wire name of the encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "MP3",
            AudioEncoding::Linear16 => "LINEAR16",
            AudioEncoding::OggOpus => "OGG_OPUS",
            AudioEncoding::Mulaw => "MULAW",
            AudioEncoding::Alaw => "ALAW",
        }
    }
}

// ==================== Voice Gender ====================

/// Preferred gender of the voice when no voice name is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SsmlVoiceGender {
    Male,
    Female,
    Neutral,
}
