//! Synthesis settings derived from the command line.

use std::ops::RangeInclusive;

use anyhow::bail;
use gcptts_cli::{InputSource, OutputSink};

use crate::Cli;

pub const DEFAULT_LANGUAGE_CODE: &str = "en-US";
pub const DEFAULT_VOICE_NAME: &str = "en-US-Wavenet-A";
pub const DEFAULT_PITCH: f64 = -3.0;
pub const DEFAULT_SPEAKING_RATE: f64 = 1.0;
pub const DEFAULT_VOLUME_GAIN: f64 = 0.0;

pub const PITCH_RANGE: RangeInclusive<f64> = -20.0..=20.0;
pub const SPEAKING_RATE_RANGE: RangeInclusive<f64> = 0.25..=4.0;
pub const VOLUME_GAIN_RANGE: RangeInclusive<f64> = -96.0..=16.0;

/// Everything needed for one synthesis run.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisConfiguration {
    pub input: InputSource,
    pub output: OutputSink,
    pub language_code: String,
    /// Empty lets the service pick the default voice for the language.
    pub voice_name: String,
    pub ssml: bool,
    pub pitch: f64,
    pub speaking_rate: f64,
    pub volume_gain_db: f64,
    pub service_endpoint: Option<String>,
}

impl SynthesisConfiguration {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            input: InputSource::parse(&cli.input_file),
            output: OutputSink::parse(&cli.output_file),
            language_code: cli.language_code.clone(),
            voice_name: normalize_voice_name(&cli.language_code, &cli.voice_name),
            ssml: cli.ssml,
            pitch: cli.pitch,
            speaking_rate: cli.speaking_rate,
            volume_gain_db: cli.volume_gain,
            service_endpoint: cli
                .service_endpoint
                .clone()
                .filter(|e| !e.trim().is_empty()),
        }
    }

    /// Checks the audio parameters against the ranges the service accepts.
    pub fn validate(&self) -> anyhow::Result<()> {
        check_range("pitch", self.pitch, PITCH_RANGE)?;
        check_range("speaking rate", self.speaking_rate, SPEAKING_RATE_RANGE)?;
        check_range("volume gain", self.volume_gain_db, VOLUME_GAIN_RANGE)?;
        Ok(())
    }
}

/// The service lets a voice name override the language code, so the default
/// voice is dropped when another language is requested.
pub fn normalize_voice_name(language_code: &str, voice_name: &str) -> String {
    if language_code != DEFAULT_LANGUAGE_CODE && voice_name == DEFAULT_VOICE_NAME {
        String::new()
    } else {
        voice_name.to_string()
    }
}

fn check_range(name: &str, value: f64, range: RangeInclusive<f64>) -> anyhow::Result<()> {
    if !range.contains(&value) {
        bail!(
            "{} {} is out of range [{}, {}]",
            name,
            value,
            range.start(),
            range.end()
        );
    }
    Ok(())
}
