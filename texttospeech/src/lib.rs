//! Google Cloud Text-to-Speech SDK for Rust.
//!
//! This crate provides a client for the `v1` REST API of the
//! Text-to-Speech service.

mod auth;
mod client;
mod error;
pub mod http;
mod speech;
mod types;

pub use auth::{Credentials, ENV_ACCESS_TOKEN, ENV_API_KEY, ENV_QUOTA_PROJECT};
pub use client::{normalize_endpoint, Client, ClientBuilder, DEFAULT_ENDPOINT};
pub use error::{status, Error, Result};
pub use speech::{
    AudioConfig, SpeechService, SynthesisInput, SynthesizeSpeechRequest,
    SynthesizeSpeechResponse, VoiceSelectionParams,
};
pub use types::{AudioEncoding, SsmlVoiceGender};
