//! CLI utilities for gcptts.
//!
//! This crate provides the configuration file and file handling shared by
//! the command-line tools.

pub mod config;
pub mod files;

pub use config::{load_config, mask_api_key, Config, Context};
pub use files::{InputSource, IoError, OutputSink, STDIO_SENTINEL};
