//! Configuration management for CLI tools.
//!
//! Configuration is stored in ~/.gcptts/config.yaml and holds named contexts,
//! similar to kubectl's context management:
//!
//! ```yaml
//! current_context: prod
//! contexts:
//!   prod:
//!     api_key: AIza...
//!     endpoint: eu-texttospeech.googleapis.com
//!     quota_project: my-billing-project
//!     timeout: 60
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

/// Default base configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".gcptts";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// CLI configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Name of the currently active context.
    #[serde(default)]
    pub current_context: String,

    /// Map of context name to context configuration.
    #[serde(default)]
    pub contexts: HashMap<String, Context>,

    /// Path the config was loaded from.
    #[serde(skip)]
    config_path: PathBuf,
}

/// A single API context configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Context {
    /// Context name, filled in from the map key.
    #[serde(default)]
    pub name: String,

    /// API key, sent as `x-goog-api-key`.
    #[serde(default)]
    pub api_key: String,

    /// OAuth 2.0 access token, used when no API key is set.
    #[serde(default)]
    pub access_token: String,

    /// Service endpoint (optional, uses default if empty).
    #[serde(default)]
    pub endpoint: String,

    /// Project billed for requests (optional).
    #[serde(default)]
    pub quota_project: String,

    /// Request timeout in seconds (optional, 0 means none).
    #[serde(default)]
    pub timeout: u64,
}

impl Config {
    /// Gets the default config directory.
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_BASE_DIR))
    }

    /// Gets the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join(DEFAULT_CONFIG_FILE))
    }

    /// Returns the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Gets a specific context.
    pub fn get_context(&self, name: &str) -> Option<&Context> {
        self.contexts.get(name)
    }

    /// Gets the current context.
    pub fn get_current_context(&self) -> Option<&Context> {
        if self.current_context.is_empty() {
            return None;
        }
        self.contexts.get(&self.current_context)
    }

    /// Resolves the context to use.
    ///
    /// An explicitly named context must exist. Without a name the current
    /// context is used, if any.
    pub fn resolve_context(&self, name: Option<&str>) -> anyhow::Result<Option<&Context>> {
        match name {
            Some(n) if !n.is_empty() => match self.get_context(n) {
                Some(ctx) => Ok(Some(ctx)),
                None => anyhow::bail!(
                    "context '{}' not found in {}",
                    n,
                    self.config_path.display()
                ),
            },
            _ => Ok(self.get_current_context()),
        }
    }
}

impl Context {
    /// Returns the request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
    }
}

/// Loads configuration from `custom_path` or the default location.
///
/// A missing file yields an empty configuration; the file is never created.
pub fn load_config(custom_path: Option<&str>) -> anyhow::Result<Config> {
    let config_path = match custom_path {
        Some(p) => PathBuf::from(p),
        None => Config::default_config_path()
            .ok_or_else(|| anyhow::anyhow!("cannot determine config path"))?,
    };

    let mut cfg = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        debug!(path = %config_path.display(), contexts = cfg.contexts.len(), "loaded config");
        cfg
    } else {
        debug!(path = %config_path.display(), "no config file, using defaults");
        Config::default()
    };

    for (name, ctx) in cfg.contexts.iter_mut() {
        ctx.name = name.clone();
    }
    cfg.config_path = config_path;

    Ok(cfg)
}

/// Masks the API key for display.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let n = chars.len();
    if n <= 8 {
        return "*".repeat(n);
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[n - 4..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(n - 8))
}
