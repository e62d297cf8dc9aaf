//! Persistent configuration for the `selang` host.
//!
//! Stores defaults in `~/.selang/config.json`. Command-line flags and
//! environment variables take precedence over anything read here.
//!
//! ```json
//! { "timeout_ms": 10000, "format": "json" }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const CONFIG_DIR: &str = ".selang";
const CONFIG_FILENAME: &str = "config.json";

/// Execution budget used when neither the config nor the command line set one.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// How `selang run` prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One output entry per line
    #[default]
    Text,
    /// A JSON object with the output queue and final variables
    Json,
}

/// Persistent selang configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelangConfig {
    /// Execution time budget in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Default output format for `selang run`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

/// `~/.selang/config.json`, if a home directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILENAME))
}

impl SelangConfig {
    /// Load config from `path`, or from the default location when `None`.
    ///
    /// Returns [`Default`] if the file does not exist or cannot be parsed.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => return Self::default(),
            },
        };
        std::fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)
    }

    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}
