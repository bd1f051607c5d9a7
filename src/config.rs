//! Process-wide configuration resolved once at startup.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::error::ConfigError;

/// Environment variable holding the generation backend credential.
pub const API_KEY_ENV_VAR: &str = "ANTHROPIC_API_KEY";

/// Environment variable selecting the editor for manual edits.
pub const EDITOR_ENV_VAR: &str = "EDITOR";

/// Editor used when `EDITOR` is unset.
pub const DEFAULT_EDITOR: &str = "vim";

/// Environment variable to override the default request timeout.
pub const TIMEOUT_ENV_VAR: &str = "STAGECRAFT_API_TIMEOUT";

/// Default timeout for the generation request (2 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Resolved configuration, passed explicitly into each component.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub editor: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("editor", &self.editor)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// Fails if the API credential is unset or empty. Everything else falls
    /// back to a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = match env::var(API_KEY_ENV_VAR) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => return Err(ConfigError::MissingCredential(API_KEY_ENV_VAR)),
        };

        Ok(Self {
            api_key,
            editor: get_editor(),
            timeout: get_timeout(),
        })
    }
}

/// The configured editor command, or [`DEFAULT_EDITOR`] when unset.
fn get_editor() -> String {
    match env::var(EDITOR_ENV_VAR) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => DEFAULT_EDITOR.to_string(),
    }
}

/// Get the configured request timeout.
///
/// Logs a warning if the environment variable is set but contains
/// an invalid value (non-numeric, empty, or zero).
fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}
