use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Variables that must be bound (and non-empty) before the probe is attempted.
pub const REQUIRED_VARS: &[&str] = &["RETELL_API_KEY", "OPENAI_API_KEY"];

pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const OPENAI_ORGANIZATION_VAR: &str = "OPENAI_ORGANIZATION_ID";
pub const OPENAI_BASE_URL_VAR: &str = "OPENAI_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4-turbo-preview";
pub const PROBE_PROMPT: &str = "Hello, are you working?";
pub const PROBE_MAX_TOKENS: u32 = 50;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load env file {path}: {message}")]
    Dotenv { path: String, message: String },
}

/// Read-only view over a set of environment variables.
pub trait EnvSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Bound to a non-empty value. Presence only; the value need not be UTF-8.
    fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| !value.is_empty())
    }
}

/// The current process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }

    fn is_set(&self, key: &str) -> bool {
        env::var_os(key).is_some_and(|value| !value.is_empty())
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

#[derive(Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_organization_id: Option<String>,
    pub base_url: String,
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_source(&ProcessEnv)
    }

    pub fn from_source(source: &dyn EnvSource) -> Self {
        Self {
            openai_api_key: non_empty(source.get(OPENAI_API_KEY_VAR)),
            openai_organization_id: non_empty(source.get(OPENAI_ORGANIZATION_VAR)),
            base_url: non_empty(source.get(OPENAI_BASE_URL_VAR))
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: DEFAULT_MODEL.to_string(),
            prompt: PROBE_PROMPT.to_string(),
            max_tokens: PROBE_MAX_TOKENS,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.openai_api_key.is_some()
    }

    /// Loads a `.env` file into the process environment. Variables that are
    /// already set keep their values.
    ///
    /// An explicit path that cannot be read or parsed is an error. Without one,
    /// a missing or malformed `./.env` only logs a warning so the checks still
    /// run and report.
    pub fn load_dotenv(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::Dotenv {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
                info!("Loaded environment from {}", path.display());
                Ok(Some(path.to_path_buf()))
            }
            None => match dotenvy::dotenv() {
                Ok(found) => {
                    info!("Loaded environment from {}", found.display());
                    Ok(Some(found))
                }
                Err(e) if e.not_found() => {
                    debug!("No .env file found, using process environment only");
                    Ok(None)
                }
                Err(e) => {
                    warn!("Ignoring unreadable .env file: {}", e);
                    Ok(None)
                }
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

// Keys never reach logs, even at debug level.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("openai_organization_id", &self.openai_organization_id)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
