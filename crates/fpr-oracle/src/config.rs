//! Oracle client configuration.
//!
//! Points at any OpenAI-compatible chat-completions service. Defaults target
//! the Groq endpoint and the models the review flow was tuned against.
//! Override via environment variables or explicit construction for
//! staging/testing.

use url::Url;
use zeroize::Zeroizing;

/// Default OpenAI-compatible base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Model identifiers used for each oracle capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSet {
    /// Rule-compliance judgment over the transcript.
    pub judge: String,
    /// Text extraction from video frames.
    pub vision: String,
    /// Disclaimer detection over extracted frame texts.
    pub disclaimer: String,
    /// Product card summary.
    pub summary: String,
    /// Speech-to-text.
    pub transcription: String,
}

impl Default for ModelSet {
    fn default() -> Self {
        Self {
            judge: "llama-3.1-70b-versatile".into(),
            vision: "llama-3.2-11b-vision-preview".into(),
            disclaimer: "llama-3.2-90b-text-preview".into(),
            summary: "llama-3.1-70b-versatile".into(),
            transcription: "whisper-large-v3".into(),
        }
    }
}

/// Configuration for connecting to the oracle service.
///
/// Custom `Debug` implementation redacts the `api_key` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct OracleConfig {
    /// Base URL of the OpenAI-compatible API, e.g. `https://api.groq.com/openai/v1`.
    pub base_url: Url,
    /// Bearer token for API authentication.
    pub api_key: Zeroizing<String>,
    /// Model per capability.
    pub models: ModelSet,
    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for OracleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("models", &self.models)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl OracleConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `GROQ_API_KEY` (required)
    /// - `FPR_ORACLE_URL` (default: `https://api.groq.com/openai/v1`)
    /// - `FPR_JUDGE_MODEL`, `FPR_VISION_MODEL`, `FPR_DISCLAIMER_MODEL`,
    ///   `FPR_SUMMARY_MODEL`, `FPR_TRANSCRIPTION_MODEL` (defaults: [`ModelSet::default`])
    /// - `FPR_ORACLE_TIMEOUT_SECS` (default: 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GROQ_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let defaults = ModelSet::default();
        Ok(Self {
            base_url: env_url("FPR_ORACLE_URL", DEFAULT_BASE_URL)?,
            api_key: Zeroizing::new(api_key),
            models: ModelSet {
                judge: env_or("FPR_JUDGE_MODEL", defaults.judge),
                vision: env_or("FPR_VISION_MODEL", defaults.vision),
                disclaimer: env_or("FPR_DISCLAIMER_MODEL", defaults.disclaimer),
                summary: env_or("FPR_SUMMARY_MODEL", defaults.summary),
                transcription: env_or("FPR_TRANSCRIPTION_MODEL", defaults.transcription),
            },
            timeout_secs: std::env::var("FPR_ORACLE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base_url` cannot be parsed.
    pub fn local_mock(base_url: &str, token: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Url::parse(base_url)
                .map_err(|e| ConfigError::InvalidUrl(base_url.to_string(), e.to_string()))?,
            api_key: Zeroizing::new(token.to_string()),
            models: ModelSet::default(),
            timeout_secs: 5,
        })
    }

    /// Builder: override the judgment model.
    pub fn with_judge_model(mut self, model: impl Into<String>) -> Self {
        self.models.judge = model.into();
        self
    }
}

fn env_or(var: &str, default: String) -> String {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("GROQ_API_KEY environment variable is required")]
    MissingApiKey,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,
}
