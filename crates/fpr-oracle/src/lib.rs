//! # fpr-oracle -- Oracle boundary for financial promotion review
//!
//! Every capability the review flow needs from a language model sits behind
//! an `async_trait` seam so the engine can be driven by mocks in tests:
//! - **Judgment** ([`JudgmentOracle`]) rules on one rule against a transcript
//! - **Frame reading** ([`FrameReader`]) extracts on-screen text from a JPEG frame
//! - **Disclaimer scan** ([`DisclaimerScanner`]) looks for a risk disclaimer in frame texts
//! - **Product card** ([`ProductCardWriter`]) summarises the promoted product
//! - **Transcription** ([`Transcriber`]) turns audio into a transcript
//!
//! [`OracleClient`] implements all five against an OpenAI-compatible HTTP API
//! (`/chat/completions` and `/audio/transcriptions`).
//!
//! ## Retry
//!
//! The client never retries. A failed call surfaces as [`OracleError`] and
//! the caller decides. Retry policy lives in `fpr-engine`.

pub mod card;
pub(crate) mod chat;
pub mod config;
pub mod disclaimer;
pub mod error;
pub mod judge;
pub(crate) mod lenient;
pub(crate) mod prompt;
pub mod transcribe;
pub mod vision;

pub use card::ProductCardWriter;
pub use config::{ConfigError, ModelSet, OracleConfig};
pub use disclaimer::{DisclaimerFinding, DisclaimerScanner};
pub use error::OracleError;
pub use judge::{JudgeRequest, JudgmentOracle, JudgmentResponse};
pub use transcribe::Transcriber;
pub use vision::{FrameReader, NO_TEXT_SENTINEL};

use std::time::Duration;

/// HTTP oracle client. Implements every oracle trait in this crate.
#[derive(Debug, Clone)]
pub struct OracleClient {
    chat: chat::ChatClient,
    models: ModelSet,
}

impl OracleClient {
    /// Create a new oracle client from configuration.
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let mut auth = reqwest::header::HeaderValue::from_str(&format!(
            "Bearer {}",
            config.api_key.as_str()
        ))
        .map_err(|_| OracleError::Config(ConfigError::InvalidApiKey))?;
        auth.set_sensitive(true);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(reqwest::header::AUTHORIZATION, auth);
                headers
            })
            .build()
            .map_err(|e| OracleError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            chat: chat::ChatClient::new(http, config.base_url),
            models: config.models,
        })
    }
}
