//! Risk-disclaimer detection over on-screen frame text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::chat::{decode_content, ChatMessage, ChatRequest};
use crate::error::OracleError;
use crate::lenient::parse_bool_text;
use crate::{prompt, OracleClient};

/// Whether the video shows a risk disclaimer, and its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclaimerFinding {
    pub disclaimer_is_exist: bool,
    pub disclaimer_text: String,
}

impl DisclaimerFinding {
    /// No disclaimer found.
    pub fn absent() -> Self {
        Self {
            disclaimer_is_exist: false,
            disclaimer_text: String::new(),
        }
    }
}

/// Model output before normalisation. Models are inconsistent about the
/// flag: a bool, a bool string, or an empty string alongside the text.
#[derive(Debug, Deserialize)]
struct RawFinding {
    disclaimer_is_exist: serde_json::Value,
    #[serde(default)]
    disclaimer_text: Option<String>,
}

impl TryFrom<RawFinding> for DisclaimerFinding {
    type Error = String;

    fn try_from(raw: RawFinding) -> Result<Self, Self::Error> {
        let text = raw.disclaimer_text.unwrap_or_default().trim().to_string();
        let exists = match &raw.disclaimer_is_exist {
            serde_json::Value::Bool(b) => *b,
            serde_json::Value::String(s) if s.trim().is_empty() => !text.is_empty(),
            serde_json::Value::String(s) => parse_bool_text(s)
                .ok_or_else(|| format!("disclaimer_is_exist is not a boolean: {s:?}"))?,
            serde_json::Value::Null => !text.is_empty(),
            other => return Err(format!("disclaimer_is_exist is not a boolean: {other}")),
        };
        Ok(if exists {
            Self {
                disclaimer_is_exist: true,
                disclaimer_text: text,
            }
        } else {
            Self::absent()
        })
    }
}

/// Looks for a risk disclaimer among the texts read from a video's frames.
#[async_trait]
pub trait DisclaimerScanner: Send + Sync {
    async fn scan(&self, frame_texts: &[String]) -> Result<DisclaimerFinding, OracleError>;
}

#[async_trait]
impl DisclaimerScanner for OracleClient {
    async fn scan(&self, frame_texts: &[String]) -> Result<DisclaimerFinding, OracleError> {
        if frame_texts.is_empty() {
            return Ok(DisclaimerFinding::absent());
        }
        tracing::debug!(frames = frame_texts.len(), model = %self.models.disclaimer, "scanning for disclaimer");

        let chat = ChatRequest::new(
            &self.models.disclaimer,
            vec![
                ChatMessage::system(prompt::DISCLAIMER_SYSTEM),
                ChatMessage::user(prompt::disclaimer_user(frame_texts)),
            ],
        )
        .json_object();

        let content = self.chat.complete_text(&chat).await?;
        let raw: RawFinding = decode_content(&content)?;
        DisclaimerFinding::try_from(raw).map_err(|reason| OracleError::Schema {
            endpoint: "POST /chat/completions".into(),
            reason,
        })
    }
}
