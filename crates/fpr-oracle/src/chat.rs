//! OpenAI-compatible wire types and the low-level HTTP calls.
//!
//! Capability modules build a [`ChatRequest`] and hand it to
//! [`ChatClient::complete_json`] or [`ChatClient::complete_text`].

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::OracleError;

const CHAT_ENDPOINT: &str = "POST /chat/completions";
const TRANSCRIPTION_ENDPOINT: &str = "POST /audio/transcriptions";

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl<'a> ChatRequest<'a> {
    /// Deterministic request with the given messages.
    pub fn new(model: &'a str, messages: Vec<ChatMessage<'a>>) -> Self {
        Self {
            model,
            messages,
            temperature: 0.0,
            response_format: None,
        }
    }

    /// Ask the service to constrain output to a JSON object.
    pub fn json_object(mut self) -> Self {
        self.response_format = Some(ResponseFormat {
            kind: "json_object",
        });
        self
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: MessageContent<'a>,
}

impl<'a> ChatMessage<'a> {
    pub fn system(text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            role: "system",
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user(text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            role: "user",
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: "user",
            content: MessageContent::Parts(parts),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum MessageContent<'a> {
    Text(Cow<'a, str>),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
pub(crate) struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Thin HTTP wrapper shared by every capability.
#[derive(Debug, Clone)]
pub(crate) struct ChatClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ChatClient {
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    /// Send a chat completion and return the first choice's content.
    pub async fn complete_text(&self, request: &ChatRequest<'_>) -> Result<String, OracleError> {
        let url = self.endpoint_url("chat/completions");
        tracing::debug!(model = request.model, "sending chat completion");

        let resp = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| OracleError::Http {
                endpoint: CHAT_ENDPOINT.into(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(OracleError::Api {
                endpoint: CHAT_ENDPOINT.into(),
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = resp
            .json()
            .await
            .map_err(|e| OracleError::Deserialization {
                endpoint: CHAT_ENDPOINT.into(),
                source: e,
            })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| OracleError::EmptyCompletion {
                endpoint: CHAT_ENDPOINT.into(),
            })?;
        tracing::debug!(model = request.model, bytes = content.len(), "completion received");
        Ok(content)
    }

    /// Send a chat completion and decode its content as `T`.
    ///
    /// Content that is not JSON is `MalformedJson`; JSON that does not fit
    /// `T` is `Schema`.
    pub async fn complete_json<T: DeserializeOwned>(
        &self,
        request: &ChatRequest<'_>,
    ) -> Result<T, OracleError> {
        let content = self.complete_text(request).await?;
        decode_content(&content)
    }

    /// Upload audio for transcription.
    pub async fn transcribe(
        &self,
        model: &str,
        audio: Vec<u8>,
        file_name: &str,
    ) -> Result<String, OracleError> {
        let url = self.endpoint_url("audio/transcriptions");
        tracing::debug!(model, file_name, bytes = audio.len(), "uploading audio");

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio).file_name(file_name.to_string()),
            )
            .text("model", model.to_string())
            .text("response_format", "json")
            .text("temperature", "0");

        let resp = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| OracleError::Http {
                endpoint: TRANSCRIPTION_ENDPOINT.into(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(OracleError::Api {
                endpoint: TRANSCRIPTION_ENDPOINT.into(),
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranscriptionResponse =
            resp.json()
                .await
                .map_err(|e| OracleError::Deserialization {
                    endpoint: TRANSCRIPTION_ENDPOINT.into(),
                    source: e,
                })?;
        Ok(parsed.text)
    }
}

/// Decode model output, tolerating a surrounding markdown code fence.
pub(crate) fn decode_content<T: DeserializeOwned>(content: &str) -> Result<T, OracleError> {
    let value: serde_json::Value =
        serde_json::from_str(strip_code_fence(content)).map_err(|e| {
            OracleError::MalformedJson {
                endpoint: CHAT_ENDPOINT.into(),
                source: e,
            }
        })?;
    serde_json::from_value(value).map_err(|e| OracleError::Schema {
        endpoint: CHAT_ENDPOINT.into(),
        reason: e.to_string(),
    })
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
