//! Frame text extraction.
//!
//! Frames arrive as JPEG bytes and travel to the vision model as a base64
//! `data:` URL. A frame with no visible text yields `None`.

use async_trait::async_trait;
use base64::Engine as _;
use serde::Deserialize;

use crate::chat::{ChatMessage, ChatRequest, ContentPart, ImageUrl};
use crate::error::OracleError;
use crate::{prompt, OracleClient};

pub use crate::prompt::NO_TEXT_SENTINEL;

/// Reads the on-screen text of one video frame.
#[async_trait]
pub trait FrameReader: Send + Sync {
    /// `Ok(None)` when the frame carries no text.
    async fn read_frame(&self, jpeg: &[u8]) -> Result<Option<String>, OracleError>;
}

#[derive(Debug, Deserialize)]
struct FrameContent {
    image_content: String,
}

/// Normalise model output: blank or sentinel text means no text.
pub(crate) fn frame_text(raw: String) -> Option<String> {
    let text = raw.trim();
    if text.is_empty() || text.eq_ignore_ascii_case(NO_TEXT_SENTINEL) {
        None
    } else {
        Some(text.to_string())
    }
}

pub(crate) fn jpeg_data_url(jpeg: &[u8]) -> String {
    format!(
        "data:image/jpeg;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(jpeg)
    )
}

#[async_trait]
impl FrameReader for OracleClient {
    async fn read_frame(&self, jpeg: &[u8]) -> Result<Option<String>, OracleError> {
        tracing::debug!(bytes = jpeg.len(), model = %self.models.vision, "reading frame");

        let chat = ChatRequest::new(
            &self.models.vision,
            vec![ChatMessage::user_parts(vec![
                ContentPart::Text {
                    text: prompt::frame_instruction(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: jpeg_data_url(jpeg),
                    },
                },
            ])],
        )
        .json_object();

        let content: FrameContent = self.chat.complete_json(&chat).await?;
        Ok(frame_text(content.image_content))
    }
}
