//! Product card: a short markdown summary of what the video promotes.

use async_trait::async_trait;

use crate::chat::{ChatMessage, ChatRequest};
use crate::error::OracleError;
use crate::{prompt, OracleClient};

/// Writes a markdown product card from a transcript.
#[async_trait]
pub trait ProductCardWriter: Send + Sync {
    async fn product_card(&self, transcript: &str) -> Result<String, OracleError>;
}

#[async_trait]
impl ProductCardWriter for OracleClient {
    async fn product_card(&self, transcript: &str) -> Result<String, OracleError> {
        let chat = ChatRequest::new(
            &self.models.summary,
            vec![
                ChatMessage::system(prompt::PRODUCT_CARD_SYSTEM),
                ChatMessage::user(prompt::transcript_user(transcript)),
            ],
        );
        let card = self.chat.complete_text(&chat).await?;
        Ok(card.trim().to_string())
    }
}
