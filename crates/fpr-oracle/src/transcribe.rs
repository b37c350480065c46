//! Speech-to-text for the audio track of a promotion video.

use async_trait::async_trait;

use crate::error::OracleError;
use crate::OracleClient;

/// Turns audio into a transcript.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// `file_name` is sent with the upload; services use its extension to
    /// detect the audio format.
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, OracleError>;
}

#[async_trait]
impl Transcriber for OracleClient {
    async fn transcribe(&self, audio: Vec<u8>, file_name: &str) -> Result<String, OracleError> {
        let text = self
            .chat
            .transcribe(&self.models.transcription, audio, file_name)
            .await?;
        Ok(text.trim().to_string())
    }
}
