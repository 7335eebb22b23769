pub mod whisper;

use async_trait::async_trait;
use std::error::Error as StdError;
use std::path::Path;
use std::sync::Arc;
use self::whisper::WhisperTranscriber;

/// Settings for the speech-to-text provider.
#[derive(Debug, Clone)]
pub struct TranscriptionConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub language: String,
}

#[async_trait]
pub trait TranscriptionClient: Send + Sync {
    /// Transcribes the audio file at `path`. `file_name` is the name the
    /// client uploaded the file under, forwarded to the provider as the
    /// multipart filename hint.
    async fn transcribe(
        &self,
        path: &Path,
        file_name: &str
    ) -> Result<String, Box<dyn StdError + Send + Sync>>;
}

pub fn new_client(
    config: &TranscriptionConfig
) -> Result<Arc<dyn TranscriptionClient>, Box<dyn StdError + Send + Sync>> {
    let client = WhisperTranscriber::from_config(config)?;
    Ok(Arc::new(client))
}
