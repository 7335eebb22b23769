pub mod unrealspeech;

use async_trait::async_trait;
use std::error::Error as StdError;
use std::sync::Arc;
use self::unrealspeech::UnrealSpeechClient;

/// Settings for the text-to-speech provider.
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub voice: String,
    pub bitrate: String,
    pub codec: String,
}

#[async_trait]
pub trait SpeechClient: Send + Sync {
    /// Synthesizes `text` and returns the encoded audio bytes as produced
    /// by the provider.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, Box<dyn StdError + Send + Sync>>;
}

pub fn new_client(
    config: &SpeechConfig
) -> Result<Arc<dyn SpeechClient>, Box<dyn StdError + Send + Sync>> {
    let client = UnrealSpeechClient::from_config(config)?;
    Ok(Arc::new(client))
}
