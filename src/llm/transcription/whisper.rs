use async_trait::async_trait;
use log::info;
use reqwest::Client as HttpClient;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use std::error::Error as StdError;
use std::path::Path;

use super::{ TranscriptionClient, TranscriptionConfig };

/// Whisper-compatible `audio/transcriptions` backend. Groq hosts the
/// default endpoint; any OpenAI-compatible host works via the base URL.
pub struct WhisperTranscriber {
    http: HttpClient,
    api_key: String,
    model: String,
    base_url: String,
    language: String,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl WhisperTranscriber {
    pub fn new(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        language: String,
    ) -> Self {
        Self {
            http: HttpClient::new(),
            api_key,
            model: model.unwrap_or_else(|| "whisper-large-v3-turbo".to_string()),
            base_url: base_url.unwrap_or_else(|| "https://api.groq.com/openai/v1".to_string()),
            language,
        }
    }

    pub fn from_config(
        config: &TranscriptionConfig
    ) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        let api_key = config.api_key
            .clone()
            .ok_or_else(|| "Transcription API key is required".to_string())?;

        Ok(
            Self::new(
                api_key,
                config.model.clone(),
                config.base_url.clone(),
                config.language.clone(),
            )
        )
    }
}

#[async_trait]
impl TranscriptionClient for WhisperTranscriber {
    async fn transcribe(
        &self,
        path: &Path,
        file_name: &str
    ) -> Result<String, Box<dyn StdError + Send + Sync>> {
        let audio_bytes = tokio::fs
            ::read(path).await
            .map_err(|e| format!("Failed to read uploaded audio '{}': {}", path.display(), e))?;

        let file_part = reqwest::multipart::Part
            ::bytes(audio_bytes)
            .file_name(file_name.to_string())
            .mime_str("application/octet-stream")?;

        let form = reqwest::multipart::Form
            ::new()
            .part("file", file_part)
            .text("model", self.model.clone())
            .text("language", self.language.clone())
            .text("response_format", "json")
            .text("temperature", "0.0");

        let url = format!("{}/audio/transcriptions", self.base_url.trim_end_matches('/'));

        let response = self.http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .multipart(form)
            .send().await
            .map_err(|e| format!("Failed to send audio to transcription provider: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("Transcription provider error ({}): {}", status, error_text).into());
        }

        let result: TranscriptionResponse = response
            .json().await
            .map_err(|e| format!("Failed to parse transcription response: {}", e))?;

        info!("Transcribed {} chars of text", result.text.len());

        Ok(result.text)
    }
}
