use async_trait::async_trait;
use log::info;
use reqwest::Client as HttpClient;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use std::error::Error as StdError;

use super::{ SpeechClient, SpeechConfig };

/// UnrealSpeech `/stream` backend. The response body is the raw encoded
/// audio, not a JSON envelope.
pub struct UnrealSpeechClient {
    http: HttpClient,
    api_key: String,
    base_url: String,
    voice: String,
    bitrate: String,
    codec: String,
}

// Wire field names are PascalCase on this provider.
#[derive(Serialize)]
struct SpeechRequest {
    #[serde(rename = "Text")]
    text: String,
    #[serde(rename = "VoiceId")]
    voice_id: String,
    #[serde(rename = "Bitrate")]
    bitrate: String,
    #[serde(rename = "Speed")]
    speed: String,
    #[serde(rename = "Pitch")]
    pitch: String,
    #[serde(rename = "Codec")]
    codec: String,
}

impl UnrealSpeechClient {
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        voice: String,
        bitrate: String,
        codec: String,
    ) -> Self {
        Self {
            http: HttpClient::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.v7.unrealspeech.com".to_string()),
            voice,
            bitrate,
            codec,
        }
    }

    pub fn from_config(config: &SpeechConfig) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        let api_key = config.api_key
            .clone()
            .ok_or_else(|| "Speech synthesis API key is required".to_string())?;

        Ok(
            Self::new(
                api_key,
                config.base_url.clone(),
                config.voice.clone(),
                config.bitrate.clone(),
                config.codec.clone(),
            )
        )
    }
}

#[async_trait]
impl SpeechClient for UnrealSpeechClient {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, Box<dyn StdError + Send + Sync>> {
        let url = format!("{}/stream", self.base_url.trim_end_matches('/'));

        let body = SpeechRequest {
            text: text.to_string(),
            voice_id: self.voice.clone(),
            bitrate: self.bitrate.clone(),
            speed: "0".to_string(),
            pitch: "1".to_string(),
            codec: self.codec.clone(),
        };

        let response = self.http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&body)
            .send().await
            .map_err(|e| format!("Failed to send speech synthesis request: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("Speech provider error ({}): {}", status, error_text).into());
        }

        let audio_bytes = response
            .bytes().await
            .map_err(|e| format!("Failed to read synthesized audio bytes: {}", e))?
            .to_vec();

        info!("Synthesized {} bytes of audio (voice={})", audio_bytes.len(), self.voice);

        Ok(audio_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> UnrealSpeechClient {
        UnrealSpeechClient::new(
            "test-tts-key".to_string(),
            Some(base_url.to_string()),
            "Dan".to_string(),
            "192k".to_string(),
            "libmp3lame".to_string(),
        )
    }

    #[tokio::test]
    async fn synthesize_returns_audio_bytes() {
        let fake_audio = vec![0xffu8; 256];
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/stream")
            .match_header("Authorization", "Bearer test-tts-key")
            .with_status(200)
            .with_header("content-type", "audio/mpeg")
            .with_body(fake_audio.clone())
            .create_async().await;

        let result = client(&server.url()).synthesize("Hello world").await;

        mock.assert_async().await;
        assert_eq!(result.unwrap(), fake_audio);
    }

    #[tokio::test]
    async fn sends_provider_wire_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/stream")
            .match_body(
                mockito::Matcher::PartialJsonString(
                    r#"{"Text":"Hi","VoiceId":"Dan","Bitrate":"192k","Speed":"0","Pitch":"1","Codec":"libmp3lame"}"#.to_string()
                )
            )
            .with_status(200)
            .with_body(vec![0u8; 10])
            .create_async().await;

        let result = client(&server.url()).synthesize("Hi").await;

        mock.assert_async().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn api_error_includes_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/stream")
            .with_status(429)
            .with_body(r#"{"error": "Rate limit exceeded"}"#)
            .create_async().await;

        let result = client(&server.url()).synthesize("Hello").await;

        mock.assert_async().await;
        assert!(result.unwrap_err().to_string().contains("429"));
    }

    #[tokio::test]
    async fn empty_audio_body_is_allowed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/stream")
            .with_status(200)
            .with_body(Vec::<u8>::new())
            .create_async().await;

        let result = client(&server.url()).synthesize("Hello").await;

        mock.assert_async().await;
        assert!(result.unwrap().is_empty());
    }
}
