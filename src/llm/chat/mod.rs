pub mod groq;
pub mod openai;

use async_trait::async_trait;
use std::error::Error as StdError;
use std::sync::Arc;
use super::{ LlmConfig, LlmType };
use crate::models::chat::ChatMessage;
use self::groq::GroqChatClient;
use self::openai::OpenAIChatClient;

#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Generates a reply for the conversation. `history` is the full ordered
    /// message list; the system prompt is injected ahead of it on the wire
    /// and never stored.
    ///
    /// An empty or missing completion is an error: the caller must be able
    /// to distinguish "provider answered" from "provider returned nothing".
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ChatMessage]
    ) -> Result<String, Box<dyn StdError + Send + Sync>>;
}

pub fn new_client(
    config: &LlmConfig
) -> Result<Arc<dyn ChatClient>, Box<dyn StdError + Send + Sync>> {
    let client: Arc<dyn ChatClient> = match config.llm_type {
        LlmType::Groq => {
            let specific_client = GroqChatClient::from_config(config)?;
            Arc::new(specific_client)
        }
        LlmType::OpenAI => {
            let specific_client = OpenAIChatClient::from_config(config)?;
            Arc::new(specific_client)
        }
    };
    Ok(client)
}
