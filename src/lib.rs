pub mod cli;
pub mod config;
pub mod history;
pub mod llm;
pub mod models;
pub mod server;

use cli::Args;
use llm::LlmConfig;
use llm::chat::new_client as new_chat_client;
use llm::speech::{ new_client as new_speech_client, SpeechConfig };
use llm::transcription::{ new_client as new_transcription_client, TranscriptionConfig };
use log::info;
use server::Server;
use server::api::AppState;
use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Listen Port: {}", args.port);
    info!("History Store Type: {}", args.history_type);
    info!("Chat LLM Type: {}", args.chat_llm_type);
    info!("Chat Model: {}", args.chat_model.as_deref().unwrap_or("(adapter default)"));
    info!(
        "Transcription Model: {}",
        args.transcription_model.as_deref().unwrap_or("(adapter default)")
    );
    info!("Speech Voice: {}", args.speech_voice);
    info!("System Prompt Path: {}", args.system_prompt_path);
    info!("Upload Dir: {}", args.upload_dir);
    info!("-------------------------");

    let history = history::initialize_history_store(&args)?;

    let chat_config = LlmConfig {
        llm_type: args.chat_llm_type
            .parse()
            .map_err(|e| format!("Invalid chat LLM type: {}", e))?,
        api_key: Some(args.chat_api_key.clone()).filter(|k| !k.is_empty()),
        model: args.chat_model.clone(),
        base_url: args.chat_base_url.clone(),
        temperature: args.chat_temperature,
        max_tokens: args.chat_max_tokens,
    };
    let chat = new_chat_client(&chat_config)?;

    // The chat and transcription providers share a key unless one is set
    // explicitly for transcription.
    let transcription_key = if args.transcription_api_key.is_empty() {
        args.chat_api_key.clone()
    } else {
        args.transcription_api_key.clone()
    };
    let transcription = new_transcription_client(
        &(TranscriptionConfig {
            api_key: Some(transcription_key).filter(|k| !k.is_empty()),
            model: args.transcription_model.clone(),
            base_url: args.transcription_base_url.clone(),
            language: args.transcription_language.clone(),
        })
    )?;

    let speech = new_speech_client(
        &(SpeechConfig {
            api_key: Some(args.speech_api_key.clone()).filter(|k| !k.is_empty()),
            base_url: args.speech_base_url.clone(),
            voice: args.speech_voice.clone(),
            bitrate: args.speech_bitrate.clone(),
            codec: args.speech_codec.clone(),
        })
    )?;

    let upload_dir = PathBuf::from(&args.upload_dir);
    tokio::fs
        ::create_dir_all(&upload_dir).await
        .map_err(|e| format!("Failed to create upload dir '{}': {}", args.upload_dir, e))?;

    let state = AppState {
        history,
        chat,
        transcription,
        speech,
        system_prompt_path: args.system_prompt_path.clone(),
        upload_dir,
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Starting server on: {}", addr);
    Server::new(addr, state).run().await
}
