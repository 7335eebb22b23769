use axum::{ Json, Router };
use axum::extract::{ DefaultBodyLimit, Multipart, State };
use axum::routing::post;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{ Deserialize, Serialize };
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{ Any, CorsLayer };

use crate::config::prompt::load_system_prompt;
use crate::history::{ HistoryStore, DEFAULT_CONVERSATION_ID };
use crate::llm::chat::ChatClient;
use crate::llm::speech::SpeechClient;
use crate::llm::transcription::TranscriptionClient;
use crate::models::chat::Role;
use super::error::ApiError;
use super::upload::TempUpload;

// Multipart audio uploads can be several MB; raise the default extractor cap.
const AUDIO_UPLOAD_LIMIT_BYTES: usize = 32 * 1024 * 1024;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub text: Option<String>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct VoiceChatResponse {
    pub message: String,
    pub audio: String,
    pub transcription: String,
}

#[derive(Clone)]
pub struct AppState {
    pub history: Arc<dyn HistoryStore>,
    pub chat: Arc<dyn ChatClient>,
    pub transcription: Arc<dyn TranscriptionClient>,
    pub speech: Arc<dyn SpeechClient>,
    pub system_prompt_path: String,
    pub upload_dir: PathBuf,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat_handler))
        .route(
            "/api/chat/voice",
            post(voice_chat_handler).layer(DefaultBodyLimit::max(AUDIO_UPLOAD_LIMIT_BYTES))
        )
        .layer(cors)
        .with_state(state)
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let text = req.text.as_deref().map(str::trim).unwrap_or("");
    if text.is_empty() {
        return Err(ApiError::InvalidInput("No text provided".to_string()));
    }

    let message = run_completion(&state, text).await?;
    Ok(Json(ChatResponse { message }))
}

async fn voice_chat_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<VoiceChatResponse>, ApiError> {
    let mut upload = None;
    while
        let Some(field) = multipart
            .next_field().await
            .map_err(|e| ApiError::InvalidInput(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("audio") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("audio").to_string();
        let bytes = field
            .bytes().await
            .map_err(|e| ApiError::InvalidInput(format!("Failed to read audio field: {}", e)))?;
        upload = Some(
            TempUpload::persist(&state.upload_dir, &file_name, &bytes).await
                .map_err(ApiError::upstream)?
        );
        break;
    }
    let upload = upload.ok_or_else(|| {
        ApiError::InvalidInput("No audio file provided".to_string())
    })?;

    let transcription = state.transcription
        .transcribe(upload.path(), upload.file_name()).await
        .map_err(ApiError::upstream)?;

    let message = run_completion(&state, &transcription).await?;

    let audio = state.speech.synthesize(&message).await.map_err(ApiError::upstream)?;

    Ok(
        Json(VoiceChatResponse {
            message,
            audio: BASE64.encode(audio),
            transcription,
        })
    )
}

/// Appends `text` as the user turn, completes against the full history, and
/// appends the assistant reply. The user turn stays in history even when
/// the provider call fails (no rollback).
async fn run_completion(state: &AppState, text: &str) -> Result<String, ApiError> {
    state.history
        .add_message(DEFAULT_CONVERSATION_ID, Role::User, text).await
        .map_err(ApiError::upstream)?;

    let system_prompt = load_system_prompt(&state.system_prompt_path).await;
    let conversation = state.history
        .get_conversation(DEFAULT_CONVERSATION_ID).await
        .map_err(ApiError::upstream)?;

    let reply = state.chat
        .complete(&system_prompt, &conversation.messages).await
        .map_err(ApiError::upstream)?;

    state.history
        .add_message(DEFAULT_CONVERSATION_ID, Role::Assistant, &reply).await
        .map_err(ApiError::upstream)?;

    Ok(reply)
}
