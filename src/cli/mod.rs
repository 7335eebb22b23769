use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    // --- Server Args ---
    /// Port for the HTTP API to listen on.
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    // --- History Store Args ---
    /// Conversation history store type (memory)
    #[arg(long, env = "HISTORY_TYPE", default_value = "memory")]
    pub history_type: String,

    // --- Chat LLM Provider Args ---
    /// Type of LLM provider for chat completion (groq, openai)
    #[arg(long, env = "CHAT_LLM_TYPE", default_value = "groq")]
    pub chat_llm_type: String,

    /// API Key for the chat LLM provider.
    #[arg(long, env = "GROQ_API_KEY", default_value = "")]
    pub chat_api_key: String,

    /// Base URL for the chat LLM provider API. Adapter default if unset.
    #[arg(long, env = "CHAT_BASE_URL")]
    pub chat_base_url: Option<String>,

    /// Model name for chat completion (e.g., llama3-8b-8192)
    #[arg(long, env = "CHAT_MODEL")]
    pub chat_model: Option<String>,

    /// Sampling temperature for chat completion.
    #[arg(long, env = "CHAT_TEMPERATURE", default_value = "0.7")]
    pub chat_temperature: f32,

    /// Maximum tokens generated per completion.
    #[arg(long, env = "CHAT_MAX_TOKENS", default_value = "1024")]
    pub chat_max_tokens: u32,

    // --- Transcription Provider Args ---
    /// API Key for the transcription provider. Reuses the chat key when empty.
    #[arg(long, env = "TRANSCRIPTION_API_KEY", default_value = "")]
    pub transcription_api_key: String,

    /// Base URL for the transcription provider API. Adapter default if unset.
    #[arg(long, env = "TRANSCRIPTION_BASE_URL")]
    pub transcription_base_url: Option<String>,

    /// Model name for speech-to-text (e.g., whisper-large-v3-turbo)
    #[arg(long, env = "TRANSCRIPTION_MODEL")]
    pub transcription_model: Option<String>,

    /// Language hint passed to the transcription model.
    #[arg(long, env = "TRANSCRIPTION_LANGUAGE", default_value = "en")]
    pub transcription_language: String,

    // --- Speech Synthesis Args ---
    /// API Key for the text-to-speech provider.
    #[arg(long, env = "UNREALSPEECH_API_KEY", default_value = "")]
    pub speech_api_key: String,

    /// Base URL for the text-to-speech provider API. Adapter default if unset.
    #[arg(long, env = "SPEECH_BASE_URL")]
    pub speech_base_url: Option<String>,

    /// Voice used for synthesized replies.
    #[arg(long, env = "SPEECH_VOICE", default_value = "Dan")]
    pub speech_voice: String,

    /// Bitrate of the synthesized audio.
    #[arg(long, env = "SPEECH_BITRATE", default_value = "192k")]
    pub speech_bitrate: String,

    /// Codec of the synthesized audio.
    #[arg(long, env = "SPEECH_CODEC", default_value = "libmp3lame")]
    pub speech_codec: String,

    // --- Prompt & Upload Args ---
    /// Path to the system prompt file, re-read on every chat request.
    #[arg(long, env = "SYSTEM_PROMPT_PATH", default_value = "system-role.txt")]
    pub system_prompt_path: String,

    /// Directory where uploaded audio is spooled before transcription.
    #[arg(long, env = "UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: String,
}
