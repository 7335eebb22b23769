use log::warn;

/// Fallback used whenever the prompt file is missing or unreadable.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";

/// Reads the system prompt from disk and returns its trimmed contents.
///
/// Called fresh on every chat request so the prompt can be edited without
/// restarting the process. Never fails: any read error is logged and the
/// default prompt is returned instead.
pub async fn load_system_prompt(path: &str) -> String {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents.trim().to_string(),
        Err(e) => {
            warn!("Failed to read system prompt file '{}': {}", path, e);
            DEFAULT_SYSTEM_PROMPT.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn returns_trimmed_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "  You are a pirate.  \n\n").unwrap();

        let prompt = load_system_prompt(file.path().to_str().unwrap()).await;
        assert_eq!(prompt, "You are a pirate.");
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_default() {
        let prompt = load_system_prompt("/nonexistent/system-role.txt").await;
        assert_eq!(prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[tokio::test]
    async fn whitespace_only_file_trims_to_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "   \n\t\n").unwrap();

        let prompt = load_system_prompt(file.path().to_str().unwrap()).await;
        assert_eq!(prompt, "");
    }
}
