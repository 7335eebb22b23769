use log::warn;
use std::path::{ Path, PathBuf };
use uuid::Uuid;

/// Scoped temp file holding one uploaded audio payload.
///
/// The file is removed when the guard drops, so every exit path of a
/// request handler (success, provider failure, transcription failure)
/// releases it. Removal failure is logged, never surfaced.
pub struct TempUpload {
    path: PathBuf,
    file_name: String,
}

impl TempUpload {
    /// Spools `bytes` to a uuid-named file under `dir`. `file_name` is the
    /// original upload name, kept as a hint for the transcription provider.
    pub async fn persist(
        dir: &Path,
        file_name: &str,
        bytes: &[u8]
    ) -> Result<Self, std::io::Error> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(Uuid::new_v4().to_string());
        tokio::fs::write(&path, bytes).await?;

        Ok(Self {
            path,
            file_name: file_name.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!("Failed to remove uploaded audio '{}': {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn persist_writes_the_payload() {
        let dir = tempfile::tempdir().unwrap();
        let upload = TempUpload::persist(dir.path(), "clip.ogg", b"audio-bytes").await.unwrap();

        assert_eq!(upload.file_name(), "clip.ogg");
        assert_eq!(std::fs::read(upload.path()).unwrap(), b"audio-bytes");
    }

    #[tokio::test]
    async fn drop_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let upload = TempUpload::persist(dir.path(), "clip.ogg", b"audio-bytes").await.unwrap();
        let path = upload.path().to_path_buf();

        assert!(path.exists());
        drop(upload);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn uploads_get_distinct_names() {
        let dir = tempfile::tempdir().unwrap();
        let a = TempUpload::persist(dir.path(), "a.ogg", b"a").await.unwrap();
        let b = TempUpload::persist(dir.path(), "b.ogg", b"b").await.unwrap();

        assert_ne!(a.path(), b.path());
    }
}
