use anyhow::{Context, Result};
use neberku_core::error::{ErrorMetadata, UploadError};
use neberku_core::models::{CandidateFile, FileSource};
use neberku_upload::{Notice, NoticeLevel, SelectionObserver, SelectionSnapshot};
use std::path::{Component, Path};

/// Read a local file's metadata into a candidate for the selection.
///
/// The bytes stay on disk until the contribution is sent.
pub async fn load_candidate(path: &Path) -> Result<CandidateFile> {
    if path.components().any(|c| c == Component::ParentDir) {
        return Err(anyhow::anyhow!("Invalid input: {}", path.display()));
    }

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.trim().is_empty())
        .with_context(|| format!("Missing file name: {}", path.display()))?
        .to_string();

    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    if !metadata.is_file() {
        return Err(anyhow::anyhow!("Not a file: {}", path.display()));
    }

    let content_type = mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_default();

    Ok(CandidateFile::new(
        name,
        content_type,
        metadata.len(),
        FileSource::Disk(path.to_path_buf()),
    ))
}

/// JSON body printed when the manager rejects an action.
pub fn rejection_json(err: &UploadError) -> serde_json::Value {
    serde_json::json!({
        "error_code": err.error_code(),
        "error_type": err.error_type(),
        "message": err.client_message(),
        "suggested_action": err.suggested_action(),
        "recoverable": err.is_recoverable(),
    })
}

/// Observer that reports selection changes and notices through `tracing`.
pub struct TracingObserver;

impl SelectionObserver for TracingObserver {
    fn selection_changed(&self, snapshot: &SelectionSnapshot) {
        tracing::info!(
            files = snapshot.files.len(),
            summary = snapshot.summary.as_deref().unwrap_or("nothing selected"),
            capacity = %snapshot.capacity.render(),
            "Selection updated"
        );
    }

    fn notice(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Info | NoticeLevel::Success => tracing::info!("{}", notice.message),
            NoticeLevel::Warning => tracing::warn!("{}", notice.message),
            NoticeLevel::Error => tracing::error!("{}", notice.message),
        }
    }
}

/// Initialize tracing for the CLI.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use neberku_core::models::MediaCategory;

    #[tokio::test]
    async fn load_candidate_guesses_type_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("first-dance.mp4");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        let file = load_candidate(&path).await.unwrap();
        assert_eq!(file.name, "first-dance.mp4");
        assert_eq!(file.content_type, "video/mp4");
        assert_eq!(file.category, MediaCategory::Video);
        assert_eq!(file.size_bytes, 2048);
        assert_eq!(file.source, FileSource::Disk(path));
    }

    #[tokio::test]
    async fn load_candidate_unknown_extension_is_other() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.unknownext");
        std::fs::write(&path, b"hello").unwrap();

        let file = load_candidate(&path).await.unwrap();
        assert_eq!(file.category, MediaCategory::Other);
    }

    #[tokio::test]
    async fn load_candidate_rejects_parent_dir() {
        let err = load_candidate(Path::new("../secret.jpg")).await.unwrap_err();
        assert!(err.to_string().contains("Invalid input"));
    }

    #[tokio::test]
    async fn load_candidate_rejects_missing_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_candidate(&dir.path().join("missing.jpg")).await.is_err());
        assert!(load_candidate(dir.path()).await.is_err());
    }

    #[test]
    fn rejection_json_carries_metadata() {
        let value = rejection_json(&UploadError::NoMediaSelected);
        assert_eq!(value["error_type"], "NoMediaSelected");
        assert_eq!(value["recoverable"], false);
        assert!(value["message"].as_str().unwrap().contains("at least one"));
    }
}
