use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

/// Media category of a candidate file, derived from its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Photo,
    Video,
    Voice,
    Other,
}

impl MediaCategory {
    /// Categories that an event can accept, in display order.
    pub const UPLOADABLE: [MediaCategory; 3] =
        [MediaCategory::Photo, MediaCategory::Video, MediaCategory::Voice];

    /// Classify a MIME type by its prefix (`image/`, `video/`, `audio/`).
    pub fn from_content_type(content_type: &str) -> Self {
        let normalized = content_type.trim().to_lowercase();
        if normalized.starts_with("image/") {
            MediaCategory::Photo
        } else if normalized.starts_with("video/") {
            MediaCategory::Video
        } else if normalized.starts_with("audio/") {
            MediaCategory::Voice
        } else {
            MediaCategory::Other
        }
    }

    /// Multipart field the backend expects files of this category under.
    pub fn form_field(&self) -> Option<&'static str> {
        match self {
            MediaCategory::Photo => Some("photos"),
            MediaCategory::Video => Some("videos"),
            MediaCategory::Voice => Some("voice_recordings"),
            MediaCategory::Other => None,
        }
    }

    /// MIME type used when a file carries none.
    pub fn fallback_content_type(&self) -> &'static str {
        match self {
            MediaCategory::Photo => "image/jpeg",
            MediaCategory::Video => "video/mp4",
            MediaCategory::Voice => "audio/mp3",
            MediaCategory::Other => "application/octet-stream",
        }
    }

    /// Singular and plural nouns for user-facing messages.
    pub fn noun(&self, count: usize) -> &'static str {
        match (self, count == 1) {
            (MediaCategory::Photo, true) => "photo",
            (MediaCategory::Photo, false) => "photos",
            (MediaCategory::Video, true) => "video",
            (MediaCategory::Video, false) => "videos",
            (MediaCategory::Voice, true) => "voice recording",
            (MediaCategory::Voice, false) => "voice recordings",
            (MediaCategory::Other, true) => "file",
            (MediaCategory::Other, false) => "files",
        }
    }
}

impl Display for MediaCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MediaCategory::Photo => write!(f, "photo"),
            MediaCategory::Video => write!(f, "video"),
            MediaCategory::Voice => write!(f, "voice"),
            MediaCategory::Other => write!(f, "other"),
        }
    }
}

/// Where the bytes of a candidate file live until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    Memory(Bytes),
    Disk(PathBuf),
}

/// A file the guest picked or dropped onto the contribution form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub category: MediaCategory,
    pub source: FileSource,
}

impl CandidateFile {
    /// Build a candidate, classifying it by content type.
    ///
    /// An empty content type is guessed from the file name's extension.
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        size_bytes: u64,
        source: FileSource,
    ) -> Self {
        let name = name.into();
        let mut content_type = content_type.into().trim().to_string();
        if content_type.is_empty() {
            content_type = mime_guess::from_path(&name)
                .first()
                .map(|mime| mime.essence_str().to_string())
                .unwrap_or_default();
        }
        let category = MediaCategory::from_content_type(&content_type);

        Self {
            name,
            content_type,
            size_bytes,
            category,
            source,
        }
    }

    /// Build a candidate from in-memory bytes; the size is taken from the data.
    pub fn from_bytes(
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        let data = data.into();
        let size = data.len() as u64;
        Self::new(name, content_type, size, FileSource::Memory(data))
    }

    /// Content type to send, falling back to the category default.
    pub fn effective_content_type(&self) -> &str {
        if self.content_type.is_empty() {
            self.category.fallback_content_type()
        } else {
            &self.content_type
        }
    }
}
