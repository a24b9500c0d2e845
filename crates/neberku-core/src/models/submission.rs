use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::media::{CandidateFile, MediaCategory};

/// Request body for one guest contribution, files grouped by multipart field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub event_id: Uuid,
    pub guest_name: String,
    pub guest_phone: String,
    pub wish_text: String,
    pub photos: Vec<CandidateFile>,
    pub videos: Vec<CandidateFile>,
    pub voice_recordings: Vec<CandidateFile>,
}

impl SubmissionPayload {
    pub fn total_files(&self) -> usize {
        self.photos.len() + self.videos.len() + self.voice_recordings.len()
    }

    /// Files paired with the multipart field they are sent under.
    pub fn file_parts(&self) -> impl Iterator<Item = (&'static str, &CandidateFile)> {
        self.photos
            .iter()
            .map(|file| ("photos", file))
            .chain(self.videos.iter().map(|file| ("videos", file)))
            .chain(
                self.voice_recordings
                    .iter()
                    .map(|file| ("voice_recordings", file)),
            )
    }

    /// Progress line shown while the request is in flight.
    pub fn upload_summary(&self) -> String {
        format!(
            "Uploading {} {} ({} {}, {} {}, {} {})...",
            self.total_files(),
            MediaCategory::Other.noun(self.total_files()),
            self.photos.len(),
            MediaCategory::Photo.noun(self.photos.len()),
            self.videos.len(),
            MediaCategory::Video.noun(self.videos.len()),
            self.voice_recordings.len(),
            MediaCategory::Voice.noun(self.voice_recordings.len()),
        )
    }
}

/// Guest post as echoed back by the backend after a successful submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub event: Uuid,
    #[serde(default)]
    pub wish_text: String,
    #[serde(default)]
    pub total_media_files: u32,
    #[serde(default)]
    pub photo_count: u32,
    #[serde(default)]
    pub video_count: u32,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileSource;

    fn file(name: &str, content_type: &str) -> CandidateFile {
        CandidateFile::new(name, content_type, 1, FileSource::Disk(name.into()))
    }

    #[test]
    fn test_file_parts_follow_field_order() {
        let payload = SubmissionPayload {
            event_id: Uuid::nil(),
            guest_name: "Abebe".to_string(),
            guest_phone: "0911".to_string(),
            wish_text: "Congrats".to_string(),
            photos: vec![file("a.jpg", "image/jpeg"), file("b.png", "image/png")],
            videos: vec![],
            voice_recordings: vec![file("c.mp3", "audio/mpeg")],
        };

        let parts: Vec<(&str, &str)> = payload
            .file_parts()
            .map(|(field, f)| (field, f.name.as_str()))
            .collect();
        assert_eq!(
            parts,
            vec![
                ("photos", "a.jpg"),
                ("photos", "b.png"),
                ("voice_recordings", "c.mp3")
            ]
        );
        assert_eq!(
            payload.upload_summary(),
            "Uploading 3 files (2 photos, 0 videos, 1 voice recording)..."
        );
    }

    #[test]
    fn test_receipt_tolerates_missing_counters() {
        let json = r#"{
            "id": "0b7c8d7e-1f0a-4c43-8d0e-3b2a1c9f5e10",
            "event": "6f1d6a4e-8c1b-4a5e-9a55-2f0d1c6b7e01",
            "created_at": "2025-05-01T10:00:00Z"
        }"#;
        let receipt: SubmissionReceipt = serde_json::from_str(json).unwrap();
        assert_eq!(receipt.total_media_files, 0);
        assert!(!receipt.is_approved);
        assert!(receipt.created_at.is_some());
    }
}
