//! Observer seam between the quota manager and whatever renders it
//!
//! The manager never renders anything itself. Views (a web page, the CLI,
//! a test recorder) implement [`SelectionObserver`] and are told about every
//! accepted change and every notice worth showing the guest.

use neberku_core::format_file_size;
use neberku_core::models::{EventMediaPolicy, MediaCategory};
use serde::Serialize;

use crate::capacity::{selection_summary, CapacityMessage};
use crate::selection::SelectionState;

/// One row of the file preview list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewEntry {
    pub index: usize,
    pub name: String,
    pub category: MediaCategory,
    pub size_label: String,
}

/// Everything a view needs to redraw the selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSnapshot {
    pub files: Vec<PreviewEntry>,
    pub summary: Option<String>,
    pub capacity: CapacityMessage,
}

impl SelectionSnapshot {
    pub fn capture(policy: &EventMediaPolicy, selection: &SelectionState) -> Self {
        let files = selection
            .iter()
            .enumerate()
            .map(|(index, file)| PreviewEntry {
                index,
                name: file.name.clone(),
                category: file.category,
                size_label: format_file_size(file.size_bytes),
            })
            .collect();

        Self {
            files,
            summary: selection_summary(selection),
            capacity: CapacityMessage::for_selection(policy, selection),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A message for the guest: a rejection, progress or the final outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Receives selection changes and notices from a quota manager
pub trait SelectionObserver: Send + Sync {
    /// Called after every accepted change to the selection
    fn selection_changed(&self, snapshot: &SelectionSnapshot);

    /// Called for rejections, progress and submission outcomes
    fn notice(&self, notice: &Notice);
}

/// No-op implementation for headless use
pub struct NoOpObserver;

impl SelectionObserver for NoOpObserver {
    fn selection_changed(&self, _snapshot: &SelectionSnapshot) {}

    fn notice(&self, _notice: &Notice) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use neberku_core::models::{CandidateFile, FileSource};

    #[test]
    fn test_snapshot_preview_entries() {
        let mut selection = SelectionState::new();
        selection.extend(vec![
            CandidateFile::new("cake.jpg", "image/jpeg", 1536, FileSource::Disk("cake.jpg".into())),
            CandidateFile::new("toast.m4a", "audio/mp4", 0, FileSource::Disk("toast.m4a".into())),
        ]);
        let policy = EventMediaPolicy {
            max_posts_per_guest: 5,
            ..Default::default()
        };

        let snapshot = SelectionSnapshot::capture(&policy, &selection);
        assert_eq!(snapshot.files.len(), 2);
        assert_eq!(snapshot.files[0].size_label, "1.5 KB");
        assert_eq!(snapshot.files[1].index, 1);
        assert_eq!(snapshot.files[1].category, MediaCategory::Voice);
        assert_eq!(snapshot.files[1].size_label, "0 Bytes");
        assert_eq!(
            snapshot.capacity,
            CapacityMessage::Remaining { remaining: 3, limit: 5 }
        );

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["capacity"]["kind"], "remaining");
    }
}
