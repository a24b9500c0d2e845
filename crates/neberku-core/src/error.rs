//! Error types module
//!
//! All rejections raised while a guest builds a contribution are unified under
//! the `UploadError` enum: capability, size and quota checks on the selection,
//! the final checks before submission, and the failure of the request itself.
//! None of them is fatal; each one describes how it should be presented to the
//! guest through the `ErrorMetadata` trait.

use serde::Serialize;

use crate::models::MediaCategory;
use crate::units::format_file_size;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected rejections like an empty form
    Debug,
    /// Warning level - for policy limits the guest ran into
    Warn,
    /// Error level - for failures outside the guest's control
    Error,
}

/// Metadata for user-facing error reporting.
/// Errors describe their own presentation so every front end shows them the same way.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "GUEST_QUOTA_EXCEEDED")
    fn error_code(&self) -> &'static str;

    /// Whether retrying the same action unchanged can succeed
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the guest
    fn suggested_action(&self) -> Option<&'static str>;

    /// Message shown to the guest
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// A file rejected because it is larger than its category allows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OversizedFile {
    pub name: String,
    pub category: MediaCategory,
    pub size_bytes: u64,
    pub max_bytes: u64,
}

/// One media type whose per-post cap a batch would exceed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeQuotaViolation {
    pub category: MediaCategory,
    pub limit: u32,
    pub current: usize,
    pub attempted: usize,
}

fn describe_categories(categories: &[MediaCategory]) -> String {
    categories
        .iter()
        .map(|category| category.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_oversized(files: &[OversizedFile]) -> String {
    files
        .iter()
        .map(|file| {
            format!(
                "{} ({} bytes, max {} bytes)",
                file.name, file.size_bytes, file.max_bytes
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_violations(violations: &[TypeQuotaViolation]) -> String {
    violations
        .iter()
        .map(|v| {
            format!(
                "{} {}/{} with {} more",
                v.category, v.current, v.limit, v.attempted
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("Media types disabled for this event: {}", describe_categories(.blocked))]
    AllTypesDisabled { blocked: Vec<MediaCategory> },

    #[error("File size limit exceeded: {}", describe_oversized(.files))]
    SizeLimitExceeded { files: Vec<OversizedFile> },

    #[error("Guest quota exceeded: {current} selected, {attempted} attempted, limit {limit}")]
    GuestQuotaExceeded {
        limit: u32,
        current: usize,
        attempted: usize,
    },

    #[error("Media type quota exceeded: {}", describe_violations(.violations))]
    TypeQuotaExceeded { violations: Vec<TypeQuotaViolation> },

    #[error("No selected file at index {index} (selection has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No media selected")]
    NoMediaSelected,

    #[error("Event does not accept wishes")]
    WishesDisabled,

    #[error("Event does not accept any media type")]
    NoMediaTypesEnabled,

    #[error("Selection of {selected} files exceeds combined per-type limit {limit}")]
    TotalExceedsCombinedLimit { limit: u32, selected: usize },

    #[error("Invalid guest details: {0}")]
    InvalidGuestInfo(String),

    #[error("Wish text is empty")]
    EmptyWishText,

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("Submission failed: {message}")]
    SubmissionTransport {
        status: Option<u16>,
        message: String,
    },
}

impl From<validator::ValidationErrors> for UploadError {
    fn from(err: validator::ValidationErrors) -> Self {
        UploadError::InvalidGuestInfo(err.to_string())
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
/// client_message stays per-variant for dynamic content.
fn upload_error_static_metadata(
    err: &UploadError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        UploadError::AllTypesDisabled { .. } => (
            "CAPABILITY_DISABLED",
            false,
            Some("Choose photos, videos or voice recordings the event accepts"),
            LogLevel::Warn,
        ),
        UploadError::SizeLimitExceeded { .. } => (
            "SIZE_LIMIT_EXCEEDED",
            false,
            Some("Pick a smaller file"),
            LogLevel::Warn,
        ),
        UploadError::GuestQuotaExceeded { .. } => (
            "GUEST_QUOTA_EXCEEDED",
            false,
            Some("Remove some files or add fewer at once"),
            LogLevel::Warn,
        ),
        UploadError::TypeQuotaExceeded { .. } => (
            "TYPE_QUOTA_EXCEEDED",
            false,
            Some("Remove some files of the listed types"),
            LogLevel::Warn,
        ),
        UploadError::IndexOutOfRange { .. } => (
            "INDEX_OUT_OF_RANGE",
            false,
            None,
            LogLevel::Debug,
        ),
        UploadError::NoMediaSelected => (
            "NO_MEDIA_SELECTED",
            false,
            Some("Add at least one photo, video or voice recording"),
            LogLevel::Debug,
        ),
        UploadError::WishesDisabled => (
            "WISHES_DISABLED",
            false,
            Some("Contact the event host"),
            LogLevel::Debug,
        ),
        UploadError::NoMediaTypesEnabled => (
            "NO_MEDIA_TYPES_ENABLED",
            false,
            Some("Contact the event host"),
            LogLevel::Debug,
        ),
        UploadError::TotalExceedsCombinedLimit { .. } => (
            "TOTAL_EXCEEDS_COMBINED_LIMIT",
            false,
            Some("Remove some files before submitting"),
            LogLevel::Warn,
        ),
        UploadError::InvalidGuestInfo(_) => (
            "INVALID_GUEST_INFO",
            false,
            Some("Please fill in all required fields"),
            LogLevel::Debug,
        ),
        UploadError::EmptyWishText => (
            "EMPTY_WISH_TEXT",
            false,
            Some("Please fill in all required fields"),
            LogLevel::Debug,
        ),
        UploadError::SubmissionInProgress => (
            "SUBMISSION_IN_PROGRESS",
            true,
            Some("Wait for the current upload to finish"),
            LogLevel::Debug,
        ),
        UploadError::SubmissionTransport { .. } => (
            "SUBMISSION_TRANSPORT_ERROR",
            true,
            Some("Check your connection and submit again"),
            LogLevel::Error,
        ),
    }
}

impl UploadError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            UploadError::AllTypesDisabled { .. } => "AllTypesDisabled",
            UploadError::SizeLimitExceeded { .. } => "SizeLimitExceeded",
            UploadError::GuestQuotaExceeded { .. } => "GuestQuotaExceeded",
            UploadError::TypeQuotaExceeded { .. } => "TypeQuotaExceeded",
            UploadError::IndexOutOfRange { .. } => "IndexOutOfRange",
            UploadError::NoMediaSelected => "NoMediaSelected",
            UploadError::WishesDisabled => "WishesDisabled",
            UploadError::NoMediaTypesEnabled => "NoMediaTypesEnabled",
            UploadError::TotalExceedsCombinedLimit { .. } => "TotalExceedsCombinedLimit",
            UploadError::InvalidGuestInfo(_) => "InvalidGuestInfo",
            UploadError::EmptyWishText => "EmptyWishText",
            UploadError::SubmissionInProgress => "SubmissionInProgress",
            UploadError::SubmissionTransport { .. } => "SubmissionTransport",
        }
    }

    /// Whether the error was raised before any request left the client.
    pub fn is_local(&self) -> bool {
        !matches!(self, UploadError::SubmissionTransport { .. })
    }
}

impl ErrorMetadata for UploadError {
    fn error_code(&self) -> &'static str {
        upload_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        upload_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        upload_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        upload_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            UploadError::AllTypesDisabled { blocked } => {
                if !blocked.is_empty() && blocked.iter().all(|c| *c == MediaCategory::Other) {
                    return "Only photos, videos and voice recordings can be uploaded.".to_string();
                }
                let mut names: Vec<&str> = blocked
                    .iter()
                    .filter(|c| **c != MediaCategory::Other)
                    .map(|c| c.noun(2))
                    .collect();
                if blocked.contains(&MediaCategory::Other) {
                    names.push("other file types");
                }
                format!(
                    "This event does not accept {}.",
                    if names.is_empty() {
                        "these files".to_string()
                    } else {
                        names.join(" or ")
                    }
                )
            }
            UploadError::SizeLimitExceeded { files } => files
                .iter()
                .map(|file| {
                    format!(
                        "File '{}' is too large ({}). Maximum allowed size is {}.",
                        file.name,
                        format_file_size(file.size_bytes),
                        format_file_size(file.max_bytes)
                    )
                })
                .collect::<Vec<_>>()
                .join(" "),
            UploadError::GuestQuotaExceeded {
                limit,
                current,
                attempted,
            } => format!(
                "Cannot add {} file{}. You currently have {} file{} and maximum {} files allowed.",
                attempted,
                if *attempted == 1 { "" } else { "s" },
                current,
                if *current == 1 { "" } else { "s" },
                limit
            ),
            UploadError::TypeQuotaExceeded { violations } => violations
                .iter()
                .map(|v| {
                    format!(
                        "Maximum {} per post ({}) exceeded. You have already selected {} and are trying to add {} more.",
                        v.category.noun(2),
                        v.limit,
                        v.current,
                        v.attempted
                    )
                })
                .collect::<Vec<_>>()
                .join(" "),
            UploadError::IndexOutOfRange { .. } => "That file is no longer selected.".to_string(),
            UploadError::NoMediaSelected => {
                "Please select at least one media file to upload.".to_string()
            }
            UploadError::WishesDisabled => "This event does not allow wishes.".to_string(),
            UploadError::NoMediaTypesEnabled => {
                "This event does not allow media uploads.".to_string()
            }
            UploadError::TotalExceedsCombinedLimit { limit, .. } => {
                format!("Maximum {} media files allowed per contribution.", limit)
            }
            UploadError::InvalidGuestInfo(_) | UploadError::EmptyWishText => {
                "Please fill in all required fields.".to_string()
            }
            UploadError::SubmissionInProgress => {
                "Your contribution is already being uploaded.".to_string()
            }
            UploadError::SubmissionTransport { message, .. } => {
                format!("Failed to submit contribution: {}", message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_guest_quota() {
        let err = UploadError::GuestQuotaExceeded {
            limit: 2,
            current: 1,
            attempted: 2,
        };
        assert_eq!(err.error_code(), "GUEST_QUOTA_EXCEEDED");
        assert!(!err.is_recoverable());
        assert_eq!(
            err.client_message(),
            "Cannot add 2 files. You currently have 1 file and maximum 2 files allowed."
        );
        assert_eq!(err.log_level(), LogLevel::Warn);
        assert!(err.is_local());
    }

    #[test]
    fn test_error_metadata_size_limit_lists_every_file() {
        let err = UploadError::SizeLimitExceeded {
            files: vec![OversizedFile {
                name: "beach.jpg".to_string(),
                category: MediaCategory::Photo,
                size_bytes: 15 * 1024 * 1024,
                max_bytes: 10 * 1024 * 1024,
            }],
        };
        let message = err.client_message();
        assert!(message.contains("beach.jpg"));
        assert!(message.contains("15 MB"));
        assert!(message.contains("10 MB"));
        assert!(err.to_string().contains("15728640"));
    }

    #[test]
    fn test_error_metadata_type_quota_mentions_all_types() {
        let err = UploadError::TypeQuotaExceeded {
            violations: vec![
                TypeQuotaViolation {
                    category: MediaCategory::Photo,
                    limit: 1,
                    current: 1,
                    attempted: 1,
                },
                TypeQuotaViolation {
                    category: MediaCategory::Voice,
                    limit: 0,
                    current: 0,
                    attempted: 2,
                },
            ],
        };
        let message = err.client_message();
        assert!(message.contains("Maximum photos per post (1)"));
        assert!(message.contains("Maximum voice recordings per post (0)"));
    }

    #[test]
    fn test_error_metadata_transport_is_recoverable() {
        let err = UploadError::SubmissionTransport {
            status: Some(502),
            message: "Bad gateway".to_string(),
        };
        assert_eq!(err.error_code(), "SUBMISSION_TRANSPORT_ERROR");
        assert!(err.is_recoverable());
        assert!(!err.is_local());
        assert_eq!(err.log_level(), LogLevel::Error);
        assert_eq!(
            err.suggested_action(),
            Some("Check your connection and submit again")
        );
    }

    #[test]
    fn test_capability_disabled_message() {
        let err = UploadError::AllTypesDisabled {
            blocked: vec![MediaCategory::Voice],
        };
        assert_eq!(err.error_code(), "CAPABILITY_DISABLED");
        assert_eq!(err.error_type(), "AllTypesDisabled");
        assert_eq!(
            err.client_message(),
            "This event does not accept voice recordings."
        );
    }

    #[test]
    fn test_unsupported_file_types_message() {
        let err = UploadError::AllTypesDisabled {
            blocked: vec![MediaCategory::Other],
        };
        assert_eq!(
            err.client_message(),
            "Only photos, videos and voice recordings can be uploaded."
        );

        let err = UploadError::AllTypesDisabled {
            blocked: vec![MediaCategory::Voice, MediaCategory::Other],
        };
        assert_eq!(
            err.client_message(),
            "This event does not accept voice recordings or other file types."
        );
    }
}
