//! Neberku Core Library
//!
//! This crate provides the domain models, error taxonomy, configuration and
//! validation shared by the Neberku guest upload components.

pub mod config;
pub mod error;
pub mod models;
pub mod units;
pub mod validation;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{ErrorMetadata, LogLevel, OversizedFile, TypeQuotaViolation, UploadError};
pub use models::{
    CandidateFile, EventMediaPolicy, EventPolicyResponse, FileSource, GuestInfo, MediaCategory,
    SubmissionPayload, SubmissionReceipt,
};
pub use units::{format_file_size, megabytes_to_bytes};
