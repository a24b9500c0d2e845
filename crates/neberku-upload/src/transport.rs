//! Submission transport seam
//!
//! The quota manager builds a [`SubmissionPayload`] and hands it to a
//! transport. The HTTP client implements this trait; tests use in-memory
//! doubles.

use async_trait::async_trait;
use neberku_core::error::UploadError;
use neberku_core::models::{SubmissionPayload, SubmissionReceipt};

/// Failure reported by a transport after a submission left the client
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    /// HTTP status when the backend answered, `None` for network failures.
    pub status: Option<u16>,
    pub message: String,
}

impl TransportError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<TransportError> for UploadError {
    fn from(err: TransportError) -> Self {
        UploadError::SubmissionTransport {
            status: err.status,
            message: err.message,
        }
    }
}

/// Sends a guest contribution to the backend
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload)
        -> Result<SubmissionReceipt, TransportError>;
}

/// Lifecycle of one contribution form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing selected
    Empty,
    /// At least one file selected, not submitted yet
    Accumulating,
    /// A submission is in flight
    Submitting,
}

/// Marks the session as submitting and restores `Accumulating` on drop.
///
/// Success is applied by the caller after the guard is gone, so a dropped
/// submit future always leaves the selection usable.
pub(crate) struct InFlightGuard<'a> {
    state: &'a mut SessionState,
}

impl<'a> InFlightGuard<'a> {
    pub(crate) fn enter(state: &'a mut SessionState) -> Self {
        *state = SessionState::Submitting;
        Self { state }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        *self.state = SessionState::Accumulating;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_restores_accumulating() {
        let mut state = SessionState::Accumulating;
        {
            let guard = InFlightGuard::enter(&mut state);
            assert_eq!(*guard.state, SessionState::Submitting);
        }
        assert_eq!(state, SessionState::Accumulating);
    }

    #[test]
    fn test_transport_error_maps_to_upload_error() {
        let err: UploadError = TransportError::new(Some(400), "Phone number is required").into();
        assert_eq!(
            err,
            UploadError::SubmissionTransport {
                status: Some(400),
                message: "Phone number is required".to_string()
            }
        );
    }
}
