//! Guest upload quota manager
//!
//! One manager backs one contribution form. It owns the guest's selection,
//! enforces the event's capability, size and quota rules on every proposed
//! batch, and drives the submission lifecycle. Views subscribe as
//! [`SelectionObserver`]s.

use std::sync::Arc;

use neberku_core::error::{ErrorMetadata, LogLevel, UploadError};
use neberku_core::models::{
    CandidateFile, EventMediaPolicy, GuestInfo, MediaCategory, SubmissionPayload,
    SubmissionReceipt,
};
use neberku_core::validation::validate_contribution_fields;
use serde::Serialize;
use uuid::Uuid;

use crate::capacity::CapacityMessage;
use crate::observer::{Notice, SelectionObserver, SelectionSnapshot};
use crate::rules::{BlockedFile, QuotaValidator};
use crate::selection::SelectionState;
use crate::transport::{InFlightGuard, SessionState, SubmissionTransport};

/// Result of an accepted `propose_files` call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProposalOutcome {
    /// Files appended to the selection
    pub applied: usize,
    /// Files dropped because the event does not accept their type
    pub blocked: Vec<BlockedFile>,
}

pub struct GuestUploadQuotaManager {
    event_id: Uuid,
    policy: EventMediaPolicy,
    selection: SelectionState,
    state: SessionState,
    observers: Vec<Arc<dyn SelectionObserver>>,
}

impl GuestUploadQuotaManager {
    pub fn new(event_id: Uuid, policy: EventMediaPolicy) -> Self {
        Self {
            event_id,
            policy,
            selection: SelectionState::new(),
            state: SessionState::Empty,
            observers: Vec::new(),
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn policy(&self) -> &EventMediaPolicy {
        &self.policy
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn capacity(&self) -> CapacityMessage {
        CapacityMessage::for_selection(&self.policy, &self.selection)
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot::capture(&self.policy, &self.selection)
    }

    /// Register a view; it immediately receives the current snapshot.
    pub fn subscribe(&mut self, observer: Arc<dyn SelectionObserver>) {
        observer.selection_changed(&self.snapshot());
        self.observers.push(observer);
    }

    /// Validate a batch of files and append it to the selection.
    ///
    /// Checks run in order: capability, size, quota. A batch that fails any
    /// check leaves the selection untouched. Files of a type the event does
    /// not accept are dropped as long as something else in the batch
    /// survives.
    pub fn propose_files<I>(&mut self, files: I) -> Result<ProposalOutcome, UploadError>
    where
        I: IntoIterator<Item = CandidateFile>,
    {
        let batch: Vec<CandidateFile> = files.into_iter().collect();
        if batch.is_empty() {
            return Ok(ProposalOutcome::default());
        }

        let validator = QuotaValidator::new(&self.policy);
        let checked = validator.filter_capabilities(batch).and_then(|(accepted, blocked)| {
            validator.check_sizes(&accepted)?;
            validator.check_quota(&self.selection, &accepted)?;
            Ok((accepted, blocked))
        });

        let (accepted, blocked) = match checked {
            Ok(checked) => checked,
            Err(err) => {
                self.reject(&err);
                return Err(err);
            }
        };

        let applied = accepted.len();
        self.selection.extend(accepted);
        self.refresh_state();

        tracing::debug!(
            event_id = %self.event_id,
            applied = applied,
            blocked = blocked.len(),
            selected = self.selection.len(),
            "Files added to selection"
        );

        if !blocked.is_empty() {
            let names: Vec<&str> = blocked.iter().map(|file| file.name.as_str()).collect();
            self.broadcast_notice(&Notice::warning(format!(
                "Skipped {} file(s) this event does not accept: {}",
                blocked.len(),
                names.join(", ")
            )));
        }
        self.broadcast_notice(&Notice::success(format!(
            "Successfully added {} file(s)",
            applied
        )));
        self.broadcast_snapshot();

        Ok(ProposalOutcome { applied, blocked })
    }

    /// Remove the file at `index`, releasing its quota.
    pub fn remove_file(&mut self, index: usize) -> Result<CandidateFile, UploadError> {
        let len = self.selection.len();
        let Some(removed) = self.selection.remove(index) else {
            let err = UploadError::IndexOutOfRange { index, len };
            self.reject(&err);
            return Err(err);
        };

        self.refresh_state();
        tracing::debug!(
            event_id = %self.event_id,
            file_name = %removed.name,
            selected = self.selection.len(),
            "File removed from selection"
        );
        self.broadcast_notice(&Notice::success("File removed successfully"));
        self.broadcast_snapshot();

        Ok(removed)
    }

    /// Build the request for the current selection without sending it.
    pub fn build_submission(
        &self,
        guest: &GuestInfo,
        wish_text: &str,
    ) -> Result<SubmissionPayload, UploadError> {
        QuotaValidator::new(&self.policy).check_submission(&self.selection)?;
        let guest = validate_contribution_fields(guest, wish_text)?;

        Ok(SubmissionPayload {
            event_id: self.event_id,
            guest_name: guest.name,
            guest_phone: guest.phone,
            wish_text: wish_text.trim().to_string(),
            photos: self.selection.files_of(MediaCategory::Photo),
            videos: self.selection.files_of(MediaCategory::Video),
            voice_recordings: self.selection.files_of(MediaCategory::Voice),
        })
    }

    /// Build and send the contribution.
    ///
    /// On success the selection is cleared. On any failure the selection is
    /// kept so the guest can fix it or retry.
    ///
    /// `&mut self` already rules out two submissions at once, and the in-flight
    /// guard restores the state when a submit future is dropped. The session
    /// can only stay `Submitting` if such a future is leaked; it then refuses
    /// with `SubmissionInProgress` until [`reset`](Self::reset).
    pub async fn submit<T>(
        &mut self,
        transport: &T,
        guest: &GuestInfo,
        wish_text: &str,
    ) -> Result<SubmissionReceipt, UploadError>
    where
        T: SubmissionTransport + ?Sized,
    {
        if self.state == SessionState::Submitting {
            return Err(UploadError::SubmissionInProgress);
        }

        let payload = match self.build_submission(guest, wish_text) {
            Ok(payload) => payload,
            Err(err) => {
                self.reject(&err);
                return Err(err);
            }
        };

        tracing::info!(
            event_id = %self.event_id,
            photos = payload.photos.len(),
            videos = payload.videos.len(),
            voice_recordings = payload.voice_recordings.len(),
            "Submitting guest contribution"
        );
        self.broadcast_notice(&Notice::info(payload.upload_summary()));

        let result = {
            let _guard = InFlightGuard::enter(&mut self.state);
            transport.submit(&payload).await
        };

        match result {
            Ok(receipt) => {
                tracing::info!(
                    event_id = %self.event_id,
                    post_id = %receipt.id,
                    total_media_files = receipt.total_media_files,
                    "Guest contribution submitted"
                );
                self.selection.clear();
                self.refresh_state();
                self.broadcast_notice(&Notice::success("Contribution submitted successfully!"));
                self.broadcast_snapshot();
                Ok(receipt)
            }
            Err(err) => {
                let err = UploadError::from(err);
                self.reject(&err);
                Err(err)
            }
        }
    }

    /// Drop the whole selection and start over. Also clears a stuck `Submitting` state.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.state = SessionState::Empty;
        self.broadcast_snapshot();
    }

    fn refresh_state(&mut self) {
        self.state = if self.selection.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Accumulating
        };
    }

    fn reject(&self, err: &UploadError) {
        match err.log_level() {
            LogLevel::Error => tracing::error!(
                event_id = %self.event_id,
                error_code = err.error_code(),
                error = %err,
                "Guest upload failed"
            ),
            LogLevel::Warn => tracing::warn!(
                event_id = %self.event_id,
                error_code = err.error_code(),
                error = %err,
                "Guest upload rejected"
            ),
            LogLevel::Debug => tracing::debug!(
                event_id = %self.event_id,
                error_code = err.error_code(),
                error = %err,
                "Guest upload rejected"
            ),
        }

        let notice = if err.is_local() {
            Notice::warning(err.client_message())
        } else {
            Notice::error(err.client_message())
        };
        self.broadcast_notice(&notice);
    }

    fn broadcast_snapshot(&self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &self.observers {
            observer.selection_changed(&snapshot);
        }
    }

    fn broadcast_notice(&self, notice: &Notice) {
        for observer in &self.observers {
            observer.notice(notice);
        }
    }
}
