//! Neberku guest upload
//!
//! Selection, quota enforcement and submission lifecycle for a guest's
//! contribution to an event. [`GuestUploadQuotaManager`] is the entry point.

pub mod capacity;
pub mod manager;
pub mod observer;
pub mod rules;
pub mod selection;
pub mod transport;

pub use capacity::{selection_summary, CapacityMessage, TypeCapacity};
pub use manager::{GuestUploadQuotaManager, ProposalOutcome};
pub use observer::{NoOpObserver, Notice, NoticeLevel, PreviewEntry, SelectionObserver, SelectionSnapshot};
pub use rules::{BlockedFile, QuotaValidator};
pub use selection::SelectionState;
pub use transport::{SessionState, SubmissionTransport, TransportError};
