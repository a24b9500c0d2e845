//! Domain methods for the Neberku API client.

use crate::{ApiClient, ApiStatusError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use neberku_core::models::{
    CandidateFile, EventMediaPolicy, EventPolicyResponse, FileSource, GuestEventAccess,
    SubmissionPayload, SubmissionReceipt,
};
use neberku_upload::{SubmissionTransport, TransportError};
use reqwest::multipart::{Form, Part};
use uuid::Uuid;

impl ApiClient {
    /// Fetch an event as guests see it.
    pub async fn get_event(&self, event_id: Uuid) -> Result<EventPolicyResponse> {
        self.get(&format!("{}/public-events/{}/", self.api_prefix(), event_id), &[])
            .await
            .with_context(|| format!("Failed to load event {}", event_id))
    }

    /// Look up an event by the contributor code printed on the guest invite.
    pub async fn get_event_by_code(&self, code: &str) -> Result<GuestEventAccess> {
        let code = code.trim();
        if code.is_empty() {
            anyhow::bail!("Contributor code is required");
        }

        let access: GuestEventAccess = self
            .get(
                &format!("{}/guest/event/", self.api_prefix()),
                &[("code", code.to_string())],
            )
            .await
            .context("Failed to look up event by contributor code")?;

        if !access.is_accessible {
            anyhow::bail!("Event {} is not open to guest contributions", access.id);
        }
        Ok(access)
    }

    /// Resolve a contributor code, then fetch that event's media policy.
    pub async fn get_event_policy_by_code(&self, code: &str) -> Result<(Uuid, EventMediaPolicy)> {
        let access = self.get_event_by_code(code).await?;
        let policy = self.get_event_policy(access.id).await?;
        Ok((access.id, policy))
    }

    /// Fetch the media policy the contribution form enforces for an event.
    pub async fn get_event_policy(&self, event_id: Uuid) -> Result<EventMediaPolicy> {
        let event = self.get_event(event_id).await?;
        Ok(EventMediaPolicy::from(event))
    }

    /// Post a guest contribution as a multipart form.
    pub async fn submit_guest_post(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt> {
        let form = build_guest_post_form(payload).await?;
        self.post_multipart(&format!("{}/guest-post-create/", self.api_prefix()), form)
            .await
    }
}

/// Multipart body for `guest-post-create`: text fields, then one part per file.
pub async fn build_guest_post_form(payload: &SubmissionPayload) -> Result<Form> {
    let mut form = Form::new()
        .text("event", payload.event_id.to_string())
        .text("guest_name", payload.guest_name.clone())
        .text("guest_phone", payload.guest_phone.clone())
        .text("wish_text", payload.wish_text.clone());

    for (field, file) in payload.file_parts() {
        form = form.part(field, file_part(file).await?);
    }

    Ok(form)
}

async fn file_part(file: &CandidateFile) -> Result<Part> {
    let data = match &file.source {
        FileSource::Memory(bytes) => bytes.to_vec(),
        FileSource::Disk(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?,
    };

    Part::bytes(data)
        .file_name(file.name.clone())
        .mime_str(file.effective_content_type())
        .with_context(|| format!("Invalid content type for {}", file.name))
}

#[async_trait]
impl SubmissionTransport for ApiClient {
    async fn submit(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<SubmissionReceipt, TransportError> {
        self.submit_guest_post(payload).await.map_err(|err| {
            match err.downcast_ref::<ApiStatusError>() {
                Some(api_err) => TransportError::new(Some(api_err.status), api_err.message.clone()),
                None => TransportError::new(None, format!("{:#}", err)),
            }
        })
    }
}
