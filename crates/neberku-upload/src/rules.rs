use neberku_core::error::{OversizedFile, TypeQuotaViolation, UploadError};
use neberku_core::models::{CandidateFile, EventMediaPolicy, MediaCategory};
use serde::Serialize;

use crate::selection::{count_in_batch, SelectionState};

/// A file dropped from a batch because the event does not accept its type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockedFile {
    pub name: String,
    pub category: MediaCategory,
}

/// Quota and capability checks for one event
///
/// Every check is a pure function of the policy, the current selection and
/// the incoming batch, so the manager can compose them without touching any
/// view.
pub struct QuotaValidator<'a> {
    policy: &'a EventMediaPolicy,
}

impl<'a> QuotaValidator<'a> {
    pub fn new(policy: &'a EventMediaPolicy) -> Self {
        Self { policy }
    }

    /// Split a batch into files the event accepts and files it blocks.
    ///
    /// Fails when nothing in a non-empty batch survives.
    pub fn filter_capabilities(
        &self,
        batch: Vec<CandidateFile>,
    ) -> Result<(Vec<CandidateFile>, Vec<BlockedFile>), UploadError> {
        let (accepted, rejected): (Vec<CandidateFile>, Vec<CandidateFile>) = batch
            .into_iter()
            .partition(|file| self.policy.allows(file.category));

        if accepted.is_empty() && !rejected.is_empty() {
            let mut blocked = Vec::new();
            for file in &rejected {
                if !blocked.contains(&file.category) {
                    blocked.push(file.category);
                }
            }
            return Err(UploadError::AllTypesDisabled { blocked });
        }

        let blocked = rejected
            .into_iter()
            .map(|file| BlockedFile {
                name: file.name,
                category: file.category,
            })
            .collect();

        Ok((accepted, blocked))
    }

    /// Reject the batch when any file is over its category's size ceiling.
    pub fn check_sizes(&self, batch: &[CandidateFile]) -> Result<(), UploadError> {
        let oversized: Vec<OversizedFile> = batch
            .iter()
            .filter_map(|file| {
                let max_bytes = self.policy.size_limit(file.category)?;
                (file.size_bytes > max_bytes).then(|| OversizedFile {
                    name: file.name.clone(),
                    category: file.category,
                    size_bytes: file.size_bytes,
                    max_bytes,
                })
            })
            .collect();

        if oversized.is_empty() {
            Ok(())
        } else {
            Err(UploadError::SizeLimitExceeded { files: oversized })
        }
    }

    /// Check the batch against the quota regime the event uses.
    pub fn check_quota(
        &self,
        selection: &SelectionState,
        batch: &[CandidateFile],
    ) -> Result<(), UploadError> {
        if self.policy.validate_per_media_type {
            return self.check_type_quota(selection, batch);
        }

        let limit = self.policy.max_posts_per_guest;
        let current = selection.len();
        let attempted = batch.len();
        if current + attempted > limit as usize {
            return Err(UploadError::GuestQuotaExceeded {
                limit,
                current,
                attempted,
            });
        }

        Ok(())
    }

    fn check_type_quota(
        &self,
        selection: &SelectionState,
        batch: &[CandidateFile],
    ) -> Result<(), UploadError> {
        let violations: Vec<TypeQuotaViolation> = MediaCategory::UPLOADABLE
            .into_iter()
            .filter_map(|category| {
                let attempted = count_in_batch(batch, category);
                if attempted == 0 {
                    return None;
                }
                let limit = self.policy.type_limit(category);
                let current = selection.count_by_type(category);
                (current + attempted > limit as usize).then_some(TypeQuotaViolation {
                    category,
                    limit,
                    current,
                    attempted,
                })
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(UploadError::TypeQuotaExceeded { violations })
        }
    }

    /// Checks that gate building a submission from the current selection.
    pub fn check_submission(&self, selection: &SelectionState) -> Result<(), UploadError> {
        if !self.policy.allow_wishes {
            return Err(UploadError::WishesDisabled);
        }

        if selection.is_empty() {
            return Err(UploadError::NoMediaSelected);
        }

        if !self.policy.any_media_enabled() {
            return Err(UploadError::NoMediaTypesEnabled);
        }

        let limit = self.policy.combined_type_limit();
        if selection.len() > limit as usize {
            return Err(UploadError::TotalExceedsCombinedLimit {
                limit,
                selected: selection.len(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neberku_core::error::ErrorMetadata;
    use neberku_core::models::FileSource;
    use neberku_core::units::megabytes_to_bytes;

    fn file(name: &str, content_type: &str, size: u64) -> CandidateFile {
        CandidateFile::new(name, content_type, size, FileSource::Disk(name.into()))
    }

    #[test]
    fn test_filter_drops_disallowed_and_other() {
        let policy = EventMediaPolicy {
            allow_videos: false,
            ..Default::default()
        };
        let validator = QuotaValidator::new(&policy);

        let (accepted, blocked) = validator
            .filter_capabilities(vec![
                file("a.jpg", "image/jpeg", 1),
                file("b.mp4", "video/mp4", 1),
                file("c.pdf", "application/pdf", 1),
            ])
            .unwrap();

        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].name, "a.jpg");
        assert_eq!(
            blocked,
            vec![
                BlockedFile {
                    name: "b.mp4".into(),
                    category: MediaCategory::Video
                },
                BlockedFile {
                    name: "c.pdf".into(),
                    category: MediaCategory::Other
                },
            ]
        );
    }

    #[test]
    fn test_unsupported_documents_are_refused() {
        let policy = EventMediaPolicy::default();
        let validator = QuotaValidator::new(&policy);

        let err = validator
            .filter_capabilities(vec![file("menu.pdf", "application/pdf", 1)])
            .unwrap_err();
        assert_eq!(
            err,
            UploadError::AllTypesDisabled {
                blocked: vec![MediaCategory::Other]
            }
        );
        assert_eq!(
            err.client_message(),
            "Only photos, videos and voice recordings can be uploaded."
        );
    }

    #[test]
    fn test_filter_fails_when_nothing_survives() {
        let policy = EventMediaPolicy {
            allow_voice: false,
            ..Default::default()
        };
        let validator = QuotaValidator::new(&policy);

        let err = validator
            .filter_capabilities(vec![
                file("a.mp3", "audio/mpeg", 1),
                file("b.ogg", "audio/ogg", 1),
            ])
            .unwrap_err();
        assert_eq!(
            err,
            UploadError::AllTypesDisabled {
                blocked: vec![MediaCategory::Voice]
            }
        );
    }

    #[test]
    fn test_size_check_lists_every_oversized_file() {
        let policy = EventMediaPolicy {
            max_image_size_bytes: Some(megabytes_to_bytes(10)),
            ..Default::default()
        };
        let validator = QuotaValidator::new(&policy);

        let err = validator
            .check_sizes(&[
                file("big.jpg", "image/jpeg", megabytes_to_bytes(15)),
                file("ok.jpg", "image/jpeg", megabytes_to_bytes(10)),
                file("huge.mp4", "video/mp4", megabytes_to_bytes(500)),
            ])
            .unwrap_err();

        let UploadError::SizeLimitExceeded { files } = err else {
            panic!("expected size error");
        };
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "big.jpg");
        assert_eq!(files[0].max_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_type_quota_reports_every_violation() {
        let policy = EventMediaPolicy {
            validate_per_media_type: true,
            max_images_per_post: 1,
            max_videos_per_post: 1,
            max_voice_per_post: 1,
            ..Default::default()
        };
        let validator = QuotaValidator::new(&policy);

        let err = validator
            .check_quota(
                &SelectionState::new(),
                &[
                    file("a.jpg", "image/jpeg", 1),
                    file("b.jpg", "image/jpeg", 1),
                    file("c.mp4", "video/mp4", 1),
                    file("d.mp4", "video/mp4", 1),
                    file("e.mp3", "audio/mpeg", 1),
                ],
            )
            .unwrap_err();

        let UploadError::TypeQuotaExceeded { violations } = err else {
            panic!("expected type quota error");
        };
        let categories: Vec<MediaCategory> = violations.iter().map(|v| v.category).collect();
        assert_eq!(categories, vec![MediaCategory::Photo, MediaCategory::Video]);
        assert_eq!(violations[0].attempted, 2);
    }

    #[test]
    fn test_submission_check_order() {
        let policy = EventMediaPolicy {
            allow_wishes: false,
            allow_photos: false,
            allow_videos: false,
            allow_voice: false,
            ..Default::default()
        };
        let validator = QuotaValidator::new(&policy);
        assert_eq!(
            validator.check_submission(&SelectionState::new()),
            Err(UploadError::WishesDisabled)
        );

        let policy = EventMediaPolicy {
            allow_photos: false,
            allow_videos: false,
            allow_voice: false,
            ..Default::default()
        };
        let validator = QuotaValidator::new(&policy);
        assert_eq!(
            validator.check_submission(&SelectionState::new()),
            Err(UploadError::NoMediaSelected)
        );
    }

    #[test]
    fn test_combined_limit_applies_in_per_guest_mode() {
        let policy = EventMediaPolicy {
            max_posts_per_guest: 10,
            max_images_per_post: 1,
            max_videos_per_post: 0,
            max_voice_per_post: 1,
            ..Default::default()
        };
        let validator = QuotaValidator::new(&policy);

        let mut selection = SelectionState::new();
        selection.extend(vec![
            file("a.jpg", "image/jpeg", 1),
            file("b.jpg", "image/jpeg", 1),
            file("c.jpg", "image/jpeg", 1),
        ]);

        assert_eq!(
            validator.check_submission(&selection),
            Err(UploadError::TotalExceedsCombinedLimit {
                limit: 2,
                selected: 3
            })
        );
    }
}
