use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::media::MediaCategory;
use crate::units::megabytes_to_bytes;

// Limits the backend applies to a guest post when the event has no upload
// settings of its own; per-type checks are off in that case.
const DEFAULT_MAX_POSTS_PER_GUEST: u32 = 1;
const DEFAULT_MAX_IMAGES_PER_POST: u32 = 3;
const DEFAULT_MAX_VIDEOS_PER_POST: u32 = 2;
const DEFAULT_MAX_VOICE_PER_POST: u32 = 1;

fn default_true() -> bool {
    true
}

fn default_max_posts_per_guest() -> u32 {
    DEFAULT_MAX_POSTS_PER_GUEST
}

fn default_max_images_per_post() -> u32 {
    DEFAULT_MAX_IMAGES_PER_POST
}

fn default_max_videos_per_post() -> u32 {
    DEFAULT_MAX_VIDEOS_PER_POST
}

fn default_max_voice_per_post() -> u32 {
    DEFAULT_MAX_VOICE_PER_POST
}

/// Event found through a guest contributor code.
///
/// The code lookup answers with the event's public details only. The upload
/// policy is read from the event itself afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestEventAccess {
    pub id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_true")]
    pub is_accessible: bool,
}

/// Event as returned to guests by the backend. Only the fields the upload
/// form needs are decoded; sizes are in megabytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPolicyResponse {
    pub id: Uuid,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_true")]
    pub allow_photos: bool,
    #[serde(default = "default_true")]
    pub allow_videos: bool,
    #[serde(default = "default_true")]
    pub allow_voice: bool,
    #[serde(default = "default_true")]
    pub allow_wishes: bool,
    #[serde(default)]
    pub make_validation_per_media: bool,
    #[serde(default = "default_max_posts_per_guest")]
    pub max_posts_per_guest: u32,
    #[serde(default = "default_max_images_per_post")]
    pub guest_max_image_per_post: u32,
    #[serde(default = "default_max_videos_per_post")]
    pub guest_max_video_per_post: u32,
    #[serde(default = "default_max_voice_per_post")]
    pub guest_max_voice_per_post: u32,
    #[serde(default)]
    pub max_image_size: Option<u64>,
    #[serde(default)]
    pub max_video_size: Option<u64>,
    #[serde(default)]
    pub max_voice_size: Option<u64>,
}

/// Upload rules for one event, read once when the contribution form loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMediaPolicy {
    pub validate_per_media_type: bool,
    pub max_posts_per_guest: u32,
    pub max_images_per_post: u32,
    pub max_videos_per_post: u32,
    pub max_voice_per_post: u32,
    pub max_image_size_bytes: Option<u64>,
    pub max_video_size_bytes: Option<u64>,
    pub max_voice_size_bytes: Option<u64>,
    pub allow_photos: bool,
    pub allow_videos: bool,
    pub allow_voice: bool,
    pub allow_wishes: bool,
}

impl Default for EventMediaPolicy {
    fn default() -> Self {
        Self {
            validate_per_media_type: false,
            max_posts_per_guest: DEFAULT_MAX_POSTS_PER_GUEST,
            max_images_per_post: DEFAULT_MAX_IMAGES_PER_POST,
            max_videos_per_post: DEFAULT_MAX_VIDEOS_PER_POST,
            max_voice_per_post: DEFAULT_MAX_VOICE_PER_POST,
            max_image_size_bytes: None,
            max_video_size_bytes: None,
            max_voice_size_bytes: None,
            allow_photos: true,
            allow_videos: true,
            allow_voice: true,
            allow_wishes: true,
        }
    }
}

impl EventMediaPolicy {
    /// Whether the event accepts files of this category. `Other` is never accepted.
    pub fn allows(&self, category: MediaCategory) -> bool {
        match category {
            MediaCategory::Photo => self.allow_photos,
            MediaCategory::Video => self.allow_videos,
            MediaCategory::Voice => self.allow_voice,
            MediaCategory::Other => false,
        }
    }

    /// Per-post cap for a category in per-media-type mode.
    pub fn type_limit(&self, category: MediaCategory) -> u32 {
        match category {
            MediaCategory::Photo => self.max_images_per_post,
            MediaCategory::Video => self.max_videos_per_post,
            MediaCategory::Voice => self.max_voice_per_post,
            MediaCategory::Other => 0,
        }
    }

    /// Per-file size ceiling for a category, when the event defines one.
    pub fn size_limit(&self, category: MediaCategory) -> Option<u64> {
        match category {
            MediaCategory::Photo => self.max_image_size_bytes,
            MediaCategory::Video => self.max_video_size_bytes,
            MediaCategory::Voice => self.max_voice_size_bytes,
            MediaCategory::Other => None,
        }
    }

    pub fn any_media_enabled(&self) -> bool {
        self.allow_photos || self.allow_videos || self.allow_voice
    }

    /// Sum of the three per-type caps, used as the final guard before submission.
    pub fn combined_type_limit(&self) -> u32 {
        self.max_images_per_post
            .saturating_add(self.max_videos_per_post)
            .saturating_add(self.max_voice_per_post)
    }

    /// Categories the event accepts, in display order.
    pub fn enabled_categories(&self) -> Vec<MediaCategory> {
        MediaCategory::UPLOADABLE
            .into_iter()
            .filter(|category| self.allows(*category))
            .collect()
    }
}

impl From<EventPolicyResponse> for EventMediaPolicy {
    fn from(event: EventPolicyResponse) -> Self {
        EventMediaPolicy {
            validate_per_media_type: event.make_validation_per_media,
            max_posts_per_guest: event.max_posts_per_guest.max(1),
            max_images_per_post: event.guest_max_image_per_post,
            max_videos_per_post: event.guest_max_video_per_post,
            max_voice_per_post: event.guest_max_voice_per_post,
            max_image_size_bytes: event.max_image_size.map(megabytes_to_bytes),
            max_video_size_bytes: event.max_video_size.map(megabytes_to_bytes),
            max_voice_size_bytes: event.max_voice_size.map(megabytes_to_bytes),
            allow_photos: event.allow_photos,
            allow_videos: event.allow_videos,
            allow_voice: event.allow_voice,
            allow_wishes: event.allow_wishes,
        }
    }
}
