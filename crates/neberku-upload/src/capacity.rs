//! Remaining-capacity messages shown next to the file picker

use neberku_core::models::{EventMediaPolicy, MediaCategory};
use serde::Serialize;

use crate::selection::SelectionState;

/// Capacity left for one media category in per-media-type mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCapacity {
    pub category: MediaCategory,
    pub limit: u32,
    pub selected: usize,
    pub remaining: usize,
    pub exceeded: bool,
}

impl TypeCapacity {
    fn label(&self) -> &'static str {
        match self.category {
            MediaCategory::Photo => "Photos",
            MediaCategory::Video => "Videos",
            MediaCategory::Voice => "Voice recordings",
            MediaCategory::Other => "Files",
        }
    }
}

/// How many more files the guest may add under the event's quota regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CapacityMessage {
    Remaining { remaining: usize, limit: u32 },
    LimitReached { limit: u32 },
    PerType { types: Vec<TypeCapacity> },
}

impl CapacityMessage {
    pub fn for_selection(policy: &EventMediaPolicy, selection: &SelectionState) -> Self {
        if policy.validate_per_media_type {
            let types = policy
                .enabled_categories()
                .into_iter()
                .map(|category| {
                    let limit = policy.type_limit(category);
                    let selected = selection.count_by_type(category);
                    TypeCapacity {
                        category,
                        limit,
                        selected,
                        remaining: (limit as usize).saturating_sub(selected),
                        exceeded: selected > limit as usize,
                    }
                })
                .collect();
            return CapacityMessage::PerType { types };
        }

        let limit = policy.max_posts_per_guest;
        let remaining = (limit as usize).saturating_sub(selection.len());
        if remaining == 0 {
            CapacityMessage::LimitReached { limit }
        } else {
            CapacityMessage::Remaining { remaining, limit }
        }
    }

    pub fn render(&self) -> String {
        match self {
            CapacityMessage::Remaining { remaining, .. } => {
                format!("You can add {} more file(s)", remaining)
            }
            CapacityMessage::LimitReached { limit } => {
                format!("Maximum file limit reached ({} files)", limit)
            }
            CapacityMessage::PerType { types } => types
                .iter()
                .map(|t| {
                    if t.exceeded {
                        format!("{}: {} of {} (limit exceeded)", t.label(), t.selected, t.limit)
                    } else if t.remaining == 0 {
                        format!("{}: limit reached ({})", t.label(), t.limit)
                    } else {
                        format!("{}: {} more ({} of {} selected)", t.label(), t.remaining, t.selected, t.limit)
                    }
                })
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

/// "N total (x photos, y videos, z voice recordings)", or `None` for an empty selection.
pub fn selection_summary(selection: &SelectionState) -> Option<String> {
    if selection.is_empty() {
        return None;
    }

    let parts: Vec<String> = MediaCategory::UPLOADABLE
        .into_iter()
        .map(|category| {
            let count = selection.count_by_type(category);
            format!("{} {}", count, category.noun(count))
        })
        .collect();

    Some(format!("{} total ({})", selection.len(), parts.join(", ")))
}
