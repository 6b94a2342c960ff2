//! Cloud-listed videos and their display summaries.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::UNTITLED_VIDEO;

/// An item of the external cloud listing.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CloudVideo {
    pub name: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub size: f64,
}

/// A cloud-listed video prepared for display.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloudVideoSummary {
    pub id: String,
    pub name: String,
    pub content_type: String,
    pub size: f64,
    pub display_name: String,
    pub formatted_size: String,
    pub thumbnail: String,
}

impl CloudVideoSummary {
    pub fn from_listing(video: CloudVideo, index: usize, thumbnail: &str) -> Self {
        Self {
            id: format!("{}-{}", video.name, index),
            display_name: display_name(&video.name),
            formatted_size: format_file_size(video.size),
            name: video.name,
            content_type: video.content_type,
            size: video.size,
            thumbnail: thumbnail.to_string(),
        }
    }
}

/// Map a whole listing, numbering entries by position.
pub fn summarize(videos: Vec<CloudVideo>, thumbnail: &str) -> Vec<CloudVideoSummary> {
    videos
        .into_iter()
        .enumerate()
        .map(|(index, video)| CloudVideoSummary::from_listing(video, index, thumbnail))
        .collect()
}

/// Blob name without its final extension.
pub fn display_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return UNTITLED_VIDEO.to_string();
    }

    match trimmed.rfind('.') {
        Some(idx) if idx > 0 => trimmed[..idx].to_string(),
        _ => trimmed.to_string(),
    }
}

/// Human-readable size in 1024 steps.
pub fn format_file_size(size: f64) -> String {
    if !size.is_finite() || size <= 0.0 {
        return "Unknown size".to_string();
    }

    const UNITS: [&str; 5] = ["bytes", "KB", "MB", "GB", "TB"];
    let mut index = 0;
    let mut value = size;

    while value >= 1024.0 && index < UNITS.len() - 1 {
        value /= 1024.0;
        index += 1;
    }

    let decimals = if value >= 10.0 || index == 0 { 0 } else { 1 };
    format!("{:.*} {}", decimals, value, UNITS[index])
}
