//! Course video form.

use crate::validation::{Check, ValidationRule};

use super::HTTP_URL_RE;

pub const KEY_TITLE: &str = "title";
pub const KEY_VIDEO_URL: &str = "video_url";
pub const KEY_DURATION_MINUTES: &str = "duration_minutes";
pub const KEY_PREVIEW_MINUTES: &str = "preview_minutes";
pub const KEY_DESCRIPTION: &str = "description";

pub const SECTION_DETAILS: &str = "Video Details";
pub const SECTION_PLAYBACK: &str = "Playback";

pub fn rules() -> Vec<ValidationRule> {
    vec![
        ValidationRule::error("Video Title", "Video title is required", Check::required(KEY_TITLE))
            .in_section(SECTION_DETAILS)
            .with_target("video-title"),
        ValidationRule::error("Video URL", "Video URL is required", Check::required(KEY_VIDEO_URL))
            .in_section(SECTION_PLAYBACK)
            .with_target("video-url"),
        ValidationRule::error(
            "Video URL",
            "Video URL must start with http:// or https://",
            Check::pattern(KEY_VIDEO_URL, HTTP_URL_RE.clone()),
        )
        .in_section(SECTION_PLAYBACK)
        .with_target("video-url"),
        ValidationRule::error(
            "Duration",
            "Duration must be at least 1 minute",
            Check::min_value(KEY_DURATION_MINUTES, 1.0),
        )
        .in_section(SECTION_PLAYBACK)
        .with_target("video-duration"),
        ValidationRule::error(
            "Preview",
            "Free preview cannot be longer than the video",
            Check::not_greater_than(KEY_PREVIEW_MINUTES, KEY_DURATION_MINUTES),
        )
        .in_section(SECTION_PLAYBACK)
        .with_target("video-preview"),
        ValidationRule::warning(
            "Description",
            "Add a short description so students know what the video covers",
            Check::required(KEY_DESCRIPTION),
        )
        .in_section(SECTION_DETAILS)
        .with_target("video-description"),
    ]
}
