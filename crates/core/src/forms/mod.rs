//! Rule sets of the admin console forms.
//!
//! Each submodule exposes the snapshot keys its form uses, the section
//! labels shown in the violations panel, and a `rules()` constructor.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::ValidationRule;

pub mod contact;
pub mod course;
pub mod pdf;
pub mod quiz;
pub mod video;

/// Absolute http(s) URL with a host.
pub(crate) static HTTP_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("valid regex"));

// ---------------------------------------------------------------------------
// Form kinds
// ---------------------------------------------------------------------------

/// Forms of the admin console that validate through the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Course,
    Video,
    Pdf,
    Quiz,
    ContactInfo,
}

impl FormKind {
    pub const ALL: [FormKind; 5] = [
        Self::Course,
        Self::Video,
        Self::Pdf,
        Self::Quiz,
        Self::ContactInfo,
    ];

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "course" => Ok(Self::Course),
            "video" => Ok(Self::Video),
            "pdf" => Ok(Self::Pdf),
            "quiz" => Ok(Self::Quiz),
            "contact_info" => Ok(Self::ContactInfo),
            _ => Err(CoreError::UnknownForm(format!(
                "'{s}'. Must be one of: course, video, pdf, quiz, contact_info"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Video => "video",
            Self::Pdf => "pdf",
            Self::Quiz => "quiz",
            Self::ContactInfo => "contact_info",
        }
    }

    /// Human-readable label for the form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Course => "Course",
            Self::Video => "Course Video",
            Self::Pdf => "Course PDF",
            Self::Quiz => "Quiz",
            Self::ContactInfo => "Contact Info",
        }
    }

    pub fn rules(&self) -> Vec<ValidationRule> {
        match self {
            Self::Course => course::rules(),
            Self::Video => video::rules(),
            Self::Pdf => pdf::rules(),
            Self::Quiz => quiz::rules(),
            Self::ContactInfo => contact::rules(),
        }
    }
}
