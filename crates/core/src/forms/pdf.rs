//! Course PDF upload form.

use std::sync::LazyLock;

use regex::Regex;

use crate::validation::{Check, ValidationRule};

pub const KEY_TITLE: &str = "title";
pub const KEY_FILE_NAME: &str = "file_name";
pub const KEY_FILE_SIZE_MB: &str = "file_size_mb";
pub const KEY_PAGE_COUNT: &str = "page_count";

/// Largest PDF accepted by the upload endpoint, in megabytes.
pub const MAX_FILE_SIZE_MB: f64 = 50.0;

static PDF_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[^/\\]+\.pdf$").expect("valid regex"));

pub fn rules() -> Vec<ValidationRule> {
    vec![
        ValidationRule::error("PDF Title", "PDF title is required", Check::required(KEY_TITLE))
            .with_target("pdf-title"),
        ValidationRule::error("File", "Choose a PDF file to upload", Check::required(KEY_FILE_NAME))
            .with_target("pdf-file"),
        ValidationRule::error(
            "File",
            "Only .pdf files can be uploaded",
            Check::pattern(KEY_FILE_NAME, PDF_FILE_RE.clone()),
        )
        .with_target("pdf-file"),
        ValidationRule::error(
            "File Size",
            format!("PDF must be {MAX_FILE_SIZE_MB} MB or smaller"),
            Check::max_value(KEY_FILE_SIZE_MB, MAX_FILE_SIZE_MB),
        )
        .with_target("pdf-file"),
        ValidationRule::warning(
            "Pages",
            "Page count is shown on the course page; consider filling it in",
            Check::required(KEY_PAGE_COUNT),
        )
        .with_target("pdf-pages"),
    ]
}
