//! Course builder form: basic info, pricing and media sections.

use crate::validation::{Check, ValidationRule};

use super::HTTP_URL_RE;

pub const KEY_TITLE: &str = "title";
pub const KEY_DESCRIPTION: &str = "description";
pub const KEY_CATEGORY: &str = "category";
pub const KEY_LEVEL: &str = "level";
pub const KEY_IS_FREE: &str = "is_free";
pub const KEY_PRICE: &str = "price";
pub const KEY_THUMBNAIL_URL: &str = "thumbnail_url";

pub const SECTION_BASIC_INFO: &str = "Basic Info";
pub const SECTION_PRICING: &str = "Pricing";
pub const SECTION_MEDIA: &str = "Media";

/// Maximum course title length in characters.
pub const MAX_TITLE_LENGTH: usize = 120;

/// Descriptions shorter than this are flagged as a warning.
pub const RECOMMENDED_DESCRIPTION_LENGTH: usize = 50;

/// Accepted difficulty levels.
pub const LEVELS: &[&str] = &["beginner", "intermediate", "advanced"];

pub fn rules() -> Vec<ValidationRule> {
    vec![
        ValidationRule::error("Title", "Course title is required", Check::required(KEY_TITLE))
            .in_section(SECTION_BASIC_INFO)
            .with_target("course-title"),
        ValidationRule::error(
            "Title",
            format!("Course title must be at most {MAX_TITLE_LENGTH} characters"),
            Check::max_length(KEY_TITLE, MAX_TITLE_LENGTH),
        )
        .in_section(SECTION_BASIC_INFO)
        .with_target("course-title"),
        ValidationRule::error(
            "Description",
            "Course description is required",
            Check::required(KEY_DESCRIPTION),
        )
        .in_section(SECTION_BASIC_INFO)
        .with_target("course-description"),
        ValidationRule::warning(
            "Description",
            format!(
                "Descriptions under {RECOMMENDED_DESCRIPTION_LENGTH} characters convert poorly"
            ),
            Check::min_length(KEY_DESCRIPTION, RECOMMENDED_DESCRIPTION_LENGTH),
        )
        .in_section(SECTION_BASIC_INFO)
        .with_target("course-description"),
        ValidationRule::error("Category", "Pick a category", Check::required(KEY_CATEGORY))
            .in_section(SECTION_BASIC_INFO)
            .with_target("course-category"),
        ValidationRule::error(
            "Level",
            "Level must be beginner, intermediate or advanced",
            Check::one_of(KEY_LEVEL, LEVELS.iter().copied()),
        )
        .in_section(SECTION_BASIC_INFO)
        .with_target("course-level"),
        ValidationRule::error(
            "Price",
            "Paid courses need a price",
            Check::when(KEY_IS_FREE, false, Check::required(KEY_PRICE)),
        )
        .in_section(SECTION_PRICING)
        .with_target("course-price"),
        ValidationRule::error(
            "Price",
            "Price cannot be negative",
            Check::when(KEY_IS_FREE, false, Check::min_value(KEY_PRICE, 0.0)),
        )
        .in_section(SECTION_PRICING)
        .with_target("course-price"),
        ValidationRule::error(
            "Thumbnail",
            "Thumbnail must be an http(s) URL",
            Check::pattern(KEY_THUMBNAIL_URL, HTTP_URL_RE.clone()),
        )
        .in_section(SECTION_MEDIA)
        .with_target("course-thumbnail"),
        ValidationRule::warning(
            "Thumbnail",
            "Courses without a thumbnail are hidden from the catalog carousel",
            Check::required(KEY_THUMBNAIL_URL),
        )
        .in_section(SECTION_MEDIA)
        .with_target("course-thumbnail"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FormSnapshot;
    use crate::validation::rules::evaluate_rules;
    use serde_json::{json, Value};

    fn data(value: Value) -> FormSnapshot {
        value.as_object().cloned().unwrap_or_default()
    }

    fn complete() -> FormSnapshot {
        data(json!({
            "title": "Rust for Backend Engineers",
            "description": "Ownership, traits and async from first principles, with exercises.",
            "category": "programming",
            "level": "intermediate",
            "is_free": false,
            "price": "49.99",
            "thumbnail_url": "https://cdn.example.com/thumbs/rust.png"
        }))
    }

    #[test]
    fn complete_course_is_clean() {
        assert!(evaluate_rules(&rules(), &complete()).is_clean());
    }

    #[test]
    fn empty_course_reports_required_fields() {
        let result = evaluate_rules(&rules(), &FormSnapshot::new());
        let fields: Vec<_> = result.errors.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["Title", "Description", "Category"]);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].field, "Thumbnail");
    }

    #[test]
    fn free_course_needs_no_price() {
        let mut snapshot = complete();
        snapshot.insert(KEY_IS_FREE.into(), json!(true));
        snapshot.remove(KEY_PRICE);
        assert!(evaluate_rules(&rules(), &snapshot).is_valid());
    }

    #[test]
    fn paid_course_rejects_missing_or_negative_price() {
        let mut snapshot = complete();
        snapshot.remove(KEY_PRICE);
        let result = evaluate_rules(&rules(), &snapshot);
        assert_eq!(result.errors[0].message, "Paid courses need a price");

        snapshot.insert(KEY_PRICE.into(), json!(-5));
        let result = evaluate_rules(&rules(), &snapshot);
        assert_eq!(result.errors[0].message, "Price cannot be negative");
    }

    #[test]
    fn short_description_is_only_a_warning() {
        let mut snapshot = complete();
        snapshot.insert(KEY_DESCRIPTION.into(), json!("Too short"));
        let result = evaluate_rules(&rules(), &snapshot);
        assert!(result.is_valid());
        assert_eq!(result.warnings[0].section.as_deref(), Some(SECTION_BASIC_INFO));
    }

    #[test]
    fn unknown_level_and_long_title_are_errors() {
        let mut snapshot = complete();
        snapshot.insert(KEY_LEVEL.into(), json!("expert"));
        snapshot.insert(KEY_TITLE.into(), json!("x".repeat(MAX_TITLE_LENGTH + 1)));
        let result = evaluate_rules(&rules(), &snapshot);
        assert_eq!(result.error_count(), 2);
    }
}
