//! Quiz builder form.
//!
//! Questions arrive as an array of objects:
//! `{"text": "...", "options": ["..", ".."], "correct_answer": ".."}`.

use crate::validation::{Check, ValidationRule};

pub const KEY_TITLE: &str = "title";
pub const KEY_QUESTIONS: &str = "questions";
pub const KEY_PASS_MARK: &str = "pass_mark";
pub const KEY_TIME_LIMIT_MINUTES: &str = "time_limit_minutes";

pub const QUESTION_KEY_TEXT: &str = "text";
pub const QUESTION_KEY_OPTIONS: &str = "options";
pub const QUESTION_KEY_CORRECT_ANSWER: &str = "correct_answer";

pub const SECTION_SETTINGS: &str = "Quiz Settings";
pub const SECTION_QUESTIONS: &str = "Questions";

/// Every multiple-choice question needs at least this many options.
pub const MIN_OPTIONS: usize = 2;

pub fn rules() -> Vec<ValidationRule> {
    vec![
        ValidationRule::error("Quiz Title", "Quiz title is required", Check::required(KEY_TITLE))
            .in_section(SECTION_SETTINGS)
            .with_target("quiz-title"),
        ValidationRule::error(
            "Pass Mark",
            "Pass mark must be between 0 and 100",
            Check::min_value(KEY_PASS_MARK, 0.0),
        )
        .in_section(SECTION_SETTINGS)
        .with_target("quiz-pass-mark"),
        ValidationRule::error(
            "Pass Mark",
            "Pass mark must be between 0 and 100",
            Check::max_value(KEY_PASS_MARK, 100.0),
        )
        .in_section(SECTION_SETTINGS)
        .with_target("quiz-pass-mark"),
        ValidationRule::warning(
            "Time Limit",
            "No time limit set; students can take as long as they like",
            Check::required(KEY_TIME_LIMIT_MINUTES),
        )
        .in_section(SECTION_SETTINGS)
        .with_target("quiz-time-limit"),
        ValidationRule::error(
            "Questions",
            "Add at least one question",
            Check::min_items(KEY_QUESTIONS, 1),
        )
        .in_section(SECTION_QUESTIONS)
        .with_target("quiz-add-question"),
        ValidationRule::error(
            "Questions",
            "Every question needs text",
            Check::each_item(KEY_QUESTIONS, Check::required(QUESTION_KEY_TEXT)),
        )
        .in_section(SECTION_QUESTIONS),
        ValidationRule::error(
            "Questions",
            format!("Every question needs at least {MIN_OPTIONS} options"),
            Check::each_item(KEY_QUESTIONS, Check::min_items(QUESTION_KEY_OPTIONS, MIN_OPTIONS)),
        )
        .in_section(SECTION_QUESTIONS),
        ValidationRule::error(
            "Questions",
            "Every question needs a correct answer",
            Check::each_item(KEY_QUESTIONS, Check::required(QUESTION_KEY_CORRECT_ANSWER)),
        )
        .in_section(SECTION_QUESTIONS),
    ]
}
