//! Platform contact info form.

use std::sync::LazyLock;

use regex::Regex;

use crate::validation::{Check, ValidationRule};

pub const KEY_EMAIL: &str = "email";
pub const KEY_PHONE: &str = "phone";
pub const KEY_WHATSAPP: &str = "whatsapp";
pub const KEY_ADDRESS: &str = "address";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 \-]{5,}$").expect("valid regex"));

pub fn rules() -> Vec<ValidationRule> {
    vec![
        ValidationRule::error("Email", "Support email is required", Check::required(KEY_EMAIL))
            .with_target("contact-email"),
        ValidationRule::error(
            "Email",
            "Enter a valid email address",
            Check::pattern(KEY_EMAIL, EMAIL_RE.clone()),
        )
        .with_target("contact-email"),
        ValidationRule::error(
            "Phone",
            "Phone may only contain digits, spaces, dashes and a leading +",
            Check::pattern(KEY_PHONE, PHONE_RE.clone()),
        )
        .with_target("contact-phone"),
        ValidationRule::error(
            "WhatsApp",
            "WhatsApp may only contain digits, spaces, dashes and a leading +",
            Check::pattern(KEY_WHATSAPP, PHONE_RE.clone()),
        )
        .with_target("contact-whatsapp"),
        ValidationRule::warning(
            "Phone",
            "No phone or WhatsApp number; students can only reach you by email",
            Check::any_present([KEY_PHONE, KEY_WHATSAPP]),
        )
        .with_target("contact-phone"),
        ValidationRule::warning(
            "Address",
            "Address is empty",
            Check::required(KEY_ADDRESS),
        )
        .with_target("contact-address"),
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

    #[test]
    fn email_only_contact_passes_with_warnings() {
        let result = evaluate_rules(&rules(), &data(json!({"email": "help@example.com"})));
        assert!(result.is_valid());
        assert_eq!(result.warning_count(), 2);
    }

    #[test]
    fn malformed_numbers_and_email_fail() {
        let snapshot = data(json!({
            "email": "help@example",
            "phone": "call me",
            "whatsapp": "+20 100 123 4567",
            "address": "Cairo"
        }));
        let result = evaluate_rules(&rules(), &snapshot);
        let fields: Vec<_> = result.errors.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["Email", "Phone"]);
        assert!(result.warnings.is_empty());
    }
}
