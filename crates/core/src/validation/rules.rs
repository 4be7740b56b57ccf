//! Validation rule and result types.

use serde::{Deserialize, Serialize};

use super::checks::Check;
use crate::types::FormSnapshot;

/// Whether a rule violation blocks submission or is informational.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    #[default]
    Error,
    Warning,
}

/// A declarative validation rule for one form field.
///
/// The rule never inspects form state by itself; `check` is evaluated
/// against an explicit [`FormSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Human-readable label of the field.
    pub field: String,
    pub message: String,
    #[serde(default)]
    pub kind: RuleKind,
    /// Form section the field belongs to, used to group the panel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Opaque input id used to scroll to / focus the offending input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub check: Check,
}

impl ValidationRule {
    /// An error-kind rule.
    pub fn error(field: impl Into<String>, message: impl Into<String>, check: Check) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind: RuleKind::Error,
            section: None,
            target: None,
            check,
        }
    }

    /// A warning-kind rule.
    pub fn warning(field: impl Into<String>, message: impl Into<String>, check: Check) -> Self {
        Self {
            kind: RuleKind::Warning,
            ..Self::error(field, message, check)
        }
    }

    pub fn in_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Returns `true` when the rule's condition is currently unsatisfied.
    pub fn is_violated(&self, snapshot: &FormSnapshot) -> bool {
        self.check.is_violated(snapshot)
    }
}

/// Display record for a violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl Violation {
    /// A bare `{field, message}` record, as used when dismissing one entry.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            section: None,
            target: None,
        }
    }

    /// Two violations denote the same panel entry when field and message match.
    pub fn same_entry(&self, other: &Violation) -> bool {
        self.field == other.field && self.message == other.message
    }
}

impl From<&ValidationRule> for Violation {
    fn from(rule: &ValidationRule) -> Self {
        Self {
            field: rule.field.clone(),
            message: rule.message.clone(),
            section: rule.section.clone(),
            target: rule.target.clone(),
        }
    }
}

/// Violations of one rule pass, bucketed by kind in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<Violation>,
    pub warnings: Vec<Violation>,
}

impl ValidationResult {
    /// Submission is allowed when no error-kind rule is violated.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// No violations of either kind.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

/// Evaluate all rules against a single form snapshot.
pub fn evaluate_rules(rules: &[ValidationRule], snapshot: &FormSnapshot) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for rule in rules {
        if rule.is_violated(snapshot) {
            match rule.kind {
                RuleKind::Error => errors.push(Violation::from(rule)),
                RuleKind::Warning => warnings.push(Violation::from(rule)),
            }
        }
    }

    ValidationResult { errors, warnings }
}
