//! Form validation engine.
//!
//! Provides the rule types, the serializable check vocabulary, and the
//! aggregator that turns a rule pass into panel state. All pure logic.

pub mod aggregator;
pub mod checks;
pub mod rules;

pub use aggregator::{AggregatorSettings, PanelState, ValidationAggregator};
pub use checks::{Check, Pattern, ValueType};
pub use rules::{RuleKind, ValidationResult, ValidationRule, Violation};
