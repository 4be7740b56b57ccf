//! JSON report printed after a validation run.

use serde::{Deserialize, Serialize};

use coursedesk_core::types::Timestamp;
use coursedesk_core::validation::{PanelState, ValidationAggregator, Violation};

/// Outcome of one rule pass, shaped for the violations panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub form: String,
    pub passed: bool,
    pub state: PanelState,
    pub error_count: usize,
    pub warning_count: usize,
    pub errors: Vec<Violation>,
    pub warnings: Vec<Violation>,
    pub sections: Vec<SectionSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_target: Option<String>,
}

/// Violation count for one panel group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSummary {
    /// `None` groups violations whose rule has no section.
    pub section: Option<String>,
    pub count: usize,
    pub fields: Vec<String>,
}

impl ValidationReport {
    /// Snapshot the aggregator's visible state after a pass.
    pub fn from_aggregator(
        form: impl Into<String>,
        passed: bool,
        aggregator: &ValidationAggregator,
        now: Timestamp,
    ) -> Self {
        let sections = aggregator
            .grouped_by_section()
            .into_iter()
            .map(|(section, items)| {
                let mut fields: Vec<String> = Vec::new();
                for v in &items {
                    if !fields.contains(&v.field) {
                        fields.push(v.field.clone());
                    }
                }
                SectionSummary {
                    section: section.map(str::to_string),
                    count: items.len(),
                    fields,
                }
            })
            .collect();

        Self {
            form: form.into(),
            passed,
            state: aggregator.state_at(now),
            error_count: aggregator.error_count(),
            warning_count: aggregator.warning_count(),
            errors: aggregator.errors().to_vec(),
            warnings: aggregator.warnings().to_vec(),
            sections,
            focus_target: aggregator.focus_target().map(str::to_string),
        }
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
