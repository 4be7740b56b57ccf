//! Executes a parsed [`Invocation`].

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use chrono::Utc;

use coursedesk_core::forms::FormKind;
use coursedesk_core::types::FormSnapshot;
use coursedesk_core::validation::{ValidationAggregator, ValidationRule};

use crate::cli::{Invocation, USAGE};
use crate::config::ValidateConfig;
use crate::report::ValidationReport;

/// Text to print plus whether the validated form was rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub text: String,
    pub form_rejected: bool,
}

impl RunOutput {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            form_rejected: false,
        }
    }
}

pub fn run(invocation: &Invocation, config: &ValidateConfig) -> anyhow::Result<RunOutput> {
    match invocation {
        Invocation::Help => Ok(RunOutput::plain(USAGE)),
        Invocation::List => {
            let lines: Vec<String> = FormKind::ALL
                .iter()
                .map(|kind| format!("{:<14}{}", kind.as_str(), kind.label()))
                .collect();
            Ok(RunOutput::plain(lines.join("\n")))
        }
        Invocation::PrintRules { form } => {
            let rules = form.rules();
            let text = if config.report_pretty {
                serde_json::to_string_pretty(&rules)
            } else {
                serde_json::to_string(&rules)
            }
            .context("Failed to serialize rule set")?;
            Ok(RunOutput::plain(text))
        }
        Invocation::ValidateForm { form, snapshot } => {
            let snapshot = load_snapshot(snapshot)?;
            report_output(form.as_str(), &form.rules(), &snapshot, config)
        }
        Invocation::ValidateRules { rules, snapshot } => {
            let label = rules
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("custom")
                .to_string();
            let rules = load_rules(rules)?;
            let snapshot = load_snapshot(snapshot)?;
            report_output(&label, &rules, &snapshot, config)
        }
    }
}

/// Run one rule pass through a fresh aggregator.
pub fn validate(
    form: &str,
    rules: &[ValidationRule],
    snapshot: &FormSnapshot,
    config: &ValidateConfig,
) -> ValidationReport {
    let mut aggregator = ValidationAggregator::new(config.aggregator_settings());
    let now = Utc::now();

    tracing::debug!(form, rule_count = rules.len(), "Evaluating rule set");
    let passed = aggregator.evaluate_at(rules, snapshot, now);
    let report = ValidationReport::from_aggregator(form, passed, &aggregator, now);

    if passed {
        tracing::info!(form, warnings = report.warning_count, "Form passed validation");
    } else {
        tracing::warn!(
            form,
            errors = report.error_count,
            warnings = report.warning_count,
            "Form failed validation"
        );
    }
    report
}

fn report_output(
    form: &str,
    rules: &[ValidationRule],
    snapshot: &FormSnapshot,
    config: &ValidateConfig,
) -> anyhow::Result<RunOutput> {
    let report = validate(form, rules, snapshot, config);
    let text = report
        .to_json(config.report_pretty)
        .context("Failed to serialize validation report")?;
    Ok(RunOutput {
        text,
        form_rejected: !report.passed,
    })
}

/// Read a form snapshot; the file must hold a JSON object.
pub fn load_snapshot(path: &Path) -> anyhow::Result<FormSnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("Snapshot {} is not valid JSON", path.display()))?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        _ => bail!("Snapshot {} must be a JSON object", path.display()),
    }
}

/// Read a rule set stored as a JSON array of rules.
pub fn load_rules(path: &Path) -> anyhow::Result<Vec<ValidationRule>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule set {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Rule set {} is invalid", path.display()))
}
