//! Validation aggregator behind the floating violations panel.
//!
//! One aggregator is owned by each form controller. It runs a rule pass,
//! keeps the categorized violations for display, and tracks whether the
//! panel and the transient success indicator are visible.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::rules::{evaluate_rules, ValidationResult, ValidationRule, Violation};
use crate::types::{FormSnapshot, Timestamp};

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// How long the success indicator stays up after a clean pass (3 seconds).
pub const DEFAULT_SUCCESS_DISPLAY_MS: i64 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorSettings {
    pub success_display: Duration,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            success_display: Duration::milliseconds(DEFAULT_SUCCESS_DISPLAY_MS),
        }
    }
}

// ---------------------------------------------------------------------------
// Panel state
// ---------------------------------------------------------------------------

/// What the user currently sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelState {
    Idle,
    ShowingErrors,
    ShowingWarnings,
    ShowingSuccess,
}

impl PanelState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ShowingErrors => "showing_errors",
            Self::ShowingWarnings => "showing_warnings",
            Self::ShowingSuccess => "showing_success",
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ValidationAggregator {
    settings: AggregatorSettings,
    errors: Vec<Violation>,
    warnings: Vec<Violation>,
    panel_open: bool,
    /// Last pass had errors; keeps an emptied panel in its error state.
    blocking: bool,
    success_until: Option<Timestamp>,
}

impl ValidationAggregator {
    pub fn new(settings: AggregatorSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &AggregatorSettings {
        &self.settings
    }

    /// Run a rule pass against `snapshot` using the current wall clock.
    ///
    /// See [`evaluate_at`](Self::evaluate_at).
    pub fn evaluate(&mut self, rules: &[ValidationRule], snapshot: &FormSnapshot) -> bool {
        self.evaluate_at(rules, snapshot, Utc::now())
    }

    /// Run a rule pass and replace the displayed violations with its result.
    ///
    /// Returns `false` when any error-kind rule is violated; warnings alone
    /// open the panel but still allow submission. A clean pass closes the
    /// panel and shows the success indicator until
    /// `now + settings.success_display`.
    pub fn evaluate_at(
        &mut self,
        rules: &[ValidationRule],
        snapshot: &FormSnapshot,
        now: Timestamp,
    ) -> bool {
        let ValidationResult { errors, warnings } = evaluate_rules(rules, snapshot);
        self.errors = errors;
        self.warnings = warnings;
        self.blocking = !self.errors.is_empty();

        if !self.errors.is_empty() {
            self.panel_open = true;
            self.success_until = None;
            false
        } else if !self.warnings.is_empty() {
            self.panel_open = true;
            self.success_until = None;
            true
        } else {
            self.panel_open = false;
            let until = now
                .checked_add_signed(self.settings.success_display)
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
            self.success_until = Some(until);
            true
        }
    }

    /// Drop every violation and hide the panel and success indicator.
    pub fn clear(&mut self) {
        self.errors.clear();
        self.warnings.clear();
        self.panel_open = false;
        self.blocking = false;
        self.success_until = None;
    }

    /// Hide one violation from the panel without re-running the rules.
    ///
    /// This is a snooze: the underlying condition is untouched and the entry
    /// comes back on the next [`evaluate`](Self::evaluate). Errors are
    /// searched before warnings and only the first matching entry is
    /// removed. Returns `false` when no visible entry matches.
    pub fn dismiss_one(&mut self, violation: &Violation) -> bool {
        for list in [&mut self.errors, &mut self.warnings] {
            if let Some(pos) = list.iter().position(|v| v.same_entry(violation)) {
                list.remove(pos);
                return true;
            }
        }
        false
    }

    /// Hide the panel, keeping the violations for a later [`reopen`](Self::reopen).
    pub fn close_panel(&mut self) {
        self.panel_open = false;
    }

    /// Show the panel again. Returns `false` when there is nothing to show.
    pub fn reopen(&mut self) -> bool {
        self.panel_open = self.total_count() > 0;
        self.panel_open
    }

    /// Hide the success indicator once its deadline has passed.
    pub fn expire_success(&mut self, now: Timestamp) {
        if self.success_until.is_some_and(|until| now >= until) {
            self.success_until = None;
        }
    }

    pub fn errors(&self) -> &[Violation] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Violation] {
        &self.warnings
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn total_count(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn is_success_visible_at(&self, now: Timestamp) -> bool {
        self.success_until.is_some_and(|until| now < until)
    }

    pub fn is_success_visible(&self) -> bool {
        self.is_success_visible_at(Utc::now())
    }

    /// Current panel state as seen at `now`.
    ///
    /// An open panel keeps reporting the state it was opened in while its
    /// entries are dismissed.
    pub fn state_at(&self, now: Timestamp) -> PanelState {
        if self.is_success_visible_at(now) {
            PanelState::ShowingSuccess
        } else if !self.panel_open {
            PanelState::Idle
        } else if self.has_errors() || self.blocking {
            PanelState::ShowingErrors
        } else {
            PanelState::ShowingWarnings
        }
    }

    /// Visible violations grouped by section, in order of first appearance.
    ///
    /// Errors come before warnings within the walk, so a section holding an
    /// error is listed ahead of warning-only sections.
    pub fn grouped_by_section(&self) -> Vec<(Option<&str>, Vec<&Violation>)> {
        let mut groups: Vec<(Option<&str>, Vec<&Violation>)> = Vec::new();
        for violation in self.errors.iter().chain(self.warnings.iter()) {
            let section = violation.section.as_deref();
            match groups.iter_mut().find(|(s, _)| *s == section) {
                Some((_, items)) => items.push(violation),
                None => groups.push((section, vec![violation])),
            }
        }
        groups
    }

    /// Input to focus first: the first visible violation that has a target.
    pub fn focus_target(&self) -> Option<&str> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .find_map(|v| v.target.as_deref())
    }

    /// Owned copy of the visible violations.
    pub fn result(&self) -> ValidationResult {
        ValidationResult {
            errors: self.errors.clone(),
            warnings: self.warnings.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::checks::Check;
    use chrono::TimeZone;
    use serde_json::json;

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    fn always(field: &str) -> ValidationRule {
        ValidationRule::error(field, format!("{field} is required"), Check::required("missing"))
    }

    fn never(field: &str) -> ValidationRule {
        ValidationRule::error(field, "never", Check::min_items("missing", 0))
    }

    fn warn(field: &str) -> ValidationRule {
        ValidationRule::warning(field, format!("{field} looks thin"), Check::required("missing"))
    }

    fn empty() -> FormSnapshot {
        FormSnapshot::new()
    }

    #[test]
    fn starts_idle() {
        let agg = ValidationAggregator::default();
        assert_eq!(agg.state_at(t0()), PanelState::Idle);
        assert_eq!(agg.total_count(), 0);
        assert!(!agg.is_panel_open());
    }

    #[test]
    fn errors_open_panel_and_block() {
        let mut agg = ValidationAggregator::default();
        let ok = agg.evaluate_at(&[always("Title"), warn("Desc")], &empty(), t0());
        assert!(!ok);
        assert!(agg.is_panel_open());
        assert!(!agg.is_success_visible_at(t0()));
        assert_eq!(agg.error_count(), 1);
        assert_eq!(agg.warning_count(), 1);
        assert_eq!(agg.errors()[0].field, "Title");
        assert_eq!(agg.warnings()[0].field, "Desc");
        assert_eq!(agg.state_at(t0()), PanelState::ShowingErrors);
    }

    #[test]
    fn warnings_alone_open_panel_but_pass() {
        let mut agg = ValidationAggregator::default();
        assert!(agg.evaluate_at(&[warn("Desc"), never("Title")], &empty(), t0()));
        assert!(agg.is_panel_open());
        assert!(!agg.is_success_visible_at(t0()));
        assert_eq!(agg.state_at(t0()), PanelState::ShowingWarnings);
    }

    #[test]
    fn clean_pass_shows_success_until_timeout() {
        let mut agg = ValidationAggregator::default();
        assert!(agg.evaluate_at(&[], &empty(), t0()));
        assert!(!agg.is_panel_open());
        assert_eq!(agg.state_at(t0()), PanelState::ShowingSuccess);

        let later = t0() + Duration::milliseconds(DEFAULT_SUCCESS_DISPLAY_MS);
        assert!(agg.is_success_visible_at(later - Duration::milliseconds(1)));
        assert_eq!(agg.state_at(later), PanelState::Idle);
    }

    #[test]
    fn custom_success_display_is_honoured() {
        let mut agg = ValidationAggregator::new(AggregatorSettings {
            success_display: Duration::seconds(10),
        });
        agg.evaluate_at(&[never("Title")], &empty(), t0());
        assert!(agg.is_success_visible_at(t0() + Duration::seconds(9)));
        assert!(!agg.is_success_visible_at(t0() + Duration::seconds(10)));
    }

    #[test]
    fn expire_success_drops_indicator_after_deadline() {
        let mut agg = ValidationAggregator::default();
        agg.evaluate_at(&[], &empty(), t0());
        agg.expire_success(t0());
        assert!(agg.is_success_visible_at(t0()));
        agg.expire_success(t0() + Duration::seconds(5));
        assert!(!agg.is_success_visible_at(t0()));
    }

    #[test]
    fn error_pass_hides_previous_success() {
        let mut agg = ValidationAggregator::default();
        agg.evaluate_at(&[], &empty(), t0());
        agg.evaluate_at(&[always("Title")], &empty(), t0());
        assert!(!agg.is_success_visible_at(t0()));
    }

    #[test]
    fn evaluate_replaces_previous_state() {
        let mut agg = ValidationAggregator::default();
        agg.evaluate_at(&[always("A"), always("B")], &empty(), t0());
        agg.evaluate_at(&[always("C")], &empty(), t0());
        let fields: Vec<_> = agg.errors().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["C"]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut agg = ValidationAggregator::default();
        agg.evaluate_at(&[always("Title"), warn("Desc")], &empty(), t0());
        agg.clear();
        assert!(agg.errors().is_empty());
        assert!(agg.warnings().is_empty());
        assert!(!agg.is_panel_open());
        assert_eq!(agg.state_at(t0()), PanelState::Idle);

        agg.evaluate_at(&[], &empty(), t0());
        agg.clear();
        assert!(!agg.is_success_visible_at(t0()));
    }

    #[test]
    fn dismiss_one_is_a_snooze() {
        let rules = [always("Title"), warn("Desc")];
        let mut agg = ValidationAggregator::default();
        agg.evaluate_at(&rules, &empty(), t0());

        assert!(agg.dismiss_one(&Violation::new("Title", "Title is required")));
        assert!(agg.errors().is_empty());
        assert!(agg.is_panel_open());

        agg.evaluate_at(&rules, &empty(), t0());
        assert_eq!(agg.errors()[0].field, "Title");
    }

    #[test]
    fn dismiss_one_falls_back_to_warnings() {
        let mut agg = ValidationAggregator::default();
        agg.evaluate_at(&[warn("Desc")], &empty(), t0());
        assert!(agg.dismiss_one(&Violation::new("Desc", "Desc looks thin")));
        assert_eq!(agg.total_count(), 0);
    }

    #[test]
    fn dismiss_one_unknown_entry_changes_nothing() {
        let mut agg = ValidationAggregator::default();
        agg.evaluate_at(&[always("Title")], &empty(), t0());
        let before = agg.result();
        assert!(!agg.dismiss_one(&Violation::new("Title", "another message")));
        assert_eq!(agg.result(), before);
    }

    #[test]
    fn dismiss_one_removes_only_first_duplicate() {
        let mut agg = ValidationAggregator::default();
        agg.evaluate_at(&[always("Title"), always("Title")], &empty(), t0());
        agg.dismiss_one(&Violation::new("Title", "Title is required"));
        assert_eq!(agg.error_count(), 1);
    }

    #[test]
    fn dismissing_everything_leaves_empty_open_panel() {
        let mut agg = ValidationAggregator::default();
        agg.evaluate_at(&[always("Title")], &empty(), t0());
        agg.dismiss_one(&Violation::new("Title", "Title is required"));
        assert!(agg.is_panel_open());
        assert_eq!(agg.state_at(t0()), PanelState::ShowingErrors);
    }

    #[test]
    fn emptied_warning_panel_stays_informational() {
        let mut agg = ValidationAggregator::default();
        agg.evaluate_at(&[warn("Desc")], &empty(), t0());
        agg.dismiss_one(&Violation::new("Desc", "Desc looks thin"));
        assert_eq!(agg.state_at(t0()), PanelState::ShowingWarnings);
    }

    #[test]
    fn dismissing_all_errors_keeps_error_state_with_warnings_left() {
        let mut agg = ValidationAggregator::default();
        agg.evaluate_at(&[always("Title"), warn("Desc")], &empty(), t0());
        agg.dismiss_one(&Violation::new("Title", "Title is required"));
        assert_eq!(agg.warning_count(), 1);
        assert_eq!(agg.state_at(t0()), PanelState::ShowingErrors);
    }

    #[test]
    fn huge_success_display_saturates_instead_of_overflowing() {
        let mut agg = ValidationAggregator::new(AggregatorSettings {
            success_display: Duration::milliseconds(i64::MAX),
        });
        assert!(agg.evaluate_at(&[], &empty(), t0()));
        assert!(agg.is_success_visible_at(t0() + Duration::days(365 * 1000)));
        assert_eq!(agg.state_at(t0()), PanelState::ShowingSuccess);
    }

    #[test]
    fn close_and_reopen_panel() {
        let mut agg = ValidationAggregator::default();
        agg.evaluate_at(&[always("Title")], &empty(), t0());
        agg.close_panel();
        assert_eq!(agg.state_at(t0()), PanelState::Idle);
        assert_eq!(agg.error_count(), 1);
        assert!(agg.reopen());
        assert_eq!(agg.state_at(t0()), PanelState::ShowingErrors);

        agg.clear();
        assert!(!agg.reopen());
    }

    #[test]
    fn groups_by_section_in_first_appearance_order() {
        let rules = [
            always("Title").in_section("Basic Info"),
            warn("Thumb").in_section("Media"),
            always("Price").in_section("Pricing"),
            always("Category").in_section("Basic Info"),
            always("Loose"),
        ];
        let mut agg = ValidationAggregator::default();
        agg.evaluate_at(&rules, &empty(), t0());

        let groups = agg.grouped_by_section();
        let names: Vec<_> = groups.iter().map(|(s, _)| *s).collect();
        assert_eq!(names, vec![Some("Basic Info"), Some("Pricing"), None, Some("Media")]);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn focus_target_prefers_errors() {
        let rules = [
            warn("Thumb").with_target("thumb-input"),
            always("Title"),
            always("Price").with_target("price-input"),
        ];
        let mut agg = ValidationAggregator::default();
        agg.evaluate_at(&rules, &empty(), t0());
        assert_eq!(agg.focus_target(), Some("price-input"));
    }

    #[test]
    fn rules_read_the_snapshot() {
        let rules = [ValidationRule::error("Title", "required", Check::required("title"))];
        let mut agg = ValidationAggregator::default();
        let filled = json!({"title": "Intro"}).as_object().cloned().unwrap();
        assert!(agg.evaluate_at(&rules, &filled, t0()));
        assert!(!agg.evaluate_at(&rules, &empty(), t0()));
    }
}
