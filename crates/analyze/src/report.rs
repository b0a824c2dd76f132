//! ValidationReport -- aggregated output of one validation run.
//!
//! Each check contributes exactly one `ValidationResult`; the report
//! derives pass/fail/warning counts and the completeness percentage
//! from that list.

use serde::Serialize;
use time::OffsetDateTime;

/// The structural check a result belongs to.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    EntryReachability,
    DeadEnds,
    Orphans,
    FlowCompleteness,
    ActionCoverage,
}

impl CheckKind {
    /// Fixed execution order of the checks.
    pub const ALL: [CheckKind; 5] = [
        CheckKind::EntryReachability,
        CheckKind::DeadEnds,
        CheckKind::Orphans,
        CheckKind::FlowCompleteness,
        CheckKind::ActionCoverage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::EntryReachability => "entry_reachability",
            CheckKind::DeadEnds => "dead_ends",
            CheckKind::Orphans => "orphans",
            CheckKind::FlowCompleteness => "flow_completeness",
            CheckKind::ActionCoverage => "action_coverage",
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome status of a single check.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
    Warning,
}

/// The single, aggregated outcome of one structural check.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub check: CheckKind,
    pub status: CheckStatus,
    pub message: String,
    /// Interfaces the finding applies to, in specification order.
    pub affected: Vec<String>,
    pub suggestions: Vec<String>,
    /// Check-specific structured payload for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl ValidationResult {
    fn with_status(check: CheckKind, status: CheckStatus, message: impl Into<String>) -> Self {
        ValidationResult {
            check,
            status,
            message: message.into(),
            affected: Vec::new(),
            suggestions: Vec::new(),
            details: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn pass(check: CheckKind, message: impl Into<String>) -> Self {
        Self::with_status(check, CheckStatus::Pass, message)
    }

    pub fn fail(check: CheckKind, message: impl Into<String>) -> Self {
        Self::with_status(check, CheckStatus::Fail, message)
    }

    pub fn warning(check: CheckKind, message: impl Into<String>) -> Self {
        Self::with_status(check, CheckStatus::Warning, message)
    }

    pub fn with_affected(mut self, affected: Vec<String>) -> Self {
        self.affected = affected;
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Equality ignoring `created_at`.
    pub fn same_outcome(&self, other: &ValidationResult) -> bool {
        self.check == other.check
            && self.status == other.status
            && self.message == other.message
            && self.affected == other.affected
            && self.suggestions == other.suggestions
            && self.details == other.details
    }
}

/// Aggregated report for a single validation run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub total_interfaces: usize,
    /// Resolved connections (flows whose endpoints both exist).
    pub total_connections: usize,
    pub passed: usize,
    pub failed: usize,
    pub warnings: usize,
    /// `passed / results.len()` as a rounded percentage.
    pub completeness: u8,
    pub results: Vec<ValidationResult>,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
}

impl ValidationReport {
    /// Aggregate a finished list of results.
    pub fn from_results(
        total_interfaces: usize,
        total_connections: usize,
        results: Vec<ValidationResult>,
    ) -> Self {
        let count = |status: CheckStatus| results.iter().filter(|r| r.status == status).count();
        let passed = count(CheckStatus::Pass);
        let failed = count(CheckStatus::Fail);
        let warnings = count(CheckStatus::Warning);

        let completeness = if results.is_empty() {
            0
        } else {
            ((passed as f64 * 100.0) / results.len() as f64).round() as u8
        };

        ValidationReport {
            total_interfaces,
            total_connections,
            passed,
            failed,
            warnings,
            completeness,
            results,
            generated_at: OffsetDateTime::now_utc(),
        }
    }

    /// Complete iff nothing failed. Warnings never block completeness.
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }

    pub fn result(&self, check: CheckKind) -> Option<&ValidationResult> {
        self.results.iter().find(|r| r.check == check)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| r.status == CheckStatus::Fail)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| r.status == CheckStatus::Warning)
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        format!(
            "{} interfaces, {} connections: {} passed, {} failed, {} warnings ({}% complete)",
            self.total_interfaces,
            self.total_connections,
            self.passed,
            self.failed,
            self.warnings,
            self.completeness
        )
    }

    /// Equality ignoring every timestamp.
    pub fn same_outcome(&self, other: &ValidationReport) -> bool {
        self.total_interfaces == other.total_interfaces
            && self.total_connections == other.total_connections
            && self.results.len() == other.results.len()
            && self
                .results
                .iter()
                .zip(&other.results)
                .all(|(a, b)| a.same_outcome(b))
    }
}
