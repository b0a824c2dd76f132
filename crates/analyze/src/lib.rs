//! screenflow static analyzer -- graph construction and the C1-C5
//! completeness checks.
//!
//! The analyzer consumes already-parsed interface and flow records
//! (see screenflow-interchange), builds a `ReachabilityGraph` once and
//! runs five independent checks over it. Each check produces exactly
//! one aggregated `ValidationResult`; `validate()` collects them into a
//! `ValidationReport` in a fixed order.
//!
//! Structural defects are never errors: a report is always produced
//! and is safe to render even when every check fails.

pub mod c1_entry_reachability;
pub mod c2_dead_ends;
pub mod c3_orphans;
pub mod c4_flow_completeness;
pub mod c5_action_coverage;
pub mod graph;
pub mod report;
pub mod validator;

pub use c1_entry_reachability::{entry_point, ENTRY_PRIORITY};
pub use c2_dead_ends::{is_terminal_screen, TERMINAL_SCREEN_HINTS};
pub use graph::{GraphEntry, ReachabilityGraph};
pub use report::{CheckKind, CheckStatus, ValidationReport, ValidationResult};
pub use validator::{CompletenessValidator, SubscriptionId};

use screenflow_interchange::{FlowRecord, InterfaceNode};
use std::borrow::Cow;
use std::collections::HashSet;

/// Run the full C1-C5 suite over a specification.
///
/// Builds the graph once, then runs the checks in fixed order. Checks
/// never read each other's output. A repeated interface name keeps its
/// first declaration, here and in the graph.
pub fn validate(interfaces: &[InterfaceNode], flows: &[FlowRecord]) -> ValidationReport {
    let interfaces = distinct_interfaces(interfaces);
    let interfaces = interfaces.as_ref();
    let graph = ReachabilityGraph::build(interfaces, flows);

    let results = vec![
        c1_entry_reachability::check_entry_reachability(interfaces, &graph),
        c2_dead_ends::check_dead_ends(interfaces, &graph),
        c3_orphans::check_orphans(interfaces, &graph),
        c4_flow_completeness::check_flow_completeness(interfaces, &graph, flows),
        c5_action_coverage::check_action_coverage(interfaces, flows),
    ];

    let report = ValidationReport::from_results(interfaces.len(), graph.connections().len(), results);

    tracing::info!(
        interfaces = report.total_interfaces,
        connections = report.total_connections,
        passed = report.passed,
        failed = report.failed,
        warnings = report.warnings,
        "validation finished"
    );

    report
}

/// First declaration of each interface name, in specification order.
/// Borrows when the names are already unique.
fn distinct_interfaces(interfaces: &[InterfaceNode]) -> Cow<'_, [InterfaceNode]> {
    let mut seen = HashSet::with_capacity(interfaces.len());
    if interfaces.iter().all(|i| seen.insert(i.name.as_str())) {
        return Cow::Borrowed(interfaces);
    }

    seen.clear();
    Cow::Owned(
        interfaces
            .iter()
            .filter(|i| seen.insert(i.name.as_str()))
            .cloned()
            .collect(),
    )
}

/// Validate an interchange JSON bundle.
///
/// The only failure mode is a bundle missing its interface or flow
/// arrays (or holding malformed records).
pub fn validate_interchange(
    bundle: &serde_json::Value,
) -> Result<ValidationReport, screenflow_interchange::InterchangeError> {
    let spec = screenflow_interchange::from_interchange(bundle)?;
    Ok(validate(&spec.interfaces, &spec.flows))
}
