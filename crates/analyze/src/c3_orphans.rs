//! C3: Orphan detection.
//!
//! Interfaces nothing navigates to. The entry interface is excluded.
//! Computed independently of C1; both may fire for the same interface.

use crate::c1_entry_reachability::entry_point;
use crate::graph::ReachabilityGraph;
use crate::report::{CheckKind, ValidationResult};
use screenflow_interchange::InterfaceNode;

/// C3: Fail for every non-entry interface with zero incoming connections.
pub fn check_orphans(interfaces: &[InterfaceNode], graph: &ReachabilityGraph) -> ValidationResult {
    let entry = entry_point(interfaces).map(|i| i.name.as_str());

    let orphans: Vec<String> = interfaces
        .iter()
        .filter(|i| Some(i.name.as_str()) != entry && graph.in_degree(&i.name) == 0)
        .map(|i| i.name.clone())
        .collect();

    if orphans.is_empty() {
        return ValidationResult::pass(
            CheckKind::Orphans,
            "Every non-entry interface has at least one incoming connection",
        );
    }

    let suggestions = orphans
        .iter()
        .map(|name| format!("Add a flow that navigates to '{}'", name))
        .collect();

    ValidationResult::fail(
        CheckKind::Orphans,
        format!(
            "{} orphaned interface(s) with no incoming connection: {}",
            orphans.len(),
            orphans.join(", ")
        ),
    )
    .with_affected(orphans)
    .with_suggestions(suggestions)
}
