//! C1: Entry-point reachability.
//!
//! Picks the entry interface by an ordered keyword table, then walks
//! the graph depth-first from it. Every interface outside the closure
//! is unreachable through any UI-driven path.

use crate::graph::ReachabilityGraph;
use crate::report::{CheckKind, ValidationResult};
use screenflow_interchange::InterfaceNode;

/// Entry keywords in priority order. Shared with the display kind, so
/// a main-kind interface is always an entry candidate.
pub use screenflow_interchange::MAIN_INTERFACE_HINTS as ENTRY_PRIORITY;

/// Determine the entry interface.
///
/// For each keyword in [`ENTRY_PRIORITY`] order, the first interface (in
/// specification order) whose lowercased name contains it wins. Falls
/// back to the first interface; `None` only when there are none.
pub fn entry_point(interfaces: &[InterfaceNode]) -> Option<&InterfaceNode> {
    let lowered: Vec<String> = interfaces.iter().map(|i| i.name.to_lowercase()).collect();

    ENTRY_PRIORITY
        .iter()
        .find_map(|keyword| {
            lowered
                .iter()
                .position(|name| name.contains(keyword))
                .map(|idx| &interfaces[idx])
        })
        .or_else(|| interfaces.first())
}

/// C1: Report interfaces not reachable from the entry point.
pub fn check_entry_reachability(
    interfaces: &[InterfaceNode],
    graph: &ReachabilityGraph,
) -> ValidationResult {
    let Some(entry) = entry_point(interfaces) else {
        return ValidationResult::fail(
            CheckKind::EntryReachability,
            "No interfaces defined; there is no entry point to navigate from",
        )
        .with_suggestions(vec!["Define at least one interface".to_string()]);
    };

    let reachable = graph.reachable_from(&entry.name);
    let unreachable: Vec<String> = interfaces
        .iter()
        .filter(|i| i.name != entry.name && !reachable.contains(&i.name))
        .map(|i| i.name.clone())
        .collect();

    let details = serde_json::json!({
        "entry": entry.name,
        "reachable": reachable,
    });

    if unreachable.is_empty() {
        return ValidationResult::pass(
            CheckKind::EntryReachability,
            format!(
                "All {} interface(s) are reachable from entry '{}'",
                interfaces.len(),
                entry.name
            ),
        )
        .with_details(details);
    }

    let suggestions = unreachable
        .iter()
        .map(|name| format!("Add a flow leading to '{}' from a reachable interface", name))
        .collect();

    ValidationResult::fail(
        CheckKind::EntryReachability,
        format!(
            "{} interface(s) unreachable from entry '{}': {}",
            unreachable.len(),
            entry.name,
            unreachable.join(", ")
        ),
    )
    .with_affected(unreachable)
    .with_suggestions(suggestions)
    .with_details(details)
}
