//! C2: Dead-end detection.
//!
//! Interfaces with no outgoing connection. Intentional terminal screens
//! are exempt by name. Dead ends only ever produce a warning.

use crate::graph::ReachabilityGraph;
use crate::report::{CheckKind, ValidationResult};
use screenflow_interchange::InterfaceNode;

/// Name substrings marking intentional terminal screens.
pub const TERMINAL_SCREEN_HINTS: [&str; 4] = ["confirmation", "success", "error", "logout"];

/// True when the interface name marks an intentional terminal screen.
pub fn is_terminal_screen(name: &str) -> bool {
    let lower = name.to_lowercase();
    TERMINAL_SCREEN_HINTS.iter().any(|hint| lower.contains(hint))
}

/// C2: Warn about non-exempt interfaces without outgoing connections.
pub fn check_dead_ends(interfaces: &[InterfaceNode], graph: &ReachabilityGraph) -> ValidationResult {
    let dead_ends: Vec<String> = interfaces
        .iter()
        .filter(|i| graph.out_degree(&i.name) == 0 && !is_terminal_screen(&i.name))
        .map(|i| i.name.clone())
        .collect();

    if dead_ends.is_empty() {
        return ValidationResult::pass(CheckKind::DeadEnds, "No unintended dead ends");
    }

    let suggestions = dead_ends
        .iter()
        .map(|name| format!("Add a navigation action on '{}' (e.g. back or home)", name))
        .collect();

    ValidationResult::warning(
        CheckKind::DeadEnds,
        format!(
            "{} interface(s) have no way out: {}",
            dead_ends.len(),
            dead_ends.join(", ")
        ),
    )
    .with_affected(dead_ends)
    .with_suggestions(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CheckStatus;
    use screenflow_interchange::FlowRecord;

    fn ifaces(names: &[&str]) -> Vec<InterfaceNode> {
        names
            .iter()
            .map(|n| InterfaceNode::new(*n, Vec::<String>::new()))
            .collect()
    }

    #[test]
    fn test_terminal_screens_exempt() {
        let interfaces = ifaces(&["home", "logout_confirmation", "PaymentSuccess", "error_page"]);
        let flows = vec![FlowRecord::new("home", "logout_confirmation", "logout")];
        let graph = ReachabilityGraph::build(&interfaces, &flows);
        let result = check_dead_ends(&interfaces, &graph);
        assert_eq!(result.status, CheckStatus::Pass);
        assert!(result.affected.is_empty());
    }

    #[test]
    fn test_dead_end_is_warning() {
        let interfaces = ifaces(&["home", "settings"]);
        let flows = vec![FlowRecord::new("home", "settings", "open_settings")];
        let graph = ReachabilityGraph::build(&interfaces, &flows);
        let result = check_dead_ends(&interfaces, &graph);
        assert_eq!(result.status, CheckStatus::Warning);
        assert_eq!(result.affected, vec!["settings".to_string()]);
        assert_eq!(result.suggestions.len(), 1);
    }

    #[test]
    fn test_self_loop_is_not_a_dead_end() {
        let interfaces = ifaces(&["feed"]);
        let flows = vec![FlowRecord::new("feed", "feed", "refresh")];
        let graph = ReachabilityGraph::build(&interfaces, &flows);
        assert_eq!(check_dead_ends(&interfaces, &graph).status, CheckStatus::Pass);
    }

    #[test]
    fn test_unresolved_outgoing_flow_still_dead_end() {
        let interfaces = ifaces(&["feed"]);
        let flows = vec![FlowRecord::new("feed", "missing", "open")];
        let graph = ReachabilityGraph::build(&interfaces, &flows);
        assert_eq!(check_dead_ends(&interfaces, &graph).status, CheckStatus::Warning);
    }
}
