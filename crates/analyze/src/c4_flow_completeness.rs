//! C4: Flow completeness per interface (SHOW / DO / PROCESS).
//!
//! Three independent sub-conditions per interface:
//!
//! - SHOW: it exposes at least one action.
//! - DO: at least one resolved outgoing connection exists in the graph.
//! - PROCESS: at least one raw flow record names it as the source.
//!
//! DO is graph-based and PROCESS is raw-flow-based, so an interface whose
//! only outgoing flow targets a missing interface passes PROCESS but
//! fails DO.

use crate::graph::ReachabilityGraph;
use crate::report::{CheckKind, ValidationResult};
use screenflow_interchange::{FlowRecord, InterfaceNode};
use std::collections::BTreeMap;

/// Issues found for one interface, in SHOW, DO, PROCESS order.
pub fn interface_issues(
    interface: &InterfaceNode,
    graph: &ReachabilityGraph,
    flows: &[FlowRecord],
) -> Vec<String> {
    let mut issues = Vec::new();

    if interface.actions.is_empty() {
        issues.push("SHOW: no available actions".to_string());
    }
    if graph.out_degree(&interface.name) == 0 {
        issues.push("DO: no action triggers a resolved flow".to_string());
    }
    if !flows.iter().any(|f| f.from == interface.name) {
        issues.push("PROCESS: no flow originates here".to_string());
    }

    issues
}

/// C4: Fail if any interface misses one of the three sub-conditions.
pub fn check_flow_completeness(
    interfaces: &[InterfaceNode],
    graph: &ReachabilityGraph,
    flows: &[FlowRecord],
) -> ValidationResult {
    let mut affected = Vec::new();
    let mut suggestions = Vec::new();
    let mut by_interface: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for interface in interfaces {
        let issues = interface_issues(interface, graph, flows);
        if issues.is_empty() {
            continue;
        }
        for issue in &issues {
            suggestions.push(format!("{}: {}", interface.name, issue));
        }
        affected.push(interface.name.clone());
        by_interface.insert(interface.name.clone(), issues);
    }

    if affected.is_empty() {
        return ValidationResult::pass(
            CheckKind::FlowCompleteness,
            "Every interface shows actions that trigger flows",
        );
    }

    ValidationResult::fail(
        CheckKind::FlowCompleteness,
        format!(
            "{} interface(s) have incomplete flows: {}",
            affected.len(),
            affected.join(", ")
        ),
    )
    .with_affected(affected)
    .with_suggestions(suggestions)
    .with_details(serde_json::json!({ "issues": by_interface }))
}
