//! C5: Action coverage.
//!
//! Every declared action should be the trigger of some flow out of its
//! interface. Matching is exact or after stripping a trailing `_button`
//! from the action name. Uncovered actions are only a warning: in-place
//! toggles legitimately never leave the screen.

use crate::report::{CheckKind, ValidationResult};
use screenflow_interchange::{FlowRecord, InterfaceNode};
use std::collections::BTreeMap;

const BUTTON_SUFFIX: &str = "_button";

/// True when `trigger` handles `action`.
pub fn trigger_matches(action: &str, trigger: &str) -> bool {
    trigger == action || action.strip_suffix(BUTTON_SUFFIX) == Some(trigger)
}

/// Declared actions of `interface` no flow record covers.
pub fn uncovered_actions<'a>(interface: &'a InterfaceNode, flows: &[FlowRecord]) -> Vec<&'a str> {
    interface
        .actions
        .iter()
        .filter(|action| {
            !flows
                .iter()
                .any(|f| f.from == interface.name && trigger_matches(action, &f.trigger))
        })
        .map(|a| a.as_str())
        .collect()
}

/// C5: Warn about actions without a matching flow.
pub fn check_action_coverage(interfaces: &[InterfaceNode], flows: &[FlowRecord]) -> ValidationResult {
    let mut affected = Vec::new();
    let mut suggestions = Vec::new();
    let mut uncovered: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut total_actions = 0;

    for interface in interfaces {
        total_actions += interface.actions.len();
        let missing = uncovered_actions(interface, flows);
        if missing.is_empty() {
            continue;
        }
        for action in &missing {
            suggestions.push(format!(
                "Add a flow from '{}' triggered by '{}', or confirm it is handled in place",
                interface.name, action
            ));
        }
        affected.push(interface.name.clone());
        uncovered.insert(
            interface.name.clone(),
            missing.into_iter().map(String::from).collect(),
        );
    }

    if affected.is_empty() {
        return ValidationResult::pass(
            CheckKind::ActionCoverage,
            format!("All {} declared action(s) trigger a flow", total_actions),
        );
    }

    let missing_count: usize = uncovered.values().map(Vec::len).sum();
    ValidationResult::warning(
        CheckKind::ActionCoverage,
        format!(
            "{} of {} action(s) have no matching flow",
            missing_count, total_actions
        ),
    )
    .with_affected(affected)
    .with_suggestions(suggestions)
    .with_details(serde_json::json!({ "uncovered": uncovered }))
}
