//! Business Logic Generator.
//!
//! A stateless lookup from a `"from->to"` transition to the ordered
//! processing steps narrated while it runs. Timing belongs to the
//! navigator, not to this table.

use screenflow_interchange::connection_id;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// Step name used when a transition has no table entry.
pub const GENERIC_STEP_NAME: &str = "process_navigation";

/// One entry of a transition's step list, before it is stamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepTemplate {
    pub name: String,
    pub description: String,
}

impl StepTemplate {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        StepTemplate {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// The transition a step belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionRef {
    pub from: String,
    pub to: String,
    pub trigger: String,
}

/// A stamped step as it sits in the navigator's queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessLogicStep {
    pub id: String,
    pub name: String,
    pub description: String,
    pub transition: TransitionRef,
    /// Virtual time at which the step was enqueued.
    pub timestamp: Duration,
}

/// Transition-keyed step table.
#[derive(Debug, Clone)]
pub struct BusinessLogicTable {
    entries: HashMap<String, Vec<StepTemplate>>,
}

impl BusinessLogicTable {
    /// A table with no entries: every transition gets the generic step.
    pub fn empty() -> Self {
        BusinessLogicTable {
            entries: HashMap::new(),
        }
    }

    /// Add or replace the steps for `from -> to`.
    pub fn with_transition(mut self, from: &str, to: &str, steps: Vec<StepTemplate>) -> Self {
        self.entries.insert(connection_id(from, to), steps);
        self
    }

    pub fn contains(&self, from: &str, to: &str) -> bool {
        self.entries.contains_key(&connection_id(from, to))
    }

    /// Ordered step templates for a transition.
    ///
    /// Never empty: unknown pairs fall back to one generic step.
    pub fn steps_for(&self, from: &str, to: &str, trigger: &str) -> Vec<StepTemplate> {
        match self.entries.get(&connection_id(from, to)) {
            Some(steps) if !steps.is_empty() => steps.clone(),
            _ => vec![generic_step(from, to, trigger)],
        }
    }
}

fn generic_step(from: &str, to: &str, trigger: &str) -> StepTemplate {
    let origin = if from.is_empty() { "start" } else { from };
    StepTemplate::new(
        GENERIC_STEP_NAME,
        format!(
            "Processing navigation from {} to {} (action: {})",
            origin, to, trigger
        ),
    )
}

impl Default for BusinessLogicTable {
    /// Built-in narration for the common authentication and dashboard flows.
    fn default() -> Self {
        let step = StepTemplate::new;
        BusinessLogicTable::empty()
            .with_transition(
                "login",
                "dashboard",
                vec![
                    step("validate_credentials", "Validating user credentials"),
                    step("create_session", "Creating authenticated session"),
                    step("load_user_profile", "Loading user profile"),
                    step("fetch_dashboard_data", "Fetching dashboard widgets and metrics"),
                ],
            )
            .with_transition(
                "dashboard",
                "settings",
                vec![
                    step("load_preferences", "Loading user preferences"),
                    step("check_permissions", "Checking settings permissions"),
                ],
            )
            .with_transition(
                "settings",
                "dashboard",
                vec![
                    step("persist_preferences", "Saving changed preferences"),
                    step("refresh_dashboard", "Refreshing dashboard with new settings"),
                ],
            )
            .with_transition(
                "dashboard",
                "reports",
                vec![
                    step("query_report_data", "Querying report data"),
                    step("aggregate_metrics", "Aggregating metrics"),
                    step("render_charts", "Preparing chart series"),
                ],
            )
            .with_transition(
                "dashboard",
                "profile",
                vec![step("load_user_profile", "Loading user profile")],
            )
            .with_transition(
                "dashboard",
                "logout",
                vec![
                    step("invalidate_session", "Invalidating session token"),
                    step("clear_local_state", "Clearing cached user data"),
                ],
            )
            .with_transition(
                "signup",
                "onboarding",
                vec![
                    step("validate_registration", "Validating registration form"),
                    step("create_account", "Creating user account"),
                    step("send_welcome_email", "Queueing welcome email"),
                ],
            )
            .with_transition(
                "cart",
                "checkout",
                vec![
                    step("validate_cart", "Validating cart contents and stock"),
                    step("calculate_totals", "Calculating totals, tax and shipping"),
                ],
            )
            .with_transition(
                "checkout",
                "order_confirmation",
                vec![
                    step("authorize_payment", "Authorizing payment"),
                    step("create_order", "Creating order record"),
                    step("send_receipt", "Sending order receipt"),
                ],
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_transition_in_table_order() {
        let table = BusinessLogicTable::default();
        let steps = table.steps_for("login", "dashboard", "submit");
        let names: Vec<&str> = steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "validate_credentials",
                "create_session",
                "load_user_profile",
                "fetch_dashboard_data"
            ]
        );
    }

    #[test]
    fn test_unknown_transition_gets_one_generic_step() {
        let table = BusinessLogicTable::default();
        let steps = table.steps_for("chat", "tasks", "open_tasks");
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].name, GENERIC_STEP_NAME);
        assert!(steps[0].description.contains("chat"));
        assert!(steps[0].description.contains("tasks"));
    }

    #[test]
    fn test_lookup_is_directional() {
        let table = BusinessLogicTable::default();
        assert!(table.contains("cart", "checkout"));
        assert!(!table.contains("checkout", "cart"));
    }

    #[test]
    fn test_custom_entry_overrides() {
        let table = BusinessLogicTable::default().with_transition(
            "login",
            "dashboard",
            vec![StepTemplate::new("sso_handshake", "Completing SSO handshake")],
        );
        assert_eq!(table.steps_for("login", "dashboard", "sso").len(), 1);
    }

    #[test]
    fn test_empty_entry_falls_back_to_generic() {
        let table = BusinessLogicTable::empty().with_transition("a", "b", vec![]);
        assert_eq!(table.steps_for("a", "b", "go")[0].name, GENERIC_STEP_NAME);
    }
}
