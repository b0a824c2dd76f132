//! Navigation State Machine.
//!
//! `Idle -> Navigating -> Idle`, with a transient lit path that outlives
//! the navigating phase:
//!
//! 1. start (immediate): mark navigating, light the path, schedule the
//!    business-logic steps at staggered offsets and the commit.
//! 2. commit (`commit_delay` later): the target becomes current.
//! 3. clear (`highlight_clear_delay` after commit): the highlight goes dark.
//!
//! All delays run on the scheduler's virtual clock. An accepted call
//! cancels every pending effect of earlier calls: the last call wins.

use crate::bounded::BoundedHistory;
use crate::business_logic::{BusinessLogicStep, BusinessLogicTable, StepTemplate, TransitionRef};
use crate::classify::{classify_screen, ScreenCategory};
use crate::config::{ConfigError, NavigatorConfig};
use crate::events::NavigationEvent;
use crate::scheduler::Scheduler;
use crate::state::{
    ActionDescriptor, ActionKind, ActiveEffect, LitPath, NavigationSnapshot, NavigationState,
    PathEffect,
};
use screenflow_analyze::{entry_point, ReachabilityGraph};
use screenflow_interchange::{connection_id, ScreenSpec};
use std::time::Duration;

/// User-action marker that bypasses the same-screen guard.
const REFRESH_MARKER: &str = "refresh";

/// Handle returned by [`Navigator::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type EventCallback = Box<dyn FnMut(&NavigationEvent) + Send>;

/// A delayed effect waiting on the scheduler.
#[derive(Debug, Clone)]
enum PendingEffect {
    EnqueueStep {
        template: StepTemplate,
        transition: TransitionRef,
    },
    Commit {
        from: Option<String>,
        to: String,
        origin: String,
        user_action: String,
    },
    ClearHighlight {
        to: String,
    },
}

/// Single owner of navigation state, path highlight and step queue.
pub struct Navigator {
    config: NavigatorConfig,
    graph: ReachabilityGraph,
    business_logic: BusinessLogicTable,
    state: NavigationState,
    path: PathEffect,
    steps: BoundedHistory<BusinessLogicStep>,
    scheduler: Scheduler<PendingEffect>,
    next_step_id: u64,
    subscribers: Vec<(SubscriptionId, EventCallback)>,
    next_subscription: u64,
}

impl Navigator {
    /// Create a navigator with an empty screen network.
    pub fn new(config: NavigatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: NavigatorConfig) -> Self {
        let mut state = NavigationState::new(config.history_capacity);
        if let Some(initial) = &config.initial_screen {
            state.current_screen = initial.clone();
            state.history.push(initial.clone());
        }

        Navigator {
            path: PathEffect::new(config.path_history_capacity),
            steps: BoundedHistory::new(config.step_queue_capacity),
            graph: ReachabilityGraph::default(),
            business_logic: BusinessLogicTable::default(),
            scheduler: Scheduler::new(),
            next_step_id: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
            state,
            config,
        }
    }

    /// Replace the business-logic table.
    pub fn with_business_logic(mut self, table: BusinessLogicTable) -> Self {
        self.business_logic = table;
        self
    }

    // ──────────────────────────────────────────────
    // Screen network
    // ──────────────────────────────────────────────

    /// (Re)build the screen network from a specification.
    ///
    /// If no screen is current yet, the navigator is placed on the entry
    /// interface. Pending effects are left untouched.
    pub fn initialize_screen_network(&mut self, spec: &ScreenSpec) {
        self.graph = ReachabilityGraph::build(&spec.interfaces, &spec.flows);

        if self.state.current_screen.is_empty() {
            if let Some(entry) = entry_point(&spec.interfaces) {
                self.state.current_screen = entry.name.clone();
                self.state.history.push(entry.name.clone());
            }
        }

        tracing::info!(
            screens = self.graph.len(),
            connections = self.graph.connections().len(),
            current = %self.state.current_screen,
            "screen network initialized"
        );
        self.emit(NavigationEvent::NetworkInitialized {
            screens: self.graph.len(),
            connections: self.graph.connections().len(),
        });
    }

    pub fn graph(&self) -> &ReachabilityGraph {
        &self.graph
    }

    pub fn is_known_screen(&self, name: &str) -> bool {
        self.graph.contains(name)
    }

    /// Presentation category of a screen name.
    pub fn classify_screen(&self, name: &str) -> ScreenCategory {
        classify_screen(name)
    }

    // ──────────────────────────────────────────────
    // Navigation
    // ──────────────────────────────────────────────

    /// Start a transition to `target`.
    ///
    /// Fire-and-forget: effects show up in the state, path effect and
    /// step queue as virtual time advances. A call targeting the current
    /// screen is ignored unless `user_action` asks for a refresh. Unknown
    /// targets are reported and then navigated to anyway.
    pub fn navigate_to_screen(&mut self, target: &str, source: &str, user_action: &str) {
        if target == self.state.current_screen
            && !user_action.to_lowercase().contains(REFRESH_MARKER)
        {
            tracing::debug!(screen = %target, user_action, "already on target screen; ignoring");
            self.emit(NavigationEvent::Ignored {
                target: target.to_string(),
                user_action: user_action.to_string(),
            });
            return;
        }

        if !self.graph.contains(target) {
            tracing::warn!(
                screen = %target,
                origin = %source,
                "navigating to a screen outside the screen network"
            );
            self.emit(NavigationEvent::UnknownTarget {
                target: target.to_string(),
            });
        }

        let superseded = self.scheduler.cancel_where(|_| true);
        if superseded > 0 {
            tracing::debug!(superseded, "cancelled pending effects of an earlier transition");
        }

        let now = self.scheduler.now();
        let from = if self.state.current_screen.is_empty() {
            None
        } else {
            Some(self.state.current_screen.clone())
        };

        // Phase 1
        self.state.is_navigating = true;
        self.state.previous_screen = from.clone();
        self.state.last_action = Some(ActionDescriptor {
            kind: ActionKind::NavigationStart,
            source: self.state.current_screen.clone(),
            target: target.to_string(),
            origin: source.to_string(),
            user_action: user_action.to_string(),
            timestamp: now,
        });
        self.light_path(from.as_deref(), target, now);
        self.emit(NavigationEvent::Started {
            from: from.clone(),
            to: target.to_string(),
        });

        // Phase 1b
        let transition = TransitionRef {
            from: self.state.current_screen.clone(),
            to: target.to_string(),
            trigger: user_action.to_string(),
        };
        let templates = self
            .business_logic
            .steps_for(&transition.from, target, user_action);
        let stagger = self.config.step_stagger();
        for (index, template) in templates.into_iter().enumerate() {
            self.scheduler.schedule(
                stagger * index as u32,
                PendingEffect::EnqueueStep {
                    template,
                    transition: transition.clone(),
                },
            );
        }

        self.scheduler.schedule(
            self.config.commit_delay(),
            PendingEffect::Commit {
                from,
                to: target.to_string(),
                origin: source.to_string(),
                user_action: user_action.to_string(),
            },
        );

        // Zero-offset effects land before the call returns.
        self.advance(Duration::ZERO);
    }

    fn light_path(&mut self, from: Option<&str>, to: &str, now: Duration) {
        self.path.lit_nodes.clear();
        self.path.glowing_connections.clear();

        let connection = from.map(|f| connection_id(f, to));
        if let Some(f) = from {
            self.path.lit_nodes.insert(f.to_string());
        }
        self.path.lit_nodes.insert(to.to_string());
        if let Some(id) = &connection {
            self.path.glowing_connections.insert(id.clone());
        }

        self.path.active = Some(ActiveEffect {
            from: from.map(String::from),
            to: to.to_string(),
            connection_id: connection,
            started_at: now,
        });
        self.path.history.push(LitPath {
            from: from.map(String::from),
            to: to.to_string(),
            started_at: now,
        });
    }

    // ──────────────────────────────────────────────
    // Time
    // ──────────────────────────────────────────────

    /// Virtual time since the navigator was created.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// True when no effect is pending.
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_empty()
    }

    /// Move virtual time forward by `by`, firing every effect that falls
    /// due, including effects scheduled by effects fired in the window.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some(effect) = self.scheduler.pop_due(until) {
            self.apply(effect);
        }
        self.scheduler.advance_to(until);
    }

    /// Fire everything still pending, jumping from deadline to deadline.
    pub fn run_until_idle(&mut self) {
        while let Some(deadline) = self.scheduler.next_deadline() {
            let by = deadline.saturating_sub(self.scheduler.now());
            self.advance(by);
        }
    }

    fn apply(&mut self, effect: PendingEffect) {
        let now = self.scheduler.now();
        match effect {
            PendingEffect::EnqueueStep {
                template,
                transition,
            } => {
                let step = BusinessLogicStep {
                    id: format!("step-{}", self.next_step_id),
                    name: template.name,
                    description: template.description,
                    transition,
                    timestamp: now,
                };
                self.next_step_id += 1;
                self.steps.push(step.clone());
                self.emit(NavigationEvent::StepEnqueued { step });
            }
            PendingEffect::Commit {
                from,
                to,
                origin,
                user_action,
            } => {
                // Phase 2
                self.state.current_screen = to.clone();
                self.state.history.push(to.clone());
                self.state.is_navigating = false;
                self.state.last_action = Some(ActionDescriptor {
                    kind: ActionKind::NavigationComplete,
                    source: from.clone().unwrap_or_default(),
                    target: to.clone(),
                    origin,
                    user_action,
                    timestamp: now,
                });
                tracing::debug!(from = ?from, to = %to, "transition committed");
                self.scheduler.schedule(
                    self.config.highlight_clear_delay(),
                    PendingEffect::ClearHighlight { to: to.clone() },
                );
                self.emit(NavigationEvent::Completed { from, to });
            }
            PendingEffect::ClearHighlight { to } => {
                // Phase 3
                self.path.clear_active();
                tracing::debug!(to = %to, "path highlight cleared");
                self.emit(NavigationEvent::HighlightCleared { to });
            }
        }
    }

    // ──────────────────────────────────────────────
    // Observation
    // ──────────────────────────────────────────────

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn path_effect(&self) -> &PathEffect {
        &self.path
    }

    /// Queued business-logic steps, oldest first.
    pub fn business_logic_queue(&self) -> impl Iterator<Item = &BusinessLogicStep> {
        self.steps.iter()
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Owned copy of everything a display binds to.
    pub fn snapshot(&self) -> NavigationSnapshot {
        NavigationSnapshot {
            state: self.state.clone(),
            path_effect: self.path.clone(),
            business_logic: self.steps.to_vec(),
            now: self.scheduler.now(),
        }
    }

    /// Register a callback invoked with every navigation event.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&NavigationEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    fn emit(&mut self, event: NavigationEvent) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(&event);
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::from_valid_config(NavigatorConfig::default())
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("state", &self.state)
            .field("path", &self.path)
            .field("queued_steps", &self.steps.len())
            .field("pending_effects", &self.scheduler.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenflow_interchange::{FlowRecord, InterfaceNode};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn navigator() -> Navigator {
        let spec = ScreenSpec::new(
            vec![
                InterfaceNode::new("login", ["submit"]),
                InterfaceNode::new("dashboard", ["open_settings"]),
                InterfaceNode::new("settings", ["back"]),
            ],
            vec![
                FlowRecord::new("login", "dashboard", "submit"),
                FlowRecord::new("dashboard", "settings", "open_settings"),
                FlowRecord::new("settings", "dashboard", "back"),
            ],
        );
        let mut nav = Navigator::default();
        nav.initialize_screen_network(&spec);
        nav
    }

    #[test]
    fn test_starts_on_entry_point() {
        let nav = navigator();
        assert_eq!(nav.state().current_screen, "dashboard");
        assert_eq!(nav.state().history.to_vec(), vec!["dashboard".to_string()]);
        assert!(nav.is_idle());
    }

    #[test]
    fn test_default_matches_default_config() {
        let from_default = Navigator::default();
        let from_config = Navigator::new(NavigatorConfig::default()).unwrap();
        assert_eq!(from_default.config(), from_config.config());
        assert_eq!(from_default.snapshot(), from_config.snapshot());
        assert!(from_default.state().current_screen.is_empty());
        assert!(from_default.is_idle());
    }

    #[test]
    fn test_configured_initial_screen_wins() {
        let config = NavigatorConfig {
            initial_screen: Some("login".to_string()),
            ..NavigatorConfig::default()
        };
        let mut nav = Navigator::new(config).unwrap();
        nav.initialize_screen_network(&ScreenSpec::new(
            vec![
                InterfaceNode::new("login", ["submit"]),
                InterfaceNode::new("dashboard", Vec::<String>::new()),
            ],
            vec![],
        ));
        assert_eq!(nav.state().current_screen, "login");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = NavigatorConfig {
            history_capacity: 0,
            ..NavigatorConfig::default()
        };
        assert!(Navigator::new(config).is_err());
    }

    #[test]
    fn test_phase_one_is_immediate() {
        let mut nav = navigator();
        nav.navigate_to_screen("settings", "ui", "open_settings");

        let state = nav.state();
        assert!(state.is_navigating);
        assert_eq!(state.current_screen, "dashboard");
        assert_eq!(state.previous_screen.as_deref(), Some("dashboard"));
        let action = state.last_action.as_ref().unwrap();
        assert_eq!(action.kind, ActionKind::NavigationStart);
        assert_eq!(action.origin, "ui");

        let path = nav.path_effect();
        assert!(path.lit_nodes.contains("dashboard"));
        assert!(path.lit_nodes.contains("settings"));
        assert!(path.glowing_connections.contains("dashboard->settings"));

        // Step 0 is due at offset zero.
        assert_eq!(nav.business_logic_queue().count(), 1);
    }

    #[test]
    fn test_commit_then_clear() {
        let mut nav = navigator();
        nav.navigate_to_screen("settings", "ui", "open_settings");

        nav.advance(ms(299));
        assert!(nav.state().is_navigating);

        nav.advance(ms(1));
        assert!(!nav.state().is_navigating);
        assert_eq!(nav.state().current_screen, "settings");
        assert_eq!(
            nav.state().last_action.as_ref().unwrap().kind,
            ActionKind::NavigationComplete
        );
        assert!(nav.path_effect().is_lit());

        nav.advance(ms(999));
        assert!(nav.path_effect().is_lit());
        nav.advance(ms(1));
        assert!(!nav.path_effect().is_lit());
        assert!(nav.path_effect().lit_nodes.is_empty());
        assert_eq!(nav.path_effect().history.len(), 1);
        assert!(nav.is_idle());
    }

    #[test]
    fn test_steps_are_staggered() {
        let mut nav = navigator();
        nav.navigate_to_screen("settings", "ui", "open_settings");
        // dashboard->settings has two steps in the built-in table.
        assert_eq!(nav.business_logic_queue().count(), 1);
        nav.advance(ms(149));
        assert_eq!(nav.business_logic_queue().count(), 1);
        nav.advance(ms(1));
        let steps: Vec<_> = nav.business_logic_queue().collect();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].timestamp, ms(0));
        assert_eq!(steps[1].timestamp, ms(150));
        assert_eq!(steps[1].id, "step-1");
    }

    #[test]
    fn test_same_screen_ignored_but_refresh_allowed() {
        let mut nav = navigator();
        nav.navigate_to_screen("dashboard", "ui", "click");
        assert!(nav.is_idle());
        assert!(nav.state().last_action.is_none());

        nav.navigate_to_screen("dashboard", "ui", "pull_to_Refresh");
        assert!(nav.state().is_navigating);
        assert!(nav
            .path_effect()
            .glowing_connections
            .contains("dashboard->dashboard"));
    }

    #[test]
    fn test_run_until_idle_drains() {
        let mut nav = navigator();
        nav.navigate_to_screen("settings", "ui", "open_settings");
        nav.run_until_idle();
        assert!(nav.is_idle());
        assert_eq!(nav.now(), ms(1300));
        assert_eq!(nav.state().current_screen, "settings");
    }
}
