//! Run-time navigation records owned by the [`Navigator`](crate::Navigator).
//!
//! Callers only ever see these through shared references or owned
//! snapshots; all mutation goes through the navigator.

use crate::bounded::BoundedHistory;
use crate::business_logic::BusinessLogicStep;
use serde::Serialize;
use std::collections::BTreeSet;
use std::time::Duration;

// ──────────────────────────────────────────────
// Navigation state
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    NavigationStart,
    NavigationComplete,
}

/// The last action dispatched by the navigator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionDescriptor {
    pub kind: ActionKind,
    /// Screen the transition leaves. Empty before the first screen is set.
    pub source: String,
    pub target: String,
    /// Who triggered it, e.g. `"ui"` or `"diagram"`.
    pub origin: String,
    pub user_action: String,
    /// Virtual time of dispatch.
    pub timestamp: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    pub current_screen: String,
    pub previous_screen: Option<String>,
    /// Recently visited screens, oldest first.
    pub history: BoundedHistory<String>,
    pub is_navigating: bool,
    pub last_action: Option<ActionDescriptor>,
}

impl NavigationState {
    pub(crate) fn new(history_capacity: usize) -> Self {
        NavigationState {
            current_screen: String::new(),
            previous_screen: None,
            history: BoundedHistory::new(history_capacity),
            is_navigating: false,
            last_action: None,
        }
    }
}

// ──────────────────────────────────────────────
// Path highlight
// ──────────────────────────────────────────────

/// One past highlighted transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LitPath {
    pub from: Option<String>,
    pub to: String,
    pub started_at: Duration,
}

/// The highlight currently on display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveEffect {
    pub from: Option<String>,
    pub to: String,
    pub connection_id: Option<String>,
    pub started_at: Duration,
}

/// Transient visual-highlight state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathEffect {
    pub lit_nodes: BTreeSet<String>,
    pub glowing_connections: BTreeSet<String>,
    /// Past lit paths, oldest first. Survives highlight clears.
    pub history: BoundedHistory<LitPath>,
    pub active: Option<ActiveEffect>,
}

impl PathEffect {
    pub(crate) fn new(history_capacity: usize) -> Self {
        PathEffect {
            lit_nodes: BTreeSet::new(),
            glowing_connections: BTreeSet::new(),
            history: BoundedHistory::new(history_capacity),
            active: None,
        }
    }

    pub fn is_lit(&self) -> bool {
        self.active.is_some()
    }

    /// Clear the active highlight; the lit-path history is kept.
    pub(crate) fn clear_active(&mut self) {
        self.lit_nodes.clear();
        self.glowing_connections.clear();
        self.active = None;
    }
}

// ──────────────────────────────────────────────
// Snapshot
// ──────────────────────────────────────────────

/// Owned, read-only copy of everything a display binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationSnapshot {
    pub state: NavigationState,
    pub path_effect: PathEffect,
    pub business_logic: Vec<BusinessLogicStep>,
    pub now: Duration,
}
