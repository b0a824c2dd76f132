//! Navigation events delivered to subscribers.

use crate::business_logic::BusinessLogicStep;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavigationEvent {
    /// A screen network was (re)built.
    NetworkInitialized { screens: usize, connections: usize },
    /// The call targeted the current screen without asking for a refresh.
    Ignored { target: String, user_action: String },
    /// The target is not part of the current screen network.
    UnknownTarget { target: String },
    /// Phase 1: the transition began and the path is lit.
    Started { from: Option<String>, to: String },
    /// A business-logic step landed in the queue.
    StepEnqueued { step: BusinessLogicStep },
    /// Phase 2: the target is now the current screen.
    Completed { from: Option<String>, to: String },
    /// Phase 3: the active highlight was removed.
    HighlightCleared { to: String },
}
