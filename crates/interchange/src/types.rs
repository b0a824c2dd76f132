//! Typed records representing an application's screen specification.
//!
//! These are the shapes handed over by the (external) specification
//! parser. Every consumer builds its own derived views from them; the
//! records themselves are immutable once a specification is loaded.

use serde::{Deserialize, Serialize};

/// Name substrings that mark an interface as a main/entry screen.
///
/// Order matches the entry-point priority used by the validator.
pub const MAIN_INTERFACE_HINTS: [&str; 4] = ["dashboard", "login", "home", "main"];

// ── Interface ───────────────────────────────────────────────────────

/// Display weighting of an interface. Never used for validation logic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceKind {
    Main,
    Normal,
}

impl InterfaceKind {
    /// Derive the kind from an interface name.
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        if MAIN_INTERFACE_HINTS.iter().any(|hint| lower.contains(hint)) {
            InterfaceKind::Main
        } else {
            InterfaceKind::Normal
        }
    }

    /// Interpret an explicit classification hint from the source specification.
    pub fn from_hint(hint: &str) -> Self {
        match hint.to_lowercase().as_str() {
            "main" | "entry" | "main/entry" => InterfaceKind::Main,
            _ => InterfaceKind::Normal,
        }
    }
}

/// One screen/state in the specification.
///
/// Deserializes from the same `{name, actions?, kind?}` shape as the
/// interchange bundle, through [`InterfaceNode::new`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "InterfaceRecord")]
pub struct InterfaceNode {
    pub name: String,
    /// Available action identifiers, in declaration order.
    pub actions: Vec<String>,
    pub kind: InterfaceKind,
}

impl InterfaceNode {
    /// Create an interface whose kind is derived from its name.
    pub fn new<I, S>(name: impl Into<String>, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let kind = InterfaceKind::from_name(&name);
        let mut deduped: Vec<String> = Vec::new();
        for action in actions {
            let action = action.into();
            if !deduped.contains(&action) {
                deduped.push(action);
            }
        }
        InterfaceNode {
            name,
            actions: deduped,
            kind,
        }
    }

    /// Override the derived kind.
    pub fn with_kind(mut self, kind: InterfaceKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn has_action(&self, action: &str) -> bool {
        self.actions.iter().any(|a| a == action)
    }
}

#[derive(Deserialize)]
struct InterfaceRecord {
    name: String,
    #[serde(default)]
    actions: Option<Vec<String>>,
    #[serde(default)]
    kind: Option<String>,
}

impl From<InterfaceRecord> for InterfaceNode {
    fn from(record: InterfaceRecord) -> Self {
        let node = InterfaceNode::new(record.name, record.actions.unwrap_or_default());
        match record.kind {
            Some(hint) => node.with_kind(InterfaceKind::from_hint(&hint)),
            None => node,
        }
    }
}

// ── Flow ────────────────────────────────────────────────────────────

/// A raw flow record as declared in the specification.
///
/// Endpoints are unresolved names; a flow may reference interfaces that
/// do not exist (yet).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlowRecord {
    pub from: String,
    pub to: String,
    pub trigger: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FlowRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>, trigger: impl Into<String>) -> Self {
        FlowRecord {
            from: from.into(),
            to: to.into(),
            trigger: trigger.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A resolved, directed edge between two known interfaces.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Connection {
    /// Identifier used for path highlighting: `"from->to"`.
    pub fn id(&self) -> String {
        connection_id(&self.from, &self.to)
    }
}

/// Format the `"from->to"` identifier shared by connections and path effects.
pub fn connection_id(from: &str, to: &str) -> String {
    format!("{}->{}", from, to)
}

// ── Specification ───────────────────────────────────────────────────

/// A loaded specification: interfaces plus raw flows, in declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScreenSpec {
    pub interfaces: Vec<InterfaceNode>,
    pub flows: Vec<FlowRecord>,
}

impl ScreenSpec {
    pub fn new(interfaces: Vec<InterfaceNode>, flows: Vec<FlowRecord>) -> Self {
        ScreenSpec { interfaces, flows }
    }

    pub fn interface(&self, name: &str) -> Option<&InterfaceNode> {
        self.interfaces.iter().find(|i| i.name == name)
    }
}
