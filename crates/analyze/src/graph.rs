//! Graph Builder -- interfaces + flows into a reachability structure.
//!
//! A single linear pass over the flow records. Flows whose endpoints do
//! not name a known interface are dropped here and surface later as
//! orphan/unreachable diagnostics, never as an error.

use screenflow_interchange::{Connection, FlowRecord, InterfaceNode};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Direct reachability facts for a single interface.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct GraphEntry {
    /// Interfaces reachable through one connection.
    pub can_reach: BTreeSet<String>,
    /// Direct predecessors.
    pub reached_by: BTreeSet<String>,
    /// Action identifiers that trigger an outgoing connection.
    pub actions: BTreeSet<String>,
}

/// Read-only view over all interfaces and resolved connections.
///
/// Parallel connections between the same pair collapse into a single
/// reachability fact; the full connection list is kept separately.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ReachabilityGraph {
    /// Interface names in specification order.
    order: Vec<String>,
    nodes: BTreeMap<String, GraphEntry>,
    connections: Vec<Connection>,
}

impl ReachabilityGraph {
    /// Build the graph from interface and flow records.
    ///
    /// Idempotent: the same inputs always produce an equal graph.
    pub fn build(interfaces: &[InterfaceNode], flows: &[FlowRecord]) -> Self {
        let mut order = Vec::with_capacity(interfaces.len());
        let mut nodes = BTreeMap::new();

        for interface in interfaces {
            if nodes.contains_key(&interface.name) {
                tracing::debug!(interface = %interface.name, "duplicate interface name ignored");
                continue;
            }
            order.push(interface.name.clone());
            nodes.insert(interface.name.clone(), GraphEntry::default());
        }

        let mut connections = Vec::new();
        for flow in flows {
            if !nodes.contains_key(&flow.from) || !nodes.contains_key(&flow.to) {
                tracing::debug!(
                    from = %flow.from,
                    to = %flow.to,
                    trigger = %flow.trigger,
                    "dropping flow with unresolved endpoint"
                );
                continue;
            }

            if let Some(entry) = nodes.get_mut(&flow.from) {
                entry.can_reach.insert(flow.to.clone());
                entry.actions.insert(flow.trigger.clone());
            }
            if let Some(entry) = nodes.get_mut(&flow.to) {
                entry.reached_by.insert(flow.from.clone());
            }

            connections.push(Connection {
                from: flow.from.clone(),
                to: flow.to.clone(),
                action: flow.trigger.clone(),
                label: flow.label.clone(),
            });
        }

        ReachabilityGraph {
            order,
            nodes,
            connections,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Interface names in specification order.
    pub fn interface_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    pub fn entry(&self, name: &str) -> Option<&GraphEntry> {
        self.nodes.get(name)
    }

    pub fn can_reach(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.nodes.get(name).map(|e| &e.can_reach)
    }

    pub fn reached_by(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.nodes.get(name).map(|e| &e.reached_by)
    }

    pub fn actions(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.nodes.get(name).map(|e| &e.actions)
    }

    /// Number of distinct direct successors. Zero for unknown names.
    pub fn out_degree(&self, name: &str) -> usize {
        self.nodes.get(name).map_or(0, |e| e.can_reach.len())
    }

    /// Number of distinct direct predecessors. Zero for unknown names.
    pub fn in_degree(&self, name: &str) -> usize {
        self.nodes.get(name).map_or(0, |e| e.reached_by.len())
    }

    /// All resolved connections, in flow declaration order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Transitive closure of `can_reach` from `start`, including `start`.
    ///
    /// Depth-first; the visited set makes it safe on cyclic graphs.
    /// Returns an empty set when `start` is not a known interface.
    pub fn reachable_from(&self, start: &str) -> BTreeSet<String> {
        let mut visited = BTreeSet::new();
        if !self.contains(start) {
            return visited;
        }

        let mut stack = vec![start];
        while let Some(name) = stack.pop() {
            if !visited.insert(name.to_string()) {
                continue;
            }
            if let Some(entry) = self.nodes.get(name) {
                for next in entry.can_reach.iter().rev() {
                    if !visited.contains(next) {
                        stack.push(next.as_str());
                    }
                }
            }
        }

        visited
    }
}
