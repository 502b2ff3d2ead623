//! Dependency graph data structures for addon modules

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Directed dependency graph over module names
///
/// An edge `A -> B` means "B depends on A", so a topological sort yields a
/// valid installation/processing order. Nodes are added exactly once and
/// duplicate edges are idempotent. Cycles are tolerated during construction;
/// they only surface when an order is requested.
#[derive(Debug, Clone, Default)]
pub struct ModuleGraph {
    graph: DiGraph<String, ()>,
    indices: HashMap<String, NodeIndex>,
    /// Node names in the order they were first added; the deterministic
    /// fallback ordering when the graph is not a DAG
    insertion_order: Vec<String>,
}

impl ModuleGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning its index; adding an existing name is a no-op
    pub fn add_module(&mut self, name: &str) -> NodeIndex {
        if let Some(idx) = self.indices.get(name) {
            return *idx;
        }

        let idx = self.graph.add_node(name.to_string());
        self.indices.insert(name.to_string(), idx);
        self.insertion_order.push(name.to_string());
        idx
    }

    /// Add a dependency edge `dependency -> dependent`
    ///
    /// Both endpoints are created when missing; a duplicate edge is not added
    /// twice.
    pub fn add_dependency(&mut self, dependency: &str, dependent: &str) {
        let dep_idx = self.add_module(dependency);
        let dependent_idx = self.add_module(dependent);

        if self.graph.find_edge(dep_idx, dependent_idx).is_none() {
            self.graph.add_edge(dep_idx, dependent_idx, ());
        }
    }

    /// Whether a module name is present in the graph
    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    /// Number of modules in the graph
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of dependency edges in the graph
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Module names in insertion order
    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.insertion_order.iter().map(|s| s.as_str())
    }

    /// Direct dependencies of a module (names of incoming edge sources)
    pub fn dependencies_of(&self, name: &str) -> Vec<String> {
        self.neighbor_names(name, Direction::Incoming)
    }

    /// Direct dependents of a module (names of outgoing edge targets)
    pub fn dependents_of(&self, name: &str) -> Vec<String> {
        self.neighbor_names(name, Direction::Outgoing)
    }

    fn neighbor_names(&self, name: &str, direction: Direction) -> Vec<String> {
        let Some(idx) = self.indices.get(name) else {
            return Vec::new();
        };

        self.graph
            .neighbors_directed(*idx, direction)
            .map(|n| self.graph[n].clone())
            .collect()
    }

    /// Compute an installation order for the graph
    ///
    /// When the graph is a DAG, every dependency appears before every module
    /// that depends on it. When a cycle makes a topological sort infeasible,
    /// the order falls back to node insertion order and `has_cycle` is set,
    /// so callers that only need *a* module list are never blocked.
    pub fn install_order(&self) -> InstallOrder {
        match toposort(&self.graph, None) {
            Ok(sorted) => InstallOrder {
                modules: sorted.iter().map(|idx| self.graph[*idx].clone()).collect(),
                has_cycle: false,
            },
            Err(_) => InstallOrder {
                modules: self.insertion_order.clone(),
                has_cycle: true,
            },
        }
    }

    /// Summary counters for display
    pub fn statistics(&self) -> GraphStatistics {
        let mut root_count = 0;
        let mut leaf_count = 0;

        for name in &self.insertion_order {
            if self.dependencies_of(name).is_empty() {
                root_count += 1;
            }
            if self.dependents_of(name).is_empty() {
                leaf_count += 1;
            }
        }

        GraphStatistics {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            root_count,
            leaf_count,
        }
    }
}

/// Result of ordering a module graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallOrder {
    /// All graph nodes, topologically sorted when `has_cycle` is false
    pub modules: Vec<String>,
    /// True when a cycle prevented a topological sort; `modules` then lists
    /// the nodes in insertion order instead
    pub has_cycle: bool,
}

/// Summary counters about a module graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    /// Modules with no dependencies in the graph
    pub root_count: usize,
    /// Modules nothing else in the graph depends on
    pub leaf_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_module_is_idempotent() {
        let mut graph = ModuleGraph::new();
        let a = graph.add_module("sale");
        let b = graph.add_module("sale");
        assert_eq!(a, b);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_duplicate_edges_are_idempotent() {
        let mut graph = ModuleGraph::new();
        graph.add_dependency("base", "sale");
        graph.add_dependency("base", "sale");
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_dependencies_and_dependents() {
        let mut graph = ModuleGraph::new();
        graph.add_dependency("base", "sale");
        graph.add_dependency("mail", "sale");
        graph.add_dependency("sale", "sale_stock");

        let mut deps = graph.dependencies_of("sale");
        deps.sort();
        assert_eq!(deps, vec!["base", "mail"]);
        assert_eq!(graph.dependents_of("sale"), vec!["sale_stock"]);
        assert!(graph.dependencies_of("missing").is_empty());
    }

    #[test]
    fn test_install_order_respects_dependencies() {
        let mut graph = ModuleGraph::new();
        graph.add_dependency("base", "sale");
        graph.add_dependency("sale", "sale_stock");
        graph.add_dependency("base", "stock");
        graph.add_dependency("stock", "sale_stock");

        let order = graph.install_order();
        assert!(!order.has_cycle);
        assert_eq!(order.modules.len(), 4);

        let position = |name: &str| order.modules.iter().position(|m| m == name).unwrap();
        assert!(position("base") < position("sale"));
        assert!(position("base") < position("stock"));
        assert!(position("sale") < position("sale_stock"));
        assert!(position("stock") < position("sale_stock"));
    }

    #[test]
    fn test_cycle_falls_back_to_insertion_order() {
        let mut graph = ModuleGraph::new();
        graph.add_dependency("a", "b");
        graph.add_dependency("b", "c");
        graph.add_dependency("c", "a");

        let order = graph.install_order();
        assert!(order.has_cycle);
        assert_eq!(order.modules, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_statistics() {
        let mut graph = ModuleGraph::new();
        graph.add_dependency("base", "sale");
        graph.add_dependency("base", "stock");

        let stats = graph.statistics();
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 2);
        assert_eq!(stats.root_count, 1);
        assert_eq!(stats.leaf_count, 2);
    }
}
