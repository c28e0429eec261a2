//! Dependency graph over registered tasks
//!
//! Built from the registrations a host received, so that category tasks can
//! be listed after their members and rendered as a tree.
//! Uses petgraph for graph operations.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("Dependency cycle detected involving task: {0}")]
    CycleDetected(String),

    #[error("Self-dependency not allowed: {0}")]
    SelfDependency(String),
}

/// A dependency graph keyed by task name
#[derive(Debug, Default)]
pub struct CategoryGraph {
    /// The underlying directed graph, edges point from dependency to dependent
    graph: DiGraph<String, ()>,

    /// Map from task name to node index
    node_map: HashMap<String, NodeIndex>,
}

impl CategoryGraph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Builds a graph from `(name, dependencies)` pairs
    ///
    /// Dependencies that are not among the given names belong to the host
    /// runner and are added as leaf nodes.
    pub fn from_registrations<'a, I>(registrations: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (&'a str, &'a [String])>,
    {
        let mut graph = Self::new();

        // First pass: add all nodes
        let registrations: Vec<_> = registrations.into_iter().collect();
        for (name, _) in &registrations {
            graph.add_task(name);
        }

        // Second pass: add all edges
        for (name, dependencies) in &registrations {
            for dependency in dependencies.iter() {
                graph.add_dependency(name, dependency)?;
            }
        }

        Ok(graph)
    }

    /// Adds a task to the graph
    pub fn add_task(&mut self, name: &str) -> NodeIndex {
        if let Some(idx) = self.node_map.get(name) {
            return *idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_map.insert(name.to_string(), idx);
        idx
    }

    /// Adds a dependency edge: `task` depends on `depends_on`
    ///
    /// Either side is added as a node if it is missing. Cycles are not
    /// rejected here; see [`CategoryGraph::topological_order`].
    pub fn add_dependency(&mut self, task: &str, depends_on: &str) -> Result<(), GraphError> {
        if task == depends_on {
            return Err(GraphError::SelfDependency(task.to_string()));
        }

        let task_idx = self.add_task(task);
        let dep_idx = self.add_task(depends_on);

        if self.graph.find_edge(dep_idx, task_idx).is_none() {
            self.graph.add_edge(dep_idx, task_idx, ());
        }

        Ok(())
    }

    /// Returns tasks nothing depends on, in the order they were added
    pub fn roots(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .filter(|idx| {
                self.graph
                    .neighbors_directed(*idx, Direction::Outgoing)
                    .next()
                    .is_none()
            })
            .filter_map(|idx| self.graph.node_weight(idx).cloned())
            .collect()
    }

    /// Returns all tasks in topological order (dependencies before dependents)
    pub fn topological_order(&self) -> Result<Vec<String>, GraphError> {
        match toposort(&self.graph, None) {
            Ok(order) => Ok(order
                .into_iter()
                .filter_map(|idx| self.graph.node_weight(idx).cloned())
                .collect()),
            Err(cycle) => {
                let name = self
                    .graph
                    .node_weight(cycle.node_id())
                    .cloned()
                    .unwrap_or_default();
                Err(GraphError::CycleDetected(name))
            }
        }
    }

    /// Returns the number of tasks in the graph, external ones included
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    /// Returns true if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }
}
