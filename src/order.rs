//! Dependency Orderer.
//!
//! Builds the `referenced → referencing` graph over model names and sorts it with Kahn's
//! algorithm. Ties go to the model that comes first in the collection, so repeated runs on
//! the same input give the same order.
//!
//! Every model carries a self-edge. Self-edges never count towards in-degree: a model that
//! references itself is a permitted single-node cycle. Any cycle across two or more models
//! is a [`GenerateError::CyclicDependency`].

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use indexmap::IndexSet;

use crate::error::GenerateError;
use crate::references::references;
use crate::schema::ModelCollection;

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: IndexSet<String>,
    /// `dependents[r]` holds every `m` with an edge `r → m`, self-edge included.
    dependents: Vec<IndexSet<usize>>,
    /// Reverse adjacency of `dependents`.
    dependencies: Vec<IndexSet<usize>>,
}

impl DependencyGraph {
    pub fn build(models: &ModelCollection) -> Self {
        let nodes: IndexSet<String> = models.names().map(str::to_string).collect();
        let n = nodes.len();
        let mut graph = Self {
            nodes,
            dependents: vec![IndexSet::new(); n],
            dependencies: vec![IndexSet::new(); n],
        };

        for (idx, (name, definition)) in models.iter().enumerate() {
            graph.add_edge(idx, idx);
            for referenced in references(definition) {
                match graph.nodes.get_index_of(referenced.as_str()) {
                    Some(dep) => graph.add_edge(dep, idx),
                    // Rendered as a missing-reference marker; not a node, so no edge.
                    None => tracing::debug!(model = name, %referenced, "skipping edge to unknown model"),
                }
            }
        }

        tracing::debug!(nodes = n, edges = graph.edge_count(), "dependency graph built");
        graph
    }

    fn add_edge(&mut self, from: usize, to: usize) {
        self.dependents[from].insert(to);
        self.dependencies[to].insert(from);
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> { self.nodes.iter().map(String::as_str) }

    pub fn edge_count(&self) -> usize { self.dependents.iter().map(IndexSet::len).sum() }

    /// All `(from, to)` edges: `from` must be emitted no later than `to`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.dependents.iter().enumerate().flat_map(move |(from, tos)| {
            tos.iter().map(move |&to| (self.nodes[from].as_str(), self.nodes[to].as_str()))
        })
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.nodes.get_index_of(from), self.nodes.get_index_of(to)) {
            (Some(f), Some(t)) => self.dependents[f].contains(&t),
            _ => false,
        }
    }

    /// Topological order of all nodes.
    pub fn order(&self) -> Result<Vec<String>, GenerateError> {
        let n = self.nodes.len();
        let mut in_degree: Vec<usize> = (0..n)
            .map(|idx| self.dependencies[idx].iter().filter(|&&dep| dep != idx).count())
            .collect();

        // min-heap on collection position
        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0)
            .map(|(idx, _)| Reverse(idx))
            .collect();

        let mut sorted: Vec<usize> = Vec::with_capacity(n);
        while let Some(Reverse(idx)) = ready.pop() {
            sorted.push(idx);
            for &next in &self.dependents[idx] {
                if next == idx {
                    continue;
                }
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.push(Reverse(next));
                }
            }
        }

        if sorted.len() != n {
            let cycle = self.find_cycle(&in_degree);
            tracing::debug!(?cycle, "dependency cycle");
            return Err(GenerateError::CyclicDependency { cycle });
        }

        Ok(sorted.into_iter().map(|idx| self.nodes[idx].clone()).collect())
    }

    /// Extract one concrete cycle from the nodes Kahn's pass could not release.
    ///
    /// Each such node still has an unreleased dependency other than itself, so walking
    /// dependencies from any of them must revisit a node.
    fn find_cycle(&self, in_degree: &[usize]) -> Vec<String> {
        let blocked = |idx: usize| in_degree[idx] > 0;
        let Some(start) = (0..self.nodes.len()).find(|&idx| blocked(idx)) else {
            return Vec::new();
        };

        let mut path: IndexSet<usize> = IndexSet::new();
        let mut current = start;
        loop {
            if let Some(pos) = path.get_index_of(&current) {
                let mut cycle: Vec<String> = path
                    .iter()
                    .skip(pos)
                    .map(|&idx| self.nodes[idx].clone())
                    .collect();
                cycle.reverse();
                return cycle;
            }
            path.insert(current);
            let next = self.dependencies[current]
                .iter()
                .copied()
                .find(|&dep| dep != current && blocked(dep));
            match next {
                Some(dep) => current = dep,
                None => return path.iter().map(|&idx| self.nodes[idx].clone()).collect(),
            }
        }
    }
}

/// Emission order for `models`: every model once, dependencies first.
pub fn order(models: &ModelCollection) -> Result<Vec<String>, GenerateError> {
    DependencyGraph::build(models).order()
}
