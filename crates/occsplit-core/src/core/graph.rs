//! Undirected clash graph over chain identifiers.
//!
//! Vertices are chain ids; an edge means the two chains overlap in space. The relation is
//! stored as adjacency sets and is always materialized symmetrically, so `b ∈ N(a)` holds
//! exactly when `a ∈ N(b)`. Graphs are immutable once built: every derived graph (e.g. an
//! induced subgraph) is a fresh value.

use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClashGraph {
    adjacency: BTreeMap<String, BTreeSet<String>>,
}

impl ClashGraph {
    /// Creates a graph with no vertices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph by testing every unordered pair of vertices with `clashes`.
    ///
    /// Duplicate vertex ids collapse. The predicate is evaluated exactly once per unordered
    /// pair, with the lexicographically smaller id first; a `true` result adds the edge in
    /// both directions.
    ///
    /// # Arguments
    ///
    /// * `vertices` - The chain ids under consideration.
    /// * `clashes` - Pairwise clash predicate.
    pub fn build<I, S, F>(vertices: I, mut clashes: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnMut(&str, &str) -> bool,
    {
        let mut graph = Self::with_vertices(vertices);
        let pairs: Vec<(String, String)> = graph
            .adjacency
            .keys()
            .tuple_combinations()
            .filter(|(a, b)| clashes(a, b))
            .map(|(a, b)| (a.clone(), b.clone()))
            .collect();
        for (a, b) in pairs {
            graph.insert_edge(&a, &b);
        }
        graph
    }

    /// Builds a graph from an explicit edge list.
    ///
    /// Edges whose endpoints are not both listed in `vertices` are ignored, as are
    /// self-loops. Each accepted edge is stored in both directions.
    pub fn from_edges<I, S, E, T>(vertices: I, edges: E) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        E: IntoIterator<Item = (T, T)>,
        T: AsRef<str>,
    {
        let mut graph = Self::with_vertices(vertices);
        for (a, b) in edges {
            graph.insert_edge(a.as_ref(), b.as_ref());
        }
        graph
    }

    fn with_vertices<I, S>(vertices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            adjacency: vertices
                .into_iter()
                .map(|v| (v.into(), BTreeSet::new()))
                .collect(),
        }
    }

    fn insert_edge(&mut self, a: &str, b: &str) {
        if a == b || !self.adjacency.contains_key(a) || !self.adjacency.contains_key(b) {
            return;
        }
        if let Some(neighbors) = self.adjacency.get_mut(a) {
            neighbors.insert(b.to_string());
        }
        if let Some(neighbors) = self.adjacency.get_mut(b) {
            neighbors.insert(a.to_string());
        }
    }

    /// Vertex ids in sorted order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn vertex_set(&self) -> BTreeSet<String> {
        self.adjacency.keys().cloned().collect()
    }

    pub fn contains_vertex(&self, vertex: &str) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Chains clashing with `vertex`; empty for unknown vertices.
    pub fn neighbors(&self, vertex: &str) -> impl Iterator<Item = &str> {
        self.adjacency
            .get(vertex)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    pub fn are_clashing(&self, a: &str, b: &str) -> bool {
        self.adjacency.get(a).is_some_and(|n| n.contains(b))
    }

    /// Each undirected edge once, as `(smaller, larger)`, in sorted order.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.adjacency
            .iter()
            .flat_map(|(a, neighbors)| {
                neighbors
                    .iter()
                    .filter(move |b| a < *b)
                    .map(move |b| (a.as_str(), b.as_str()))
            })
            .collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Returns `true` when no vertex has a clash edge.
    pub fn is_clash_free(&self) -> bool {
        self.adjacency.values().all(BTreeSet::is_empty)
    }

    /// Splits the vertices into connected components.
    ///
    /// Traversal is an iterative depth-first search driven by an explicit stack, with an
    /// arena mapping each vertex index to the id of the component it was assigned to.
    /// Components are returned in order of their smallest vertex id; isolated vertices form
    /// singleton components.
    pub fn connected_components(&self) -> Vec<BTreeSet<String>> {
        let names: Vec<&String> = self.adjacency.keys().collect();
        let index: HashMap<&str, usize> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();
        let mut assignment: Vec<Option<usize>> = vec![None; names.len()];
        let mut components: Vec<BTreeSet<String>> = Vec::new();

        for start in 0..names.len() {
            if assignment[start].is_some() {
                continue;
            }
            let component_id = components.len();
            let mut members = BTreeSet::new();
            let mut stack = vec![start];
            assignment[start] = Some(component_id);

            while let Some(current) = stack.pop() {
                members.insert(names[current].clone());
                for next in self.neighbors(names[current]) {
                    if let Some(&next_idx) = index.get(next) {
                        if assignment[next_idx].is_none() {
                            assignment[next_idx] = Some(component_id);
                            stack.push(next_idx);
                        }
                    }
                }
            }

            components.push(members);
        }

        components
    }

    /// Returns the subgraph induced by `subset`.
    ///
    /// Vertices are `subset ∩ vertices(self)`; only edges with both endpoints inside the
    /// subset survive. The source graph is left untouched.
    pub fn induce_subgraph(&self, subset: &BTreeSet<String>) -> ClashGraph {
        let adjacency = self
            .adjacency
            .iter()
            .filter(|(vertex, _)| subset.contains(*vertex))
            .map(|(vertex, neighbors)| {
                (
                    vertex.clone(),
                    neighbors
                        .iter()
                        .filter(|n| subset.contains(*n))
                        .cloned()
                        .collect(),
                )
            })
            .collect();
        ClashGraph { adjacency }
    }
}
