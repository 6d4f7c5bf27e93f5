//! A module for working with graphs.

use std::{fmt::Debug, hash::Hash, sync::OnceLock};

use indexmap::{IndexMap, IndexSet};
use nalgebra::DMatrix;
use tracing::{debug, instrument, trace};

use crate::{
    betweenness::compute_betweenness,
    edge::{Edge, Relationship},
    error::ValidationError,
    record::Record,
};

pub const MIN_NUM_THREADS: usize = 1;
pub const MAX_NUM_THREADS: usize = 128;

/// A directed graph, made up of typed and weighted edges.
#[derive(Clone, Debug)]
pub struct Graph<T> {
    /// The vertices in the order they were first seen, a vertex's position doubles as its index
    /// in the matrices and adjacency lists.
    nodes: IndexSet<T>,
    /// The edges keyed by `(source, target)` index pairs, at most one per ordered pair.
    edges: IndexMap<(usize, usize), Relationship>,
    /// Outgoing adjacency lists, indexed like `nodes`.
    successors: Vec<Vec<usize>>,
    /// Incoming edge counts, indexed like `nodes`.
    in_degrees: Vec<usize>,
    /// Cache the adjacency matrix when possible.
    adjacency_matrix: OnceLock<DMatrix<f64>>,
}

impl<T> Default for Graph<T>
where
    T: Clone + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Graph<T>
where
    T: Clone + Eq + Hash + Debug,
{
    /// Creates an empty graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::graph::Graph;
    ///
    /// let graph: Graph<&str> = Graph::new();
    /// ```
    pub fn new() -> Self {
        Self {
            nodes: Default::default(),
            edges: Default::default(),
            successors: Vec::new(),
            in_degrees: Vec::new(),
            adjacency_matrix: OnceLock::new(),
        }
    }

    /// Builds a graph from a sequence of records, in order.
    ///
    /// A later record for an already present `(source, target)` pair replaces the attributes of
    /// the earlier one. The first invalid record aborts the build.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::graph::Graph;
    /// use sociogram::record::Record;
    ///
    /// let graph = Graph::build(vec![
    ///     Record::new("a", "b", "Friend", 1.0),
    ///     Record::new("a", "b", "Colleague", 3.0),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(graph.edge_count(), 1);
    /// assert_eq!(graph.edge_attributes(&"a", &"b").unwrap().strength(), 3.0);
    /// ```
    #[instrument(skip(records))]
    pub fn build<I>(records: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = Record<T>>,
    {
        let mut graph = Self::new();
        let mut replaced = 0;

        for (position, record) in records.into_iter().enumerate() {
            let edge = record.validate(position).map_err(|err| {
                debug!(record = err.record(), %err, "rejected record");
                err
            })?;

            if graph.insert(edge).is_some() {
                replaced += 1;
            }
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            replaced,
            "built graph"
        );

        Ok(graph)
    }

    /// Inserts an edge into the graph, returning the attributes it replaced if the ordered pair
    /// was already present.
    ///
    /// Replacing an edge doesn't move it or its vertices in the insertion order.
    pub fn insert(&mut self, edge: Edge<T>) -> Option<Relationship> {
        let (source, target, relationship) = edge.into_parts();

        let i = self.insert_node(source);
        let j = self.insert_node(target);

        match self.edges.insert((i, j), relationship) {
            Some(previous) => {
                trace!(source = ?self.nodes[i], target = ?self.nodes[j], "replaced edge");
                Some(previous)
            }
            None => {
                self.successors[i].push(j);
                self.in_degrees[j] += 1;
                // The topology changed so the cached matrix no longer applies.
                self.clear_cache();
                None
            }
        }
    }

    /// Returns the vertices in the order they were first seen.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.nodes.iter()
    }

    /// Returns the position of a vertex in the insertion order.
    pub fn position(&self, node: &T) -> Option<usize> {
        self.nodes.get_index_of(node)
    }

    /// Returns the edges in the order their `(source, target)` pairs were first inserted.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = (&T, &T, &Relationship)> + '_ {
        // Indices are always valid, they were handed out by `insert_node`.
        self.edges
            .iter()
            .map(|(&(i, j), relationship)| (&self.nodes[i], &self.nodes[j], relationship))
    }

    /// Checks if the graph contains the directed edge `source -> target`.
    pub fn contains(&self, source: &T, target: &T) -> bool {
        self.edge_attributes(source, target).is_some()
    }

    /// Returns the attributes of the directed edge `source -> target`, if present.
    pub fn edge_attributes(&self, source: &T, target: &T) -> Option<&Relationship> {
        let i = self.position(source)?;
        let j = self.position(target)?;

        self.edges.get(&(i, j))
    }

    /// Returns the set of vertices reachable from `node` by following a single edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::graph::Graph;
    /// use sociogram::record::Record;
    ///
    /// let graph = Graph::build(vec![
    ///     Record::new("a", "b", "Friend", 1.0),
    ///     Record::new("c", "a", "Friend", 1.0),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(graph.out_neighbors(&"a").into_iter().collect::<Vec<_>>(), vec![&"b"]);
    /// assert!(graph.out_neighbors(&"b").is_empty());
    /// ```
    pub fn out_neighbors(&self, node: &T) -> IndexSet<&T> {
        self.position(node)
            .map(|i| self.successors[i].iter().map(|&j| &self.nodes[j]).collect())
            .unwrap_or_default()
    }

    /// Returns the vertex count of the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the edge count of the graph, one per distinct ordered pair.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of edges starting at `node`, `0` if the vertex is unknown.
    pub fn out_degree(&self, node: &T) -> usize {
        self.position(node).map_or(0, |i| self.successors[i].len())
    }

    /// Returns the number of edges ending at `node`, `0` if the vertex is unknown.
    pub fn in_degree(&self, node: &T) -> usize {
        self.position(node).map_or(0, |i| self.in_degrees[i])
    }

    /// Computes the density of the graph, the ratio of edges with respect to the maximum possible
    /// directed edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::graph::Graph;
    /// use sociogram::record::Record;
    ///
    /// let mut records = vec![Record::new("a", "b", "Friend", 1.0)];
    /// assert_eq!(Graph::build(records.clone()).unwrap().density(), 0.5);
    ///
    /// records.push(Record::new("a", "c", "Friend", 1.0));
    /// assert_eq!(Graph::build(records).unwrap().density(), 2.0 / 6.0);
    /// ```
    pub fn density(&self) -> f64 {
        let vc = self.node_count() as f64;
        let ec = self.edge_count() as f64;

        // A graph with less than two vertices has no possible edges.
        if self.node_count() < 2 {
            return 0.0;
        }

        // Calculate the total number of possible directed edges given a vertex count.
        let pec = vc * (vc - 1.0);
        ec / pec
    }

    /// Constructs the directed adjacency matrix for this graph, rows are sources and columns are
    /// targets, both ordered by vertex insertion.
    ///
    /// The matrix is dense, `n * n` cells, and is only built when asked for.
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use sociogram::graph::Graph;
    /// use sociogram::record::Record;
    ///
    /// let graph = Graph::build(vec![Record::new("a", "b", "Friend", 1.0)]).unwrap();
    /// assert_eq!(
    ///     graph.adjacency_matrix(),
    ///     &dmatrix![0.0, 1.0;
    ///               0.0, 0.0]
    /// );
    /// ```
    pub fn adjacency_matrix(&self) -> &DMatrix<f64> {
        self.adjacency_matrix.get_or_init(|| {
            let n = self.node_count();
            let mut matrix = DMatrix::<f64>::zeros(n, n);

            // Edges are unique per ordered pair, so every cell is written at most once.
            for &(i, j) in self.edges.keys() {
                matrix[(i, j)] = 1.0;
            }

            matrix
        })
    }

    /// Returns a mapping of vertices to their degree centrality, the fraction of the other
    /// vertices they're connected to in either direction.
    ///
    /// Every vertex is present, in insertion order. Values are all `0.0` when the graph has at
    /// most one vertex.
    #[instrument(skip(self))]
    pub fn degree_centrality(&self) -> IndexMap<T, f64> {
        self.scaled_by_others(|i| (self.successors[i].len() + self.in_degrees[i]) as f64)
    }

    /// Returns a mapping of vertices to their in-degree centrality, the fraction of the other
    /// vertices that point to them.
    #[instrument(skip(self))]
    pub fn in_degree_centrality(&self) -> IndexMap<T, f64> {
        self.scaled_by_others(|i| self.in_degrees[i] as f64)
    }

    /// Returns a mapping of vertices to their (unnormalised) betweenness centrality, computed on
    /// a single thread.
    ///
    /// # Examples
    ///
    /// ```
    /// use sociogram::graph::Graph;
    /// use sociogram::record::Record;
    ///
    /// let graph = Graph::build(vec![
    ///     Record::new("a", "b", "Friend", 1.0),
    ///     Record::new("b", "c", "Friend", 1.0),
    /// ])
    /// .unwrap();
    ///
    /// let betweenness = graph.betweenness_centrality();
    /// assert_eq!(betweenness[&"a"], 0.0);
    /// assert_eq!(betweenness[&"b"], 1.0);
    /// assert_eq!(betweenness[&"c"], 0.0);
    /// ```
    pub fn betweenness_centrality(&self) -> IndexMap<T, f64> {
        self.betweenness_centrality_with_threads(MIN_NUM_THREADS)
    }

    /// Same as [`Graph::betweenness_centrality`] but splits the work across `num_threads` threads,
    /// clamped to `[MIN_NUM_THREADS, MAX_NUM_THREADS]`.
    ///
    /// The result is deterministic for a given thread count.
    #[instrument(skip(self))]
    pub fn betweenness_centrality_with_threads(&self, num_threads: usize) -> IndexMap<T, f64> {
        let betweenness = compute_betweenness(&self.successors, num_threads);

        self.nodes.iter().cloned().zip(betweenness).collect()
    }

    //
    // Private
    //

    /// Clears the computed state.
    ///
    /// This should be called every time the topology is mutated since the cached state won't
    /// correspond to the new graph.
    fn clear_cache(&mut self) {
        self.adjacency_matrix.take();
    }

    /// Adds a vertex if it isn't present yet and returns its index.
    fn insert_node(&mut self, node: T) -> usize {
        let (index, is_inserted) = self.nodes.insert_full(node);

        if is_inserted {
            self.successors.push(Vec::new());
            self.in_degrees.push(0);
        }

        index
    }

    /// Maps each vertex to `count(index) / (n - 1)`, or to `0.0` when there are no other
    /// vertices.
    fn scaled_by_others(&self, count: impl Fn(usize) -> f64) -> IndexMap<T, f64> {
        let n = self.node_count();

        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                let value = if n > 1 {
                    count(i) / (n - 1) as f64
                } else {
                    0.0
                };

                (node.clone(), value)
            })
            .collect()
    }
}

//
// Trait implementations
//

impl<T> Extend<Edge<T>> for Graph<T>
where
    T: Clone + Eq + Hash + Debug,
{
    fn extend<I: IntoIterator<Item = Edge<T>>>(&mut self, edges: I) {
        for edge in edges {
            self.insert(edge);
        }
    }
}

impl<T> FromIterator<Edge<T>> for Graph<T>
where
    T: Clone + Eq + Hash + Debug,
{
    fn from_iter<I: IntoIterator<Item = Edge<T>>>(edges: I) -> Self {
        let mut graph = Self::new();
        graph.extend(edges);

        graph
    }
}
