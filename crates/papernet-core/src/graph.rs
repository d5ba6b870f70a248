//! # Graph Model
//!
//! Request-scoped weighted graph used by both builders and the sampler.
//!
//! Nodes live in an `IndexMap` keyed by external id, so a node's position is
//! the order in which it was first inserted. Adjacency is stored per
//! position, again insertion-ordered, which makes node and edge iteration
//! fully deterministic for a given sequence of insertions.

use crate::{EdgeWeight, Link};
use indexmap::IndexMap;

/// Whether edges have a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `a -> b` and `b -> a` are distinct edges.
    Directed,
    /// `{a, b}` is a single edge.
    Undirected,
}

/// Adjacency of one node: neighbor position -> weight.
type Adjacency = IndexMap<usize, EdgeWeight>;

/// A simple weighted graph (no self-loops, no parallel edges).
#[derive(Debug, Clone)]
pub struct Graph<N> {
    direction: Direction,

    /// Node attributes keyed by id, in insertion order.
    nodes: IndexMap<String, N>,

    /// Outgoing edges per node. Symmetric for undirected graphs.
    succ: Vec<Adjacency>,

    /// Incoming edges per node. Always empty for undirected graphs.
    pred: Vec<Adjacency>,
}

impl<N> Graph<N> {
    /// Create an empty graph of the given direction.
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            nodes: IndexMap::new(),
            succ: Vec::new(),
            pred: Vec::new(),
        }
    }

    #[must_use]
    pub fn directed() -> Self {
        Self::new(Direction::Directed)
    }

    #[must_use]
    pub fn undirected() -> Self {
        Self::new(Direction::Undirected)
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn push_slot(&mut self) {
        self.succ.push(Adjacency::new());
        if self.direction == Direction::Directed {
            self.pred.push(Adjacency::new());
        }
    }

    /// Insert a node, or replace the attributes of an existing one.
    ///
    /// A replaced node keeps its original position.
    pub fn upsert_node(&mut self, id: &str, attrs: N) -> usize {
        if let Some(index) = self.nodes.get_index_of(id) {
            if let Some((_, slot)) = self.nodes.get_index_mut(index) {
                *slot = attrs;
            }
            return index;
        }
        let (index, _) = self.nodes.insert_full(id.to_string(), attrs);
        self.push_slot();
        index
    }

    /// Insert a node only if the id is new. Existing attributes are kept.
    pub fn ensure_node(&mut self, id: &str, make: impl FnOnce() -> N) -> usize {
        if let Some(index) = self.nodes.get_index_of(id) {
            return index;
        }
        let (index, _) = self.nodes.insert_full(id.to_string(), make());
        self.push_slot();
        index
    }

    /// Position of a node by id.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    /// Increment the weight of edge `from -> to`, creating it with weight 1.
    ///
    /// Self-loops and unknown positions are ignored.
    pub fn increment_edge(&mut self, from: usize, to: usize) {
        if from == to || from >= self.succ.len() || to >= self.succ.len() {
            return;
        }
        let bump = |adj: &mut Adjacency, key: usize| -> EdgeWeight {
            let next = adj.get(&key).map_or(EdgeWeight::ONE, |w| w.increment());
            adj.insert(key, next);
            next
        };
        match self.direction {
            Direction::Directed => {
                let weight = bump(&mut self.succ[from], to);
                self.pred[to].insert(from, weight);
            }
            Direction::Undirected => {
                let weight = bump(&mut self.succ[from], to);
                self.succ[to].insert(from, weight);
            }
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        let half_edges: usize = self.succ.iter().map(IndexMap::len).sum();
        match self.direction {
            Direction::Directed => half_edges,
            Direction::Undirected => half_edges / 2,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Degree of the node at `index`: in + out for directed graphs.
    #[must_use]
    pub fn degree(&self, index: usize) -> usize {
        let out = self.succ.get(index).map_or(0, IndexMap::len);
        let inc = self.pred.get(index).map_or(0, IndexMap::len);
        out.saturating_add(inc)
    }

    /// Weight of edge `from -> to` (either orientation when undirected).
    #[must_use]
    pub fn edge_weight(&self, from: usize, to: usize) -> Option<EdgeWeight> {
        self.succ.get(from)?.get(&to).copied()
    }

    /// Outgoing neighbors of a node, in insertion order.
    pub fn successors(&self, index: usize) -> impl Iterator<Item = (usize, EdgeWeight)> + '_ {
        self.succ
            .get(index)
            .into_iter()
            .flat_map(|adj| adj.iter().map(|(k, w)| (*k, *w)))
    }

    /// Nodes as `(id, attributes)` in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, &N)> {
        self.nodes.iter().map(|(id, attrs)| (id.as_str(), attrs))
    }

    /// Id of the node at `index`.
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.nodes.get_index(index).map(|(id, _)| id.as_str())
    }

    /// All edges as `(from, to, weight)` positions.
    ///
    /// Directed: grouped by source in node order. Undirected: each edge is
    /// reported once, from whichever endpoint comes first in node order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, EdgeWeight)> + '_ {
        let undirected = self.direction == Direction::Undirected;
        self.succ.iter().enumerate().flat_map(move |(from, adj)| {
            adj.iter()
                .filter(move |(to, _)| !undirected || **to > from)
                .map(move |(to, w)| (from, *to, *w))
        })
    }

    /// Flatten the edge set into id-keyed links.
    #[must_use]
    pub fn links(&self) -> Vec<Link> {
        self.edges()
            .filter_map(|(from, to, w)| {
                Some(Link::new(self.id_at(from)?, self.id_at(to)?, w.value()))
            })
            .collect()
    }

    /// Flatten nodes into output rows, passing each node's degree.
    pub fn node_rows<R>(&self, mut row: impl FnMut(&str, &N, usize) -> R) -> Vec<R> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, (id, attrs))| row(id.as_str(), attrs, self.degree(index)))
            .collect()
    }
}

impl<N: Clone> Graph<N> {
    /// The subgraph induced by `keep` (one flag per node position).
    ///
    /// Retained nodes keep their relative order and every edge whose
    /// endpoints are both retained survives with its weight.
    #[must_use]
    pub fn induced_subgraph(&self, keep: &[bool]) -> Self {
        let kept = |index: usize| keep.get(index).copied().unwrap_or(false);

        let mut remap: Vec<Option<usize>> = Vec::with_capacity(self.nodes.len());
        let mut nodes = IndexMap::new();
        for (index, (id, attrs)) in self.nodes.iter().enumerate() {
            if kept(index) {
                remap.push(Some(nodes.len()));
                nodes.insert(id.clone(), attrs.clone());
            } else {
                remap.push(None);
            }
        }

        let project = |adjacency: &[Adjacency]| -> Vec<Adjacency> {
            adjacency
                .iter()
                .enumerate()
                .filter(|(index, _)| kept(*index))
                .map(|(_, adj)| {
                    adj.iter()
                        .filter_map(|(to, w)| remap.get(*to).copied().flatten().map(|t| (t, *w)))
                        .collect()
                })
                .collect()
        };

        Self {
            direction: self.direction,
            nodes,
            succ: project(&self.succ),
            pred: project(&self.pred),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
