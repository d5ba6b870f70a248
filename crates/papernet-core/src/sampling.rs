//! # Sampling Engine
//!
//! Reduces an oversized graph to a node budget by ranking nodes and keeping
//! the induced subgraph on the top of the ranking.
//!
//! Every strategy is total: an empty graph or a zero budget simply yields an
//! empty graph. Ties always resolve to original node order (stable sort), so
//! the same graph and budget always select the same nodes.

use crate::graph::Graph;
use crate::pagerank::pagerank;
use crate::primitives::EDGELESS_SCORE;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How nodes are ranked when a graph exceeds its budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingStrategy {
    /// Highest degree first (in + out for directed graphs).
    #[default]
    Degree,
    /// Highest PageRank score first.
    PageRank,
    /// First nodes in iteration order.
    Truncate,
}

impl SamplingStrategy {
    /// Resolve a request parameter. Unrecognized names fall back to
    /// [`SamplingStrategy::Truncate`]; a missing parameter means `Degree`.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None => Self::Degree,
            Some("degree") => Self::Degree,
            Some("pagerank") => Self::PageRank,
            Some(_) => Self::Truncate,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::PageRank => "pagerank",
            Self::Truncate => "truncate",
        }
    }
}

impl fmt::Display for SamplingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node positions in the order the strategy would keep them.
#[must_use]
pub fn rank_nodes<N>(graph: &Graph<N>, strategy: SamplingStrategy) -> Vec<usize> {
    let mut order: Vec<usize> = (0..graph.node_count()).collect();
    match strategy {
        SamplingStrategy::Degree => {
            let degrees: Vec<usize> = order.iter().map(|&i| graph.degree(i)).collect();
            order.sort_by(|a, b| degrees[*b].cmp(&degrees[*a]));
        }
        SamplingStrategy::PageRank => {
            let scores = if graph.edge_count() == 0 {
                vec![EDGELESS_SCORE; graph.node_count()]
            } else {
                pagerank(graph).scores
            };
            order.sort_by(|a, b| scores[*b].total_cmp(&scores[*a]));
        }
        SamplingStrategy::Truncate => {}
    }
    order
}

/// Keep at most `limit` nodes chosen by `strategy`, plus the edges among them.
#[must_use]
pub fn sample<N: Clone>(graph: &Graph<N>, limit: usize, strategy: SamplingStrategy) -> Graph<N> {
    let mut keep = vec![false; graph.node_count()];
    for index in rank_nodes(graph, strategy).into_iter().take(limit) {
        keep[index] = true;
    }
    graph.induced_subgraph(&keep)
}

/// Sample only when the graph exceeds `limit` nodes.
///
/// Returns the (possibly reduced) graph and the strategy that was applied.
#[must_use]
pub fn enforce_limit<N: Clone>(
    graph: Graph<N>,
    limit: usize,
    strategy: SamplingStrategy,
) -> (Graph<N>, Option<SamplingStrategy>) {
    if graph.node_count() <= limit {
        return (graph, None);
    }
    (sample(&graph, limit, strategy), Some(strategy))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Nodes a..e where `c` is a hub cited by everyone else.
    fn hub_graph() -> Graph<()> {
        let mut g = Graph::directed();
        let ids: Vec<usize> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|id| g.upsert_node(id, ()))
            .collect();
        for &i in &[0, 1, 3, 4] {
            g.increment_edge(ids[i], ids[2]);
        }
        g.increment_edge(ids[3], ids[4]);
        g
    }

    fn ids<N>(g: &Graph<N>) -> Vec<String> {
        g.nodes().map(|(id, _)| id.to_string()).collect()
    }

    #[test]
    fn strategy_resolution() {
        assert_eq!(SamplingStrategy::from_param(None), SamplingStrategy::Degree);
        assert_eq!(
            SamplingStrategy::from_param(Some("degree")),
            SamplingStrategy::Degree
        );
        assert_eq!(
            SamplingStrategy::from_param(Some("pagerank")),
            SamplingStrategy::PageRank
        );
        assert_eq!(
            SamplingStrategy::from_param(Some("betweenness")),
            SamplingStrategy::Truncate
        );
        assert_eq!(
            SamplingStrategy::from_param(Some("PageRank")),
            SamplingStrategy::Truncate
        );
    }

    #[test]
    fn degree_keeps_hub_and_breaks_ties_by_order() {
        let g = hub_graph();
        // degrees: a1 b1 c4 d2 e2
        let sub = sample(&g, 2, SamplingStrategy::Degree);
        assert_eq!(ids(&sub), vec!["c", "d"]);
        assert_eq!(sub.edge_count(), 1);
    }

    #[test]
    fn degree_sampling_recomputes_degree_on_subgraph() {
        let g = hub_graph();
        let sub = sample(&g, 3, SamplingStrategy::Degree);
        assert_eq!(ids(&sub), vec!["c", "d", "e"]);
        let degrees: Vec<usize> = sub.node_rows(|_, _, degree| degree);
        assert_eq!(degrees, vec![2, 2, 2]);
    }

    #[test]
    fn pagerank_keeps_hub() {
        let g = hub_graph();
        let sub = sample(&g, 1, SamplingStrategy::PageRank);
        assert_eq!(ids(&sub), vec!["c"]);
    }

    #[test]
    fn pagerank_on_edgeless_graph_is_truncation() {
        let mut g: Graph<()> = Graph::directed();
        for id in ["x", "y", "z", "w"] {
            g.upsert_node(id, ());
        }
        let by_rank = sample(&g, 2, SamplingStrategy::PageRank);
        let by_order = sample(&g, 2, SamplingStrategy::Truncate);
        assert_eq!(ids(&by_rank), vec!["x", "y"]);
        assert_eq!(ids(&by_rank), ids(&by_order));
    }

    #[test]
    fn truncate_ignores_structure() {
        let sub = sample(&hub_graph(), 2, SamplingStrategy::Truncate);
        assert_eq!(ids(&sub), vec!["a", "b"]);
        assert_eq!(sub.edge_count(), 0);
    }

    #[test]
    fn zero_budget_and_empty_graph() {
        assert!(sample(&hub_graph(), 0, SamplingStrategy::Degree).is_empty());
        let empty: Graph<()> = Graph::undirected();
        assert!(sample(&empty, 10, SamplingStrategy::PageRank).is_empty());
    }

    #[test]
    fn enforce_limit_skips_small_graphs() {
        let (g, applied) = enforce_limit(hub_graph(), 5, SamplingStrategy::Degree);
        assert_eq!(g.node_count(), 5);
        assert_eq!(applied, None);

        let (g, applied) = enforce_limit(hub_graph(), 4, SamplingStrategy::Truncate);
        assert_eq!(g.node_count(), 4);
        assert_eq!(applied, Some(SamplingStrategy::Truncate));
    }

    #[test]
    fn strategy_serializes_lowercase() {
        assert_eq!(SamplingStrategy::PageRank.to_string(), "pagerank");
    }
}
