//! # PageRank
//!
//! Weighted power-iteration PageRank over a [`Graph`].
//!
//! - Transition probabilities are proportional to edge weight.
//! - Start and teleport vectors are uniform.
//! - Mass sitting on dangling nodes (no outgoing weight) is spread uniformly.
//! - Iteration stops when the L1 change drops below `n * PAGERANK_TOLERANCE`
//!   or after `PAGERANK_MAX_ITERATIONS`; hitting the cap is not an error.
//!
//! Undirected graphs store both orientations of every edge, so they are
//! ranked as the equivalent symmetric directed graph.

// Scores are probabilities; this is the one module where floats are the model.
#![allow(clippy::float_arithmetic)]

use crate::graph::Graph;
use crate::primitives::{PAGERANK_DAMPING, PAGERANK_MAX_ITERATIONS, PAGERANK_TOLERANCE};

/// Result of a PageRank run.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankOutcome {
    /// One score per node position; sums to ~1.0 for a non-empty graph.
    pub scores: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
}

/// PageRank with the default damping factor (0.85).
#[must_use]
pub fn pagerank<N>(graph: &Graph<N>) -> PageRankOutcome {
    pagerank_with_damping(graph, PAGERANK_DAMPING)
}

/// PageRank with an explicit damping factor.
#[must_use]
pub fn pagerank_with_damping<N>(graph: &Graph<N>, damping: f64) -> PageRankOutcome {
    let n = graph.node_count();
    if n == 0 {
        return PageRankOutcome {
            scores: Vec::new(),
            iterations: 0,
            converged: true,
        };
    }

    let size = n as f64;
    let out_weight: Vec<f64> = (0..n)
        .map(|u| graph.successors(u).map(|(_, w)| w.value() as f64).sum())
        .collect();

    let mut scores = vec![1.0 / size; n];
    let threshold = size * PAGERANK_TOLERANCE;

    for iteration in 1..=PAGERANK_MAX_ITERATIONS {
        let dangling_mass: f64 = scores
            .iter()
            .zip(&out_weight)
            .filter(|(_, total)| **total == 0.0)
            .map(|(score, _)| *score)
            .sum();

        let base = damping * dangling_mass / size + (1.0 - damping) / size;
        let mut next = vec![base; n];

        for (u, total) in out_weight.iter().enumerate() {
            if *total == 0.0 {
                continue;
            }
            let share = damping * scores[u] / total;
            for (v, w) in graph.successors(u) {
                next[v] += share * w.value() as f64;
            }
        }

        let delta: f64 = next.iter().zip(&scores).map(|(a, b)| (a - b).abs()).sum();
        scores = next;

        if delta < threshold {
            return PageRankOutcome {
                scores,
                iterations: iteration,
                converged: true,
            };
        }
    }

    PageRankOutcome {
        scores,
        iterations: PAGERANK_MAX_ITERATIONS,
        converged: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1.0e-4;

    fn star_into_hub(leaves: usize) -> Graph<()> {
        let mut g = Graph::directed();
        let hub = g.upsert_node("hub", ());
        for i in 0..leaves {
            let leaf = g.upsert_node(&format!("leaf{i}"), ());
            g.increment_edge(leaf, hub);
        }
        g
    }

    #[test]
    fn empty_graph_has_no_scores() {
        let g: Graph<()> = Graph::directed();
        let outcome = pagerank(&g);
        assert!(outcome.scores.is_empty());
        assert!(outcome.converged);
    }

    #[test]
    fn scores_sum_to_one() {
        let outcome = pagerank(&star_into_hub(5));
        let total: f64 = outcome.scores.iter().sum();
        assert!((total - 1.0).abs() < EPS, "total = {total}");
        assert!(outcome.converged);
    }

    #[test]
    fn hub_outranks_leaves() {
        let outcome = pagerank(&star_into_hub(4));
        let hub = outcome.scores[0];
        assert!(outcome.scores[1..].iter().all(|leaf| hub > *leaf));
    }

    #[test]
    fn symmetric_cycle_is_uniform() {
        let mut g: Graph<()> = Graph::directed();
        let a = g.upsert_node("a", ());
        let b = g.upsert_node("b", ());
        let c = g.upsert_node("c", ());
        g.increment_edge(a, b);
        g.increment_edge(b, c);
        g.increment_edge(c, a);
        let outcome = pagerank(&g);
        for score in &outcome.scores {
            assert!((score - 1.0 / 3.0).abs() < EPS);
        }
    }

    #[test]
    fn heavier_edges_carry_more_rank() {
        let mut g: Graph<()> = Graph::directed();
        let src = g.upsert_node("src", ());
        let heavy = g.upsert_node("heavy", ());
        let light = g.upsert_node("light", ());
        g.increment_edge(src, heavy);
        g.increment_edge(src, heavy);
        g.increment_edge(src, heavy);
        g.increment_edge(src, light);
        let outcome = pagerank(&g);
        assert!(outcome.scores[heavy] > outcome.scores[light]);
    }

    #[test]
    fn known_values_for_two_node_chain() {
        // a -> b, b dangling: closed form for d = 0.85
        let mut g: Graph<()> = Graph::directed();
        let a = g.upsert_node("a", ());
        let b = g.upsert_node("b", ());
        g.increment_edge(a, b);
        let outcome = pagerank(&g);
        assert!((outcome.scores[a] - 0.350_877).abs() < EPS);
        assert!((outcome.scores[b] - 0.649_123).abs() < EPS);
    }
}
