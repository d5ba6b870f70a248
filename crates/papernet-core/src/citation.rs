//! # Citation Graph Builder
//!
//! Directed weighted graph over filtered papers. An edge `a -> b` means
//! paper `a` cites paper `b`; its weight is the number of citation rows
//! with that exact direction.
//!
//! - Rows whose endpoints are not both among the filtered papers are dropped
//! - Self-citations are dropped
//! - Oversized graphs are sampled with the requested strategy

use crate::graph::Graph;
use crate::primitives::DEFAULT_LIMIT_NODES;
use crate::sampling::{SamplingStrategy, enforce_limit};
use crate::{Citation, CitationNode, GraphOutcome, Paper};

/// Attributes carried by a paper node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperAttrs {
    pub label: String,
    pub year: i64,
    pub patent_count: u64,
}

impl From<&Paper> for PaperAttrs {
    fn from(paper: &Paper) -> Self {
        Self {
            label: paper.title.clone(),
            year: paper.year,
            patent_count: paper.patent_count,
        }
    }
}

/// Builds citation networks under a node budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CitationGraphBuilder {
    pub limit_nodes: usize,
    pub sampling: SamplingStrategy,
}

impl Default for CitationGraphBuilder {
    fn default() -> Self {
        Self {
            limit_nodes: DEFAULT_LIMIT_NODES,
            sampling: SamplingStrategy::Degree,
        }
    }
}

impl CitationGraphBuilder {
    #[must_use]
    pub fn new(limit_nodes: usize, sampling: SamplingStrategy) -> Self {
        Self {
            limit_nodes,
            sampling,
        }
    }

    /// Build the full (unsampled) citation graph.
    ///
    /// Node order is paper order. A repeated paper id keeps its first
    /// position and takes the attributes of its last row.
    #[must_use]
    pub fn build_graph(&self, papers: &[&Paper], citations: &[Citation]) -> Graph<PaperAttrs> {
        let mut graph = Graph::directed();
        for paper in papers {
            graph.upsert_node(&paper.paper_id, PaperAttrs::from(*paper));
        }

        for citation in citations {
            let (Some(source), Some(target)) = (
                graph.index_of(&citation.source),
                graph.index_of(&citation.target),
            ) else {
                continue;
            };
            graph.increment_edge(source, target);
        }

        graph
    }

    /// Build, sample if over budget, and flatten into output rows.
    #[must_use]
    pub fn build(&self, papers: &[&Paper], citations: &[Citation]) -> GraphOutcome<CitationNode> {
        let graph = self.build_graph(papers, citations);
        let built_nodes = graph.node_count();
        let (graph, sampled_with) = enforce_limit(graph, self.limit_nodes, self.sampling);

        GraphOutcome {
            nodes: graph.node_rows(|id, attrs, degree| CitationNode {
                id: id.to_string(),
                label: attrs.label.clone(),
                year: attrs.year,
                patent_count: attrs.patent_count,
                degree,
            }),
            links: graph.links(),
            built_nodes,
            sampled_with,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Link;

    fn papers(ids: &[&str]) -> Vec<Paper> {
        ids.iter()
            .map(|id| Paper {
                title: format!("Title of {id}"),
                patent_count: 1,
                ..Paper::new(*id, 2020)
            })
            .collect()
    }

    fn refs(papers: &[Paper]) -> Vec<&Paper> {
        papers.iter().collect()
    }

    #[test]
    fn duplicate_rows_accumulate_weight() {
        let table = papers(&["p1", "p2"]);
        let citations = vec![
            Citation::new("p1", "p2", 2021),
            Citation::new("p1", "p2", 2022),
            Citation::new("p1", "p2", 2023),
        ];
        let out = CitationGraphBuilder::default().build(&refs(&table), &citations);
        assert_eq!(out.links, vec![Link::new("p1", "p2", 3)]);
    }

    #[test]
    fn reversed_rows_stay_distinct() {
        let table = papers(&["p1", "p2"]);
        let citations = vec![
            Citation::new("p1", "p2", 2020),
            Citation::new("p2", "p1", 2021),
        ];
        let out = CitationGraphBuilder::default().build(&refs(&table), &citations);
        assert_eq!(
            out.links,
            vec![Link::new("p1", "p2", 1), Link::new("p2", "p1", 1)]
        );
        assert!(out.nodes.iter().all(|n| n.degree == 2));
    }

    #[test]
    fn self_citations_and_outside_papers_are_dropped() {
        let table = papers(&["p1", "p2"]);
        let citations = vec![
            Citation::new("p1", "p1", 0),
            Citation::new("p1", "p9", 0),
            Citation::new("p9", "p2", 0),
        ];
        let out = CitationGraphBuilder::default().build(&refs(&table), &citations);
        assert!(out.links.is_empty());
        assert_eq!(out.nodes.len(), 2);
        assert!(out.nodes.iter().all(|n| n.degree == 0));
    }

    #[test]
    fn node_rows_carry_paper_attributes() {
        let table = papers(&["p1"]);
        let out = CitationGraphBuilder::default().build(&refs(&table), &[]);
        assert_eq!(
            out.nodes,
            vec![CitationNode {
                id: "p1".into(),
                label: "Title of p1".into(),
                year: 2020,
                patent_count: 1,
                degree: 0,
            }]
        );
    }

    #[test]
    fn repeated_paper_id_keeps_first_position() {
        let mut table = papers(&["p1", "p2"]);
        table.push(Paper {
            title: "Revised".into(),
            ..Paper::new("p1", 2024)
        });
        let out = CitationGraphBuilder::default().build(&refs(&table), &[]);
        assert_eq!(out.nodes.len(), 2);
        assert_eq!(out.nodes[0].id, "p1");
        assert_eq!(out.nodes[0].label, "Revised");
    }

    #[test]
    fn over_budget_graph_is_sampled() {
        let table = papers(&["p1", "p2", "p3", "p4"]);
        let citations = vec![
            Citation::new("p1", "p3", 0),
            Citation::new("p2", "p3", 0),
            Citation::new("p4", "p3", 0),
            Citation::new("p4", "p1", 0),
        ];
        let builder = CitationGraphBuilder::new(2, SamplingStrategy::Degree);
        let out = builder.build(&refs(&table), &citations);
        let ids: Vec<_> = out.nodes.iter().map(|n| n.id.as_str()).collect();
        // degrees: p1 2, p2 1, p3 3, p4 2 -> p3 then p1 (p1 precedes p4)
        assert_eq!(ids, vec!["p1", "p3"]);
        assert_eq!(out.links, vec![Link::new("p1", "p3", 1)]);
        assert_eq!(out.built_nodes, 4);
        assert_eq!(out.sampled_with, Some(SamplingStrategy::Degree));
    }
}
