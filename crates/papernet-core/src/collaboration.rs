//! # Collaboration Graph Builder
//!
//! Undirected weighted co-authorship graph over the authors of filtered
//! papers. The weight between two authors is the number of filtered papers
//! they share.
//!
//! Author lists come from one of two sources:
//! - **Explicit**: the Authorships table, when it is present and non-empty
//! - **Embedded**: each paper's `authors` column (`id|name;id|name;...`)
//!
//! Only degree sampling is applied to this view.

use crate::graph::Graph;
use crate::primitives::{AUTHOR_ID_SEPARATOR, AUTHOR_SEPARATOR, DEFAULT_LIMIT_NODES};
use crate::sampling::{SamplingStrategy, enforce_limit};
use crate::{AuthorNode, Authorship, GraphOutcome, Paper};
use std::collections::{BTreeMap, BTreeSet};

/// Attributes carried by an author node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorAttrs {
    pub name: String,
    pub affiliation: String,
}

/// Where author lists are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorSource {
    Explicit,
    Embedded,
}

impl AuthorSource {
    /// Explicit when an authorships table with at least one row is loaded.
    #[must_use]
    pub fn select(authorships: Option<&[Authorship]>) -> Self {
        match authorships {
            Some(rows) if !rows.is_empty() => Self::Explicit,
            _ => Self::Embedded,
        }
    }
}

/// One author entry parsed from a paper's embedded `authors` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedAuthor {
    pub id: String,
    pub name: String,
}

/// Parse an embedded author list.
///
/// Tokens are split on `;`; each token is split on its first `|` into id
/// and name (both trimmed). A token without `|` is used as both id and
/// name. Blank tokens are skipped.
#[must_use]
pub fn parse_embedded_authors(raw: &str) -> Vec<EmbeddedAuthor> {
    raw.split(AUTHOR_SEPARATOR)
        .filter_map(|token| {
            let (id, name) = match token.split_once(AUTHOR_ID_SEPARATOR) {
                Some((id, name)) => (id.trim(), name.trim()),
                None => (token.trim(), token.trim()),
            };
            (!id.is_empty()).then(|| EmbeddedAuthor {
                id: id.to_string(),
                name: name.to_string(),
            })
        })
        .collect()
}

/// Connect every unordered pair of the given node positions once.
fn link_all_pairs<N>(graph: &mut Graph<N>, members: &[usize]) {
    for (i, &a) in members.iter().enumerate() {
        for &b in &members[i + 1..] {
            graph.increment_edge(a, b);
        }
    }
}

/// Builds co-authorship networks under a node budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollaborationGraphBuilder {
    pub limit_nodes: usize,
}

impl Default for CollaborationGraphBuilder {
    fn default() -> Self {
        Self {
            limit_nodes: DEFAULT_LIMIT_NODES,
        }
    }
}

impl CollaborationGraphBuilder {
    #[must_use]
    pub fn new(limit_nodes: usize) -> Self {
        Self { limit_nodes }
    }

    /// Build the full (unsampled) collaboration graph.
    #[must_use]
    pub fn build_graph(
        &self,
        papers: &[&Paper],
        authorships: Option<&[Authorship]>,
    ) -> Graph<AuthorAttrs> {
        match (AuthorSource::select(authorships), authorships) {
            (AuthorSource::Explicit, Some(rows)) => Self::from_authorships(papers, rows),
            _ => Self::from_embedded(papers),
        }
    }

    /// Explicit mode: papers are visited in ascending `paper_id` order and
    /// each author keeps the name/institution of the first row seen.
    fn from_authorships(papers: &[&Paper], authorships: &[Authorship]) -> Graph<AuthorAttrs> {
        let wanted: BTreeSet<&str> = papers.iter().map(|p| p.paper_id.as_str()).collect();

        let mut by_paper: BTreeMap<&str, Vec<&Authorship>> = BTreeMap::new();
        for row in authorships {
            let paper_id = row.paper_id.as_str();
            if wanted.contains(paper_id) {
                by_paper.entry(paper_id).or_default().push(row);
            }
        }

        let mut graph = Graph::undirected();
        for rows in by_paper.values() {
            let mut seen = BTreeSet::new();
            let mut members = Vec::with_capacity(rows.len());
            for row in rows.iter().copied() {
                if !seen.insert(row.author_id.as_str()) {
                    continue;
                }
                let node = graph.ensure_node(&row.author_id, || AuthorAttrs {
                    name: row.author_name.clone(),
                    affiliation: row.institution.clone(),
                });
                members.push(node);
            }
            link_all_pairs(&mut graph, &members);
        }
        graph
    }

    /// Embedded mode: papers are visited in table order and each author's
    /// affiliation is the institution of the first paper listing them.
    fn from_embedded(papers: &[&Paper]) -> Graph<AuthorAttrs> {
        let mut graph = Graph::undirected();
        for paper in papers {
            let mut seen = BTreeSet::new();
            let members: Vec<usize> = parse_embedded_authors(&paper.authors)
                .into_iter()
                .filter(|author| seen.insert(author.id.clone()))
                .map(|author| {
                    graph.ensure_node(&author.id, || AuthorAttrs {
                        name: author.name,
                        affiliation: paper.institution.clone(),
                    })
                })
                .collect();
            link_all_pairs(&mut graph, &members);
        }
        graph
    }

    /// Build, degree-sample if over budget, and flatten into output rows.
    #[must_use]
    pub fn build(
        &self,
        papers: &[&Paper],
        authorships: Option<&[Authorship]>,
    ) -> GraphOutcome<AuthorNode> {
        let graph = self.build_graph(papers, authorships);
        let built_nodes = graph.node_count();
        let (graph, sampled_with) =
            enforce_limit(graph, self.limit_nodes, SamplingStrategy::Degree);

        GraphOutcome {
            nodes: graph.node_rows(|id, attrs, degree| AuthorNode {
                id: id.to_string(),
                name: attrs.name.clone(),
                affiliation: attrs.affiliation.clone(),
                degree,
            }),
            links: graph.links(),
            built_nodes,
            sampled_with,
        }
    }
}
