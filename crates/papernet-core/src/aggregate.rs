//! # Aggregations
//!
//! Read-only derived views over filtered papers that need no graph:
//! the publication timeline and the patent-count histogram.

use crate::Paper;
use crate::filter::PaperFilter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// TIMELINE
// =============================================================================

/// Number of papers published in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i64,
    pub count: usize,
}

/// Paper counts per year over the trailing `years` years of the corpus.
///
/// The window ends at the maximum year of the whole table (not of the
/// filtered subset). The filter's own `since` is replaced by the window
/// start. Output is sorted by ascending year; an empty table yields an
/// empty timeline.
#[must_use]
pub fn timeline(papers: &[Paper], filter: &PaperFilter, years: i64) -> Vec<YearCount> {
    let window_start = papers
        .iter()
        .map(|p| p.year)
        .max()
        .map(|max_year| max_year.saturating_sub(years).saturating_add(1));

    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for paper in filter.clone().with_since(window_start).apply(papers) {
        *counts.entry(paper.year).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

// =============================================================================
// PATENT HISTOGRAM
// =============================================================================

/// Fixed patent-count bins. Disjoint and exhaustive over `[0, ∞)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBins {
    #[serde(rename = "0")]
    pub zero: usize,
    #[serde(rename = "1")]
    pub one: usize,
    #[serde(rename = "2-3")]
    pub two_to_three: usize,
    #[serde(rename = "4-7")]
    pub four_to_seven: usize,
    #[serde(rename = "8+")]
    pub eight_plus: usize,
}

impl HistogramBins {
    /// Count one observation in its bin.
    pub fn record(&mut self, patent_count: u64) {
        let bin = match patent_count {
            0 => &mut self.zero,
            1 => &mut self.one,
            2..=3 => &mut self.two_to_three,
            4..=7 => &mut self.four_to_seven,
            _ => &mut self.eight_plus,
        };
        *bin = bin.saturating_add(1);
    }

    /// Number of observations across all bins.
    #[must_use]
    pub fn total(&self) -> usize {
        [
            self.zero,
            self.one,
            self.two_to_three,
            self.four_to_seven,
            self.eight_plus,
        ]
        .iter()
        .sum()
    }
}

/// Raw patent counts plus their binned totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatentHistogram {
    /// Patent counts of the selected papers, in table order.
    pub raw: Vec<u64>,
    pub bins: HistogramBins,
}

/// Histogram of patent counts over filtered papers.
///
/// When `year` is given only papers from exactly that year are counted;
/// the filter's own `since` is ignored.
#[must_use]
pub fn patent_histogram(
    papers: &[Paper],
    filter: &PaperFilter,
    year: Option<i64>,
) -> PatentHistogram {
    let mut histogram = PatentHistogram::default();
    for paper in filter.clone().with_since(year).apply(papers) {
        if year.is_some_and(|y| paper.year != y) {
            continue;
        }
        histogram.raw.push(paper.patent_count);
        histogram.bins.record(paper.patent_count);
    }
    histogram
}
