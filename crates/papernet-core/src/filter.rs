//! # Filter Engine
//!
//! Narrows the Papers table by institution, field and minimum year.

use crate::Paper;
use serde::{Deserialize, Serialize};

/// Optional paper predicates. Absent (or blank) predicates match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperFilter {
    /// Case-insensitive substring of `institution`.
    pub university: Option<String>,
    /// Case-insensitive substring of `field`.
    pub field: Option<String>,
    /// Minimum `year`, inclusive.
    pub since: Option<i64>,
}

/// Lowercased needle, or `None` when the predicate is vacuous.
fn needle(raw: Option<&String>) -> Option<String> {
    raw.map(|s| s.to_lowercase()).filter(|s| !s.is_empty())
}

impl PaperFilter {
    #[must_use]
    pub fn new(university: Option<String>, field: Option<String>, since: Option<i64>) -> Self {
        Self {
            university,
            field,
            since,
        }
    }

    /// Same filter with a different minimum year.
    #[must_use]
    pub fn with_since(mut self, since: Option<i64>) -> Self {
        self.since = since;
        self
    }

    /// True when no predicate constrains anything.
    #[must_use]
    pub fn is_vacuous(&self) -> bool {
        needle(self.university.as_ref()).is_none()
            && needle(self.field.as_ref()).is_none()
            && self.since.is_none()
    }

    /// Papers matching every predicate, in table order.
    #[must_use]
    pub fn apply<'a>(&self, papers: &'a [Paper]) -> Vec<&'a Paper> {
        if self.is_vacuous() {
            return papers.iter().collect();
        }
        let university = needle(self.university.as_ref());
        let field = needle(self.field.as_ref());
        papers
            .iter()
            .filter(|paper| {
                contains_folded(&paper.institution, university.as_deref())
                    && contains_folded(&paper.field, field.as_deref())
                    && self.since.is_none_or(|since| paper.year >= since)
            })
            .collect()
    }
}

/// Case-insensitive containment; a missing needle always matches.
fn contains_folded(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(n) => haystack.to_lowercase().contains(n),
    }
}
