//! Protein search.
//!
//! Case-insensitive substring matching against the `Protein Name` column.
//! The query is matched literally (no pattern syntax) and records without a
//! textual name never match. Results keep the dataset order.

use crate::model::{Dataset, ProteinRecord};

/// Outcome of a protein search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    /// The query was empty; nothing was searched
    NotPerformed,
    /// The query matched no record
    NoMatch,
    /// Matching records, in dataset order
    Found(Vec<&'a ProteinRecord>),
}

impl SearchOutcome<'_> {
    /// Returns the number of matching records.
    pub fn count(&self) -> usize {
        match self {
            SearchOutcome::Found(records) => records.len(),
            SearchOutcome::NotPerformed | SearchOutcome::NoMatch => 0,
        }
    }
}

/// Returns the message summarizing a search with `count` matches.
pub fn summary(count: usize) -> String {
    if count == 0 {
        "No protein matched your search.".to_string()
    } else {
        format!("Found {} matching protein(s).", count)
    }
}

/// Searches the dataset for proteins whose name contains `query`.
pub fn search<'a>(dataset: &'a Dataset, query: &str) -> SearchOutcome<'a> {
    if query.is_empty() {
        return SearchOutcome::NotPerformed;
    }

    let records: Vec<&ProteinRecord> = matching_indices(dataset, query)
        .into_iter()
        .filter_map(|i| dataset.get(i))
        .collect();

    if records.is_empty() {
        SearchOutcome::NoMatch
    } else {
        SearchOutcome::Found(records)
    }
}

/// Returns the indices of records whose name contains `query`,
/// ignoring case, in dataset order.
///
/// An empty query matches every named record; callers treat the empty
/// query as "no search" before getting here.
pub fn matching_indices(dataset: &Dataset, query: &str) -> Vec<usize> {
    let needle = query.to_lowercase();
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            record
                .protein_name()
                .is_some_and(|name| name.to_lowercase().contains(&needle))
        })
        .map(|(i, _)| i)
        .collect()
}
