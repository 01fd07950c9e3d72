//! Run-scoped ambiguity reporting.
//!
//! An ambiguous resolution never aborts a run: the failing field keeps its
//! best-effort value and the name is recorded here, with candidate sets
//! from different call sites unioned per name. The report is flushed as
//! `tracing` warnings when the run ends and returned to the caller for
//! emission.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// More than one candidate full name was found for a simple name at one
/// search scope.
///
/// Returned from resolution instead of being thrown; callers merge it into
/// the [`AmbiguityReport`] and keep going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ambiguous name '{name}': {candidates:?}")]
pub struct AmbiguousName {
    pub name: String,
    pub candidates: BTreeSet<String>,
}

/// Accumulated ambiguous outcomes for one resolution run.
///
/// Created fresh at the start of a run and discarded after being flushed;
/// never persisted across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbiguityReport {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl AmbiguityReport {
    pub fn new() -> Self {
        AmbiguityReport::default()
    }

    /// Merge one ambiguous outcome, unioning candidates for the same name.
    pub fn record(&mut self, ambiguity: &AmbiguousName) {
        self.entries
            .entry(ambiguity.name.clone())
            .or_default()
            .extend(ambiguity.candidates.iter().cloned());
    }

    /// Candidates recorded for a name, if any.
    pub fn candidates(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(name)
    }

    /// Number of distinct ambiguous names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate names and candidate sets in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.entries.iter()
    }

    /// Emit one warning per ambiguous name.
    pub fn log_warnings(&self) {
        for (name, candidates) in &self.entries {
            tracing::warn!(name = %name, candidates = ?candidates, "ambiguous type name");
        }
    }
}
