//! Quarry: structural fact model and full-name resolution for
//! multi-project codebases.
//!
//! Extraction front ends (behind [`adapter::FactExtractor`]) produce a
//! repository graph whose type names are spelled exactly as written in
//! source. [`resolve_repository`] rewrites every such name to a canonical
//! fully qualified form, ready for metrics and dependency analysis.

// Fact model - re-exported from quarry-core
pub use quarry_core::adapter;
pub use quarry_core::error;
pub use quarry_core::facts;
pub use quarry_core::primitives;
pub use quarry_core::types;

// Resolution engine - re-exported from quarry-resolve
pub use quarry_resolve::{AmbiguityReport, AmbiguousName, NameResolutionEngine};

use quarry_core::facts::RepositoryModel;

/// Run one full-name resolution pass over a repository graph.
///
/// Constructs a fresh [`NameResolutionEngine`] (the engine is one-shot by
/// design), mutates the graph in place and returns it together with the
/// run's ambiguity report.
pub fn resolve_repository(repo: RepositoryModel) -> (RepositoryModel, AmbiguityReport) {
    NameResolutionEngine::new().process(repo)
}
