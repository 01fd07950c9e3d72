//! Full-name resolution engine for quarry.
//!
//! After extraction, many facts carry only a partially-qualified or simple
//! type name, exactly as written in source. This crate rewrites every such
//! name into a canonical fully qualified form:
//! - [`trie`]: the lazily populated namespace trie used for suffix search
//! - [`imports`]: import deduplication, alias-kind inference, alias
//!   substitution and static-import member search
//! - [`engine`]: the [`NameResolutionEngine`] orchestrator
//! - [`report`]: the run-scoped [`AmbiguityReport`]
//!
//! Nothing in this crate aborts a run: ambiguous names are recorded and
//! left at their best-effort value, malformed type text degrades to opaque
//! leaves, and names with no repository-internal candidate are kept
//! unchanged as external dependencies.

pub mod engine;
pub mod imports;
pub mod report;
pub mod trie;

pub use engine::NameResolutionEngine;
pub use report::{AmbiguityReport, AmbiguousName};
