//! Model consistency errors.

use thiserror::Error;

/// Violations of the fact-model invariants.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A solution references a project missing from the repository set.
    #[error("solution '{solution}' references unknown project '{project}'")]
    MissingProject { solution: String, project: String },

    /// Two projects share the same path.
    #[error("duplicate project path '{path}'")]
    DuplicateProjectPath { path: String },
}
