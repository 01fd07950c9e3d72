//! Extractor trait for pluggable language front ends.
//!
//! Fact extraction walks compiler-provided syntax trees and resolves
//! identifiers through a semantic oracle; that machinery lives behind this
//! trait. The core only consumes the plain-string fact model a front end
//! produces and is otherwise unaffected by which front end is plugged in.
//!
//! Contract for implementors: every type-name-bearing field in the
//! returned units must hold the name exactly as written in source (simple,
//! partially qualified, or already fully qualified), and every class must
//! carry its resolved-order import list (alias kinds may be left
//! undetermined). Full-name resolution runs downstream, in
//! `quarry-resolve`.

use thiserror::Error;

use crate::facts::{CompilationUnitModel, Language};

/// Errors a front end can report while extracting facts.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The source text could not be parsed.
    #[error("parse error in {path}: {message}")]
    Parse { path: String, message: String },

    /// The file is not handled by this front end.
    #[error("unsupported file: {path}")]
    Unsupported { path: String },
}

/// A language front end that turns source files into fact-model units.
pub trait FactExtractor {
    /// The language this front end handles.
    fn language(&self) -> Language;

    /// Whether this front end can handle the given file path.
    fn can_handle(&self, path: &str) -> bool;

    /// Extract compilation units from `(path, content)` pairs.
    ///
    /// Input order must be preserved in the output so downstream passes
    /// are deterministic.
    fn extract(&self, files: &[(String, String)]) -> Result<Vec<CompilationUnitModel>, ExtractError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::ClassModel;

    struct FixtureExtractor;

    impl FactExtractor for FixtureExtractor {
        fn language(&self) -> Language {
            Language::CSharp
        }

        fn can_handle(&self, path: &str) -> bool {
            path.ends_with(".cs")
        }

        fn extract(
            &self,
            files: &[(String, String)],
        ) -> Result<Vec<CompilationUnitModel>, ExtractError> {
            files
                .iter()
                .map(|(path, _)| {
                    if !self.can_handle(path) {
                        return Err(ExtractError::Unsupported { path: path.clone() });
                    }
                    Ok(CompilationUnitModel::new(path, self.language())
                        .with_class(ClassModel::new("Fixture", "App")))
                })
                .collect()
        }
    }

    #[test]
    fn extractor_preserves_input_order() {
        let files = vec![
            ("b.cs".to_string(), String::new()),
            ("a.cs".to_string(), String::new()),
        ];
        let units = FixtureExtractor.extract(&files).unwrap();
        let paths: Vec<_> = units.iter().map(|u| u.path.as_str()).collect();
        assert_eq!(paths, vec!["b.cs", "a.cs"]);
    }

    #[test]
    fn extractor_rejects_foreign_files() {
        let files = vec![("a.py".to_string(), String::new())];
        assert!(FixtureExtractor.extract(&files).is_err());
    }
}
