//! Facts model: the repository graph of extracted structural facts.
//!
//! This module provides the semantic program data model for quarry:
//! - [`RepositoryModel`]: root of the graph; owns projects and solutions
//! - [`SolutionModel`]: an ordered list of projects, referenced by path
//! - [`ProjectModel`]: namespaces and compilation units of one project
//! - [`NamespaceModel`]: a dotted namespace name and the types declared
//!   directly under it
//! - [`ClassModel`]: one declared type with its members, imports and
//!   dependency metrics
//!
//! Every type-name-bearing field holds the name exactly as written in
//! source (simple, partially qualified, or already fully qualified). The
//! resolution engine rewrites those fields in place to canonical fully
//! qualified names; until then [`ClassModel::full_name`] may be empty.
//!
//! # Language Mapping
//!
//! The model is shared by two source languages with different syntax but
//! matching semantics:
//!
//! | Concept | C# | Visual Basic |
//! |---------|----|--------------|
//! | Import | `using N;` | `Imports N` |
//! | Import alias | `using A = N;` | `Imports A = N` |
//! | Static import | `using static T;` | `Imports T` (module) |
//! | By-ref parameter | `ref` / `out` / `in` | `ByRef` |
//!
//! # Determinism
//!
//! Collections the resolution engine iterates are `Vec`, `BTreeMap` or
//! `BTreeSet` so two runs over the same graph visit facts in the same
//! order and produce identical output.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

// ============================================================================
// Enums
// ============================================================================

/// Source language of a compilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    CSharp,
    VisualBasic,
    #[default]
    Unknown,
}

/// Kind of declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Struct,
    Enum,
    Record,
    Delegate,
}

/// Classification of an import's alias.
///
/// Extraction cannot always tell whether `using A = X.Y;` aliases a
/// namespace or a type; the distinction is inferred structurally from the
/// owner type's members on first use. `ImportModel::alias_kind` stays
/// `Option::None` until that inference has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AliasKind {
    /// The import carries no alias.
    #[default]
    None,
    /// The alias stands for a namespace prefix.
    Namespace,
    /// The alias stands for one exact type.
    Type,
}

/// Parameter passing modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParameterModifier {
    #[default]
    None,
    Ref,
    Out,
    In,
}

impl ParameterModifier {
    /// Whether the parameter is passed by reference.
    ///
    /// `in` parameters are by-reference for shape-matching purposes even
    /// though the callee cannot write through them.
    pub fn is_by_ref(&self) -> bool {
        !matches!(self, ParameterModifier::None)
    }
}

/// Kind of field access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccessKind {
    #[default]
    Read,
    Write,
}

// ============================================================================
// Import entries
// ============================================================================

/// One import (`using` / `Imports`) entry in scope for a type.
///
/// Extraction creates one entry per distinct import text while walking from
/// the innermost scope out to the root, so [`ClassModel::imports`] already
/// carries the type's own imports plus all enclosing scopes'. Duplicated
/// re-imports from outer scopes may still be present; consumers must apply
/// first-occurrence-wins deduplication by name before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ImportModel {
    /// Import target as written (may itself need qualification).
    pub name: String,
    /// Alias text, if the import declares one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub alias: Option<String>,
    /// Inferred alias classification; `None` until computed.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub alias_kind: Option<AliasKind>,
    /// Whether this is a static import (brings members into scope).
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub is_static: bool,
}

impl ImportModel {
    /// Create a plain import.
    pub fn new(name: impl Into<String>) -> Self {
        ImportModel {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the alias text.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Mark the import as static.
    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Whether the import declares an alias.
    pub fn has_alias(&self) -> bool {
        self.alias.as_deref().is_some_and(|a| !a.is_empty())
    }
}

// ============================================================================
// Members
// ============================================================================

/// A parameter in a method, constructor or call-site signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ParameterModel {
    /// Parameter type as written.
    pub type_name: String,
    /// Passing modifier, if any.
    #[serde(skip_serializing_if = "is_default_modifier", default)]
    pub modifier: ParameterModifier,
}

fn is_default_modifier(m: &ParameterModifier) -> bool {
    *m == ParameterModifier::None
}

impl ParameterModel {
    /// Create a by-value parameter.
    pub fn new(type_name: impl Into<String>) -> Self {
        ParameterModel {
            type_name: type_name.into(),
            modifier: ParameterModifier::None,
        }
    }

    /// Set the passing modifier.
    pub fn with_modifier(mut self, modifier: ParameterModifier) -> Self {
        self.modifier = modifier;
        self
    }
}

/// A method invocation recorded inside a member body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CalledMethodModel {
    /// Invoked method name.
    pub name: String,
    /// Qualifying type as written; empty for bare calls.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub containing_type: String,
    /// Argument types at the call site, in order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameter_types: Vec<ParameterModel>,
}

impl CalledMethodModel {
    /// Create a call fact.
    pub fn new(name: impl Into<String>, containing_type: impl Into<String>) -> Self {
        CalledMethodModel {
            name: name.into(),
            containing_type: containing_type.into(),
            parameter_types: vec![],
        }
    }

    /// Append an argument type.
    pub fn with_parameter(mut self, parameter: ParameterModel) -> Self {
        self.parameter_types.push(parameter);
        self
    }
}

/// A field access recorded inside a member body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AccessedFieldModel {
    /// Accessed field or property name.
    pub name: String,
    /// Qualifying type as written; empty for bare accesses.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub containing_type: String,
    /// Whether the access reads or writes.
    pub kind: AccessKind,
}

impl AccessedFieldModel {
    /// Create an access fact.
    pub fn new(name: impl Into<String>, containing_type: impl Into<String>, kind: AccessKind) -> Self {
        AccessedFieldModel {
            name: name.into(),
            containing_type: containing_type.into(),
            kind,
        }
    }
}

/// A field declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FieldModel {
    pub name: String,
    /// Declared type as written.
    pub type_name: String,
    /// Modifier text (`static`, `readonly`, ...), if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub modifier: Option<String>,
    /// Access modifier text (`public`, `private`, ...), if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub access: Option<String>,
}

impl FieldModel {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        FieldModel {
            name: name.into(),
            type_name: type_name.into(),
            ..Default::default()
        }
    }
}

/// A property accessor (`get`, `set`, `init`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AccessorModel {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub called_methods: Vec<CalledMethodModel>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub accessed_fields: Vec<AccessedFieldModel>,
}

impl AccessorModel {
    pub fn new(name: impl Into<String>) -> Self {
        AccessorModel {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_called_method(mut self, call: CalledMethodModel) -> Self {
        self.called_methods.push(call);
        self
    }
}

/// A property declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PropertyModel {
    pub name: String,
    /// Declared type as written.
    pub type_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub accessors: Vec<AccessorModel>,
}

impl PropertyModel {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        PropertyModel {
            name: name.into(),
            type_name: type_name.into(),
            accessors: vec![],
        }
    }

    pub fn with_accessor(mut self, accessor: AccessorModel) -> Self {
        self.accessors.push(accessor);
        self
    }
}

/// A method declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MethodModel {
    pub name: String,
    /// Return type as written; empty for `void` bodies recorded without one.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub return_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<ParameterModel>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub called_methods: Vec<CalledMethodModel>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub accessed_fields: Vec<AccessedFieldModel>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub modifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub access: Option<String>,
}

impl MethodModel {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        MethodModel {
            name: name.into(),
            return_type: return_type.into(),
            ..Default::default()
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterModel) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_called_method(mut self, call: CalledMethodModel) -> Self {
        self.called_methods.push(call);
        self
    }

    pub fn with_accessed_field(mut self, access: AccessedFieldModel) -> Self {
        self.accessed_fields.push(access);
        self
    }
}

/// A constructor declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConstructorModel {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<ParameterModel>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub called_methods: Vec<CalledMethodModel>,
}

impl ConstructorModel {
    pub fn new(name: impl Into<String>) -> Self {
        ConstructorModel {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterModel) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_called_method(mut self, call: CalledMethodModel) -> Self {
        self.called_methods.push(call);
        self
    }
}

// ============================================================================
// Dependency metrics
// ============================================================================

/// A named dependency-count dictionary attached to a class.
///
/// Keys are type names; the resolution engine rewrites them to fully
/// qualified names, merging keys that resolve to the same type by summing
/// their counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DependencyMetric {
    /// Metric label (e.g. `"parameter_dependencies"`).
    pub name: String,
    /// Type name → occurrence count.
    pub counts: BTreeMap<String, u64>,
}

impl DependencyMetric {
    pub fn new(name: impl Into<String>) -> Self {
        DependencyMetric {
            name: name.into(),
            counts: BTreeMap::new(),
        }
    }

    /// Add `count` occurrences of `key`, merging with an existing entry.
    pub fn add(&mut self, key: impl Into<String>, count: u64) {
        *self.counts.entry(key.into()).or_insert(0) += count;
    }

    /// Builder form of [`DependencyMetric::add`].
    pub fn with_count(mut self, key: impl Into<String>, count: u64) -> Self {
        self.add(key, count);
        self
    }
}

// ============================================================================
// Classes, namespaces, compilation units
// ============================================================================

/// One declared type and its extracted facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClassModel {
    /// Type name as written at the declaration (may be partially qualified).
    pub name: String,
    /// Canonical fully qualified name; empty until resolution has run.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub full_name: String,
    /// Dotted name of the declaring namespace; empty for the global namespace.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub namespace_name: String,
    pub kind: ClassKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub base_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub base_interfaces: Vec<String>,
    /// Imports in scope for this type: its own plus all enclosing scopes'.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub imports: Vec<ImportModel>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub fields: Vec<FieldModel>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub properties: Vec<PropertyModel>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub methods: Vec<MethodModel>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub constructors: Vec<ConstructorModel>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub dependency_metrics: Vec<DependencyMetric>,
}

impl ClassModel {
    /// Create a class declared in `namespace_name` (empty for global).
    pub fn new(name: impl Into<String>, namespace_name: impl Into<String>) -> Self {
        ClassModel {
            name: name.into(),
            namespace_name: namespace_name.into(),
            ..Default::default()
        }
    }

    pub fn with_kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_base_type(mut self, base: impl Into<String>) -> Self {
        self.base_type = Some(base.into());
        self
    }

    pub fn with_base_interface(mut self, interface: impl Into<String>) -> Self {
        self.base_interfaces.push(interface.into());
        self
    }

    pub fn with_import(mut self, import: ImportModel) -> Self {
        self.imports.push(import);
        self
    }

    pub fn with_field(mut self, field: FieldModel) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_property(mut self, property: PropertyModel) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_method(mut self, method: MethodModel) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_constructor(mut self, constructor: ConstructorModel) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn with_dependency_metric(mut self, metric: DependencyMetric) -> Self {
        self.dependency_metrics.push(metric);
        self
    }
}

/// A dotted namespace name and the types declared directly under it.
///
/// Multiple `NamespaceModel` instances across projects may share the same
/// dotted name (namespaces are reopened). Same-name namespaces are treated
/// as one search scope only inside explicit search functions; the model
/// never merges them physically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NamespaceModel {
    /// Dotted name, e.g. `A.B.C`; empty for the global namespace.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub name: String,
    /// Names of types declared directly under this namespace.
    #[serde(skip_serializing_if = "BTreeSet::is_empty", default)]
    pub class_names: BTreeSet<String>,
}

impl NamespaceModel {
    pub fn new(name: impl Into<String>) -> Self {
        NamespaceModel {
            name: name.into(),
            class_names: BTreeSet::new(),
        }
    }

    /// Record a type name declared directly under this namespace.
    pub fn add_class(&mut self, class_name: impl Into<String>) {
        self.class_names.insert(class_name.into());
    }

    /// Builder form of [`NamespaceModel::add_class`].
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.add_class(class_name);
        self
    }
}

/// One source file and the types it declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CompilationUnitModel {
    pub path: String,
    pub language: Language,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub classes: Vec<ClassModel>,
}

impl CompilationUnitModel {
    pub fn new(path: impl Into<String>, language: Language) -> Self {
        CompilationUnitModel {
            path: path.into(),
            language,
            classes: vec![],
        }
    }

    pub fn with_class(mut self, class: ClassModel) -> Self {
        self.classes.push(class);
        self
    }
}

// ============================================================================
// Projects, solutions, repository
// ============================================================================

/// One project: its namespaces, compilation units and project references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProjectModel {
    pub name: String,
    /// Project file path; the identity used by solutions and references.
    pub path: String,
    /// Paths of projects this project references, for cross-project search
    /// scoping.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub project_references: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub namespaces: Vec<NamespaceModel>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub compilation_units: Vec<CompilationUnitModel>,
}

impl ProjectModel {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        ProjectModel {
            name: name.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_project_reference(mut self, path: impl Into<String>) -> Self {
        self.project_references.push(path.into());
        self
    }

    pub fn with_namespace(mut self, namespace: NamespaceModel) -> Self {
        self.namespaces.push(namespace);
        self
    }

    pub fn with_compilation_unit(mut self, unit: CompilationUnitModel) -> Self {
        self.compilation_units.push(unit);
        self
    }

    /// Get or create the namespace with the given dotted name.
    ///
    /// Returns the first instance when the namespace was reopened.
    pub fn namespace_mut(&mut self, name: &str) -> &mut NamespaceModel {
        if let Some(idx) = self.namespaces.iter().position(|n| n.name == name) {
            return &mut self.namespaces[idx];
        }
        self.namespaces.push(NamespaceModel::new(name));
        self.namespaces.last_mut().unwrap()
    }

    /// Iterate every class in every compilation unit.
    pub fn classes(&self) -> impl Iterator<Item = &ClassModel> {
        self.compilation_units.iter().flat_map(|u| u.classes.iter())
    }

    /// Mutably iterate every class in every compilation unit.
    pub fn classes_mut(&mut self) -> impl Iterator<Item = &mut ClassModel> {
        self.compilation_units
            .iter_mut()
            .flat_map(|u| u.classes.iter_mut())
    }
}

/// One solution: an ordered list of member projects, referenced by path.
///
/// A project may belong to multiple solutions; the repository owns the
/// project, solutions only point at it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SolutionModel {
    pub path: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub project_paths: Vec<String>,
}

impl SolutionModel {
    pub fn new(path: impl Into<String>) -> Self {
        SolutionModel {
            path: path.into(),
            project_paths: vec![],
        }
    }

    pub fn with_project_path(mut self, path: impl Into<String>) -> Self {
        self.project_paths.push(path.into());
        self
    }
}

/// Root of the fact graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RepositoryModel {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub solutions: Vec<SolutionModel>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub projects: Vec<ProjectModel>,
}

impl RepositoryModel {
    pub fn new() -> Self {
        RepositoryModel::default()
    }

    pub fn with_solution(mut self, solution: SolutionModel) -> Self {
        self.solutions.push(solution);
        self
    }

    pub fn with_project(mut self, project: ProjectModel) -> Self {
        self.projects.push(project);
        self
    }

    /// Look up a project by its path.
    pub fn project_by_path(&self, path: &str) -> Option<&ProjectModel> {
        self.projects.iter().find(|p| p.path == path)
    }

    /// Check repository invariants.
    ///
    /// Every project referenced by a solution must appear in the
    /// repository-wide project set, and project paths must be unique.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = BTreeSet::new();
        for project in &self.projects {
            if !seen.insert(project.path.as_str()) {
                return Err(ModelError::DuplicateProjectPath {
                    path: project.path.clone(),
                });
            }
        }
        for solution in &self.solutions {
            for path in &solution.project_paths {
                if !seen.contains(path.as_str()) {
                    return Err(ModelError::MissingProject {
                        solution: solution.path.clone(),
                        project: path.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_mut_reuses_existing_instance() {
        let mut project = ProjectModel::new("App", "src/App.csproj");
        project.namespace_mut("App.Core").add_class("Foo");
        project.namespace_mut("App.Core").add_class("Bar");

        assert_eq!(project.namespaces.len(), 1);
        assert_eq!(project.namespaces[0].class_names.len(), 2);
    }

    #[test]
    fn classes_iterates_across_compilation_units() {
        let project = ProjectModel::new("App", "src/App.csproj")
            .with_compilation_unit(
                CompilationUnitModel::new("a.cs", Language::CSharp)
                    .with_class(ClassModel::new("A", "App")),
            )
            .with_compilation_unit(
                CompilationUnitModel::new("b.vb", Language::VisualBasic)
                    .with_class(ClassModel::new("B", "App")),
            );

        let names: Vec<_> = project.classes().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn validate_accepts_consistent_repository() {
        let repo = RepositoryModel::new()
            .with_project(ProjectModel::new("App", "src/App.csproj"))
            .with_solution(SolutionModel::new("All.sln").with_project_path("src/App.csproj"));

        assert!(repo.validate().is_ok());
    }

    #[test]
    fn validate_rejects_dangling_solution_reference() {
        let repo = RepositoryModel::new()
            .with_solution(SolutionModel::new("All.sln").with_project_path("missing.csproj"));

        let err = repo.validate().unwrap_err();
        assert!(err.to_string().contains("missing.csproj"));
    }

    #[test]
    fn validate_rejects_duplicate_project_paths() {
        let repo = RepositoryModel::new()
            .with_project(ProjectModel::new("A", "same.csproj"))
            .with_project(ProjectModel::new("B", "same.csproj"));

        assert!(repo.validate().is_err());
    }

    #[test]
    fn dependency_metric_merges_counts() {
        let mut metric = DependencyMetric::new("parameter_dependencies");
        metric.add("Foo", 2);
        metric.add("Foo", 3);

        assert_eq!(metric.counts.get("Foo"), Some(&5));
    }

    #[test]
    fn import_model_roundtrips_through_json() {
        let import = ImportModel::new("System.Collections.Generic")
            .with_alias("G")
            .with_static();

        let json = serde_json::to_string(&import).unwrap();
        let back: ImportModel = serde_json::from_str(&json).unwrap();
        assert_eq!(import, back);
        assert!(back.has_alias());
        assert!(back.is_static);
    }

    #[test]
    fn by_ref_modifiers() {
        assert!(ParameterModifier::Ref.is_by_ref());
        assert!(ParameterModifier::Out.is_by_ref());
        assert!(ParameterModifier::In.is_by_ref());
        assert!(!ParameterModifier::None.is_by_ref());
    }
}
