//! Import table logic: deduplication, alias-kind inference, alias
//! substitution and static-import member search.
//!
//! An import's alias text does not say whether it names a namespace prefix
//! or one exact type; extraction leaves the kind undetermined. The kind is
//! inferred structurally from the owner type's members: if any member's
//! type text starts with `"<alias>."` the alias is being used as a prefix
//! and is a namespace alias, otherwise it stands for a type. When no
//! member happens to use the alias yet the inference defaults to a type
//! alias; a known approximation, not worth guessing around.

use std::collections::{BTreeMap, BTreeSet};

use quarry_core::facts::{
    AliasKind, ClassModel, ImportModel, ParameterModel, RepositoryModel,
};
use quarry_core::primitives::normalize_name;

// ============================================================================
// Deduplication
// ============================================================================

/// Deduplicate a type's import list by import text.
///
/// The list is ordered innermost scope first; the first occurrence wins and
/// outer duplicates are dropped silently, which matches how re-imports
/// shadow without effect.
pub fn dedup_imports(imports: &[ImportModel]) -> Vec<ImportModel> {
    let mut seen = BTreeSet::new();
    imports
        .iter()
        .filter(|import| seen.insert(import.name.clone()))
        .cloned()
        .collect()
}

// ============================================================================
// Alias classification
// ============================================================================

/// Infer the alias kind of an import from structural evidence in the
/// owner's members.
///
/// The walk covers fields, properties (including their accessors' called
/// method qualifiers), method return/parameter types, called-method
/// qualifiers and those calls' argument types, and constructor parameters
/// and calls. The first structural match wins; absence of any match
/// defaults to a type alias. Member text must still be as written in
/// source, since alias prefixes disappear once names are rewritten.
pub fn classify_alias_kind(import: &ImportModel, owner: &ClassModel) -> AliasKind {
    let Some(alias) = import.alias.as_deref().filter(|a| !a.is_empty()) else {
        return AliasKind::None;
    };
    let prefix = format!("{alias}.");
    let uses_prefix = |text: &str| text.starts_with(&prefix);
    let call_uses_prefix = |calls: &[quarry_core::facts::CalledMethodModel]| {
        calls.iter().any(|call| {
            uses_prefix(&call.containing_type)
                || call.parameter_types.iter().any(|p| uses_prefix(&p.type_name))
        })
    };

    let in_fields = owner.fields.iter().any(|f| uses_prefix(&f.type_name));
    let in_properties = owner.properties.iter().any(|p| {
        uses_prefix(&p.type_name)
            || p.accessors.iter().any(|a| call_uses_prefix(&a.called_methods))
    });
    let in_methods = owner.methods.iter().any(|m| {
        uses_prefix(&m.return_type)
            || m.parameters.iter().any(|p| uses_prefix(&p.type_name))
            || call_uses_prefix(&m.called_methods)
    });
    let in_constructors = owner.constructors.iter().any(|c| {
        c.parameters.iter().any(|p| uses_prefix(&p.type_name))
            || call_uses_prefix(&c.called_methods)
    });

    if in_fields || in_properties || in_methods || in_constructors {
        AliasKind::Namespace
    } else {
        AliasKind::Type
    }
}

// ============================================================================
// Alias substitution
// ============================================================================

/// Result of applying an import's alias to a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasSubstitution {
    /// Type-alias exact match: the import target is the full resolution
    /// and short-circuits any further search.
    Target(String),
    /// Namespace-alias prefix match: the name with its leading alias
    /// segment replaced by the import target.
    Rewritten(String),
}

/// Apply an import's (already classified) alias to a name.
pub fn substitute(name: &str, import: &ImportModel) -> Option<AliasSubstitution> {
    let alias = import.alias.as_deref()?;
    match import.alias_kind.unwrap_or(AliasKind::None) {
        AliasKind::Type if name == alias => {
            Some(AliasSubstitution::Target(import.name.clone()))
        }
        AliasKind::Namespace if name.starts_with(alias) => Some(AliasSubstitution::Rewritten(
            name.replacen(alias, &import.name, 1),
        )),
        _ => None,
    }
}

// ============================================================================
// Static-import member search
// ============================================================================

/// Normalized parameter shape used for positional signature matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamShape {
    /// Primitive-normalized type name.
    pub type_name: String,
    /// Whether the parameter is passed by reference.
    pub by_ref: bool,
}

impl ParamShape {
    /// Shape of one declared or call-site parameter.
    pub fn of(parameter: &ParameterModel) -> Self {
        ParamShape {
            type_name: normalize_name(&parameter.type_name),
            by_ref: parameter.modifier.is_by_ref(),
        }
    }
}

/// A method signature kept in the member index.
#[derive(Debug, Clone)]
pub struct MethodSignature {
    pub name: String,
    pub parameters: Vec<ParamShape>,
}

#[derive(Debug, Clone, Default)]
struct TypeMembers {
    /// Field and property names mapped to their declared types.
    members: BTreeMap<String, String>,
    methods: Vec<MethodSignature>,
}

/// Snapshot of every declared type's member surface, keyed by full name.
///
/// Built once per resolution run, after class full names are assigned, so
/// static imports can locate previously-resolved types without holding a
/// borrow on the repository being mutated.
#[derive(Debug, Clone, Default)]
pub struct MemberIndex {
    types: BTreeMap<String, TypeMembers>,
}

impl MemberIndex {
    /// Build the snapshot from a repository whose classes already carry
    /// full names.
    pub fn build(repo: &RepositoryModel) -> Self {
        let mut index = MemberIndex::default();
        for project in &repo.projects {
            for class in project.classes() {
                let key = if class.full_name.is_empty() {
                    class.name.clone()
                } else {
                    class.full_name.clone()
                };
                let entry = index.types.entry(key).or_default();
                for field in &class.fields {
                    entry
                        .members
                        .insert(field.name.clone(), field.type_name.clone());
                }
                for property in &class.properties {
                    entry
                        .members
                        .insert(property.name.clone(), property.type_name.clone());
                }
                for method in &class.methods {
                    entry.methods.push(MethodSignature {
                        name: method.name.clone(),
                        parameters: method.parameters.iter().map(ParamShape::of).collect(),
                    });
                }
            }
        }
        index
    }
}

/// Search the static imports for a bare member or method name.
///
/// For each static import, the target type is looked up by the import's
/// (already resolved) full name. A field or property with exactly the
/// given name yields that member's declared type, primitive-normalized;
/// for delegate-typed members that type is the qualifying type of the
/// usage. Otherwise, when call-site parameters are given, a method with a
/// matching name and positionally matching parameter shape yields the
/// owning type, primitive-normalized. No match across all static imports
/// yields `None` and the caller keeps its name unchanged.
pub fn search_static_imports(
    imports: &[ImportModel],
    index: &MemberIndex,
    name: &str,
    parameters: Option<&[ParamShape]>,
) -> Option<String> {
    for import in imports.iter().filter(|i| i.is_static) {
        let Some(members) = index.types.get(&import.name) else {
            continue;
        };
        if let Some(member_type) = members.members.get(name) {
            return Some(normalize_name(member_type));
        }
        if let Some(params) = parameters {
            let matched = members
                .methods
                .iter()
                .any(|m| m.name == name && m.parameters == params);
            if matched {
                return Some(normalize_name(&import.name));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::facts::{
        CalledMethodModel, FieldModel, MethodModel, ParameterModifier, ProjectModel,
        CompilationUnitModel, Language, PropertyModel,
    };

    fn owner_with_field(type_name: &str) -> ClassModel {
        ClassModel::new("Owner", "App").with_field(FieldModel::new("value", type_name))
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let imports = vec![
            ImportModel::new("App.Core").with_alias("C"),
            ImportModel::new("System"),
            ImportModel::new("App.Core"),
        ];
        let deduped = dedup_imports(&imports);
        assert_eq!(deduped.len(), 2);
        // The inner (aliased) entry shadows the outer duplicate.
        assert_eq!(deduped[0].alias.as_deref(), Some("C"));
    }

    #[test]
    fn alias_kind_none_without_alias() {
        let import = ImportModel::new("System");
        let owner = owner_with_field("Widget");
        assert_eq!(classify_alias_kind(&import, &owner), AliasKind::None);
    }

    #[test]
    fn alias_kind_namespace_when_member_uses_prefix() {
        let import = ImportModel::new("Project.Sub").with_alias("Sub2");
        let owner = owner_with_field("Sub2.Widget");
        assert_eq!(classify_alias_kind(&import, &owner), AliasKind::Namespace);
    }

    #[test]
    fn alias_kind_defaults_to_type_without_evidence() {
        let import = ImportModel::new("Project.Sub.Widget").with_alias("W");
        let owner = owner_with_field("Widget");
        assert_eq!(classify_alias_kind(&import, &owner), AliasKind::Type);
    }

    #[test]
    fn alias_kind_requires_dot_boundary() {
        let import = ImportModel::new("Project.Sub").with_alias("Sub");
        // `Subtle` starts with the alias text but not with `Sub.`.
        let owner = owner_with_field("Subtle");
        assert_eq!(classify_alias_kind(&import, &owner), AliasKind::Type);
    }

    #[test]
    fn alias_kind_sees_called_method_qualifiers() {
        let import = ImportModel::new("Project.Sub").with_alias("Sub2");
        let owner = ClassModel::new("Owner", "App").with_method(
            MethodModel::new("Run", "void")
                .with_called_method(CalledMethodModel::new("Build", "Sub2.Factory")),
        );
        assert_eq!(classify_alias_kind(&import, &owner), AliasKind::Namespace);
    }

    #[test]
    fn substitute_type_alias_is_exact_and_terminal() {
        let mut import = ImportModel::new("Project.Sub.Widget").with_alias("W");
        import.alias_kind = Some(AliasKind::Type);

        assert_eq!(
            substitute("W", &import),
            Some(AliasSubstitution::Target("Project.Sub.Widget".to_string()))
        );
        assert_eq!(substitute("W.Inner", &import), None);
    }

    #[test]
    fn substitute_namespace_alias_rewrites_the_prefix() {
        let mut import = ImportModel::new("Project.Sub").with_alias("Sub2");
        import.alias_kind = Some(AliasKind::Namespace);

        assert_eq!(
            substitute("Sub2.Widget", &import),
            Some(AliasSubstitution::Rewritten(
                "Project.Sub.Widget".to_string()
            ))
        );
        assert_eq!(substitute("Other.Widget", &import), None);
    }

    #[test]
    fn substitute_without_alias_is_inert() {
        let import = ImportModel::new("System");
        assert_eq!(substitute("System", &import), None);
    }

    fn math_repository() -> RepositoryModel {
        let mut class = ClassModel::new("Calc", "App.Numerics")
            .with_field(FieldModel::new("Epsilon", "double"))
            .with_property(PropertyModel::new("Handler", "App.Numerics.Transform"))
            .with_method(
                MethodModel::new("Round", "double")
                    .with_parameter(ParameterModel::new("double"))
                    .with_parameter(
                        ParameterModel::new("int").with_modifier(ParameterModifier::Ref),
                    ),
            );
        class.full_name = "App.Numerics.Calc".to_string();
        RepositoryModel::new().with_project(
            ProjectModel::new("App", "App.csproj").with_compilation_unit(
                CompilationUnitModel::new("calc.cs", Language::CSharp).with_class(class),
            ),
        )
    }

    #[test]
    fn static_import_finds_member_type() {
        let repo = math_repository();
        let index = MemberIndex::build(&repo);
        let imports = vec![ImportModel::new("App.Numerics.Calc").with_static()];

        let found = search_static_imports(&imports, &index, "Epsilon", None);
        assert_eq!(found.as_deref(), Some("System.Double"));

        let handler = search_static_imports(&imports, &index, "Handler", None);
        assert_eq!(handler.as_deref(), Some("App.Numerics.Transform"));
    }

    #[test]
    fn static_import_matches_method_shape() {
        let repo = math_repository();
        let index = MemberIndex::build(&repo);
        let imports = vec![ImportModel::new("App.Numerics.Calc").with_static()];

        let shape = vec![
            ParamShape {
                type_name: "System.Double".to_string(),
                by_ref: false,
            },
            ParamShape {
                type_name: "System.Int32".to_string(),
                by_ref: true,
            },
        ];
        let found = search_static_imports(&imports, &index, "Round", Some(&shape));
        assert_eq!(found.as_deref(), Some("App.Numerics.Calc"));

        // Same types, wrong by-ref presence: no match.
        let wrong = vec![
            ParamShape {
                type_name: "System.Double".to_string(),
                by_ref: false,
            },
            ParamShape {
                type_name: "System.Int32".to_string(),
                by_ref: false,
            },
        ];
        assert_eq!(search_static_imports(&imports, &index, "Round", Some(&wrong)), None);
    }

    #[test]
    fn non_static_imports_are_ignored() {
        let repo = math_repository();
        let index = MemberIndex::build(&repo);
        let imports = vec![ImportModel::new("App.Numerics.Calc")];

        assert_eq!(search_static_imports(&imports, &index, "Epsilon", None), None);
    }
}
