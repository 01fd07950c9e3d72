//! The name resolution engine.
//!
//! [`NameResolutionEngine::process`] walks the whole fact graph and
//! rewrites every type-name-bearing field in place to a canonical fully
//! qualified name, consulting the namespace trie, the import table and the
//! primitive table with a fixed precedence:
//!
//! 1. empty names pass through
//! 2. primitive spellings map through the fixed table
//! 3. names already registered in the trie are kept unchanged
//! 4. types declared directly in the current namespace
//! 5. imports, in declaration order (type aliases are terminal;
//!    namespace aliases substitute a prefix before suffix search)
//! 6. the current project's own namespaces
//! 7. other projects of the solutions containing the current project
//! 8. projects of every other solution in the repository
//! 9. otherwise the name is an external dependency and stays unchanged
//!
//! After each of steps 5–8 a candidate set with exactly one member is
//! decisive and more than one member is ambiguous; ambiguities are
//! recorded in the run's [`AmbiguityReport`] and never abort the run.
//!
//! The engine runs single-threaded by design: the trie is a
//! write-once-per-path, read-many, order-sensitive cache, and later
//! lookups depend on nodes registered by earlier ones. `process` consumes
//! the engine, so one instance is one run and stale trie state cannot leak
//! into the next repository.

use std::collections::{BTreeMap, BTreeSet};

use quarry_core::facts::{
    AccessedFieldModel, CalledMethodModel, ClassModel, ImportModel, RepositoryModel,
};
use quarry_core::primitives::{canonical_primitive, normalize_name};
use quarry_core::types::GenericType;

use crate::imports::{
    classify_alias_kind, dedup_imports, search_static_imports, substitute, AliasSubstitution,
    MemberIndex, ParamShape,
};
use crate::report::{AmbiguityReport, AmbiguousName};
use crate::trie::NamespaceTrie;

type Tries = BTreeMap<String, NamespaceTrie>;

// ============================================================================
// Scope index
// ============================================================================

/// Search-scope snapshot of the repository, taken before mutation starts.
///
/// Holds only names (namespace → declared type names, solution → project
/// paths), so scope searches never borrow the graph being rewritten.
#[derive(Debug, Default)]
struct ScopeIndex {
    /// Project path → that project's search scope.
    projects: BTreeMap<String, ProjectScope>,
    solutions: Vec<SolutionScope>,
    /// Repository-wide view: dotted namespace name → declared type names,
    /// with reopened namespaces merged (merged only in this search index,
    /// never in the model).
    namespaces: BTreeMap<String, BTreeSet<String>>,
}

#[derive(Debug, Default)]
struct ProjectScope {
    references: Vec<String>,
    namespaces: BTreeMap<String, BTreeSet<String>>,
}

#[derive(Debug, Default)]
struct SolutionScope {
    project_paths: Vec<String>,
}

impl ScopeIndex {
    fn build(repo: &RepositoryModel) -> Self {
        let mut index = ScopeIndex::default();
        for project in &repo.projects {
            let mut scope = ProjectScope {
                references: project.project_references.clone(),
                namespaces: BTreeMap::new(),
            };
            for namespace in &project.namespaces {
                scope
                    .namespaces
                    .entry(namespace.name.clone())
                    .or_default()
                    .extend(namespace.class_names.iter().cloned());
            }
            for class in project.classes() {
                scope
                    .namespaces
                    .entry(class.namespace_name.clone())
                    .or_default()
                    .insert(class.name.clone());
            }
            for (namespace, classes) in &scope.namespaces {
                index
                    .namespaces
                    .entry(namespace.clone())
                    .or_default()
                    .extend(classes.iter().cloned());
            }
            index.projects.insert(project.path.clone(), scope);
        }
        for solution in &repo.solutions {
            index.solutions.push(SolutionScope {
                project_paths: solution.project_paths.clone(),
            });
        }
        index
    }
}

/// Where a name is being resolved from.
#[derive(Debug, Clone)]
struct ResolveCtx {
    namespace: String,
    project_path: String,
    imports: Vec<ImportModel>,
}

// ============================================================================
// Engine
// ============================================================================

/// One resolution run over one repository.
///
/// Construct a fresh engine per run; `process` consumes it.
#[derive(Debug, Default)]
pub struct NameResolutionEngine {
    tries: Tries,
    scope: ScopeIndex,
    members: MemberIndex,
    report: AmbiguityReport,
}

impl NameResolutionEngine {
    pub fn new() -> Self {
        NameResolutionEngine::default()
    }

    /// Resolve every partially-qualified name in the repository, mutating
    /// the graph in place. Returns the graph together with the run's
    /// ambiguity report.
    pub fn process(mut self, mut repo: RepositoryModel) -> (RepositoryModel, AmbiguityReport) {
        self.scope = ScopeIndex::build(&repo);

        // Pass 1: canonical full names for every declared class, so every
        // later search sees every declared type.
        for project in &mut repo.projects {
            for class in project.classes_mut() {
                class.full_name =
                    Self::register(&mut self.tries, &class.name, &class.namespace_name);
            }
        }

        // Member surface snapshot for static-import search, taken after
        // full names exist.
        self.members = MemberIndex::build(&repo);

        // Pass 2: everything else.
        for project in &mut repo.projects {
            let project_path = project.path.clone();
            tracing::debug!(project = %project_path, "resolving type names");
            for unit in &mut project.compilation_units {
                for class in &mut unit.classes {
                    self.process_class(class, &project_path);
                }
            }
        }

        self.report.log_warnings();
        (repo, self.report)
    }

    fn process_class(&mut self, class: &mut ClassModel, project_path: &str) {
        let namespace = class.namespace_name.clone();

        // Imports first: dedup, classify alias kinds against the raw
        // member text (alias prefixes disappear once members are
        // rewritten), and resolve each target in declaration order with
        // the already-processed prefix as its import list.
        let effective = dedup_imports(&class.imports);
        let mut resolved_imports: Vec<ImportModel> = Vec::with_capacity(effective.len());
        for mut import in effective {
            import.alias_kind = Some(classify_alias_kind(&import, class));
            let ctx = ResolveCtx {
                namespace: namespace.clone(),
                project_path: project_path.to_string(),
                imports: resolved_imports.clone(),
            };
            match self.resolve(&import.name, &ctx) {
                Ok(resolved) => import.name = resolved,
                Err(ambiguity) => self.report.record(&ambiguity),
            }
            resolved_imports.push(import);
        }
        class.imports = resolved_imports;

        let ctx = ResolveCtx {
            namespace,
            project_path: project_path.to_string(),
            imports: class.imports.clone(),
        };

        self.rewrite_opt(&mut class.base_type, &ctx);
        for interface in &mut class.base_interfaces {
            self.rewrite(interface, &ctx);
        }
        for field in &mut class.fields {
            self.rewrite(&mut field.type_name, &ctx);
        }
        for property in &mut class.properties {
            self.rewrite(&mut property.type_name, &ctx);
            for accessor in &mut property.accessors {
                for call in &mut accessor.called_methods {
                    self.resolve_called_method(call, &ctx);
                }
                for access in &mut accessor.accessed_fields {
                    self.resolve_accessed_field(access, &ctx);
                }
            }
        }
        for method in &mut class.methods {
            self.rewrite(&mut method.return_type, &ctx);
            for parameter in &mut method.parameters {
                self.rewrite(&mut parameter.type_name, &ctx);
            }
            for call in &mut method.called_methods {
                self.resolve_called_method(call, &ctx);
            }
            for access in &mut method.accessed_fields {
                self.resolve_accessed_field(access, &ctx);
            }
        }
        for constructor in &mut class.constructors {
            for parameter in &mut constructor.parameters {
                self.rewrite(&mut parameter.type_name, &ctx);
            }
            for call in &mut constructor.called_methods {
                self.resolve_called_method(call, &ctx);
            }
        }

        // Dependency dictionaries: rewrite keys, merging keys that resolve
        // to the same full name by summing their counts.
        for metric in &mut class.dependency_metrics {
            let mut merged: BTreeMap<String, u64> = BTreeMap::new();
            for (key, count) in std::mem::take(&mut metric.counts) {
                let resolved = match self.resolve_type_text(&key, &ctx) {
                    Ok(resolved) => resolved,
                    Err(ambiguity) => {
                        self.report.record(&ambiguity);
                        key
                    }
                };
                *merged.entry(resolved).or_insert(0) += count;
            }
            metric.counts = merged;
        }
    }

    /// Resolve a call fact: argument types, then the qualifying type.
    ///
    /// A bare call (empty qualifier) is matched against the static imports
    /// by name and parameter shape; the shape is taken before rewriting so
    /// it compares against declarations the way they were written.
    fn resolve_called_method(&mut self, call: &mut CalledMethodModel, ctx: &ResolveCtx) {
        let shapes: Vec<ParamShape> = call.parameter_types.iter().map(ParamShape::of).collect();
        for parameter in &mut call.parameter_types {
            self.rewrite(&mut parameter.type_name, ctx);
        }
        if call.containing_type.is_empty() {
            if let Some(owner) =
                search_static_imports(&ctx.imports, &self.members, &call.name, Some(&shapes))
            {
                call.containing_type = owner;
            }
            return;
        }
        self.rewrite(&mut call.containing_type, ctx);
    }

    fn resolve_accessed_field(&mut self, access: &mut AccessedFieldModel, ctx: &ResolveCtx) {
        if access.containing_type.is_empty() {
            return;
        }
        self.rewrite(&mut access.containing_type, ctx);
    }

    /// Rewrite one type-bearing field, recording ambiguity and keeping the
    /// best-effort value instead of failing the run.
    fn rewrite(&mut self, slot: &mut String, ctx: &ResolveCtx) {
        match self.resolve_type_text(slot, ctx) {
            Ok(resolved) => *slot = resolved,
            Err(ambiguity) => self.report.record(&ambiguity),
        }
    }

    fn rewrite_opt(&mut self, slot: &mut Option<String>, ctx: &ResolveCtx) {
        if let Some(value) = slot {
            self.rewrite(value, ctx);
        }
    }

    /// Resolve a textual type expression structurally: parse it into a
    /// generic type tree, resolve every node name, and render the result.
    fn resolve_type_text(&mut self, text: &str, ctx: &ResolveCtx) -> Result<String, AmbiguousName> {
        if text.is_empty() {
            return Ok(String::new());
        }
        let parsed = GenericType::parse(text);
        let resolved = self.resolve_generic(&parsed, ctx)?;
        Ok(resolved.render())
    }

    fn resolve_generic(
        &mut self,
        tree: &GenericType,
        ctx: &ResolveCtx,
    ) -> Result<GenericType, AmbiguousName> {
        let name = self.resolve(&tree.name, ctx)?;
        let mut contained = Vec::with_capacity(tree.contained_types.len());
        for argument in &tree.contained_types {
            contained.push(self.resolve_generic(argument, ctx)?);
        }
        Ok(GenericType {
            name,
            contained_types: contained,
            is_nullable: tree.is_nullable,
        })
    }

    /// The core precedence walk. See the module docs for the step order.
    fn resolve(&mut self, name: &str, ctx: &ResolveCtx) -> Result<String, AmbiguousName> {
        // 1. Empty names pass through.
        if name.is_empty() {
            return Ok(String::new());
        }

        // 2. Primitive spellings map through the fixed table.
        if let Some(canonical) = canonical_primitive(name) {
            return Ok(canonical.to_string());
        }

        // 3. Already fully qualified relative to everything resolved so far.
        if Self::contains_registered_path(&self.tries, name) {
            return Ok(name.to_string());
        }

        // 4. Declared directly in the current namespace, as a bare name or
        //    already carrying the namespace prefix.
        if let Some(project) = self.scope.projects.get(&ctx.project_path) {
            if let Some(classes) = project.namespaces.get(&ctx.namespace) {
                let qualified = if ctx.namespace.is_empty() {
                    None
                } else {
                    Some(format!("{}.{}", ctx.namespace, name))
                };
                if classes.contains(name)
                    || qualified.as_deref().is_some_and(|q| classes.contains(q))
                {
                    return Ok(Self::register(&mut self.tries, name, &ctx.namespace));
                }
            }
        }

        // 5. Imports, in declaration order. A type alias hit is terminal;
        //    a namespace alias substitutes the prefix before suffix search.
        //    Static imports bring members, not types, and are skipped here.
        let mut candidates: BTreeSet<String> = BTreeSet::new();
        for import in ctx.imports.iter().filter(|i| !i.is_static) {
            let mut search_name = name.to_string();
            match substitute(name, import) {
                Some(AliasSubstitution::Target(target)) => return Ok(target),
                Some(AliasSubstitution::Rewritten(rewritten)) => search_name = rewritten,
                None => {}
            }
            if let Some(classes) = self.scope.namespaces.get(&import.name) {
                candidates.extend(Self::search_in_namespaces(
                    &mut self.tries,
                    std::iter::once((&import.name, classes)),
                    &search_name,
                ));
            }
        }
        if let Some(decision) = Self::decide(name, &candidates) {
            return decision;
        }

        // 6. The current project's own namespaces.
        if let Some(project) = self.scope.projects.get(&ctx.project_path) {
            candidates.extend(Self::search_in_namespaces(
                &mut self.tries,
                project.namespaces.iter(),
                name,
            ));
        }
        if let Some(decision) = Self::decide(name, &candidates) {
            return decision;
        }

        // 7. Other projects of the solutions containing this project. A
        //    project outside every solution falls back to the projects it
        //    references directly.
        let mut visited: BTreeSet<String> = BTreeSet::new();
        visited.insert(ctx.project_path.clone());
        let mut siblings: Vec<String> = vec![];
        let mut in_any_solution = false;
        for solution in &self.scope.solutions {
            if solution.project_paths.iter().any(|p| p == &ctx.project_path) {
                in_any_solution = true;
                siblings.extend(solution.project_paths.iter().cloned());
            }
        }
        if !in_any_solution {
            if let Some(project) = self.scope.projects.get(&ctx.project_path) {
                siblings.extend(project.references.iter().cloned());
            }
        }
        for path in siblings {
            if !visited.insert(path.clone()) {
                continue;
            }
            if let Some(project) = self.scope.projects.get(&path) {
                candidates.extend(Self::search_in_namespaces(
                    &mut self.tries,
                    project.namespaces.iter(),
                    name,
                ));
            }
        }
        if let Some(decision) = Self::decide(name, &candidates) {
            return decision;
        }

        // 8. Projects of every other solution in the repository.
        let mut remaining: Vec<String> = vec![];
        for solution in &self.scope.solutions {
            for path in &solution.project_paths {
                if !visited.contains(path) {
                    remaining.push(path.clone());
                }
            }
        }
        for path in remaining {
            if !visited.insert(path.clone()) {
                continue;
            }
            if let Some(project) = self.scope.projects.get(&path) {
                candidates.extend(Self::search_in_namespaces(
                    &mut self.tries,
                    project.namespaces.iter(),
                    name,
                ));
            }
        }
        if let Some(decision) = Self::decide(name, &candidates) {
            return decision;
        }

        // 9. No repository-internal candidate: an external dependency.
        Ok(normalize_name(name))
    }

    /// Single candidate is decisive, several are ambiguous, none keeps the
    /// walk going.
    fn decide(
        name: &str,
        candidates: &BTreeSet<String>,
    ) -> Option<Result<String, AmbiguousName>> {
        match candidates.len() {
            0 => None,
            1 => candidates.first().map(|c| Ok(normalize_name(c))),
            _ => Some(Err(AmbiguousName {
                name: name.to_string(),
                candidates: candidates.clone(),
            })),
        }
    }

    /// Register a confirmed type path in the trie map and return its full
    /// name. The outer map is keyed by first path segment so unrelated
    /// top-level namespaces never share nodes.
    fn register(tries: &mut Tries, type_name: &str, namespace: &str) -> String {
        let type_first = type_name.split('.').next().unwrap_or_default();
        let top = if namespace.is_empty() {
            type_first
        } else {
            let namespace_first = namespace.split('.').next().unwrap_or_default();
            if type_first == namespace_first {
                type_first
            } else {
                namespace_first
            }
        };
        if top.is_empty() {
            return type_name.to_string();
        }
        let trie = tries
            .entry(top.to_string())
            .or_insert_with(|| NamespaceTrie::new(top));
        let node = trie.add_child(type_name, namespace);
        trie.full_name(node)
    }

    fn contains_registered_path(tries: &Tries, name: &str) -> bool {
        let segments: Vec<&str> = name.split('.').collect();
        match segments.first() {
            Some(first) if !first.is_empty() => tries
                .get(*first)
                .is_some_and(|trie| trie.contains_path(&segments)),
            _ => false,
        }
    }

    /// Register the given namespaces' declared types, then suffix-search
    /// each namespace's subtree for `name`.
    fn search_in_namespaces<'a, I>(tries: &mut Tries, namespaces: I, name: &str) -> BTreeSet<String>
    where
        I: IntoIterator<Item = (&'a String, &'a BTreeSet<String>)>,
    {
        let spaces: Vec<(&String, &BTreeSet<String>)> = namespaces.into_iter().collect();
        let mut hits = BTreeSet::new();
        for &(namespace, classes) in &spaces {
            for class in classes.iter() {
                Self::register(tries, class, namespace);
            }
        }
        let suffix = format!(".{name}");
        for &(namespace, classes) in &spaces {
            if namespace.is_empty() {
                // Global namespace: each type is the root of its own trie.
                for class in classes.iter() {
                    if class == name || class.ends_with(&suffix) {
                        hits.insert(class.clone());
                    }
                }
                continue;
            }
            let segments: Vec<&str> = namespace.split('.').collect();
            let Some(trie) = tries.get(segments[0]) else {
                continue;
            };
            let Some(node) = trie.get_child(&segments) else {
                continue;
            };
            hits.extend(trie.possible_children(node, name));
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_returns_canonical_full_name() {
        let mut tries = Tries::new();
        let full = NameResolutionEngine::register(&mut tries, "Widget", "App.Core");
        assert_eq!(full, "App.Core.Widget");
        assert!(NameResolutionEngine::contains_registered_path(
            &tries,
            "App.Core.Widget"
        ));
    }

    #[test]
    fn register_handles_type_names_carrying_the_namespace() {
        let mut tries = Tries::new();
        let full = NameResolutionEngine::register(&mut tries, "App.Core.Widget", "App.Core");
        assert_eq!(full, "App.Core.Widget");
        assert_eq!(tries.len(), 1);
    }

    #[test]
    fn register_global_namespace_type() {
        let mut tries = Tries::new();
        let full = NameResolutionEngine::register(&mut tries, "Widget", "");
        assert_eq!(full, "Widget");
        assert!(NameResolutionEngine::contains_registered_path(&tries, "Widget"));
    }

    #[test]
    fn decide_on_empty_one_and_many() {
        let empty = BTreeSet::new();
        assert!(NameResolutionEngine::decide("X", &empty).is_none());

        let one: BTreeSet<String> = ["A.X".to_string()].into_iter().collect();
        assert_eq!(
            NameResolutionEngine::decide("X", &one),
            Some(Ok("A.X".to_string()))
        );

        let many: BTreeSet<String> = ["A.X".to_string(), "B.X".to_string()].into_iter().collect();
        let decision = NameResolutionEngine::decide("X", &many).unwrap();
        let ambiguity = decision.unwrap_err();
        assert_eq!(ambiguity.name, "X");
        assert_eq!(ambiguity.candidates.len(), 2);
    }

    #[test]
    fn search_matches_exact_suffix_only() {
        let mut tries = Tries::new();
        let mut classes = BTreeSet::new();
        classes.insert("Widget".to_string());
        classes.insert("MyWidget".to_string());
        let namespace = "App.Core".to_string();

        let hits = NameResolutionEngine::search_in_namespaces(
            &mut tries,
            std::iter::once((&namespace, &classes)),
            "Widget",
        );
        assert_eq!(hits.len(), 1);
        assert!(hits.contains("App.Core.Widget"));
    }
}
