//! Namespace trie: a hierarchical, lazily populated registry of namespace
//! segments and discovered type leaves.
//!
//! The trie is a pure search index, never authoritative storage: types are
//! physically owned by the fact model; the trie only records full names
//! confirmed during resolution so later lookups are fast. Nodes are stored
//! in an arena `Vec` with parent links as indexes; children live in a
//! `BTreeMap` so traversal order is deterministic regardless of insertion
//! order.
//!
//! The engine holds one trie per distinct top-level segment (keyed in an
//! outer map), which keeps unrelated first-level namespaces from ever
//! sharing nodes.

use std::collections::BTreeMap;

/// Index of a node within one [`NamespaceTrie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    segment: String,
    parent: Option<usize>,
    children: BTreeMap<String, usize>,
}

/// A trie over dotted namespace/type paths sharing one top segment.
#[derive(Debug)]
pub struct NamespaceTrie {
    nodes: Vec<Node>,
}

impl NamespaceTrie {
    /// Create a trie whose root carries the given top-level segment.
    pub fn new(root_segment: impl Into<String>) -> Self {
        NamespaceTrie {
            nodes: vec![Node {
                segment: root_segment.into(),
                parent: None,
                children: BTreeMap::new(),
            }],
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// The root's segment.
    pub fn root_segment(&self) -> &str {
        &self.nodes[0].segment
    }

    /// Walk a dotted path from the root: segment 0 must match the root's
    /// own segment, segments 1.. must match children. Absent if any
    /// segment is missing.
    pub fn get_child(&self, path: &[&str]) -> Option<NodeId> {
        let (first, rest) = path.split_first()?;
        if *first != self.nodes[0].segment {
            return None;
        }
        let mut current = 0usize;
        for segment in rest {
            current = *self.nodes[current].children.get(*segment)?;
        }
        Some(NodeId(current))
    }

    /// Whether the exact path exists.
    pub fn contains_path(&self, path: &[&str]) -> bool {
        self.get_child(path).is_some()
    }

    /// Register a type under its enclosing namespace, creating missing
    /// nodes on the way (lazy growth). Returns the deepest node reached.
    ///
    /// When the type name's first segment already matches the enclosing
    /// namespace's first segment the type name is taken as the whole path;
    /// otherwise the namespace segments are prepended. This handles a type
    /// referenced by simple name from inside its own namespace as well as
    /// by a dotted name that already includes part of the namespace.
    pub fn add_child(&mut self, type_name: &str, enclosing_namespace: &str) -> NodeId {
        let type_segments: Vec<&str> = type_name.split('.').collect();
        let namespace_segments: Vec<&str> = if enclosing_namespace.is_empty() {
            vec![]
        } else {
            enclosing_namespace.split('.').collect()
        };

        let path: Vec<&str> =
            if namespace_segments.is_empty() || type_segments.first() == namespace_segments.first() {
                type_segments
            } else {
                namespace_segments
                    .into_iter()
                    .chain(type_segments)
                    .collect()
            };
        debug_assert_eq!(path[0], self.nodes[0].segment, "path routed to wrong trie");

        let mut current = 0usize;
        for segment in &path[1..] {
            let existing = self.nodes[current].children.get(*segment).copied();
            current = match existing {
                Some(id) => id,
                None => {
                    let id = self.nodes.len();
                    self.nodes.push(Node {
                        segment: (*segment).to_string(),
                        parent: Some(current),
                        children: BTreeMap::new(),
                    });
                    self.nodes[current].children.insert((*segment).to_string(), id);
                    id
                }
            };
        }
        NodeId(current)
    }

    /// The full dotted name of a node, computed by walking parent links.
    pub fn full_name(&self, node: NodeId) -> String {
        let mut segments = vec![];
        let mut current = Some(node.0);
        while let Some(idx) = current {
            segments.push(self.nodes[idx].segment.as_str());
            current = self.nodes[idx].parent;
        }
        segments.reverse();
        segments.join(".")
    }

    /// Full names of every leaf reachable from `from` whose name matches
    /// `name` as an exact suffix on a dot boundary (or equals it outright).
    ///
    /// `name` may itself be dotted; this is how an import at any nesting
    /// level is matched against a partially qualified reference.
    pub fn possible_children(&self, from: NodeId, name: &str) -> Vec<String> {
        let suffix = format!(".{name}");
        let mut matches = vec![];
        let mut stack = vec![from.0];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            if node.children.is_empty() {
                let full = self.full_name(NodeId(idx));
                if full == name || full.ends_with(&suffix) {
                    matches.push(full);
                }
            } else {
                // Reverse so the stack pops children in ascending order.
                for &child in node.children.values().rev() {
                    stack.push(child);
                }
            }
        }
        matches
    }
}
