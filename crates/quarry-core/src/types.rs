//! Structured generic type trees.
//!
//! A [`GenericType`] is the machine-readable form of a textual type
//! expression such as `Dictionary<string, List<int>>?`. Resolution and
//! downstream aggregation operate on this tree, not on raw text.
//!
//! [`GenericType::parse`] is a total function: it never fails. Malformed
//! input (unbalanced brackets) degrades to an opaque leaf whose name is the
//! whole input, which keeps one broken type string from aborting analysis
//! of the rest of a repository.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A parsed type expression: a name, ordered generic arguments, and an
/// optional nullable marker.
///
/// `contained_types` is empty for non-generic leaves. The tree round-trips
/// losslessly to the canonical textual form `Name<Arg1, Arg2>` with a
/// trailing `?` when nullable; see [`GenericType::render`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GenericType {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub contained_types: Vec<GenericType>,
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub is_nullable: bool,
}

impl GenericType {
    /// Create a non-generic leaf.
    pub fn named(name: impl Into<String>) -> Self {
        GenericType {
            name: name.into(),
            contained_types: vec![],
            is_nullable: false,
        }
    }

    /// Create a generic type with arguments.
    pub fn named_with_args(name: impl Into<String>, args: Vec<GenericType>) -> Self {
        GenericType {
            name: name.into(),
            contained_types: args,
            is_nullable: false,
        }
    }

    /// Mark the type nullable.
    pub fn with_nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    /// Parse a textual type expression.
    ///
    /// The outer name's trailing `?` always wins over any inferred inner
    /// nullability. The generic-argument list runs from the first `<` to
    /// the *last* `>`; commas split arguments only at bracket depth zero.
    /// Unbalanced brackets degrade to an opaque leaf.
    pub fn parse(text: &str) -> GenericType {
        if text.is_empty() {
            return GenericType::default();
        }

        let mut nullable = false;
        let mut t = text;
        if let Some(stripped) = t.strip_suffix('?') {
            nullable = true;
            t = stripped;
        }

        if !t.contains('<') {
            // Callers may pass pre-trimmed fragments whose own text still
            // carries a trailing `?`.
            let mut trimmed = t.trim();
            if let Some(stripped) = trimmed.strip_suffix('?') {
                nullable = true;
                trimmed = stripped;
            }
            return GenericType {
                name: trimmed.to_string(),
                contained_types: vec![],
                is_nullable: nullable,
            };
        }

        let open_at = t.find('<').unwrap();
        let close_at = t.rfind('>');
        let balanced = t.matches('<').count() == t.matches('>').count();
        let close_at = match close_at {
            Some(c) if c > open_at && balanced => c,
            _ => {
                // No matching closer: the whole string is an opaque leaf.
                return GenericType {
                    name: t.trim().to_string(),
                    contained_types: vec![],
                    is_nullable: nullable,
                };
            }
        };

        let name = t[..open_at].trim().to_string();
        let interior = &t[open_at + 1..close_at];
        let mut contained = vec![];
        if !interior.trim().is_empty() {
            let mut depth = 0usize;
            let mut start = 0usize;
            for (i, ch) in interior.char_indices() {
                match ch {
                    '<' => depth += 1,
                    '>' => depth = depth.saturating_sub(1),
                    ',' if depth == 0 => {
                        contained.push(GenericType::parse(&interior[start..i]));
                        start = i + 1;
                    }
                    _ => {}
                }
            }
            contained.push(GenericType::parse(&interior[start..]));
        }

        GenericType {
            name,
            contained_types: contained,
            is_nullable: nullable,
        }
    }

    /// Render the canonical textual form.
    pub fn render(&self) -> String {
        let mut out = self.name.clone();
        if !self.contained_types.is_empty() {
            out.push('<');
            for (i, arg) in self.contained_types.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&arg.render());
            }
            out.push('>');
        }
        if self.is_nullable {
            out.push('?');
        }
        out
    }

    /// Whether the tree is a bare leaf (no arguments, not nullable).
    pub fn is_leaf(&self) -> bool {
        self.contained_types.is_empty() && !self.is_nullable
    }
}

impl fmt::Display for GenericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_name() {
        let t = GenericType::parse("Widget");
        assert_eq!(t, GenericType::named("Widget"));
    }

    #[test]
    fn parses_empty_text() {
        let t = GenericType::parse("");
        assert_eq!(t.name, "");
        assert!(t.contained_types.is_empty());
    }

    #[test]
    fn parses_nested_generics() {
        let t = GenericType::parse("Map<string, List<int>>");
        assert_eq!(
            t,
            GenericType::named_with_args(
                "Map",
                vec![
                    GenericType::named("string"),
                    GenericType::named_with_args("List", vec![GenericType::named("int")]),
                ],
            )
        );
    }

    #[test]
    fn splits_only_at_depth_zero() {
        let t = GenericType::parse("Dictionary<Pair<int, string>, long>");
        assert_eq!(t.contained_types.len(), 2);
        assert_eq!(t.contained_types[0].name, "Pair");
        assert_eq!(t.contained_types[0].contained_types.len(), 2);
        assert_eq!(t.contained_types[1].name, "long");
    }

    #[test]
    fn outer_nullable_wins() {
        let t = GenericType::parse("List<int>?");
        assert!(t.is_nullable);
        assert_eq!(t.name, "List");
        assert!(!t.contained_types[0].is_nullable);
    }

    #[test]
    fn nullable_leaf_after_trim() {
        // A pre-trimmed fragment can still carry its own `?`.
        let t = GenericType::parse("  int?  ");
        assert!(t.is_nullable);
        assert_eq!(t.name, "int");
    }

    #[test]
    fn nullable_inner_argument() {
        let t = GenericType::parse("List<int?>");
        assert!(!t.is_nullable);
        assert!(t.contained_types[0].is_nullable);
        assert_eq!(t.contained_types[0].name, "int");
    }

    #[test]
    fn unbalanced_brackets_degrade_to_opaque_leaf() {
        let t = GenericType::parse("Map<string, List<int>");
        assert_eq!(t.name, "Map<string, List<int>");
        assert!(t.contained_types.is_empty());
    }

    #[test]
    fn empty_argument_list_yields_no_arguments() {
        let t = GenericType::parse("Action<>");
        assert_eq!(t.name, "Action");
        assert!(t.contained_types.is_empty());
    }

    #[test]
    fn render_roundtrip() {
        for text in [
            "Widget",
            "List<int>",
            "Map<string, List<int>>",
            "Dictionary<Pair<int, string>, long>?",
            "Outer<Inner?>?",
        ] {
            let t = GenericType::parse(text);
            assert_eq!(GenericType::parse(&t.render()), t, "roundtrip of {text}");
        }
    }

    #[test]
    fn render_normalizes_whitespace() {
        let t = GenericType::parse("Map< string ,List<int> >");
        assert_eq!(t.render(), "Map<string, List<int>>");
    }

    #[test]
    fn display_matches_render() {
        let t = GenericType::parse("List<int>?");
        assert_eq!(t.to_string(), t.render());
    }
}
