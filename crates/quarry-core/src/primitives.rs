//! Canonical spellings for primitive types.
//!
//! Both source languages spell the same runtime types differently (`int`,
//! `Int32`, `Integer` are all `System.Int32`). The table is fixed and
//! finite; it is consulted, never searched.

/// Map a primitive spelling to its canonical runtime-type name.
///
/// Covers the C# keywords, the Visual Basic keywords, the bare runtime
/// names, and the already-qualified `System.*` forms (which map to
/// themselves so resolution treats them as decisively primitive).
pub fn canonical_primitive(name: &str) -> Option<&'static str> {
    let canonical = match name {
        "bool" | "Boolean" | "System.Boolean" => "System.Boolean",
        "byte" | "Byte" | "System.Byte" => "System.Byte",
        "sbyte" | "SByte" | "System.SByte" => "System.SByte",
        "char" | "Char" | "System.Char" => "System.Char",
        "decimal" | "Decimal" | "System.Decimal" => "System.Decimal",
        "double" | "Double" | "System.Double" => "System.Double",
        "float" | "Single" | "System.Single" => "System.Single",
        "int" | "Int32" | "Integer" | "System.Int32" => "System.Int32",
        "uint" | "UInt32" | "UInteger" | "System.UInt32" => "System.UInt32",
        "long" | "Int64" | "Long" | "System.Int64" => "System.Int64",
        "ulong" | "UInt64" | "ULong" | "System.UInt64" => "System.UInt64",
        "short" | "Int16" | "Short" | "System.Int16" => "System.Int16",
        "ushort" | "UInt16" | "UShort" | "System.UInt16" => "System.UInt16",
        "nint" | "IntPtr" | "System.IntPtr" => "System.IntPtr",
        "nuint" | "UIntPtr" | "System.UIntPtr" => "System.UIntPtr",
        "object" | "Object" | "System.Object" => "System.Object",
        "string" | "String" | "System.String" => "System.String",
        "void" | "Void" | "System.Void" => "System.Void",
        "Date" | "DateTime" | "System.DateTime" => "System.DateTime",
        _ => return None,
    };
    Some(canonical)
}

/// Whether `name` is a known primitive spelling.
pub fn is_primitive(name: &str) -> bool {
    canonical_primitive(name).is_some()
}

/// Normalize a name: canonical spelling for primitives, unchanged otherwise.
pub fn normalize_name(name: &str) -> String {
    canonical_primitive(name)
        .map(str::to_string)
        .unwrap_or_else(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csharp_keyword_runtime_and_qualified_spellings_agree() {
        assert_eq!(canonical_primitive("int"), Some("System.Int32"));
        assert_eq!(canonical_primitive("Int32"), Some("System.Int32"));
        assert_eq!(canonical_primitive("System.Int32"), Some("System.Int32"));
    }

    #[test]
    fn visual_basic_spellings_share_the_canonical_name() {
        assert_eq!(canonical_primitive("Integer"), Some("System.Int32"));
        assert_eq!(canonical_primitive("Short"), Some("System.Int16"));
        assert_eq!(canonical_primitive("Single"), Some("System.Single"));
        assert_eq!(canonical_primitive("Date"), Some("System.DateTime"));
    }

    #[test]
    fn unknown_names_pass_through_normalize() {
        assert_eq!(canonical_primitive("Widget"), None);
        assert_eq!(normalize_name("Widget"), "Widget");
        assert_eq!(normalize_name("string"), "System.String");
    }
}
