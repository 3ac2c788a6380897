//! Naming conventions for generated Java types and members.
//!
//! # Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `word` | [`capitalize`] | `Word` |
//! | `com.example` | [`to_pascal_case`] | `ComExample` |
//! | `com.example.Outer.Inner` | [`split_canonical_name`] | `("com.example", "Outer$Inner")` |
//! | `userId` | [`state_class_name`] | `AfterSettingUserId` |

/// Suffix of the generated type-state builder
pub const BUILDER_SUFFIX: &str = "__IntentBuilder";

/// Suffix of the generated extraction routine
pub const BINDER_SUFFIX: &str = "__ExtraBinder";

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while", "_",
];

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use extrabind_codegen::naming::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize("userId"), "UserId");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Convert a dotted, snake_case or kebab-case string to PascalCase.
///
/// # Examples
///
/// ```
/// use extrabind_codegen::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("com.example"), "ComExample");
/// assert_eq!(to_pascal_case("my_app-ui"), "MyAppUi");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(['.', '-', '_']).map(capitalize).collect()
}

/// Whether `s` is a legal Java identifier (and not a reserved word)
pub fn is_java_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !JAVA_KEYWORDS.contains(&s)
}

/// Name of the builder state reached after setting `key`
pub fn state_class_name(key: &str) -> String {
    format!("AfterSetting{}", capitalize(key))
}

/// Split a canonical class name into its namespace and nested simple name.
///
/// The namespace is the run of leading segments that start lowercase; the
/// remaining segments (outer class first) are joined with `$`.
pub fn split_canonical_name(canonical: &str) -> (String, String) {
    let segments: Vec<&str> = canonical.split('.').collect();
    let split = segments
        .iter()
        .position(|segment| segment.chars().next().is_some_and(char::is_uppercase))
        .unwrap_or(segments.len().saturating_sub(1));
    (segments[..split].join("."), segments[split..].join("$"))
}

/// Fully qualified name of a type in `namespace`
pub fn qualified(namespace: &str, simple_name: &str) -> String {
    if namespace.is_empty() {
        simple_name.to_string()
    } else {
        format!("{namespace}.{simple_name}")
    }
}

#[cfg(test)]
#[path = "naming/naming_tests.rs"]
mod naming_tests;
