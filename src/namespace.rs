//! Entity naming rules and the in-scope set of a single analysis pass.
//!
//! Names arrive in path notation (`a/b/C`), dotted notation (`a.b.C`) and with
//! nested-type suffixes (`a.b.C$Inner`, `a.b.C.Inner`). Every edge endpoint is
//! normalized to the dotted name of its enclosing top-level type before it is
//! classified, so coupling is always attributed at top-level granularity.

use std::collections::HashSet;

/// Sentinel target for lambda and anonymous call owners.
pub const LAMBDA: &str = "LAMBDA";
/// Sentinel target for dependencies on non-reference types.
pub const NOT_PROJECT_PART: &str = "NOT_PROJECT_PART";

const NESTED_SEPARATOR: char = '$';

/// Normalize a raw type name to the dotted name of its top-level type.
pub fn normalize(name: &str) -> String {
    let dotted = name.trim().replace('/', ".");
    let mut end = dotted.find(NESTED_SEPARATOR).unwrap_or(dotted.len());
    if let Some(first_upper) = dotted[..end].find(char::is_uppercase) {
        if let Some(dot) = dotted[first_upper..end].find('.') {
            end = first_upper + dot;
        }
    }
    dotted[..end].to_string()
}

/// Package prefix of a dotted type name.
///
/// Follows the Java convention that type names start with an upper-case
/// character: everything before the first such segment is the package.
/// Returns `""` for the default package.
pub fn package_of(name: &str) -> &str {
    match name.find(char::is_uppercase) {
        Some(idx) if idx > 0 => name[..idx].trim_end_matches('.'),
        _ => "",
    }
}

/// Type name without its package prefix.
pub fn bare_name(name: &str) -> &str {
    name[package_of(name).len()..].trim_start_matches('.')
}

pub fn is_nested(name: &str) -> bool {
    name.contains(NESTED_SEPARATOR)
}

/// Call owners without a package whose name starts lower-case are
/// synthesized lambda or anonymous targets.
pub fn is_lambda_owner(owner: &str) -> bool {
    !owner.contains('.')
        && !owner.contains('/')
        && owner.chars().next().is_some_and(char::is_lowercase)
}

/// Unwrap a type descriptor to its element or raw type.
///
/// Accepts compiled descriptors (`Lpkg/Foo;`, `[[Lpkg/Foo;`) and source type
/// spellings (`pkg.Foo[]`, `pkg.List<pkg.Foo>`). Returns `None` for primitive
/// types and primitive arrays.
pub fn element_type(descriptor: &str) -> Option<String> {
    let descriptor = descriptor.trim();
    let unbracketed = descriptor.trim_start_matches('[');
    let inner = match unbracketed
        .strip_prefix('L')
        .and_then(|rest| rest.strip_suffix(';'))
    {
        Some(object) => object,
        None if unbracketed.len() != descriptor.len() => return None,
        None => unbracketed,
    };

    let raw = inner
        .split('<')
        .next()
        .unwrap_or(inner)
        .trim_end_matches("[]")
        .trim();

    if raw.is_empty() || is_primitive(raw) {
        return None;
    }
    Some(raw.replace('/', "."))
}

fn is_primitive(name: &str) -> bool {
    matches!(
        name,
        "B" | "C"
            | "D"
            | "F"
            | "I"
            | "J"
            | "S"
            | "Z"
            | "V"
            | "byte"
            | "char"
            | "double"
            | "float"
            | "int"
            | "long"
            | "short"
            | "boolean"
            | "void"
    )
}

/// Whitelist and registered project entities of one analysis pass.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    whitelist: HashSet<String>,
    entities: HashSet<String>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_whitelist<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut namespace = Self::new();
        for name in names {
            namespace.add_to_whitelist(name);
        }
        namespace
    }

    pub fn add_to_whitelist(&mut self, name: impl Into<String>) {
        self.whitelist.insert(name.into());
    }

    /// Register a discovered project type under its raw and normalized name.
    pub fn register_entity(&mut self, name: &str) {
        let dotted = name.replace('/', ".");
        let top_level = normalize(&dotted);
        self.entities.insert(dotted);
        self.entities.insert(top_level);
    }

    pub fn register_all<'a, I>(&mut self, names: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            self.register_entity(name);
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        let dotted = name.replace('/', ".");
        self.entities.contains(&dotted) || self.entities.contains(&normalize(&dotted))
    }

    pub fn is_whitelisted(&self, name: &str) -> bool {
        self.whitelist.contains(name)
    }

    /// Whether `name` belongs to the analyzed project.
    ///
    /// True when the whitelist holds the name itself or its package, or when
    /// the name or its bare type name is a registered entity. The bare-name
    /// check matches types that were reported with a different qualification
    /// depth in the two representations.
    pub fn in_scope(&self, name: &str) -> bool {
        if self.whitelist.contains(name) || self.whitelist.contains(package_of(name)) {
            return true;
        }
        self.entities.contains(name) || self.entities.contains(bare_name(name))
    }

    /// Sorted top-level entity names.
    pub fn top_level_entities(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entities
            .iter()
            .filter(|name| !is_nested(name) && normalize(name) == **name)
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Sorted whitelist entries.
    pub fn whitelist(&self) -> Vec<String> {
        let mut names: Vec<String> = self.whitelist.iter().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_path_notation() {
        assert_eq!(normalize("a/b/ClassA"), "a.b.ClassA");
        assert_eq!(normalize("a.b.ClassA"), "a.b.ClassA");
    }

    #[test]
    fn test_normalize_collapses_nested_types() {
        assert_eq!(normalize("a/b/Outer$Inner"), "a.b.Outer");
        assert_eq!(normalize("a.b.Outer$Inner$Deeper"), "a.b.Outer");
        assert_eq!(normalize("a.b.Outer.Inner"), "a.b.Outer");
        assert_eq!(normalize("Outer$1"), "Outer");
    }

    #[test]
    fn test_normalize_keeps_sentinels() {
        assert_eq!(normalize(LAMBDA), LAMBDA);
        assert_eq!(normalize(NOT_PROJECT_PART), NOT_PROJECT_PART);
    }

    #[test]
    fn test_package_of() {
        assert_eq!(package_of("a.b.ClassA"), "a.b");
        assert_eq!(package_of("ClassA"), "");
        assert_eq!(package_of("a.b"), "");
        assert_eq!(bare_name("a.b.ClassA"), "ClassA");
        assert_eq!(bare_name("ClassA"), "ClassA");
    }

    #[test]
    fn test_lambda_owner_detection() {
        assert!(is_lambda_owner("lambda$main$0"));
        assert!(!is_lambda_owner("a.b.ClassA"));
        assert!(!is_lambda_owner("ClassA"));
        assert!(!is_lambda_owner(""));
    }

    #[test]
    fn test_element_type_unwraps_descriptors() {
        assert_eq!(element_type("La/b/Foo;").as_deref(), Some("a.b.Foo"));
        assert_eq!(element_type("[[La/b/Foo;").as_deref(), Some("a.b.Foo"));
        assert_eq!(element_type("a.b.Foo[]").as_deref(), Some("a.b.Foo"));
        assert_eq!(
            element_type("java.util.List<a.b.Foo>").as_deref(),
            Some("java.util.List")
        );
        assert_eq!(element_type("Logger").as_deref(), Some("Logger"));
    }

    #[test]
    fn test_element_type_rejects_primitives() {
        assert_eq!(element_type("I"), None);
        assert_eq!(element_type("[I"), None);
        assert_eq!(element_type("int"), None);
        assert_eq!(element_type("boolean[]"), None);
        assert_eq!(element_type(""), None);
    }

    #[test]
    fn test_in_scope_by_whitelisted_package() {
        let namespace = Namespace::with_whitelist(["a.b"]);
        assert!(namespace.in_scope("a.b.ClassA"));
        assert!(!namespace.in_scope("java.lang.String"));
    }

    #[test]
    fn test_in_scope_by_whitelisted_name() {
        let namespace = Namespace::with_whitelist(["x.y.Special"]);
        assert!(namespace.in_scope("x.y.Special"));
        assert!(!namespace.in_scope("x.y.Other"));
    }

    #[test]
    fn test_in_scope_by_registered_bare_name() {
        let mut namespace = Namespace::new();
        namespace.register_entity("ClassA");
        assert!(namespace.in_scope("ClassA"));
        assert!(namespace.in_scope("some.pkg.ClassA"));
        assert!(!namespace.in_scope("some.pkg.ClassB"));
    }

    #[test]
    fn test_default_package_whitelist_admits_unqualified_names() {
        let namespace = Namespace::with_whitelist([""]);
        assert!(namespace.in_scope("Unknown"));
        assert!(namespace.in_scope("lower.case.name"));
        assert!(!namespace.in_scope("b.Other"));
    }

    #[test]
    fn test_register_entity_records_top_level() {
        let mut namespace = Namespace::new();
        namespace.register_entity("a/b/Outer$Inner");
        assert!(namespace.is_registered("a.b.Outer$Inner"));
        assert!(namespace.is_registered("a.b.Outer"));
        assert_eq!(namespace.top_level_entities(), vec!["a.b.Outer".to_string()]);
    }

    proptest! {
        #[test]
        fn prop_normalize_never_keeps_nested_separator(
            package in "[a-z]{1,6}(\\.[a-z]{1,6}){0,2}",
            outer in "[A-Z][a-zA-Z0-9]{0,8}",
            inner in "[A-Za-z0-9]{1,8}",
        ) {
            let raw = format!("{package}.{outer}${inner}");
            let normalized = normalize(&raw);
            prop_assert!(!normalized.contains('$'));
            prop_assert_eq!(normalized, format!("{package}.{outer}"));
        }

        #[test]
        fn prop_normalize_is_idempotent(name in "[a-zA-Z0-9./$]{0,30}") {
            let once = normalize(&name);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
