//! Declared-dependency facts delivered by the external decoder and parser.
//!
//! The analyzer never reads binary layouts or source grammars itself. It
//! consumes these already-extracted facts, one unit at a time.

pub mod compiled;
pub mod loader;
pub mod source;

pub use compiled::{CompiledModule, FieldDescriptor, Invocation, Opcode};
pub use loader::{load_facts_file, parse_facts};
pub use source::{CallSite, SourceDeclaration, SourceField, SourceUnit};

use crate::core::Representation;
use serde::{Deserialize, Serialize};

/// A type reference as reported by a resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    /// Fully qualified reference type
    Resolved(String),
    /// The resolver failed; `name` is the spelling found in the input
    Unresolved { name: String, reason: String },
    Primitive(String),
}

impl TypeRef {
    pub fn resolved(name: impl Into<String>) -> Self {
        TypeRef::Resolved(name.into())
    }

    pub fn unresolved(name: impl Into<String>, reason: impl Into<String>) -> Self {
        TypeRef::Unresolved {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// An input unit that was left out of the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedUnit {
    pub representation: Representation,
    pub unit: String,
    pub reason: String,
}

/// Everything one analysis run consumes.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInput {
    pub compiled: Vec<CompiledModule>,
    pub source: Vec<SourceUnit>,
    /// Units dropped while decoding the input document
    pub skipped: Vec<SkippedUnit>,
}

impl AnalysisInput {
    pub fn new(compiled: Vec<CompiledModule>, source: Vec<SourceUnit>) -> Self {
        Self {
            compiled,
            source,
            skipped: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty() && self.source.is_empty()
    }
}

/// A source declaration together with its unit and qualified name.
#[derive(Debug, Clone, Copy)]
pub struct SourceEntity<'a> {
    pub unit: &'a SourceUnit,
    pub declaration: &'a SourceDeclaration,
    pub qualified_name: &'a str,
}

/// The declared entity a metric driver inspects.
#[derive(Debug, Clone, Copy)]
pub enum DeclaredEntity<'a> {
    Compiled {
        module: &'a CompiledModule,
        qualified_name: &'a str,
    },
    Source(SourceEntity<'a>),
}

impl DeclaredEntity<'_> {
    pub fn qualified_name(&self) -> &str {
        match self {
            DeclaredEntity::Compiled { qualified_name, .. } => qualified_name,
            DeclaredEntity::Source(entity) => entity.qualified_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_ref_serde_shapes() {
        let refs: Vec<TypeRef> = serde_json::from_str(
            r#"[{"resolved": "a.B"}, {"unresolved": {"name": "C", "reason": "missing"}}, {"primitive": "int"}]"#,
        )
        .unwrap();
        assert_eq!(
            refs,
            vec![
                TypeRef::resolved("a.B"),
                TypeRef::unresolved("C", "missing"),
                TypeRef::Primitive("int".into()),
            ]
        );
    }

    #[test]
    fn test_declared_entity_names() {
        let module = CompiledModule::new("a/b/ClassA");
        let name = module.qualified_name();
        let entity = DeclaredEntity::Compiled {
            module: &module,
            qualified_name: &name,
        };
        assert_eq!(entity.qualified_name(), "a.b.ClassA");
    }
}
