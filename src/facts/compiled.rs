//! Facts extracted from compiled modules by an external decoder.

use super::TypeRef;
use crate::core::{DeclarationKind, Error, Result};
use serde::{Deserialize, Serialize};

/// One compiled type with the symbolic references it declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledModule {
    /// Path (`a/b/C`) or dotted (`a.b.C`) name, possibly nested (`a.b.C$1`)
    pub name: String,
    #[serde(default)]
    pub kind: DeclarationKind,
    #[serde(default)]
    pub super_type: Option<TypeRef>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub invocations: Vec<Invocation>,
    /// Class references from the module's constant pool
    #[serde(default)]
    pub type_references: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    /// Type descriptor such as `La/b/C;`, `[I` or `I`
    pub descriptor: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opcode {
    InvokeVirtual,
    InvokeSpecial,
    InvokeStatic,
    InvokeInterface,
    InvokeDynamic,
}

/// A method invocation site inside a compiled module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub opcode: Opcode,
    pub owner: String,
    pub method: String,
}

impl Invocation {
    /// Object construction and static initialization.
    pub fn is_initializer(&self) -> bool {
        self.method == "<init>" || self.method == "<clinit>"
    }
}

impl CompiledModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: DeclarationKind::Class,
            super_type: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            invocations: Vec::new(),
            type_references: Vec::new(),
        }
    }

    /// Dotted name, nested suffix preserved.
    pub fn qualified_name(&self) -> String {
        self.name.trim().replace('/', ".")
    }

    pub fn validate(&self) -> Result<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::malformed("<unnamed module>", "module name is empty"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(Error::malformed(name, "module name contains whitespace"));
        }
        if let Some(invocation) = self.invocations.iter().find(|i| i.owner.trim().is_empty()) {
            return Err(Error::malformed(
                name,
                format!("invocation of '{}' has no owner", invocation.method),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_defaults() {
        let module: CompiledModule = serde_json::from_str(r#"{"name": "a/b/ClassA"}"#).unwrap();
        assert_eq!(module.qualified_name(), "a.b.ClassA");
        assert_eq!(module.kind, DeclarationKind::Class);
        assert!(module.invocations.is_empty());
        assert!(module.validate().is_ok());
    }

    #[test]
    fn test_deserialize_invocation() {
        let invocation: Invocation = serde_json::from_str(
            r#"{"opcode": "invoke_special", "owner": "a/b/ClassB", "method": "<init>"}"#,
        )
        .unwrap();
        assert_eq!(invocation.opcode, Opcode::InvokeSpecial);
        assert!(invocation.is_initializer());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let module = CompiledModule::new("  ");
        assert!(module.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_ownerless_invocation() {
        let mut module = CompiledModule::new("a.b.ClassA");
        module.invocations.push(Invocation {
            opcode: Opcode::InvokeStatic,
            owner: String::new(),
            method: "run".into(),
        });
        let err = module.validate().unwrap_err();
        assert!(err.to_string().contains("has no owner"));
    }
}
