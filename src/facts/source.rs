//! Facts extracted from source text by an external parser and type resolver.

use super::TypeRef;
use crate::core::{DeclarationKind, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUnit {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub package: Option<String>,
    /// Fully qualified import names as written
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub declarations: Vec<SourceDeclaration>,
}

/// A type declared in a source unit.
///
/// The call sites of a nested declaration are reported again by its
/// enclosing declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDeclaration {
    pub name: String,
    #[serde(default)]
    pub kind: DeclarationKind,
    /// Simple name of the enclosing declaration
    #[serde(default)]
    pub outer: Option<String>,
    /// Supertype names as written, simple or qualified
    #[serde(default)]
    pub extends: Vec<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub fields: Vec<SourceField>,
    #[serde(default)]
    pub calls: Vec<CallSite>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    pub method: String,
    /// Declaring type of the called method
    pub target: TypeRef,
    #[serde(default)]
    pub line: Option<u32>,
}

impl SourceUnit {
    pub fn package_name(&self) -> &str {
        self.package.as_deref().map(str::trim).unwrap_or("")
    }

    /// Qualified name of a declaration, `pkg.Outer$Inner` for nested ones.
    pub fn qualified_name(&self, declaration: &SourceDeclaration) -> String {
        let local = match declaration.outer.as_deref() {
            Some(outer) => format!("{}${}", outer, declaration.name),
            None => declaration.name.clone(),
        };
        match self.package_name() {
            "" => local,
            package => format!("{package}.{local}"),
        }
    }

    pub fn display_name(&self) -> String {
        match (&self.path, self.declarations.first()) {
            (Some(path), _) => path.display().to_string(),
            (None, Some(first)) => self.qualified_name(first),
            (None, None) => "<empty unit>".to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(unnamed) = self
            .declarations
            .iter()
            .position(|declaration| declaration.name.trim().is_empty())
        {
            return Err(Error::malformed(
                self.display_name(),
                format!("declaration #{unnamed} has no name"),
            ));
        }
        Ok(())
    }
}

impl SourceDeclaration {
    pub fn is_nested(&self) -> bool {
        self.outer.is_some()
    }
}
