use super::{EdgeFact, MetricDriver};
use crate::analysis::context::RunContext;
use crate::core::{CouplingKind, Resolution};
use crate::facts::{DeclaredEntity, SourceEntity, TypeRef};

/// Direct supertypes and implemented interfaces. Never transitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct InheritanceCoupling;

impl MetricDriver for InheritanceCoupling {
    fn kind(&self) -> CouplingKind {
        CouplingKind::Inheritance
    }

    fn emit(&self, entity: &DeclaredEntity<'_>, context: &RunContext, out: &mut Vec<EdgeFact>) {
        let from = entity.qualified_name();
        match entity {
            DeclaredEntity::Compiled { module, .. } => {
                match &module.super_type {
                    Some(TypeRef::Resolved(name)) => {
                        let name = name.trim().replace('/', ".");
                        if !context.is_root_type(&name) {
                            out.push(EdgeFact::new(from, name, Resolution::Resolved));
                        }
                    }
                    Some(TypeRef::Unresolved { name, reason }) => out.push(EdgeFact::new(
                        from,
                        name.as_str(),
                        Resolution::error(format!("cannot load supertype: {reason}")),
                    )),
                    Some(TypeRef::Primitive(_)) | None => {}
                }
                for interface in &module.interfaces {
                    out.push(EdgeFact::new(
                        from,
                        interface.trim().replace('/', "."),
                        Resolution::Resolved,
                    ));
                }
            }
            DeclaredEntity::Source(source) => {
                let declaration = source.declaration;
                for written in declaration.extends.iter().chain(&declaration.implements) {
                    if let Some(fact) = source_supertype_fact(source, written, context) {
                        out.push(fact);
                    }
                }
            }
        }
    }
}

fn source_supertype_fact(
    source: &SourceEntity<'_>,
    written: &str,
    context: &RunContext,
) -> Option<EdgeFact> {
    let raw = written.split('<').next().unwrap_or(written).trim();
    match resolve_supertype(source, raw, context) {
        Some(name) if context.is_root_type(&name) => None,
        Some(name) => Some(EdgeFact::new(source.qualified_name, name, Resolution::Resolved)),
        None => Some(EdgeFact::new(
            source.qualified_name,
            raw,
            Resolution::NotProjectPart,
        )),
    }
}

/// Resolve a supertype as written in source.
///
/// Qualified names are taken as they are. Simple names are looked up among
/// the unit's imports, then in the unit's own package, and only resolve to
/// registered project entities.
pub fn resolve_supertype(
    source: &SourceEntity<'_>,
    written: &str,
    context: &RunContext,
) -> Option<String> {
    if written.is_empty() {
        return None;
    }
    if written.contains('.') {
        return Some(written.to_string());
    }

    let suffix = format!(".{written}");
    let imported = source
        .unit
        .imports
        .iter()
        .map(|import| import.trim())
        .find(|import| import.ends_with(&suffix) && context.namespace.is_registered(import));
    if let Some(import) = imported {
        return Some(import.to_string());
    }

    let same_package = match source.unit.package_name() {
        "" => written.to_string(),
        package => format!("{package}.{written}"),
    };
    context
        .namespace
        .is_registered(&same_package)
        .then_some(same_package)
}
