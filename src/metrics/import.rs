use std::collections::BTreeSet;

use super::{is_nested_source, EdgeFact, MetricDriver};
use crate::analysis::context::RunContext;
use crate::core::{CouplingKind, Resolution};
use crate::facts::DeclaredEntity;
use crate::namespace::{element_type, package_of, NOT_PROJECT_PART};

/// Imports in source, constant-pool type references in compiled modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportCoupling;

impl MetricDriver for ImportCoupling {
    fn kind(&self) -> CouplingKind {
        CouplingKind::Import
    }

    fn emit(&self, entity: &DeclaredEntity<'_>, context: &RunContext, out: &mut Vec<EdgeFact>) {
        if is_nested_source(entity) {
            return;
        }
        let from = entity.qualified_name();
        match entity {
            DeclaredEntity::Compiled { module, .. } => {
                // Each referenced type counts once per module.
                let referenced: BTreeSet<String> = module
                    .type_references
                    .iter()
                    .filter_map(|reference| element_type(reference))
                    .filter(|name| name != from)
                    .collect();
                out.extend(
                    referenced
                        .into_iter()
                        .map(|name| EdgeFact::new(from, name, Resolution::Resolved)),
                );
            }
            DeclaredEntity::Source(source) => {
                for import in &source.unit.imports {
                    out.push(import_fact(from, import.trim(), context));
                }
            }
        }
    }
}

fn import_fact(from: &str, import: &str, context: &RunContext) -> EdgeFact {
    // Wildcard imports name no type.
    if import.ends_with(".*") {
        return EdgeFact::new(from, import, Resolution::Ignored);
    }
    if context.namespace.is_whitelisted(package_of(import)) {
        EdgeFact::new(from, import, Resolution::Resolved)
    } else {
        EdgeFact::new(from, NOT_PROJECT_PART, Resolution::NotProjectPart)
    }
}
