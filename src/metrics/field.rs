use super::{EdgeFact, MetricDriver};
use crate::analysis::context::RunContext;
use crate::core::{CouplingKind, Resolution};
use crate::facts::{DeclaredEntity, TypeRef};
use crate::namespace::{element_type, NOT_PROJECT_PART};

/// One edge per declared field of reference type.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldCoupling;

impl MetricDriver for FieldCoupling {
    fn kind(&self) -> CouplingKind {
        CouplingKind::Field
    }

    fn emit(&self, entity: &DeclaredEntity<'_>, _context: &RunContext, out: &mut Vec<EdgeFact>) {
        let from = entity.qualified_name();
        match entity {
            DeclaredEntity::Compiled { module, .. } => {
                for field in &module.fields {
                    out.push(field_fact(from, element_type(&field.descriptor)));
                }
            }
            DeclaredEntity::Source(source) => {
                for field in &source.declaration.fields {
                    let fact = match &field.type_ref {
                        TypeRef::Resolved(name) => field_fact(from, element_type(name)),
                        TypeRef::Primitive(_) => field_fact(from, None),
                        TypeRef::Unresolved { name, reason } => EdgeFact::new(
                            from,
                            name.as_str(),
                            Resolution::error(format!(
                                "cannot resolve type of field '{}': {}",
                                field.name, reason
                            )),
                        ),
                    };
                    out.push(fact);
                }
            }
        }
    }
}

/// Reference types are resolved; the classifier's scope check decides.
fn field_fact(from: &str, element: Option<String>) -> EdgeFact {
    match element {
        Some(target) => EdgeFact::new(from, target, Resolution::Resolved),
        None => EdgeFact::new(from, NOT_PROJECT_PART, Resolution::NotProjectPart),
    }
}
