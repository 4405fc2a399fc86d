//! Metric drivers: one strategy per coupling kind.
//!
//! A driver turns one declared entity into `(from, to, resolution)` facts.
//! It never writes to a matrix itself; the pass hands every fact to the
//! classifier, which decides between edge and statistic.

pub mod call;
pub mod field;
pub mod ignore;
pub mod import;
pub mod inheritance;
pub mod package;

use crate::analysis::context::RunContext;
use crate::core::{CouplingKind, Resolution};
use crate::facts::DeclaredEntity;

pub use call::CallCoupling;
pub use field::FieldCoupling;
pub use import::ImportCoupling;
pub use inheritance::InheritanceCoupling;
pub use package::PackageCoupling;

/// A dependency fact emitted by a driver, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeFact {
    pub from: String,
    pub to: String,
    pub resolution: Resolution,
}

impl EdgeFact {
    pub fn new(from: impl Into<String>, to: impl Into<String>, resolution: Resolution) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            resolution,
        }
    }
}

pub trait MetricDriver {
    fn kind(&self) -> CouplingKind;

    /// Append the facts `entity` declares for this kind to `out`.
    fn emit(&self, entity: &DeclaredEntity<'_>, context: &RunContext, out: &mut Vec<EdgeFact>);
}

/// Strategy table. Structural debt has no driver: it reads the package matrix.
pub fn driver_for(kind: CouplingKind) -> Option<Box<dyn MetricDriver>> {
    match kind {
        CouplingKind::Call => Some(Box::new(CallCoupling)),
        CouplingKind::Field => Some(Box::new(FieldCoupling)),
        CouplingKind::Import => Some(Box::new(ImportCoupling)),
        CouplingKind::Inheritance => Some(Box::new(InheritanceCoupling)),
        CouplingKind::Package => Some(Box::new(PackageCoupling)),
        CouplingKind::StructuralDebt => None,
    }
}

/// Nested source declarations share their call sites and imports with the
/// enclosing declaration.
pub(crate) fn is_nested_source(entity: &DeclaredEntity<'_>) -> bool {
    matches!(entity, DeclaredEntity::Source(source) if source.declaration.is_nested())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_table_covers_every_extracted_kind() {
        for kind in CouplingKind::ALL {
            match driver_for(kind) {
                Some(driver) => assert_eq!(driver.kind(), kind),
                None => assert_eq!(kind, CouplingKind::StructuralDebt),
            }
        }
    }
}
