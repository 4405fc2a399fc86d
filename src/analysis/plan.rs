//! Priority-ordered set of coupling kinds to run in one pass.

use crate::core::{CouplingKind, Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetricPlan {
    kinds: Vec<CouplingKind>,
}

impl MetricPlan {
    /// Build a plan from the requested kinds.
    ///
    /// Duplicates are dropped and kinds are ordered by priority, keeping the
    /// requested order within one priority. Structural debt pulls in package
    /// coupling unless `derive_package_for_debt` is off, in which case
    /// requesting debt without package coupling is a configuration error.
    pub fn new(requested: &[CouplingKind], derive_package_for_debt: bool) -> Result<Self> {
        let mut kinds: Vec<CouplingKind> = Vec::with_capacity(requested.len() + 1);
        for kind in requested {
            if !kinds.contains(kind) {
                kinds.push(*kind);
            }
        }

        if kinds.contains(&CouplingKind::StructuralDebt) && !kinds.contains(&CouplingKind::Package)
        {
            if !derive_package_for_debt {
                return Err(Error::configuration(
                    "structural debt requires package coupling, which is neither selected nor derived",
                ));
            }
            kinds.push(CouplingKind::Package);
        }

        kinds.sort_by_key(|kind| kind.priority());
        Ok(Self { kinds })
    }

    pub fn kinds(&self) -> &[CouplingKind] {
        &self.kinds
    }

    pub fn contains(&self, kind: CouplingKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
