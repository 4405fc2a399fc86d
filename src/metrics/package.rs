use super::call::CallCoupling;
use super::{EdgeFact, MetricDriver};
use crate::analysis::context::RunContext;
use crate::classifier::Decision;
use crate::core::{CouplingKind, Resolution};
use crate::facts::DeclaredEntity;
use crate::namespace::package_of;

/// Package-level view of call coupling.
///
/// Replays the call facts of an entity, keeps the ones the classifier
/// accepts at entity level and lifts their endpoints to packages. Facts that
/// are not accepted keep their entity-level outcome so the package
/// statistics account for every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageCoupling;

impl MetricDriver for PackageCoupling {
    fn kind(&self) -> CouplingKind {
        CouplingKind::Package
    }

    fn emit(&self, entity: &DeclaredEntity<'_>, context: &RunContext, out: &mut Vec<EdgeFact>) {
        let mut calls = Vec::new();
        CallCoupling.emit(entity, context, &mut calls);

        let classifier = context.classifier();
        for call in calls {
            let fact = match classifier.decide(&call.from, &call.to, &call.resolution) {
                Decision::Accept { from, to } => {
                    EdgeFact::new(package_of(&from), package_of(&to), Resolution::Resolved)
                }
                Decision::SelfConnection { entity } => {
                    let package = package_of(&entity);
                    EdgeFact::new(package, package, Resolution::SelfConnection)
                }
                Decision::Reject { from, to, .. } => {
                    EdgeFact::new(package_of(&from), to, Resolution::NotProjectPart)
                }
                Decision::Ignore => {
                    EdgeFact::new(package_of(&call.from), call.to, Resolution::Ignored)
                }
                Decision::Error { .. } => {
                    EdgeFact::new(package_of(&call.from), call.to, call.resolution)
                }
            };
            out.push(fact);
        }
    }
}
