//! One analysis pass over a single representation.

use std::collections::BTreeMap;

use tracing::{debug, info, info_span, warn};

use super::context::{CancelFlag, RunContext};
use super::plan::MetricPlan;
use super::report::{MetricReport, PassReport};
use crate::config::CouplingConfig;
use crate::core::{CouplingKind, Representation, Result};
use crate::debt::{calculate_structural_debt, DebtReport};
use crate::facts::{CompiledModule, DeclaredEntity, SkippedUnit, SourceEntity, SourceUnit};
use crate::matrix::CouplingMatrix;
use crate::metrics::driver_for;
use crate::namespace::{normalize, package_of};
use crate::stats::Statistics;

#[derive(Debug, Clone)]
struct MetricState {
    matrix: CouplingMatrix,
    statistics: Statistics,
}

impl MetricState {
    fn new(kind: CouplingKind) -> Self {
        let matrix = if kind == CouplingKind::Package {
            CouplingMatrix::tracking_endpoints()
        } else {
            CouplingMatrix::new()
        };
        Self {
            matrix,
            statistics: Statistics::new(),
        }
    }
}

/// Runs the drivers of a plan, in priority order, over prepared entities.
pub struct AnalysisPass<'a> {
    representation: Representation,
    plan: &'a MetricPlan,
    context: RunContext,
    cancel: &'a CancelFlag,
}

impl<'a> AnalysisPass<'a> {
    pub fn new(
        representation: Representation,
        plan: &'a MetricPlan,
        context: RunContext,
        cancel: &'a CancelFlag,
    ) -> Self {
        Self {
            representation,
            plan,
            context,
            cancel,
        }
    }

    pub fn context(&self) -> &RunContext {
        &self.context
    }

    pub fn run(&self, entities: &[DeclaredEntity<'_>], skipped: Vec<SkippedUnit>) -> PassReport {
        let span = info_span!(
            "coupling_pass",
            representation = %self.representation,
            entities = entities.len()
        );
        let _guard = span.enter();

        let mut states: BTreeMap<CouplingKind, MetricState> = self
            .plan
            .kinds()
            .iter()
            .filter(|kind| **kind != CouplingKind::StructuralDebt)
            .map(|kind| (*kind, MetricState::new(*kind)))
            .collect();
        let mut debt = None;
        let mut cancelled = false;

        let classifier = self.context.classifier();
        let mut facts = Vec::new();

        for &kind in self.plan.kinds() {
            if self.cancel.is_cancelled() {
                warn!(next = %kind, "cancellation requested, skipping remaining drivers");
                cancelled = true;
                break;
            }

            if kind == CouplingKind::StructuralDebt {
                debt = Some(self.structural_debt(states.get(&CouplingKind::Package)));
                continue;
            }

            let (Some(driver), Some(state)) = (driver_for(kind), states.get_mut(&kind)) else {
                continue;
            };

            debug!(kind = %kind, "running metric driver");
            for entity in entities {
                facts.clear();
                driver.emit(entity, &self.context, &mut facts);
                for fact in &facts {
                    classifier.classify(
                        &fact.from,
                        &fact.to,
                        &fact.resolution,
                        &mut state.matrix,
                        &mut state.statistics,
                    );
                }
            }
            debug!(
                kind = %kind,
                edges = state.matrix.edge_count(),
                statistics = %state.statistics,
                "metric driver finished"
            );
        }

        let entity_names = self.context.namespace.top_level_entities();
        let whitelist = self.context.namespace.whitelist();
        let metrics = states
            .into_iter()
            .map(|(kind, state)| {
                let names = if kind == CouplingKind::Package {
                    let mut names = whitelist.clone();
                    names.extend(state.matrix.vertices());
                    names.sort();
                    names.dedup();
                    names
                } else {
                    entity_names.clone()
                };
                MetricReport {
                    kind,
                    names,
                    matrix: state.matrix.snapshot(),
                    statistics: state.statistics,
                }
            })
            .collect();

        PassReport {
            representation: self.representation,
            entities: entity_names,
            packages: whitelist,
            metrics,
            debt,
            skipped,
            cancelled,
        }
    }

    fn structural_debt(&self, package: Option<&MetricState>) -> DebtReport {
        let Some(package) = package else {
            warn!("structural debt requested without a package metric");
            return DebtReport::default();
        };
        let mut report = calculate_structural_debt(&package.matrix);
        report.statistics.copy_from(&package.statistics);
        info!(
            score = report.score,
            cycles = report.cycle_count,
            "structural debt computed"
        );
        report
    }
}

/// Keep a unit that validates, otherwise record why it was skipped.
fn keep_valid(
    validation: Result<()>,
    representation: Representation,
    label: impl FnOnce() -> String,
    skipped: &mut Vec<SkippedUnit>,
) -> bool {
    match validation {
        Ok(()) => true,
        Err(e) => {
            let unit = label();
            warn!(unit = %unit, error = %e, "skipping malformed {} unit", representation);
            skipped.push(SkippedUnit {
                representation,
                unit,
                reason: e.to_string(),
            });
            false
        }
    }
}

/// Register compiled modules and run `plan` over them.
pub fn run_compiled_pass(
    modules: &[CompiledModule],
    plan: &MetricPlan,
    config: &CouplingConfig,
    cancel: &CancelFlag,
) -> PassReport {
    let mut skipped = Vec::new();
    let valid: Vec<&CompiledModule> = modules
        .iter()
        .filter(|module| {
            keep_valid(
                module.validate(),
                Representation::Compiled,
                || module.name.clone(),
                &mut skipped,
            )
        })
        .collect();
    let names: Vec<String> = valid.iter().map(|module| module.qualified_name()).collect();

    let mut context = RunContext::new(&config.scope, &config.ignore);
    for (module, name) in valid.iter().zip(&names) {
        if module.kind.is_registered() {
            context.namespace.register_entity(name);
            context
                .namespace
                .add_to_whitelist(package_of(&normalize(name)));
        }
    }

    let entities: Vec<DeclaredEntity<'_>> = valid
        .iter()
        .zip(&names)
        .filter(|(module, _)| module.kind.is_visited())
        .map(|(module, name)| DeclaredEntity::Compiled {
            module,
            qualified_name: name,
        })
        .collect();

    AnalysisPass::new(Representation::Compiled, plan, context, cancel).run(&entities, skipped)
}

/// Register source declarations and run `plan` over them.
pub fn run_source_pass(
    units: &[SourceUnit],
    plan: &MetricPlan,
    config: &CouplingConfig,
    cancel: &CancelFlag,
) -> PassReport {
    let mut skipped = Vec::new();
    let valid: Vec<&SourceUnit> = units
        .iter()
        .filter(|unit| {
            keep_valid(
                unit.validate(),
                Representation::Source,
                || unit.display_name(),
                &mut skipped,
            )
        })
        .collect();

    let declared: Vec<(&SourceUnit, &crate::facts::SourceDeclaration, String)> = valid
        .iter()
        .flat_map(|unit| {
            unit.declarations
                .iter()
                .map(move |declaration| (*unit, declaration, unit.qualified_name(declaration)))
        })
        .collect();

    let mut context = RunContext::new(&config.scope, &config.ignore);
    for unit in valid.iter().filter(|unit| !unit.declarations.is_empty()) {
        context.namespace.add_to_whitelist(unit.package_name());
    }
    for (_, declaration, name) in &declared {
        if declaration.kind.is_registered() {
            context.namespace.register_entity(name);
        }
    }

    let entities: Vec<DeclaredEntity<'_>> = declared
        .iter()
        .filter(|(_, declaration, _)| declaration.kind.is_visited())
        .map(|(unit, declaration, name)| {
            DeclaredEntity::Source(SourceEntity {
                unit,
                declaration,
                qualified_name: name,
            })
        })
        .collect();

    AnalysisPass::new(Representation::Source, plan, context, cancel).run(&entities, skipped)
}
