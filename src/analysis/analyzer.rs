use std::thread::JoinHandle;

use chrono::Utc;
use tracing::{info, info_span};

use super::context::{CancelFlag, CompletionFlag};
use super::pass::{run_compiled_pass, run_source_pass};
use super::plan::MetricPlan;
use super::report::{AnalysisReport, PassReport};
use crate::config::{validate_config, CouplingConfig};
use crate::core::Result;
use crate::facts::{AnalysisInput, CompiledModule, SourceUnit};

/// Runs the compiled pass and then the source pass.
///
/// The two passes never share scope: each builds its own whitelist and
/// registered entity set from the units it analyzes.
#[derive(Debug, Clone)]
pub struct CouplingAnalyzer {
    config: CouplingConfig,
    compiled_plan: MetricPlan,
    source_plan: MetricPlan,
    completion: CompletionFlag,
    cancel: CancelFlag,
}

impl CouplingAnalyzer {
    /// Validate `config` and prepare the metric plans.
    pub fn new(config: CouplingConfig) -> Result<Self> {
        validate_config(&config)?;
        let derive = config.metrics.derive_package_for_debt;
        let compiled_plan = MetricPlan::new(&config.metrics.compiled, derive)?;
        let source_plan = MetricPlan::new(&config.metrics.source, derive)?;
        Ok(Self {
            config,
            compiled_plan,
            source_plan,
            completion: CompletionFlag::new(),
            cancel: CancelFlag::new(),
        })
    }

    pub fn config(&self) -> &CouplingConfig {
        &self.config
    }

    pub fn compiled_plan(&self) -> &MetricPlan {
        &self.compiled_plan
    }

    pub fn source_plan(&self) -> &MetricPlan {
        &self.source_plan
    }

    /// Flag an observer can poll; set when [`CouplingAnalyzer::analyze`] returns.
    pub fn completion_flag(&self) -> CompletionFlag {
        self.completion.clone()
    }

    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn analyze(&self, input: &AnalysisInput) -> AnalysisReport {
        self.completion.reset();
        let span = info_span!(
            "coupling_analysis",
            compiled = input.compiled.len(),
            source = input.source.len()
        );
        let _guard = span.enter();

        let mut passes = Vec::new();
        if !self.compiled_plan.is_empty() && !input.compiled.is_empty() {
            passes.push(self.analyze_compiled(&input.compiled));
        }
        if !self.cancel.is_cancelled() && !self.source_plan.is_empty() && !input.source.is_empty()
        {
            passes.push(self.analyze_source(&input.source));
        }

        let report = AnalysisReport {
            generated_at: Utc::now(),
            passes,
            skipped: input.skipped.clone(),
        };
        info!(passes = report.passes.len(), "coupling analysis finished");
        self.completion.mark_finished();
        report
    }

    pub fn analyze_compiled(&self, modules: &[CompiledModule]) -> PassReport {
        run_compiled_pass(modules, &self.compiled_plan, &self.config, &self.cancel)
    }

    pub fn analyze_source(&self, units: &[SourceUnit]) -> PassReport {
        run_source_pass(units, &self.source_plan, &self.config, &self.cancel)
    }

    /// Run [`CouplingAnalyzer::analyze`] on a worker thread.
    ///
    /// Take [`CouplingAnalyzer::completion_flag`] before calling this to
    /// observe the run.
    pub fn spawn(self, input: AnalysisInput) -> JoinHandle<AnalysisReport> {
        std::thread::spawn(move || self.analyze(&input))
    }
}
