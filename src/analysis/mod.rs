//! Run orchestration.
//!
//! - `plan`: which coupling kinds run, in priority order
//! - `context`: whitelist, registered entities and run flags of one pass
//! - `pass`: drivers over the entities of one representation
//! - `analyzer`: compiled pass, then source pass

pub mod analyzer;
pub mod context;
pub mod pass;
pub mod plan;
pub mod report;

pub use analyzer::CouplingAnalyzer;
pub use context::{CancelFlag, CompletionFlag, RunContext};
pub use pass::{run_compiled_pass, run_source_pass, AnalysisPass};
pub use plan::MetricPlan;
pub use report::{AnalysisReport, MetricReport, PassReport};
