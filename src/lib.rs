// Export modules for library usage
pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod debt;
pub mod facts;
pub mod io;
pub mod matrix;
pub mod metrics;
pub mod namespace;
pub mod stats;

// Re-export commonly used types
pub use crate::core::{
    CouplingKind, DeclarationKind, Error, Representation, Resolution, Result, ResultExt,
};

pub use crate::analysis::{
    AnalysisReport, CancelFlag, CompletionFlag, CouplingAnalyzer, MetricPlan, MetricReport,
    PassReport,
};

pub use crate::classifier::{Decision, EdgeClassifier, RejectReason};

pub use crate::config::{load_config, load_config_from, CouplingConfig, CONFIG_FILE_NAME};

pub use crate::debt::{calculate_structural_debt, Cycle, DebtReport, CYCLE_BASE_COST};

pub use crate::facts::{load_facts_file, parse_facts, AnalysisInput, CompiledModule, SourceUnit};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::matrix::{CouplingMatrix, MatrixSnapshot};

pub use crate::namespace::{normalize, package_of, Namespace, LAMBDA, NOT_PROJECT_PART};

pub use crate::stats::Statistics;
