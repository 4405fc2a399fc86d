use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{CouplingKind, Representation};
use crate::debt::DebtReport;
use crate::facts::SkippedUnit;
use crate::matrix::MatrixSnapshot;
use crate::stats::Statistics;

/// Result of one coupling kind within one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricReport {
    pub kind: CouplingKind,
    /// Row and column names of the matrix, sorted
    pub names: Vec<String>,
    pub matrix: MatrixSnapshot,
    pub statistics: Statistics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    pub representation: Representation,
    /// Registered top-level project entities
    pub entities: Vec<String>,
    /// Whitelist the pass ran with
    pub packages: Vec<String>,
    pub metrics: Vec<MetricReport>,
    pub debt: Option<DebtReport>,
    pub skipped: Vec<SkippedUnit>,
    /// A cancellation request stopped the pass before its last driver
    #[serde(default)]
    pub cancelled: bool,
}

impl PassReport {
    pub fn metric(&self, kind: CouplingKind) -> Option<&MetricReport> {
        self.metrics.iter().find(|metric| metric.kind == kind)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub passes: Vec<PassReport>,
    /// Units dropped while decoding the input document
    pub skipped: Vec<SkippedUnit>,
}

impl AnalysisReport {
    pub fn pass(&self, representation: Representation) -> Option<&PassReport> {
        self.passes
            .iter()
            .find(|pass| pass.representation == representation)
    }

    /// Decoding and validation skips together.
    pub fn skipped_units(&self) -> impl Iterator<Item = &SkippedUnit> {
        self.skipped
            .iter()
            .chain(self.passes.iter().flat_map(|pass| pass.skipped.iter()))
    }
}
