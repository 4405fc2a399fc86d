//! Decides, for every emitted dependency fact, whether it becomes a matrix
//! edge or only a statistic.

use crate::core::Resolution;
use crate::matrix::CouplingMatrix;
use crate::namespace::{normalize, Namespace};
use crate::stats::Statistics;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Resolved, but at least one endpoint is outside the whitelist
    OutOfScope,
    /// The driver already marked the target as outside the project
    NotProjectPart,
}

/// Outcome of classifying one fact. Endpoints are normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accept {
        from: String,
        to: String,
    },
    SelfConnection {
        entity: String,
    },
    Reject {
        from: String,
        to: String,
        reason: RejectReason,
    },
    Ignore,
    Error {
        message: String,
    },
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accept { .. })
    }

    fn tag(&self) -> &'static str {
        match self {
            Decision::Accept { .. } => "RESOLVED",
            Decision::SelfConnection { .. } => "SELF_CONNECTION",
            Decision::Reject {
                reason: RejectReason::OutOfScope,
                ..
            } => "FILTERED_OUT",
            Decision::Reject {
                reason: RejectReason::NotProjectPart,
                ..
            } => "NOT_PROJECT_PART",
            Decision::Ignore => "IGNORED",
            Decision::Error { .. } => "ERROR",
        }
    }
}

/// Classification rules bound to the namespace of the running pass.
#[derive(Debug, Clone, Copy)]
pub struct EdgeClassifier<'a> {
    namespace: &'a Namespace,
    count_self_connections: bool,
}

impl<'a> EdgeClassifier<'a> {
    pub fn new(namespace: &'a Namespace, count_self_connections: bool) -> Self {
        Self {
            namespace,
            count_self_connections,
        }
    }

    /// Pure decision for `from -> to` without touching any state.
    pub fn decide(&self, from: &str, to: &str, resolution: &Resolution) -> Decision {
        let from = normalize(from);
        let to = normalize(to);

        match resolution {
            Resolution::Error(reason) => Decision::Error {
                message: format!("{} => {} --> {}: {}", resolution.tag(), from, to, reason),
            },
            Resolution::SelfConnection => Decision::SelfConnection { entity: from },
            Resolution::Resolved if from == to => Decision::SelfConnection { entity: from },
            Resolution::NotProjectPart => Decision::Reject {
                from,
                to,
                reason: RejectReason::NotProjectPart,
            },
            Resolution::Ignored => Decision::Ignore,
            Resolution::Resolved => {
                if self.namespace.in_scope(&from) && self.namespace.in_scope(&to) {
                    Decision::Accept { from, to }
                } else {
                    Decision::Reject {
                        from,
                        to,
                        reason: RejectReason::OutOfScope,
                    }
                }
            }
        }
    }

    /// Decide and apply the decision to `matrix` and `stats`.
    pub fn classify(
        &self,
        from: &str,
        to: &str,
        resolution: &Resolution,
        matrix: &mut CouplingMatrix,
        stats: &mut Statistics,
    ) -> Decision {
        let decision = self.decide(from, to, resolution);
        self.apply(&decision, matrix, stats);
        decision
    }

    pub fn apply(&self, decision: &Decision, matrix: &mut CouplingMatrix, stats: &mut Statistics) {
        match decision {
            Decision::Accept { from, to } => {
                trace!("[{}]: {} --> {}", decision.tag(), from, to);
                matrix.record(from, to);
                stats.count_resolved();
            }
            Decision::SelfConnection { entity } => {
                trace!("[{}]: {}", decision.tag(), entity);
                if self.count_self_connections {
                    stats.count_self_connection();
                }
            }
            Decision::Reject { from, to, .. } => {
                trace!("[{}]: {} --> {}", decision.tag(), from, to);
                stats.count_out_of_scope();
            }
            Decision::Ignore => stats.count_ignored(),
            Decision::Error { message } => {
                trace!("[{}]: {}", decision.tag(), message);
                stats.count_error(message.clone());
            }
        }
    }
}
