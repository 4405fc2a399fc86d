//! Per-metric classification counters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tallies for one coupling kind within one analysis pass.
///
/// `resolved` counts every fact whose target was resolved symbolically,
/// whether or not it ended up in the matrix. Errors are assumed to be outside
/// the project, so they are also counted as out of scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total: u64,
    pub resolved: u64,
    pub errors: u64,
    pub out_of_scope: u64,
    pub self_connections: u64,
    pub ignored: u64,
    pub error_messages: Vec<String>,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepted edge.
    pub fn count_resolved(&mut self) {
        self.total += 1;
        self.resolved += 1;
    }

    pub fn count_error(&mut self, message: impl Into<String>) {
        self.total += 1;
        self.errors += 1;
        self.out_of_scope += 1;
        self.error_messages.push(message.into());
    }

    /// Resolved but rejected by the scope filter or marked as not part of the project.
    pub fn count_out_of_scope(&mut self) {
        self.total += 1;
        self.resolved += 1;
        self.out_of_scope += 1;
    }

    pub fn count_self_connection(&mut self) {
        self.total += 1;
        self.resolved += 1;
        self.self_connections += 1;
    }

    pub fn count_ignored(&mut self) {
        self.total += 1;
        self.ignored += 1;
    }

    /// Facts that stayed inside the project.
    pub fn project_part(&self) -> u64 {
        self.total.saturating_sub(self.out_of_scope)
    }

    /// `[total, resolved, errors, project part, self connections]`
    pub fn summary(&self) -> [u64; 5] {
        [
            self.total,
            self.resolved,
            self.errors,
            self.project_part(),
            self.self_connections,
        ]
    }

    /// Share of `part` in the total, truncated to two decimals.
    pub fn percent(&self, part: u64) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let ratio = part as f64 * 100.0 / self.total as f64;
        (ratio * 100.0).trunc() / 100.0
    }

    /// Replace these tallies with a copy of `other`.
    pub fn copy_from(&mut self, other: &Statistics) {
        self.clone_from(other);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[all={}, resolved={} ({}%), error={} ({}%), project_part={} ({}%), selfConnections={} ({}%)]",
            self.total,
            self.resolved,
            self.percent(self.resolved),
            self.errors,
            self.percent(self.errors),
            self.project_part(),
            self.percent(self.project_part()),
            self.self_connections,
            self.percent(self.self_connections),
        )?;
        if !self.error_messages.is_empty() {
            write!(f, "\nError messages ({}) :", self.error_messages.len())?;
            for message in &self.error_messages {
                write!(f, "\n{message}")?;
            }
        }
        Ok(())
    }
}
