//! Weighted adjacency matrix of accepted coupling edges.

use im::{OrdMap, OrdSet};
use serde::{Deserialize, Serialize};

type Row = OrdMap<String, u64>;

/// `from -> (to -> count)` for one coupling kind.
///
/// Only edges accepted by the classifier are recorded. Weights only grow
/// during a run and the matrix is emptied only by [`CouplingMatrix::clear`].
/// Self-loops are never stored.
#[derive(Debug, Clone, Default)]
pub struct CouplingMatrix {
    rows: OrdMap<String, Row>,
    endpoints: Option<OrdSet<String>>,
}

impl CouplingMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// A matrix that retains every endpoint it records.
    pub fn tracking_endpoints() -> Self {
        Self {
            rows: OrdMap::new(),
            endpoints: Some(OrdSet::new()),
        }
    }

    /// Increment the weight of `from -> to`.
    ///
    /// Returns `false` without touching the matrix when `from == to`.
    pub fn record(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return false;
        }

        match self.rows.get_mut(from) {
            Some(row) => {
                let weight = row.get(to).copied().unwrap_or(0);
                row.insert(to.to_string(), weight + 1);
            }
            None => {
                self.rows
                    .insert(from.to_string(), OrdMap::unit(to.to_string(), 1));
            }
        }

        if let Some(endpoints) = self.endpoints.as_mut() {
            endpoints.insert(from.to_string());
            endpoints.insert(to.to_string());
        }
        true
    }

    pub fn weight(&self, from: &str, to: &str) -> u64 {
        self.rows
            .get(from)
            .and_then(|row| row.get(to).copied())
            .unwrap_or(0)
    }

    /// Targets of `from` in name order.
    pub fn successors<'a>(&'a self, from: &str) -> impl Iterator<Item = (&'a str, u64)> + 'a {
        self.rows
            .get(from)
            .into_iter()
            .flat_map(|row| row.iter().map(|(to, weight)| (to.as_str(), *weight)))
    }

    pub fn edge_count(&self) -> usize {
        self.rows.values().map(|row| row.len()).sum()
    }

    pub fn total_weight(&self) -> u64 {
        self.rows.values().flat_map(|row| row.values()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Endpoints seen so far, when the matrix tracks them.
    pub fn endpoints(&self) -> Option<impl Iterator<Item = &str>> {
        self.endpoints
            .as_ref()
            .map(|set| set.iter().map(String::as_str))
    }

    /// Every name appearing as a source or a target, sorted.
    pub fn vertices(&self) -> Vec<String> {
        let mut names: OrdSet<String> = self.endpoints.clone().unwrap_or_default();
        for (from, row) in self.rows.iter() {
            names.insert(from.clone());
            for to in row.keys() {
                names.insert(to.clone());
            }
        }
        names.into_iter().collect()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        if let Some(endpoints) = self.endpoints.as_mut() {
            endpoints.clear();
        }
    }

    /// Read-only copy of the current state. Shares structure with the matrix.
    pub fn snapshot(&self) -> MatrixSnapshot {
        MatrixSnapshot {
            rows: self.rows.clone(),
        }
    }
}

/// Immutable view of a [`CouplingMatrix`] handed to reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatrixSnapshot {
    rows: OrdMap<String, Row>,
}

impl MatrixSnapshot {
    pub fn weight(&self, from: &str, to: &str) -> u64 {
        self.rows
            .get(from)
            .and_then(|row| row.get(to).copied())
            .unwrap_or(0)
    }

    /// All edges as `(from, to, weight)` in name order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.rows.iter().flat_map(|(from, row)| {
            row.iter()
                .map(move |(to, weight)| (from.as_str(), to.as_str(), *weight))
        })
    }

    /// Sum of the outgoing weights of `from`.
    pub fn out_weight(&self, from: &str) -> u64 {
        self.rows
            .get(from)
            .map(|row| row.values().sum())
            .unwrap_or(0)
    }

    /// Sum of the incoming weights of `to`.
    pub fn in_weight(&self, to: &str) -> u64 {
        self.rows
            .values()
            .filter_map(|row| row.get(to).copied())
            .sum()
    }

    pub fn edge_count(&self) -> usize {
        self.rows.values().map(|row| row.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
