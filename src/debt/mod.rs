//! Structural debt: a cost for every package cycle.
//!
//! Each cycle costs a fixed base plus the weight of every edge along it,
//! including the edge that closes the cycle. Heavier cycles are harder to
//! break, so they cost more.

pub mod cycles;

use crate::matrix::CouplingMatrix;
use crate::stats::Statistics;
use cycles::IndexedGraph;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed cost of every cycle, on top of its edge weights.
pub const CYCLE_BASE_COST: u64 = 10;

/// Ordered vertex sequence `v0 -> ... -> v_last -> v0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cycle {
    vertices: Vec<String>,
}

impl Cycle {
    pub fn new(vertices: Vec<String>) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[String] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Consecutive edges, closing edge last.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        let count = self.vertices.len();
        (0..count).map(move |i| {
            (
                self.vertices[i].as_str(),
                self.vertices[(i + 1) % count].as_str(),
            )
        })
    }

    /// `CYCLE_BASE_COST` plus the weight of every edge of the cycle.
    pub fn cost(&self, matrix: &CouplingMatrix) -> u64 {
        CYCLE_BASE_COST
            + self
                .edges()
                .map(|(from, to)| matrix.weight(from, to))
                .sum::<u64>()
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for vertex in &self.vertices {
            write!(f, "{vertex} -> ")?;
        }
        match self.vertices.first() {
            Some(first) => write!(f, "{first}"),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtReport {
    pub score: u64,
    pub cycle_count: usize,
    pub cycles: Vec<Cycle>,
    /// Copied from the package metric the score was derived from
    pub statistics: Statistics,
}

/// Structural debt of a completed package matrix.
pub fn calculate_structural_debt(package_matrix: &CouplingMatrix) -> DebtReport {
    let graph = IndexedGraph::from_matrix(package_matrix);
    let cycles: Vec<Cycle> = graph
        .find_cycles()
        .into_iter()
        .map(|indices| {
            Cycle::new(
                indices
                    .into_iter()
                    .map(|index| graph.name(index).to_string())
                    .collect(),
            )
        })
        .collect();

    let score = cycles.iter().map(|cycle| cycle.cost(package_matrix)).sum();

    DebtReport {
        score,
        cycle_count: cycles.len(),
        cycles,
        statistics: Statistics::default(),
    }
}
