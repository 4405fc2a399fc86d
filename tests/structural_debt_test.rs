//! Structural debt over package matrices.

use couplingmap::{calculate_structural_debt, CouplingMatrix, CYCLE_BASE_COST};
use pretty_assertions::assert_eq;

fn matrix(edges: &[(&str, &str)]) -> CouplingMatrix {
    let mut matrix = CouplingMatrix::new();
    for (from, to) in edges {
        matrix.record(from, to);
    }
    matrix
}

#[test]
fn test_empty_matrix_has_no_debt() {
    let report = calculate_structural_debt(&CouplingMatrix::new());
    assert_eq!(report.score, 0);
    assert_eq!(report.cycle_count, 0);
    assert!(report.cycles.is_empty());
}

#[test]
fn test_acyclic_packages_have_no_debt() {
    let report = calculate_structural_debt(&matrix(&[("a", "b"), ("b", "c"), ("a", "c")]));
    assert_eq!(report.score, 0);
}

#[test]
fn test_two_package_cycle_costs_base_plus_both_edges() {
    let report = calculate_structural_debt(&matrix(&[("a", "b"), ("b", "a")]));

    assert_eq!(report.cycle_count, 1);
    assert_eq!(report.score, CYCLE_BASE_COST + 2);
    assert_eq!(report.cycles[0].to_string(), "a -> b -> a");
}

#[test]
fn test_heavier_edges_cost_more() {
    let report = calculate_structural_debt(&matrix(&[
        ("a", "b"),
        ("a", "b"),
        ("a", "b"),
        ("b", "a"),
    ]));
    assert_eq!(report.score, 10 + 3 + 1);
}

#[test]
fn test_triangle_includes_closing_edge() {
    let report = calculate_structural_debt(&matrix(&[("a", "b"), ("b", "c"), ("c", "a")]));

    assert_eq!(report.cycle_count, 1);
    assert_eq!(report.cycles[0].vertices(), ["a", "b", "c"]);
    assert_eq!(report.score, 13);
}

#[test]
fn test_cycles_sharing_a_package_are_scored_separately() {
    let report = calculate_structural_debt(&matrix(&[
        ("a", "b"),
        ("b", "a"),
        ("b", "c"),
        ("c", "b"),
    ]));

    let cycles: Vec<String> = report.cycles.iter().map(ToString::to_string).collect();
    assert_eq!(cycles, vec!["a -> b -> a", "b -> c -> b"]);
    assert_eq!(report.score, 24);
}

#[test]
fn test_debt_is_stable_across_runs() {
    let packages = matrix(&[("x", "y"), ("y", "z"), ("z", "x"), ("z", "y")]);
    let first = calculate_structural_debt(&packages);
    let second = calculate_structural_debt(&packages);
    assert_eq!(first, second);
}
