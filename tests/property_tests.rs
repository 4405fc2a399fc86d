//! Invariants of classification and replay that must hold for any input.

use couplingmap::facts::{AnalysisInput, CompiledModule, Invocation, Opcode};
use couplingmap::{
    normalize, CouplingAnalyzer, CouplingConfig, CouplingMatrix, EdgeClassifier, Namespace,
    Resolution, Statistics,
};
use proptest::prelude::*;

fn type_name() -> impl Strategy<Value = String> {
    ("[a-c]", "[A-C][a-z]{0,3}", prop::option::of("[A-Z0-9][a-z]{0,2}")).prop_map(
        |(package, class, nested)| match nested {
            Some(inner) => format!("{package}.{class}${inner}"),
            None => format!("{package}.{class}"),
        },
    )
}

fn resolution() -> impl Strategy<Value = Resolution> {
    prop_oneof![
        4 => Just(Resolution::Resolved),
        1 => Just(Resolution::NotProjectPart),
        1 => Just(Resolution::Ignored),
        1 => Just(Resolution::SelfConnection),
        1 => "[a-z ]{1,10}".prop_map(Resolution::Error),
    ]
}

fn modules(edges: &[(String, String)]) -> Vec<CompiledModule> {
    let mut names: Vec<String> = edges
        .iter()
        .flat_map(|(from, to)| [normalize(from), normalize(to)])
        .collect();
    names.sort();
    names.dedup();

    names
        .iter()
        .map(|name| {
            let mut module = CompiledModule::new(name.replace('.', "/"));
            module.invocations = edges
                .iter()
                .filter(|(from, _)| normalize(from) == *name)
                .map(|(_, to)| Invocation {
                    opcode: Opcode::InvokeVirtual,
                    owner: to.replace('.', "/"),
                    method: "run".into(),
                })
                .collect();
            module
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_matrix_never_holds_self_loops_or_nested_names(
        facts in prop::collection::vec((type_name(), type_name(), resolution()), 0..40)
    ) {
        let mut namespace = Namespace::with_whitelist(["a", "b", "c"]);
        for (from, to, _) in &facts {
            namespace.register_entity(from);
            namespace.register_entity(to);
        }
        let classifier = EdgeClassifier::new(&namespace, true);
        let mut matrix = CouplingMatrix::new();
        let mut stats = Statistics::new();

        for (from, to, resolution) in &facts {
            classifier.classify(from, to, resolution, &mut matrix, &mut stats);
        }

        prop_assert_eq!(stats.total, facts.len() as u64);
        let accepted =
            stats.resolved + stats.errors - stats.out_of_scope - stats.self_connections;
        prop_assert_eq!(matrix.total_weight(), accepted);
        for vertex in matrix.vertices() {
            prop_assert!(!vertex.contains('$'));
            prop_assert_eq!(matrix.weight(&vertex, &vertex), 0);
        }
    }

    #[test]
    fn prop_replaying_input_doubles_weights(
        edges in prop::collection::vec((type_name(), type_name()), 1..20)
    ) {
        let analyzer = CouplingAnalyzer::new(CouplingConfig::default()).unwrap();
        let single = modules(&edges);
        let mut doubled = single.clone();
        doubled.extend(single.iter().cloned());

        let once = analyzer.analyze(&AnalysisInput::new(single, Vec::new()));
        let twice = analyzer.analyze(&AnalysisInput::new(doubled, Vec::new()));

        for (first, second) in once.passes.iter().zip(&twice.passes) {
            for metric in &first.metrics {
                let replayed = second.metric(metric.kind).unwrap();
                for (from, to, weight) in metric.matrix.edges() {
                    prop_assert_eq!(replayed.matrix.weight(from, to), weight * 2);
                }
                prop_assert_eq!(replayed.statistics.total, metric.statistics.total * 2);
            }
        }
    }
}
