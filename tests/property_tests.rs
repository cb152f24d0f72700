//! Property-based tests for graph construction.
//!
//! These tests verify invariants that should hold for any input:
//! - All three builders agree on the edges of equivalent inputs
//! - Attribute values read back as written
//! - The weighted predicate tracks the `weight` attribute
//! - Simplification is idempotent

use std::collections::BTreeSet;

use nalgebra::DMatrix;
use netform::{
    attribute::{Value, Values},
    compare::edges_equal,
    graph::{Scope, Selector, WEIGHT},
    matrix::MatrixMode,
    table::{build_from_tables, Table},
    build_from_edge_pairs, build_from_matrix, Error,
};
use proptest::prelude::*;

/// Generate a node count and a set of distinct node pairs `(i, j)` with `i < j`.
fn arb_simple_edges() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2usize..12).prop_flat_map(|n| {
        let pairs = prop::collection::btree_set((0..n, 0..n), 0..(n * 2))
            .prop_map(|set| {
                set.into_iter()
                    .filter(|(i, j)| i != j)
                    .map(|(i, j)| (i.min(j), i.max(j)))
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect::<Vec<_>>()
            });
        (Just(n), pairs)
    })
}

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("n{i}")).collect()
}

fn tokens(names: &[String], pairs: &[(usize, usize)]) -> Vec<String> {
    pairs
        .iter()
        .flat_map(|&(i, j)| [names[i].clone(), names[j].clone()])
        .collect()
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(Value::Str),
        any::<i64>().prop_map(Value::Int),
        (-1.0e6f64..1.0e6).prop_map(Value::Float),
        any::<bool>().prop_map(Value::Bool),
        "[a-z]{1,4}".prop_map(Value::Category),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn builders_agree((n, pairs) in arb_simple_edges()) {
        let names = names(n);

        let from_pairs = build_from_edge_pairs(&tokens(&names, &pairs), false).unwrap();

        let mut matrix = DMatrix::zeros(n, n);
        for &(i, j) in &pairs {
            matrix[(i, j)] = 1.0;
            matrix[(j, i)] = 1.0;
        }
        let from_matrix = build_from_matrix(&matrix, Some(&names[..]), MatrixMode::Undirected).unwrap();

        let mut nodes = Table::new(["name"]).unwrap();
        for name in &names {
            nodes.push_row(vec![Some(Value::Str(name.clone()))]).unwrap();
        }
        let mut edges = Table::new(["from", "to"]).unwrap();
        // Reverse the endpoints, undirected comparison must not care.
        for &(i, j) in &pairs {
            edges
                .push_row(vec![Some(Value::Str(names[j].clone())), Some(Value::Str(names[i].clone()))])
                .unwrap();
        }
        let from_tables = build_from_tables(&nodes, &edges, false).unwrap();

        prop_assert!(edges_equal(&from_pairs, &from_matrix));
        prop_assert!(edges_equal(&from_pairs, &from_tables));
        prop_assert!(edges_equal(&from_matrix, &from_tables));
        prop_assert_eq!(from_matrix.edge_count(), pairs.len());
    }

    #[test]
    fn directed_matrix_matches_pairs((n, pairs) in arb_simple_edges(), flip in any::<bool>()) {
        let names = names(n);
        let directed: Vec<(usize, usize)> = pairs
            .iter()
            .map(|&(i, j)| if flip { (j, i) } else { (i, j) })
            .collect();

        let mut matrix = DMatrix::zeros(n, n);
        for &(i, j) in &directed {
            matrix[(i, j)] = 1.0;
        }

        let from_pairs = build_from_edge_pairs(&tokens(&names, &directed), true).unwrap();
        let from_matrix = build_from_matrix(&matrix, Some(&names[..]), MatrixMode::Directed).unwrap();

        prop_assert!(edges_equal(&from_pairs, &from_matrix));
    }

    #[test]
    fn asymmetric_matrix_rejected(n in 2usize..8, i in 0usize..8, j in 0usize..8, value in 0.5f64..10.0) {
        let (i, j) = (i % n, j % n);
        prop_assume!(i != j);

        let mut matrix = DMatrix::zeros(n, n);
        matrix[(i, j)] = value;

        let result = build_from_matrix(&matrix, None::<&[&str]>, MatrixMode::Undirected);
        prop_assert!(
            matches!(result, Err(Error::AsymmetricMatrix { row, col }) if (row, col) == (i.min(j), i.max(j))),
            "expected asymmetric matrix"
        );
    }

    #[test]
    fn attribute_round_trip((n, pairs) in arb_simple_edges(), node in 0usize..12, value in arb_value()) {
        let names = names(n);
        let node = node % n;
        let mut graph = build_from_edge_pairs(&tokens(&names, &pairs), false).unwrap();
        let name = names[node].clone();
        graph.add_node(name.clone());

        graph
            .set_attribute(Scope::Node, "key", &Selector::name(name.clone()), Values::One(value.clone()))
            .unwrap();

        prop_assert_eq!(graph.node_attribute(&name, "key"), Some(&value));
    }

    #[test]
    fn weighted_predicate((n, pairs) in arb_simple_edges(), victim in 0usize..64) {
        prop_assume!(!pairs.is_empty());
        let mut graph = build_from_edge_pairs(&tokens(&names(n), &pairs), false).unwrap();
        prop_assert!(!graph.is_weighted());

        graph.set_attribute(Scope::Edge, WEIGHT, &Selector::All, 1.0).unwrap();
        prop_assert!(graph.is_weighted());

        graph.unset_attribute(Scope::Edge, WEIGHT, victim % pairs.len());
        prop_assert!(!graph.is_weighted());
    }

    #[test]
    fn simplify_idempotent(raw in prop::collection::vec((0usize..6, 0usize..6), 0..30), directed in any::<bool>()) {
        let names = names(6);
        let mut graph = build_from_edge_pairs(&tokens(&names, &raw), directed).unwrap();

        graph.simplify();
        let once: Vec<(String, String)> = graph
            .edges()
            .map(|(a, b)| (a.to_owned(), b.to_owned()))
            .collect();

        prop_assert_eq!(graph.simplify(), 0);
        let twice: Vec<(String, String)> = graph
            .edges()
            .map(|(a, b)| (a.to_owned(), b.to_owned()))
            .collect();

        prop_assert!(graph.is_simple());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn odd_token_count_rejected(len in 0usize..20) {
        let tokens: Vec<String> = (0..len * 2 + 1).map(|i| i.to_string()).collect();

        let result = build_from_edge_pairs(&tokens, false);
        prop_assert!(
            matches!(result, Err(Error::MalformedEdgeList { len }) if len == tokens.len()),
            "expected malformed edge list"
        );
    }
}
