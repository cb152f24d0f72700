//! Structural comparison of graphs by their edges.

use itertools::Itertools;

use crate::{edge::Edge, graph::Graph};

/// Returns the graph's edges as endpoint names in canonical order.
///
/// Undirected edges are normalised to `(min, max)` by name, directed edges keep `(from, to)`.
/// The result is sorted lexicographically, so graphs built from different inputs can be compared
/// regardless of node or edge order. Parallel edges are kept.
///
/// # Examples
///
/// ```
/// use netform::compare::canonical_edges;
/// use netform::pairs::build_from_edge_pairs;
///
/// let graph = build_from_edge_pairs(&["c", "a", "b", "a"], false).unwrap();
/// assert_eq!(canonical_edges(&graph), vec![("a", "b"), ("a", "c")]);
/// ```
pub fn canonical_edges(graph: &Graph) -> Vec<(&str, &str)> {
    let directed = graph.is_directed();

    graph
        .edges()
        .map(|(source, target)| Edge::new(source, target).key(directed))
        .sorted_unstable()
        .collect()
}

/// Returns whether two graphs have identical canonical edge sequences. Attributes aren't
/// compared.
///
/// # Examples
///
/// ```
/// use nalgebra::dmatrix;
/// use netform::compare::edges_equal;
/// use netform::matrix::{build_from_matrix, MatrixMode};
/// use netform::pairs::build_from_edge_pairs;
///
/// let pairs = build_from_edge_pairs(&["b", "a"], false).unwrap();
/// let matrix = build_from_matrix(
///     &dmatrix![0.0, 1.0; 1.0, 0.0],
///     Some(&["a", "b"][..]),
///     MatrixMode::Undirected,
/// )
/// .unwrap();
///
/// assert!(edges_equal(&pairs, &matrix));
/// ```
pub fn edges_equal(a: &Graph, b: &Graph) -> bool {
    a.edge_count() == b.edge_count() && canonical_edges(a) == canonical_edges(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::{Scope, Selector},
        pairs::build_from_edge_pairs,
    };

    #[test]
    fn canonical_directed_keeps_direction() {
        let graph = build_from_edge_pairs(&["b", "a", "a", "c"], true).unwrap();

        assert_eq!(canonical_edges(&graph), vec![("a", "c"), ("b", "a")]);
    }

    #[test]
    fn order_independent() {
        let a = build_from_edge_pairs(&["a", "b", "b", "c"], false).unwrap();
        let b = build_from_edge_pairs(&["c", "b", "b", "a"], false).unwrap();

        assert!(edges_equal(&a, &b));
    }

    #[test]
    fn direction_matters_when_directed() {
        let a = build_from_edge_pairs(&["a", "b"], true).unwrap();
        let b = build_from_edge_pairs(&["b", "a"], true).unwrap();

        assert!(!edges_equal(&a, &b));
    }

    #[test]
    fn multiplicity_matters() {
        let a = build_from_edge_pairs(&["a", "b"], false).unwrap();
        let b = build_from_edge_pairs(&["a", "b", "b", "a"], false).unwrap();

        assert!(!edges_equal(&a, &b));
    }

    #[test]
    fn ignores_attributes_and_isolated_nodes() {
        let a = build_from_edge_pairs(&["a", "b"], false).unwrap();
        let mut b = build_from_edge_pairs(&["a", "b"], false).unwrap();
        b.add_node("z");
        b.set_attribute(Scope::Edge, "weight", &Selector::All, 2.0)
            .unwrap();

        assert!(edges_equal(&a, &b));
    }
}
