//! Building graphs from adjacency matrices.

use std::collections::HashSet;

use itertools::Itertools;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    attribute::{AttributeStore, Value},
    edge::Edge,
    error::{Error, Result},
    graph::{Graph, NodeIndex, WEIGHT},
};

/// How the entries of an adjacency matrix are read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatrixMode {
    /// `m[i][j]` is an edge from `i` to `j`.
    Directed,
    /// `m[i][j]` and `m[j][i]` are the same edge, so the matrix must be symmetric.
    #[default]
    Undirected,
}

/// Configuration for building graphs from adjacency matrices.
///
/// # Examples
///
/// ```
/// use nalgebra::dmatrix;
/// use netform::matrix::{MatrixBuilder, MatrixMode};
///
/// let matrix = dmatrix![0.0, 2.0;
///                       0.0, 0.0];
/// let graph = MatrixBuilder::new(MatrixMode::Directed)
///     .weighted(true)
///     .build(&matrix, Some(&["a", "b"][..]))
///     .unwrap();
///
/// assert_eq!(graph.edges().collect::<Vec<_>>(), vec![("a", "b")]);
/// assert!(graph.is_weighted());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixBuilder {
    pub mode: MatrixMode,
    /// Copy each nonzero entry into a `weight` edge attribute.
    pub weighted: bool,
    /// Node count above which a warning about quadratic memory use is logged.
    pub large_matrix_warning: usize,
}

impl Default for MatrixBuilder {
    fn default() -> Self {
        Self {
            mode: MatrixMode::default(),
            weighted: false,
            large_matrix_warning: 1000,
        }
    }
}

impl MatrixBuilder {
    pub fn new(mode: MatrixMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Builds a graph from a square matrix.
    ///
    /// Nodes take the labels in row order, or `"1"` to `"n"` if no labels are given. In
    /// undirected mode one edge is created per nonzero entry above the diagonal, in increasing
    /// `(i, j)` order. In directed mode one edge is created per nonzero off-diagonal entry, row by
    /// row. Diagonal entries never produce edges.
    ///
    /// Every entry, the diagonal included, must be finite. A NaN or infinite entry fails with
    /// [`Error::NonFiniteEntry`] before symmetry is checked.
    pub fn build<S: AsRef<str>>(
        &self,
        matrix: &DMatrix<f64>,
        labels: Option<&[S]>,
    ) -> Result<Graph> {
        let n = matrix.nrows();
        if matrix.ncols() != n {
            return Err(Error::NonSquareMatrix {
                rows: n,
                cols: matrix.ncols(),
            });
        }

        let nodes: Vec<String> = match labels {
            Some(labels) => {
                if labels.len() != n {
                    return Err(Error::LabelCountMismatch {
                        expected: n,
                        got: labels.len(),
                    });
                }

                let mut seen = HashSet::new();
                if let Some(label) = labels
                    .iter()
                    .map(|label| label.as_ref())
                    .find(|label| !seen.insert(*label))
                {
                    return Err(Error::DuplicateNodeId {
                        id: label.to_owned(),
                    });
                }

                labels.iter().map(|label| label.as_ref().to_owned()).collect()
            }
            None => (1..=n).map(|i| i.to_string()).collect(),
        };

        if let Some((row, col)) = (0..n)
            .cartesian_product(0..n)
            .find(|&(i, j)| !matrix[(i, j)].is_finite())
        {
            return Err(Error::NonFiniteEntry { row, col });
        }

        if self.mode == MatrixMode::Undirected {
            if let Some((row, col)) = (0..n)
                .tuple_combinations()
                .find(|&(i, j)| matrix[(i, j)] != matrix[(j, i)])
            {
                return Err(Error::AsymmetricMatrix { row, col });
            }
        }

        if n > self.large_matrix_warning {
            warn!(
                nodes = n,
                "adjacency matrix input grows quadratically, prefer node and edge tables"
            );
        }

        let directed = self.mode == MatrixMode::Directed;
        let pairs: Vec<(NodeIndex, NodeIndex)> = if directed {
            (0..n)
                .cartesian_product(0..n)
                .filter(|&(i, j)| i != j && matrix[(i, j)] != 0.0)
                .collect()
        } else {
            (0..n)
                .tuple_combinations()
                .filter(|&(i, j)| matrix[(i, j)] != 0.0)
                .collect()
        };

        let mut edge_attributes = AttributeStore::new(pairs.len());
        if self.weighted {
            let weights: Vec<Value> = pairs
                .iter()
                .map(|&(i, j)| Value::Float(matrix[(i, j)]))
                .collect();
            let indices: Vec<usize> = (0..pairs.len()).collect();
            edge_attributes.set(WEIGHT, &indices, weights)?;
        }

        let edges = pairs.into_iter().map(Edge::from).collect();
        let node_attributes = AttributeStore::new(n);
        let graph = Graph::from_parts(directed, nodes, edges, node_attributes, edge_attributes);

        debug!(
            nodes = graph.vertex_count(),
            edges = graph.edge_count(),
            directed,
            "built graph from adjacency matrix"
        );

        Ok(graph)
    }

    /// Builds a graph from a matrix given as rows, see [`MatrixBuilder::build`].
    pub fn build_rows<S: AsRef<str>>(
        &self,
        rows: &[Vec<f64>],
        labels: Option<&[S]>,
    ) -> Result<Graph> {
        let n = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != n) {
            return Err(Error::NonSquareMatrix {
                rows: n,
                cols: row.len(),
            });
        }

        let matrix = DMatrix::from_fn(n, n, |i, j| rows[i][j]);
        self.build(&matrix, labels)
    }
}

/// Builds an unweighted graph from a square matrix using the default configuration for `mode`.
///
/// # Examples
///
/// ```
/// use nalgebra::dmatrix;
/// use netform::matrix::{build_from_matrix, MatrixMode};
///
/// let matrix = dmatrix![0.0, 1.0;
///                       1.0, 0.0];
/// let graph = build_from_matrix(&matrix, Some(&["a", "b"][..]), MatrixMode::Undirected).unwrap();
///
/// assert_eq!(graph.edge_count(), 1);
/// ```
pub fn build_from_matrix<S: AsRef<str>>(
    matrix: &DMatrix<f64>,
    labels: Option<&[S]>,
    mode: MatrixMode,
) -> Result<Graph> {
    MatrixBuilder::new(mode).build(matrix, labels)
}

#[cfg(test)]
mod tests {
    use nalgebra::dmatrix;

    use super::*;
    use crate::graph::Scope;

    const NO_LABELS: Option<&[&str]> = None;

    #[test]
    fn non_square() {
        let matrix = DMatrix::<f64>::zeros(2, 3);

        assert!(matches!(
            build_from_matrix(&matrix, NO_LABELS, MatrixMode::Directed),
            Err(Error::NonSquareMatrix { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn ragged_rows() {
        let rows = vec![vec![0.0, 1.0], vec![1.0]];

        assert!(matches!(
            MatrixBuilder::default().build_rows(&rows, NO_LABELS),
            Err(Error::NonSquareMatrix { rows: 2, cols: 1 })
        ));
    }

    #[test]
    fn asymmetric_undirected() {
        let matrix = dmatrix![0.0, 1.0, 0.0;
                              0.0, 0.0, 0.0;
                              0.0, 0.0, 0.0];

        assert!(matches!(
            build_from_matrix(&matrix, NO_LABELS, MatrixMode::Undirected),
            Err(Error::AsymmetricMatrix { row: 0, col: 1 })
        ));

        // The same matrix is fine when read as directed.
        let graph = build_from_matrix(&matrix, NO_LABELS, MatrixMode::Directed).unwrap();
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![("1", "2")]);
    }

    #[test]
    fn non_finite_entries() {
        let matrix = dmatrix![0.0, f64::NAN;
                              f64::NAN, 0.0];
        assert!(matches!(
            build_from_matrix(&matrix, NO_LABELS, MatrixMode::Undirected),
            Err(Error::NonFiniteEntry { row: 0, col: 1 })
        ));

        let matrix = dmatrix![0.0, 0.0;
                              0.0, f64::INFINITY];
        assert!(matches!(
            build_from_matrix(&matrix, NO_LABELS, MatrixMode::Directed),
            Err(Error::NonFiniteEntry { row: 1, col: 1 })
        ));
    }

    #[test]
    fn label_count_mismatch() {
        let matrix = DMatrix::<f64>::zeros(2, 2);

        assert!(matches!(
            build_from_matrix(&matrix, Some(&["a"][..]), MatrixMode::Undirected),
            Err(Error::LabelCountMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn duplicate_labels() {
        let matrix = DMatrix::<f64>::zeros(2, 2);

        assert!(matches!(
            build_from_matrix(&matrix, Some(&["a", "a"][..]), MatrixMode::Undirected),
            Err(Error::DuplicateNodeId { id }) if id == "a"
        ));
    }

    #[test]
    fn synthetic_labels() {
        let matrix = DMatrix::<f64>::zeros(3, 3);
        let graph = build_from_matrix(&matrix, NO_LABELS, MatrixMode::Undirected).unwrap();

        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn undirected_edge_order() {
        let matrix = dmatrix![0.0, 1.0, 1.0;
                              1.0, 0.0, 1.0;
                              1.0, 1.0, 1.0];
        let graph = build_from_matrix(&matrix, Some(&["a", "b", "c"][..]), MatrixMode::Undirected)
            .unwrap();

        // The diagonal entry of `c` is ignored.
        assert_eq!(
            graph.edges().collect::<Vec<_>>(),
            vec![("a", "b"), ("a", "c"), ("b", "c")]
        );
        assert!(!graph.is_directed());
    }

    #[test]
    fn directed_edge_order() {
        let matrix = dmatrix![0.0, 0.0, 1.0;
                              1.0, 0.0, 0.0;
                              0.0, 1.0, 0.0];
        let graph =
            build_from_matrix(&matrix, Some(&["a", "b", "c"][..]), MatrixMode::Directed).unwrap();

        assert_eq!(
            graph.edges().collect::<Vec<_>>(),
            vec![("a", "c"), ("b", "a"), ("c", "b")]
        );
        assert!(graph.is_directed());
    }

    #[test]
    fn weighted_entries() {
        let matrix = dmatrix![0.0, 3.0;
                              3.0, 0.0];

        let graph = MatrixBuilder::default()
            .weighted(true)
            .build(&matrix, NO_LABELS)
            .unwrap();
        assert!(graph.is_weighted());
        assert_eq!(graph.edge_attribute(0, WEIGHT), Some(&Value::Float(3.0)));
        assert_eq!(graph.adjacency_matrix().unwrap(), matrix);

        let graph = MatrixBuilder::default().build(&matrix, NO_LABELS).unwrap();
        assert!(!graph.is_weighted());
        assert!(!graph.has_attribute(Scope::Edge, WEIGHT));
    }

    #[test]
    fn config_from_json() {
        let builder: MatrixBuilder =
            serde_json::from_str(r#"{ "mode": "directed", "weighted": true }"#).unwrap();

        assert_eq!(builder.mode, MatrixMode::Directed);
        assert!(builder.weighted);
        assert_eq!(builder.large_matrix_warning, 1000);
    }
}
