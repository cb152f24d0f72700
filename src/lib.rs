//! Netform is a small toolkit for building attributed network graphs. A graph can be built from
//! one of three input shapes, which all produce the same canonical representation.
//!
//! # Basic usage
//!
//! The library is centered around the [`Graph`](graph::Graph) structure: a set of named nodes,
//! the edges between them and per-node and per-edge attributes. Graphs are built from:
//!
//! - a flat sequence of adjacent node pairs, see
//!   [`build_from_edge_pairs`](pairs::build_from_edge_pairs),
//! - a square adjacency matrix, see [`build_from_matrix`](matrix::build_from_matrix),
//! - a node table and an edge table, see [`build_from_tables`](table::build_from_tables).
//!
//! ```rust
//! use nalgebra::DMatrix;
//!
//! use netform::attribute::Value;
//! use netform::compare::edges_equal;
//! use netform::graph::{Scope, Selector};
//! use netform::matrix::{build_from_matrix, MatrixMode};
//! use netform::pairs::build_from_edge_pairs;
//!
//! let names = ["Kit", "Ty", "Viv", "Dee"];
//!
//! // A ring, written as adjacent pairs.
//! let mut ring = build_from_edge_pairs(
//!     &["Kit", "Ty", "Ty", "Viv", "Viv", "Dee", "Dee", "Kit"],
//!     false,
//! )
//! .unwrap();
//!
//! // The same ring as a symmetric adjacency matrix.
//! let n = names.len();
//! let matrix = DMatrix::from_fn(n, n, |i, j| {
//!     if (i + 1) % n == j || (j + 1) % n == i { 1.0 } else { 0.0 }
//! });
//! let from_matrix = build_from_matrix(&matrix, Some(&names[..]), MatrixMode::Undirected).unwrap();
//!
//! assert!(edges_equal(&ring, &from_matrix));
//!
//! // Attributes are assigned in node order.
//! ring.set_attribute(Scope::Node, "age", &Selector::All, vec![22, 21, 25, 26])
//!     .unwrap();
//! assert_eq!(ring.node_attribute("Viv", "age"), Some(&Value::Int(25)));
//! ```

pub mod attribute;
pub mod compare;
pub mod edge;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod pairs;
pub mod table;

pub use compare::edges_equal;
pub use error::{Error, Result};
pub use graph::Graph;
pub use matrix::build_from_matrix;
pub use pairs::build_from_edge_pairs;
pub use table::build_from_tables;
