//! Error types for graph construction.

use thiserror::Error;

/// Errors raised while building or mutating a graph.
///
/// All of these are input validation failures, a builder returning one of them has not produced
/// a graph.
#[derive(Debug, Error)]
pub enum Error {
    /// The edge pair token sequence has an odd length.
    #[error("malformed edge list: {len} tokens can't be split into pairs")]
    MalformedEdgeList { len: usize },

    /// The adjacency matrix isn't square.
    #[error("adjacency matrix must be square, got {rows}x{cols}")]
    NonSquareMatrix { rows: usize, cols: usize },

    /// An undirected adjacency matrix has `m[row][col] != m[col][row]`.
    #[error("undirected adjacency matrix is asymmetric at ({row}, {col})")]
    AsymmetricMatrix { row: usize, col: usize },

    /// An adjacency matrix entry is NaN or infinite.
    #[error("adjacency matrix entry at ({row}, {col}) is not finite")]
    NonFiniteEntry { row: usize, col: usize },

    /// An edge's `weight` value isn't numeric.
    #[error("edge {edge} has a non-numeric weight: {value}")]
    NonNumericWeight { edge: usize, value: String },

    /// The number of matrix labels doesn't match the matrix dimension.
    #[error("expected {expected} labels, got {got}")]
    LabelCountMismatch { expected: usize, got: usize },

    /// An edge references a node that doesn't exist.
    #[error("unknown node reference: {id}")]
    UnknownNodeReference { id: String },

    /// A node identifier appears more than once in a node table.
    #[error("duplicate node id: {id}")]
    DuplicateNodeId { id: String },

    /// The number of attribute values doesn't match the number of selected elements.
    #[error("dimension mismatch: expected {expected} values, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A selector points past the end of a collection.
    #[error("index {index} out of range for {len} elements")]
    IndexOutOfRange { index: usize, len: usize },

    /// A table row has no node identifier where one is required.
    #[error("{table} table row {row} is missing a node id")]
    MissingNodeId { table: &'static str, row: usize },

    /// A named column doesn't exist in a table.
    #[error("unknown column: {name}")]
    UnknownColumn { name: String },

    /// A table already has a column with this name.
    #[error("duplicate column: {name}")]
    DuplicateColumn { name: String },

    /// A table doesn't have the columns a builder needs.
    #[error("{table} table needs at least {required} columns, found {found}")]
    MissingColumns {
        table: &'static str,
        required: usize,
        found: usize,
    },

    /// A table row has the wrong number of cells.
    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// Reading delimited text failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
