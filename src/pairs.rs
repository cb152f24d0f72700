//! Building graphs from flat sequences of adjacent node pairs.

use std::collections::HashMap;

use itertools::Itertools;
use tracing::debug;

use crate::{
    attribute::AttributeStore,
    edge::Edge,
    error::{Error, Result},
    graph::{Graph, NodeIndex},
};

/// Builds a graph from a flat token sequence read as consecutive pairs: `(tokens[0], tokens[1])`,
/// `(tokens[2], tokens[3])`, ...
///
/// Nodes are created in first-occurrence order across the sequence and edges in pair order.
/// Nodes start without attributes.
///
/// # Examples
///
/// ```
/// use netform::pairs::build_from_edge_pairs;
///
/// let graph = build_from_edge_pairs(&["Ty", "Kit", "Kit", "Viv"], false).unwrap();
///
/// assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["Ty", "Kit", "Viv"]);
/// assert_eq!(graph.edges().collect::<Vec<_>>(), vec![("Ty", "Kit"), ("Kit", "Viv")]);
///
/// assert!(build_from_edge_pairs(&["Ty", "Kit", "Viv"], false).is_err());
/// ```
pub fn build_from_edge_pairs<S: AsRef<str>>(tokens: &[S], directed: bool) -> Result<Graph> {
    if tokens.len() % 2 != 0 {
        return Err(Error::MalformedEdgeList { len: tokens.len() });
    }

    let mut nodes: Vec<String> = Vec::new();
    let mut index: HashMap<&str, NodeIndex> = HashMap::new();
    let mut edges: Vec<Edge<NodeIndex>> = Vec::with_capacity(tokens.len() / 2);

    for (source, target) in tokens.iter().map(|token| token.as_ref()).tuples() {
        let source = intern(source, &mut index, &mut nodes);
        let target = intern(target, &mut index, &mut nodes);
        edges.push(Edge::new(source, target));
    }

    let node_attributes = AttributeStore::new(nodes.len());
    let edge_attributes = AttributeStore::new(edges.len());
    let graph = Graph::from_parts(directed, nodes, edges, node_attributes, edge_attributes);

    debug!(
        nodes = graph.vertex_count(),
        edges = graph.edge_count(),
        directed,
        "built graph from edge pairs"
    );

    Ok(graph)
}

/// Returns the position of `name`, appending it to `nodes` on first sighting.
fn intern<'a>(
    name: &'a str,
    index: &mut HashMap<&'a str, NodeIndex>,
    nodes: &mut Vec<String>,
) -> NodeIndex {
    *index.entry(name).or_insert_with(|| {
        nodes.push(name.to_owned());
        nodes.len() - 1
    })
}
