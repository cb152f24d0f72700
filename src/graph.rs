//! A module for working with graphs.

use std::collections::{BTreeMap, HashMap, HashSet};

use itertools::Itertools;
use nalgebra::DMatrix;
use serde::{Serialize, Serializer};
use tracing::trace;

use crate::{
    attribute::{AttributeStore, Value, Values},
    edge::Edge,
    error::{Error, Result},
};

/// Position of a node in a graph's node order.
pub type NodeIndex = usize;

/// Position of an edge in a graph's edge order.
pub type EdgeIndex = usize;

/// The edge attribute whose presence on every edge makes a graph weighted.
pub const WEIGHT: &str = "weight";

/// Which collection an attribute operation applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    Node,
    Edge,
}

/// Selects the nodes or edges an attribute update applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    /// Every element, in the collection's order.
    All,
    /// Elements by position, in the given order.
    Indices(Vec<usize>),
    /// Nodes by name, in the given order. For edges, selects every edge incident to one of the
    /// named nodes, in edge order.
    Names(Vec<String>),
}

impl Selector {
    pub fn index(index: usize) -> Self {
        Self::Indices(vec![index])
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::Names(vec![name.into()])
    }

    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Names(names.into_iter().map(Into::into).collect())
    }
}

/// A graph of named nodes and the edges between them, with attributes on both.
///
/// Ordering is part of the contract: nodes are kept in insertion order and edges in construction
/// order, and every attribute column follows the same order. Rendering layers can rely on this
/// for reproducible layouts.
///
/// Parallel edges and self-loops are allowed until [`Graph::simplify`] is called.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    /// Applies to every edge in the graph.
    directed: bool,
    /// Node names, in insertion order.
    nodes: Vec<String>,
    /// A mapping of node names to their position in `nodes`.
    index: HashMap<String, NodeIndex>,
    /// Edges between node positions, in construction order.
    edges: Vec<Edge<NodeIndex>>,
    node_attributes: AttributeStore,
    edge_attributes: AttributeStore,
}

impl Graph {
    /// Creates an empty graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use netform::graph::Graph;
    ///
    /// let graph = Graph::new(false);
    /// assert!(!graph.is_directed());
    /// assert_eq!(graph.vertex_count(), 0);
    /// ```
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            ..Default::default()
        }
    }

    /// Assembles a graph from validated parts. Every edge endpoint must be a position in `nodes`
    /// and the names must be unique.
    pub(crate) fn from_parts(
        directed: bool,
        nodes: Vec<String>,
        edges: Vec<Edge<NodeIndex>>,
        node_attributes: AttributeStore,
        edge_attributes: AttributeStore,
    ) -> Self {
        debug_assert_eq!(nodes.len(), node_attributes.len());
        debug_assert_eq!(edges.len(), edge_attributes.len());

        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Self {
            directed,
            nodes,
            index,
            edges,
            node_attributes,
            edge_attributes,
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns whether every edge carries a `weight` attribute.
    ///
    /// # Examples
    ///
    /// ```
    /// use netform::graph::{Graph, Scope, Selector};
    ///
    /// let mut graph = Graph::new(false);
    /// graph.add_node("a");
    /// graph.add_node("b");
    /// graph.add_edge("a", "b").unwrap();
    /// assert!(!graph.is_weighted());
    ///
    /// graph.set_attribute(Scope::Edge, "weight", &Selector::All, 2.0).unwrap();
    /// assert!(graph.is_weighted());
    /// ```
    pub fn is_weighted(&self) -> bool {
        self.edge_attributes.is_complete(WEIGHT)
    }

    /// Returns the node count of the graph.
    pub fn vertex_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the edge count of the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the node names in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(String::as_str)
    }

    /// Returns the edges as `(source, target)` names, in construction order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.edges.iter().map(|edge| self.names(edge))
    }

    pub fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    pub fn node_name(&self, index: NodeIndex) -> Option<&str> {
        self.nodes.get(index).map(String::as_str)
    }

    /// Returns the endpoint names of the edge at `index`.
    pub fn edge(&self, index: EdgeIndex) -> Option<(&str, &str)> {
        self.edges.get(index).map(|edge| self.names(edge))
    }

    /// Checks if the graph contains an edge between two nodes, in either direction if the graph
    /// is undirected.
    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        let (Some(i), Some(j)) = (self.node_index(source), self.node_index(target)) else {
            return false;
        };
        let key = Edge::new(i, j).key(self.directed);

        self.edges.iter().any(|edge| edge.key(self.directed) == key)
    }

    /// Adds a node, or returns the existing node's index if the name is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use netform::graph::Graph;
    ///
    /// let mut graph = Graph::new(false);
    ///
    /// assert_eq!(graph.add_node("Kit"), 0);
    /// assert_eq!(graph.add_node("Ty"), 1);
    /// assert_eq!(graph.add_node("Kit"), 0);
    /// assert_eq!(graph.vertex_count(), 2);
    /// ```
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeIndex {
        let name = name.into();
        if let Some(&i) = self.index.get(&name) {
            return i;
        }

        let i = self.node_attributes.push_element();
        debug_assert_eq!(i, self.nodes.len());
        self.index.insert(name.clone(), i);
        self.nodes.push(name);

        i
    }

    /// Adds a node with attributes. If the node exists, the given attributes are updated and
    /// the others are left untouched.
    pub fn add_node_with<I, K, V>(
        &mut self,
        name: impl Into<String>,
        attributes: I,
    ) -> Result<NodeIndex>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let i = self.add_node(name);
        for (key, value) in attributes {
            self.node_attributes.set_one(key.as_ref(), i, value)?;
        }

        Ok(i)
    }

    /// Appends an edge between two existing nodes and returns its index.
    ///
    /// # Examples
    ///
    /// ```
    /// use netform::graph::Graph;
    ///
    /// let mut graph = Graph::new(false);
    /// graph.add_node("a");
    /// graph.add_node("b");
    ///
    /// assert_eq!(graph.add_edge("a", "b").unwrap(), 0);
    /// assert!(graph.add_edge("a", "c").is_err());
    /// ```
    pub fn add_edge(&mut self, source: &str, target: &str) -> Result<EdgeIndex> {
        let edge = Edge::new(self.require(source)?, self.require(target)?);

        let i = self.edge_attributes.push_element();
        self.edges.push(edge);

        Ok(i)
    }

    /// Appends an edge with attributes.
    pub fn add_edge_with<I, K, V>(
        &mut self,
        source: &str,
        target: &str,
        attributes: I,
    ) -> Result<EdgeIndex>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let i = self.add_edge(source, target)?;
        for (key, value) in attributes {
            self.edge_attributes.set_one(key.as_ref(), i, value)?;
        }

        Ok(i)
    }

    /// Removes the edge at `index` along with its attributes. Later edges shift down by one.
    pub fn remove_edge(&mut self, index: EdgeIndex) -> bool {
        if index >= self.edges.len() {
            return false;
        }

        self.edges.remove(index);
        self.edge_attributes.remove_element(index);

        true
    }

    /// Removes a node, its attributes and every edge incident to it. Later nodes shift down by
    /// one.
    ///
    /// # Examples
    ///
    /// ```
    /// use netform::pairs::build_from_edge_pairs;
    ///
    /// let mut graph = build_from_edge_pairs(&["a", "b", "b", "c"], false).unwrap();
    ///
    /// assert!(graph.remove_node("b"));
    /// assert!(!graph.remove_node("b"));
    /// assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["a", "c"]);
    /// assert_eq!(graph.edge_count(), 0);
    /// ```
    pub fn remove_node(&mut self, name: &str) -> bool {
        let Some(removed) = self.index.remove(name) else {
            return false;
        };

        let keep: Vec<bool> = self
            .edges
            .iter()
            .map(|edge| !edge.contains(&removed))
            .collect();
        self.retain_edges(&keep);

        for edge in &mut self.edges {
            *edge = edge.map(|i| if i > removed { i - 1 } else { i });
        }

        self.nodes.remove(removed);
        self.node_attributes.remove_element(removed);
        for name in &self.nodes[removed..] {
            if let Some(i) = self.index.get_mut(name) {
                *i -= 1;
            }
        }

        true
    }

    /// Returns the number of edge ends attached to a node. A self-loop counts twice.
    pub fn degree(&self, name: &str) -> Option<usize> {
        let i = self.node_index(name)?;

        Some(
            self.edges
                .iter()
                .map(|edge| usize::from(*edge.source() == i) + usize::from(*edge.target() == i))
                .sum(),
        )
    }

    /// Computes the density of the graph, the ratio of edges with respect to the maximum possible
    /// edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use netform::pairs::build_from_edge_pairs;
    ///
    /// let graph = build_from_edge_pairs(&["a", "b"], false).unwrap();
    /// assert_eq!(graph.density(), 1.0);
    ///
    /// let graph = build_from_edge_pairs(&["a", "b", "a", "c"], false).unwrap();
    /// assert_eq!(graph.density(), 2.0 / 3.0);
    /// ```
    pub fn density(&self) -> f64 {
        let vc = self.vertex_count() as f64;
        let ec = self.edge_count() as f64;

        // Calculate the total number of possible edges given a vertex count.
        let pec = if self.directed {
            vc * (vc - 1.0)
        } else {
            vc * (vc - 1.0) / 2.0
        };

        ec / pec
    }

    //
    // Attributes
    //

    /// Returns the attribute store for nodes or edges.
    pub fn attributes(&self, scope: Scope) -> &AttributeStore {
        match scope {
            Scope::Node => &self.node_attributes,
            Scope::Edge => &self.edge_attributes,
        }
    }

    /// Assigns attribute values to the selected nodes or edges, creating the attribute if it
    /// doesn't exist.
    ///
    /// A single value is broadcast to every selected element; a sequence is assigned one value
    /// per element in selection order. Nothing changes on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use netform::attribute::Value;
    /// use netform::graph::{Scope, Selector};
    /// use netform::pairs::build_from_edge_pairs;
    ///
    /// let mut graph = build_from_edge_pairs(&["Kit", "Ty", "Ty", "Viv"], false).unwrap();
    /// graph
    ///     .set_attribute(Scope::Node, "age", &Selector::All, vec![22, 21, 25])
    ///     .unwrap();
    ///
    /// assert_eq!(graph.node_attribute("Viv", "age"), Some(&Value::Int(25)));
    /// ```
    pub fn set_attribute(
        &mut self,
        scope: Scope,
        key: &str,
        selector: &Selector,
        values: impl Into<Values>,
    ) -> Result<()> {
        let indices = self.resolve(scope, selector)?;
        self.attributes_mut(scope).set(key, &indices, values)
    }

    /// Returns an attribute's values for every node or edge, in the collection's order. Elements
    /// without a value are `None`.
    pub fn get_attribute(&self, scope: Scope, key: &str) -> Option<&[Option<Value>]> {
        self.attributes(scope).get(key)
    }

    pub fn node_attribute(&self, name: &str, key: &str) -> Option<&Value> {
        self.node_attributes.get_one(key, self.node_index(name)?)
    }

    pub fn edge_attribute(&self, index: EdgeIndex, key: &str) -> Option<&Value> {
        self.edge_attributes.get_one(key, index)
    }

    pub fn has_attribute(&self, scope: Scope, key: &str) -> bool {
        self.attributes(scope).has(key)
    }

    /// Drops an attribute from every node or edge.
    pub fn remove_attribute(&mut self, scope: Scope, key: &str) -> bool {
        self.attributes_mut(scope).remove(key).is_some()
    }

    /// Clears the attribute value of a single node or edge.
    pub fn unset_attribute(&mut self, scope: Scope, key: &str, index: usize) -> Option<Value> {
        self.attributes_mut(scope).unset(key, index)
    }

    /// Renames an attribute, replacing any attribute already named `to`.
    pub fn rename_attribute(&mut self, scope: Scope, from: &str, to: &str) -> bool {
        self.attributes_mut(scope).rename(from, to)
    }

    //
    // Simplification
    //

    /// Returns whether the graph has no self-loops and no duplicate edges.
    pub fn is_simple(&self) -> bool {
        self.edges.iter().all(|edge| !edge.is_loop())
            && self.edges.iter().map(|edge| edge.key(self.directed)).all_unique()
    }

    /// Removes self-loops and duplicate edges, keeping the first occurrence of each edge along
    /// with its attributes. Returns the number of removed edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use netform::pairs::build_from_edge_pairs;
    ///
    /// let mut graph = build_from_edge_pairs(&["a", "b", "b", "a", "a", "a"], false).unwrap();
    ///
    /// assert_eq!(graph.simplify(), 2);
    /// assert_eq!(graph.simplify(), 0);
    /// assert!(graph.is_simple());
    /// ```
    pub fn simplify(&mut self) -> usize {
        let mut seen = HashSet::new();
        let keep: Vec<bool> = self
            .edges
            .iter()
            .map(|edge| !edge.is_loop() && seen.insert(edge.key(self.directed)))
            .collect();

        let removed = keep.iter().filter(|&&k| !k).count();
        if removed > 0 {
            self.retain_edges(&keep);
        }

        trace!(removed, edges = self.edge_count(), "simplified graph");

        removed
    }

    //
    // Matrices
    //

    /// Constructs the adjacency matrix for this graph, with rows and columns in node order.
    ///
    /// Entries hold edge weights if the graph is weighted and `1.0` per edge otherwise; parallel
    /// edges add up. Undirected graphs produce a symmetric matrix. A weighted graph whose `weight`
    /// values aren't all numeric fails with [`Error::NonNumericWeight`].
    ///
    /// # Examples
    ///
    /// ```
    /// use nalgebra::dmatrix;
    /// use netform::pairs::build_from_edge_pairs;
    ///
    /// let graph = build_from_edge_pairs(&["a", "b"], false).unwrap();
    /// assert_eq!(
    ///     graph.adjacency_matrix().unwrap(),
    ///     dmatrix![0.0, 1.0;
    ///              1.0, 0.0]
    /// );
    /// ```
    pub fn adjacency_matrix(&self) -> Result<DMatrix<f64>> {
        let n = self.vertex_count();
        let mut matrix = DMatrix::<f64>::zeros(n, n);
        let weighted = self.is_weighted();

        for (e, edge) in self.edges.iter().enumerate() {
            let weight = if weighted { self.weight(e)? } else { 1.0 };

            let (i, j) = (*edge.source(), *edge.target());
            matrix[(i, j)] += weight;

            // Both triangles are written for undirected edges, the diagonal only once.
            if !self.directed && i != j {
                matrix[(j, i)] += weight;
            }
        }

        Ok(matrix)
    }

    //
    // Private
    //

    fn weight(&self, edge: EdgeIndex) -> Result<f64> {
        match self.edge_attributes.get_one(WEIGHT, edge) {
            Some(value) => value.as_f64().ok_or_else(|| Error::NonNumericWeight {
                edge,
                value: value.to_string(),
            }),
            None => Err(Error::NonNumericWeight {
                edge,
                value: String::new(),
            }),
        }
    }

    fn names(&self, edge: &Edge<NodeIndex>) -> (&str, &str) {
        (
            self.nodes[*edge.source()].as_str(),
            self.nodes[*edge.target()].as_str(),
        )
    }

    fn require(&self, name: &str) -> Result<NodeIndex> {
        self.node_index(name).ok_or_else(|| Error::UnknownNodeReference {
            id: name.to_owned(),
        })
    }

    fn attributes_mut(&mut self, scope: Scope) -> &mut AttributeStore {
        match scope {
            Scope::Node => &mut self.node_attributes,
            Scope::Edge => &mut self.edge_attributes,
        }
    }

    /// Turns a selector into element positions for the given collection.
    fn resolve(&self, scope: Scope, selector: &Selector) -> Result<Vec<usize>> {
        let len = self.attributes(scope).len();

        match selector {
            Selector::All => Ok((0..len).collect()),
            Selector::Indices(indices) => match indices.iter().find(|&&i| i >= len) {
                Some(&index) => Err(Error::IndexOutOfRange { index, len }),
                None => Ok(indices.clone()),
            },
            Selector::Names(names) => {
                let nodes = names
                    .iter()
                    .map(|name| self.require(name))
                    .collect::<Result<Vec<_>>>()?;

                match scope {
                    Scope::Node => Ok(nodes),
                    Scope::Edge => Ok(self
                        .edges
                        .iter()
                        .positions(|edge| nodes.iter().any(|n| edge.contains(n)))
                        .collect()),
                }
            }
        }
    }

    /// Keeps the edges whose flag is `true`, together with their attributes.
    fn retain_edges(&mut self, keep: &[bool]) {
        debug_assert_eq!(keep.len(), self.edges.len());

        let mut flags = keep.iter();
        self.edges.retain(|_| flags.next().copied().unwrap_or(true));
        self.edge_attributes.retain(keep);
    }

    fn attribute_map(store: &AttributeStore, index: usize) -> BTreeMap<&str, &Value> {
        store
            .keys()
            .filter_map(|key| store.get_one(key, index).map(|value| (key, value)))
            .collect()
    }
}

//
// Trait implementations
//

#[derive(Serialize)]
struct NodeRecord<'a> {
    id: &'a str,
    attributes: BTreeMap<&'a str, &'a Value>,
}

#[derive(Serialize)]
struct EdgeRecord<'a> {
    source: &'a str,
    target: &'a str,
    attributes: BTreeMap<&'a str, &'a Value>,
}

#[derive(Serialize)]
struct GraphDocument<'a> {
    directed: bool,
    nodes: Vec<NodeRecord<'a>>,
    edges: Vec<EdgeRecord<'a>>,
}

/// Serializes to an interchange document: `directed`, then `nodes` and `edges` in graph order,
/// each with their set attributes.
impl Serialize for Graph {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, id)| NodeRecord {
                id,
                attributes: Self::attribute_map(&self.node_attributes, i),
            })
            .collect();

        let edges = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, edge)| {
                let (source, target) = self.names(edge);
                EdgeRecord {
                    source,
                    target,
                    attributes: Self::attribute_map(&self.edge_attributes, i),
                }
            })
            .collect();

        GraphDocument {
            directed: self.directed,
            nodes,
            edges,
        }
        .serialize(serializer)
    }
}
