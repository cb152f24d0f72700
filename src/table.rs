//! Building graphs from node and edge tables.
//!
//! This is the preferred construction path for anything beyond small graphs: it is linear in the
//! number of nodes and edges, where an adjacency matrix is quadratic in the number of nodes.

use std::{
    collections::{HashMap, HashSet},
    io::Read,
};

use tracing::debug;

use crate::{
    attribute::{AttributeStore, Value, Values},
    edge::Edge,
    error::{Error, Result},
    graph::{Graph, NodeIndex},
};

/// A table of named columns holding typed cells. A `None` cell is a missing value.
///
/// Each cell also keeps the text it was read from. Node identifiers are matched on that text, so
/// `007` and `7` stay distinct nodes even though both parse as the integer 7.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<Value>>>,
    text: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Creates an empty table with the given column names.
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for column in columns {
            let column = column.into();
            if table.columns.contains(&column) {
                return Err(Error::DuplicateColumn { name: column });
            }
            table.columns.push(column);
        }

        Ok(table)
    }

    /// Reads a headered CSV source, inferring each cell's type with [`Value::parse_cell`].
    ///
    /// # Examples
    ///
    /// ```
    /// use netform::attribute::Value;
    /// use netform::table::Table;
    ///
    /// let csv = "name,age\nKit,22\nTy,\n";
    /// let table = Table::from_csv_reader(csv.as_bytes()).unwrap();
    ///
    /// assert_eq!(table.columns(), &["name", "age"]);
    /// assert_eq!(
    ///     table.column("age").unwrap(),
    ///     vec![Some(&Value::Int(22)), None]
    /// );
    /// ```
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut table = Self::new(reader.headers()?.iter())?;
        for record in reader.records() {
            let record = record?;
            let row = record.iter().map(Value::parse_cell).collect();
            let text = record
                .iter()
                .map(|cell| (!cell.is_empty()).then(|| cell.to_owned()))
                .collect();
            table.push_cells(row, text)?;
        }

        Ok(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<Value>>] {
        &self.rows
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends a row, which must have one cell per column. The text of each cell is its
    /// [`Display`](std::fmt::Display) form.
    pub fn push_row(&mut self, row: Vec<Option<Value>>) -> Result<()> {
        let text = row
            .iter()
            .map(|cell| cell.as_ref().map(Value::to_string))
            .collect();

        self.push_cells(row, text)
    }

    /// Returns the cells of a column, top to bottom.
    pub fn column(&self, name: &str) -> Result<Vec<Option<&Value>>> {
        let i = self.position(name)?;

        Ok(self.rows.iter().map(|row| row[i].as_ref()).collect())
    }

    /// Renames a column, e.g. to give an edge column the name `weight`.
    ///
    /// # Examples
    ///
    /// ```
    /// use netform::table::Table;
    ///
    /// let mut table = Table::new(["from", "to", "lor"]).unwrap();
    /// table.rename_column("lor", "weight").unwrap();
    ///
    /// assert_eq!(table.columns(), &["from", "to", "weight"]);
    /// assert!(table.rename_column("lor", "weight").is_err());
    /// ```
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<()> {
        let i = self.position(from)?;
        if from != to && self.columns.iter().any(|column| column == to) {
            return Err(Error::DuplicateColumn {
                name: to.to_owned(),
            });
        }

        self.columns[i] = to.to_owned();

        Ok(())
    }

    /// Turns the string cells of a column into category labels.
    pub fn categorize(&mut self, name: &str) -> Result<()> {
        let i = self.position(name)?;

        for row in &mut self.rows {
            row[i] = match row[i].take() {
                Some(Value::Str(label)) => Some(Value::Category(label)),
                cell => cell,
            };
        }

        Ok(())
    }

    //
    // Private
    //

    fn push_cells(&mut self, row: Vec<Option<Value>>, text: Vec<Option<String>>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::RaggedRow {
                row: self.rows.len(),
                expected: self.columns.len(),
                got: row.len(),
            });
        }

        self.rows.push(row);
        self.text.push(text);

        Ok(())
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| Error::UnknownColumn {
                name: name.to_owned(),
            })
    }

    /// Copies every column after the first `skip` into attributes, one element per row.
    fn attributes(&self, skip: usize) -> Result<AttributeStore> {
        let mut store = AttributeStore::new(self.rows.len());

        for (c, key) in self.columns.iter().enumerate().skip(skip) {
            let (indices, values): (Vec<usize>, Vec<Value>) = self
                .rows
                .iter()
                .enumerate()
                .filter_map(|(r, row)| row[c].clone().map(|value| (r, value)))
                .unzip();

            // A column with no values still creates the attribute.
            store.set(key, &indices, Values::Many(values))?;
        }

        Ok(store)
    }
}

/// Builds a graph from a node table and an edge table.
///
/// The first node column holds unique node identifiers and the remaining columns become node
/// attributes. The first two edge columns hold the `from` and `to` identifiers and the remaining
/// columns become edge attributes. Nodes and edges keep table order. Identifiers are compared by
/// cell text, never by parsed value.
///
/// # Examples
///
/// ```
/// use netform::table::{build_from_tables, Table};
///
/// let nodes = Table::from_csv_reader("name,age\nKit,22\nTy,21\n".as_bytes()).unwrap();
/// let mut edges = Table::from_csv_reader("from,to,lor\nKit,Ty,3\n".as_bytes()).unwrap();
///
/// let graph = build_from_tables(&nodes, &edges, false).unwrap();
/// assert!(!graph.is_weighted());
///
/// edges.rename_column("lor", "weight").unwrap();
/// let graph = build_from_tables(&nodes, &edges, false).unwrap();
/// assert!(graph.is_weighted());
/// ```
pub fn build_from_tables(nodes: &Table, edges: &Table, directed: bool) -> Result<Graph> {
    if nodes.columns.is_empty() {
        return Err(Error::MissingColumns {
            table: "node",
            required: 1,
            found: 0,
        });
    }
    if edges.columns.len() < 2 {
        return Err(Error::MissingColumns {
            table: "edge",
            required: 2,
            found: edges.columns.len(),
        });
    }

    let mut names: Vec<String> = Vec::with_capacity(nodes.len());
    for (r, row) in nodes.text.iter().enumerate() {
        let id = row[0]
            .clone()
            .ok_or(Error::MissingNodeId { table: "node", row: r })?;
        names.push(id);
    }

    let mut seen = HashSet::with_capacity(names.len());
    if let Some(id) = names.iter().find(|name| !seen.insert(name.as_str())) {
        return Err(Error::DuplicateNodeId { id: id.clone() });
    }

    let index: HashMap<&str, NodeIndex> = names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let lookup = |r: usize, cell: &Option<String>| -> Result<NodeIndex> {
        let id = cell
            .as_deref()
            .ok_or(Error::MissingNodeId { table: "edge", row: r })?;

        index
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownNodeReference { id: id.to_owned() })
    };

    let edge_list = edges
        .text
        .iter()
        .enumerate()
        .map(|(r, row)| Ok(Edge::new(lookup(r, &row[0])?, lookup(r, &row[1])?)))
        .collect::<Result<Vec<_>>>()?;

    let node_attributes = nodes.attributes(1)?;
    let edge_attributes = edges.attributes(2)?;
    let graph = Graph::from_parts(directed, names, edge_list, node_attributes, edge_attributes);

    debug!(
        nodes = graph.vertex_count(),
        edges = graph.edge_count(),
        directed,
        "built graph from tables"
    );

    Ok(graph)
}
