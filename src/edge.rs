//! A module for working with edges.

/// A pair of vertices representing a graph edge.
///
/// An edge is stored as written; whether `(a, b)` and `(b, a)` denote the same connection is a
/// property of the graph holding it, see [`Edge::key`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge<T> {
    source: T,
    target: T,
}

impl<T> Edge<T> {
    /// Creates a new edge from two vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use netform::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge.source(), &"a");
    /// ```
    pub fn new(source: T, target: T) -> Self {
        Self { source, target }
    }

    /// Returns the first vertex forming the edge, the `from` end in a directed graph.
    pub fn source(&self) -> &T {
        &self.source
    }

    /// Returns the second vertex forming the edge, the `to` end in a directed graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use netform::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge.target(), &"b");
    /// ```
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Returns whether the edge contains the given vertex.
    ///
    /// # Examples
    ///
    /// ```
    /// use netform::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    ///
    /// assert_eq!(edge.contains(&"a"), true);
    /// assert_eq!(edge.contains(&"b"), true);
    /// assert_eq!(edge.contains(&"c"), false);
    /// ```
    pub fn contains(&self, vertex: &T) -> bool
    where
        T: PartialEq,
    {
        self.source() == vertex || self.target() == vertex
    }

    /// Returns whether both ends of the edge are the same vertex.
    pub fn is_loop(&self) -> bool
    where
        T: PartialEq,
    {
        self.source == self.target
    }

    /// Maps both ends of the edge.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Edge<U> {
        Edge {
            source: f(self.source),
            target: f(self.target),
        }
    }

    /// Returns the comparison key of the edge.
    ///
    /// Directed edges keep their `(source, target)` order. Undirected edges are normalised to
    /// `(min, max)` so that `(a, b)` and `(b, a)` share a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use netform::edge::Edge;
    ///
    /// assert_eq!(Edge::new("b", "a").key(false), ("a", "b"));
    /// assert_eq!(Edge::new("b", "a").key(true), ("b", "a"));
    /// ```
    pub fn key(&self, directed: bool) -> (T, T)
    where
        T: Ord + Clone,
    {
        let (a, b) = (self.source.clone(), self.target.clone());

        if directed || a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl<T> From<(T, T)> for Edge<T> {
    fn from((source, target): (T, T)) -> Self {
        Self::new(source, target)
    }
}
