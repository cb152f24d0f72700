//! A module for working with node and edge attributes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single attribute value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Free-form text.
    Str(String),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
    /// A label drawn from a small set of categories, e.g. a relationship type.
    Category(String),
}

impl Value {
    /// Creates a category label.
    pub fn category(label: impl Into<String>) -> Self {
        Self::Category(label.into())
    }

    /// Infers a typed value from a delimited text cell.
    ///
    /// Booleans are tried first, then integers, then floats; anything else is kept as a string.
    /// Empty cells are missing values.
    ///
    /// # Examples
    ///
    /// ```
    /// use netform::attribute::Value;
    ///
    /// assert_eq!(Value::parse_cell("22"), Some(Value::Int(22)));
    /// assert_eq!(Value::parse_cell("0.5"), Some(Value::Float(0.5)));
    /// assert_eq!(Value::parse_cell("TRUE"), Some(Value::Bool(true)));
    /// assert_eq!(Value::parse_cell("Kit"), Some(Value::Str("Kit".into())));
    /// assert_eq!(Value::parse_cell(" "), None);
    /// ```
    pub fn parse_cell(cell: &str) -> Option<Self> {
        let cell = cell.trim();
        if cell.is_empty() {
            return None;
        }

        match cell {
            "true" | "TRUE" | "True" => return Some(Self::Bool(true)),
            "false" | "FALSE" | "False" => return Some(Self::Bool(false)),
            _ => {}
        }

        if let Ok(int) = cell.parse::<i64>() {
            return Some(Self::Int(int));
        }

        // `f64::from_str` accepts "inf" and "nan", which are more likely to be names than numbers.
        let numeric = cell
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'));
        if numeric {
            if let Ok(float) = cell.parse::<f64>() {
                return Some(Self::Float(float));
            }
        }

        Some(Self::Str(cell.to_owned()))
    }

    /// Returns the value as a float if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the text of a string or category value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) | Self::Category(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) | Self::Category(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }

            impl From<$ty> for Values {
                fn from(value: $ty) -> Self {
                    Self::One(value.into())
                }
            }
        )*
    };
}

impl_from_primitive! {
    i64 => Int,
    i32 => Int,
    u32 => Int,
    f64 => Float,
    f32 => Float,
    bool => Bool,
    String => Str,
    &str => Str,
}

/// The values assigned by a single attribute update: either one value broadcast to every
/// selected element, or one value per selected element.
#[derive(Clone, Debug, PartialEq)]
pub enum Values {
    One(Value),
    Many(Vec<Value>),
}

impl From<Value> for Values {
    fn from(value: Value) -> Self {
        Self::One(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Values {
    fn from(values: Vec<T>) -> Self {
        Self::Many(values.into_iter().map(Into::into).collect())
    }
}

/// Column-oriented attribute storage for a collection of elements (the nodes or the edges of a
/// graph).
///
/// Each attribute key maps to one slot per element, aligned with the owning collection's order.
/// Keys are kept in the order they were first set. A slot is `None` until a value is assigned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeStore {
    len: usize,
    columns: Vec<(String, Vec<Option<Value>>)>,
}

impl AttributeStore {
    /// Creates a store for `len` elements with no attributes.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            columns: Vec::new(),
        }
    }

    /// Returns the number of elements the store covers.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the attribute keys in the order they were created.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(key, _)| key.as_str())
    }

    /// Returns whether the attribute exists for this collection.
    pub fn has(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Returns every element's value for `key`, in element order.
    pub fn get(&self, key: &str) -> Option<&[Option<Value>]> {
        self.position(key).map(|i| self.columns[i].1.as_slice())
    }

    /// Returns a single element's value for `key`.
    pub fn get_one(&self, key: &str, index: usize) -> Option<&Value> {
        self.get(key)?.get(index)?.as_ref()
    }

    /// Returns whether `key` exists and every element carries a value for it.
    pub fn is_complete(&self, key: &str) -> bool {
        self.get(key)
            .map_or(false, |column| column.iter().all(Option::is_some))
    }

    /// Assigns `values` to the elements at `indices` (in that order), creating the attribute if
    /// it doesn't exist yet.
    ///
    /// Nothing is written unless every index is in range and the value count matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use netform::attribute::{AttributeStore, Value};
    ///
    /// let mut store = AttributeStore::new(3);
    /// store.set("age", &[0, 2], vec![22, 25]).unwrap();
    ///
    /// assert_eq!(store.get_one("age", 2), Some(&Value::Int(25)));
    /// assert_eq!(store.get_one("age", 1), None);
    /// assert!(store.set("age", &[0, 1], vec![1]).is_err());
    /// ```
    pub fn set(&mut self, key: &str, indices: &[usize], values: impl Into<Values>) -> Result<()> {
        if let Some(&index) = indices.iter().find(|&&i| i >= self.len) {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        let values = match values.into() {
            Values::One(value) => vec![value; indices.len()],
            Values::Many(values) => {
                if values.len() != indices.len() {
                    return Err(Error::DimensionMismatch {
                        expected: indices.len(),
                        got: values.len(),
                    });
                }
                values
            }
        };

        let column = self.column_mut(key);
        for (&index, value) in indices.iter().zip(values) {
            column[index] = Some(value);
        }

        Ok(())
    }

    /// Assigns a value to a single element.
    pub fn set_one(&mut self, key: &str, index: usize, value: impl Into<Value>) -> Result<()> {
        self.set(key, &[index], Values::One(value.into()))
    }

    /// Drops an attribute from every element, returning its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<Option<Value>>> {
        self.position(key).map(|i| self.columns.remove(i).1)
    }

    /// Clears a single element's value, leaving the attribute in place for the others.
    pub fn unset(&mut self, key: &str, index: usize) -> Option<Value> {
        let i = self.position(key)?;
        self.columns[i].1.get_mut(index)?.take()
    }

    /// Renames an attribute. An existing attribute named `to` is replaced.
    ///
    /// Returns `false` if there is no attribute named `from`.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        if from == to {
            return self.has(from);
        }

        let Some(i) = self.position(from) else {
            return false;
        };
        self.columns[i].0 = to.to_owned();

        if let Some(j) = self
            .columns
            .iter()
            .enumerate()
            .position(|(j, (key, _))| j != i && key == to)
        {
            self.columns.remove(j);
        }

        true
    }

    /// Appends an element with no values and returns its index.
    pub fn push_element(&mut self) -> usize {
        for (_, column) in &mut self.columns {
            column.push(None);
        }
        self.len += 1;

        self.len - 1
    }

    /// Removes an element's slot from every attribute, shifting later elements down.
    pub fn remove_element(&mut self, index: usize) {
        if index >= self.len {
            return;
        }

        for (_, column) in &mut self.columns {
            column.remove(index);
        }
        self.len -= 1;
    }

    /// Keeps the elements whose flag is `true`. `keep` must cover every element.
    pub fn retain(&mut self, keep: &[bool]) {
        debug_assert_eq!(keep.len(), self.len);

        for (_, column) in &mut self.columns {
            let mut flags = keep.iter();
            column.retain(|_| flags.next().copied().unwrap_or(true));
        }
        self.len = keep.iter().filter(|&&k| k).count();
    }

    //
    // Private
    //

    fn position(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|(k, _)| k == key)
    }

    fn column_mut(&mut self, key: &str) -> &mut Vec<Option<Value>> {
        let i = match self.position(key) {
            Some(i) => i,
            None => {
                self.columns.push((key.to_owned(), vec![None; self.len]));
                self.columns.len() - 1
            }
        };

        &mut self.columns[i].1
    }
}
