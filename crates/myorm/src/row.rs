//! Insertion-ordered column/value mappings.
//!
//! `Row` is both the payload type for inserts and updates and the shape of
//! rows coming back from the driver. Column order is insertion order, which
//! keeps rendered column lists and returned rows deterministic.

use crate::value::Value;

/// An ordered mapping from column name to [`Value`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    entries: Vec<(String, Value)>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fluently set a column, replacing any existing value for it.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    /// Set a column in place, replacing any existing value for it.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        let column = column.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(c, _)| *c == column) {
            entry.1 = value;
        } else {
            self.entries.push((column, value));
        }
    }

    /// Look up a column's value.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    /// Remove a column, returning its value if present.
    pub fn remove(&mut self, column: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(c, _)| c == column)?;
        Some(self.entries.remove(idx).1)
    }

    /// Whether the row has a value for `column`.
    pub fn contains(&self, column: &str) -> bool {
        self.entries.iter().any(|(c, _)| c == column)
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    /// Iterate `(column, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (c, v) in iter {
            row.insert(c, v);
        }
        row
    }
}

/// Build a [`Row`] from literal pairs, preserving written order.
///
/// ```
/// use myorm::row;
///
/// let data = row! { "name" => "Alice", "age" => 30i64 };
/// assert_eq!(data.len(), 2);
/// ```
#[macro_export]
macro_rules! row {
    () => { $crate::Row::new() };
    ($($column:expr => $value:expr),+ $(,)?) => {{
        let mut row = $crate::Row::new();
        $(row.insert($column, $value);)+
        row
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let row = row! { "b" => 1i64, "a" => 2i64, "c" => 3i64 };
        let cols: Vec<_> = row.columns().collect();
        assert_eq!(cols, vec!["b", "a", "c"]);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut row = row! { "a" => 1i64, "b" => 2i64 };
        row.insert("a", 9i64);
        let cols: Vec<_> = row.columns().collect();
        assert_eq!(cols, vec!["a", "b"]);
        assert_eq!(row.get("a"), Some(&Value::Int(9)));
    }

    #[test]
    fn iter_yields_pairs_in_order() {
        let row = row! { "a" => 1i64, "b" => 2i64 };
        let pairs: Vec<_> = row.iter().collect();
        assert_eq!(pairs, vec![("a", &Value::Int(1)), ("b", &Value::Int(2))]);
    }

    #[test]
    fn remove_returns_value() {
        let mut row = row! { "id" => 5i64, "name" => "x" };
        assert_eq!(row.remove("id"), Some(Value::Int(5)));
        assert!(!row.contains("id"));
        assert_eq!(row.remove("id"), None);
    }
}
