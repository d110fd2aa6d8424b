// ============================================================
// Layer 3 — Dataset Domain Type
// ============================================================
// An in-memory table loaded from one format's CSV file.
// Columns are stored column-major and typed per column;
// `None` marks a missing cell.

use serde::{Deserialize, Serialize};

/// The values of one column. A column is numeric only when every
/// non-missing cell parsed as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<Option<String>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v)     => v.len(),
            ColumnData::Categorical(v) => v.len(),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnData::Numeric(_)     => ColumnKind::Numeric,
            ColumnData::Categorical(_) => ColumnKind::Categorical,
        }
    }

    pub fn missing_count(&self) -> usize {
        match self {
            ColumnData::Numeric(v)     => v.iter().filter(|c| c.is_none()).count(),
            ColumnData::Categorical(v) => v.iter().filter(|c| c.is_none()).count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self { name: name.into(), data: ColumnData::Numeric(values) }
    }

    pub fn categorical(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self { name: name.into(), data: ColumnData::Categorical(values) }
    }
}

/// A table of equally long columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Where the table came from, kept for log and error messages
    pub source:  String,
    columns:     Vec<Column>,
    row_count:   usize,
}

impl Dataset {
    /// Build a dataset. All columns must share the same length;
    /// the loader guarantees this for parsed files.
    pub fn new(source: impl Into<String>, columns: Vec<Column>) -> Self {
        let row_count = columns.first().map(|c| c.data.len()).unwrap_or(0);
        debug_assert!(columns.iter().all(|c| c.data.len() == row_count));
        Self { source: source.into(), columns, row_count }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Consume the dataset, returning a copy with every column renamed by `f`
    pub fn map_column_names(self, f: impl Fn(&str) -> String) -> Self {
        let columns = self
            .columns
            .into_iter()
            .map(|c| Column { name: f(&c.name), data: c.data })
            .collect();
        Self { source: self.source, columns, row_count: self.row_count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_count_and_kind() {
        let num = Column::numeric("runs", vec![Some(1.0), None, Some(3.0)]);
        let cat = Column::categorical("team", vec![None, None, Some("IND".into())]);
        assert_eq!(num.data.missing_count(), 1);
        assert_eq!(cat.data.missing_count(), 2);
        assert_eq!(num.data.kind(), ColumnKind::Numeric);
        assert_eq!(cat.data.kind(), ColumnKind::Categorical);
    }

    #[test]
    fn test_lookup_by_name() {
        let ds = Dataset::new("mem", vec![Column::numeric("Mat", vec![Some(1.0)])]);
        assert!(ds.has_column("Mat"));
        assert!(!ds.has_column("mat"));
        assert_eq!(ds.row_count(), 1);
    }
}
