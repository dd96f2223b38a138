// ---------------------------------------------------------------------------
// Column – one numeric series of the source file
// ---------------------------------------------------------------------------

/// A single named numeric column. Sample index doubles as the time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    /// Samples in file row order; never empty once a table is built.
    pub values: Vec<f64>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column holds no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ColumnTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All columns of a loaded file, in header order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnTable {
    columns: Vec<Column>,
}

impl ColumnTable {
    /// Build a table, dropping columns that ended up with no samples.
    pub fn from_columns(columns: Vec<Column>) -> Self {
        ColumnTable {
            columns: columns.into_iter().filter(|c| !c.is_empty()).collect(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Column names in header order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Length of the longest column, i.e. the number of rows on export.
    pub fn max_len(&self) -> usize {
        self.columns.iter().map(Column::len).max().unwrap_or(0)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_columns_are_dropped() {
        let table = ColumnTable::from_columns(vec![
            Column::new("a", vec![1.0, 2.0]),
            Column::new("b", vec![]),
            Column::new("c", vec![3.0]),
        ]);
        assert_eq!(table.column_names(), vec!["a", "c"]);
        assert_eq!(table.max_len(), 2);
    }

    #[test]
    fn lookup_by_name() {
        let table = ColumnTable::from_columns(vec![
            Column::new("temp", vec![20.5]),
            Column::new("load", vec![0.1, 0.2, 0.3]),
        ]);
        assert_eq!(table.get("load").map(Column::len), Some(3));
        assert!(table.get("missing").is_none());
    }
}
