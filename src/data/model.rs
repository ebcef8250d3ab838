use std::collections::HashSet;
use std::fmt;

use super::error::DataError;

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A loosely-typed cell value mirroring what spreadsheet readers hand back.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Dates are kept as text; nothing downstream does date arithmetic.
    Date(String),
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Numeric view of the cell. Text is not parsed here, see
    /// [`crate::data::financial::coerce_cell`] for that.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Trimmed string form used for filter matching and filter choices.
    pub fn key(&self) -> String {
        self.to_string().trim().to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) | CellValue::Date(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Spreadsheets store every number as a float; 2021.0 is a year.
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Empty => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Column – a named sequence of cells
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – ordered columns sharing a row index
// ---------------------------------------------------------------------------

/// An ordered set of uniquely named columns, all of the same length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Build a table, checking that names are unique and lengths agree.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, DataError> {
        let rows = columns.first().map_or(0, |c| c.values.len());
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(DataError::DuplicateColumn(column.name.clone()));
            }
            if column.values.len() != rows {
                return Err(DataError::RaggedColumn {
                    column: column.name.clone(),
                    expected: rows,
                    found: column.values.len(),
                });
            }
        }
        Ok(Table { columns, rows })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Keep only the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                values: indices.iter().map(|&i| c.values[i].clone()).collect(),
            })
            .collect();
        Table {
            columns,
            rows: indices.len(),
        }
    }

    /// Keep only the named columns, in the given order. Unknown names are
    /// skipped, and a repeated name keeps its first position.
    pub fn project(&self, names: &[String]) -> Table {
        let mut seen = HashSet::new();
        let columns = names
            .iter()
            .filter(|name| seen.insert(name.as_str()))
            .filter_map(|name| self.column(name).cloned())
            .collect();
        Table {
            columns,
            rows: self.rows,
        }
    }

    /// Rewrite every cell of one column. A missing column leaves the table
    /// untouched.
    pub fn map_column(mut self, name: &str, mut f: impl FnMut(&CellValue) -> CellValue) -> Table {
        if let Some(column) = self.columns.iter_mut().find(|c| c.name == name) {
            for cell in column.values.iter_mut() {
                *cell = f(cell);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::String(v.to_string())).collect()
    }

    #[test]
    fn integral_floats_display_without_fraction() {
        assert_eq!(CellValue::Float(2021.0).to_string(), "2021");
        assert_eq!(CellValue::Float(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::String("  abc ".into()).key(), "abc");
    }

    #[test]
    fn rejects_ragged_and_duplicate_columns() {
        let ragged = Table::from_columns(vec![
            Column::new("A", strings(&["1", "2"])),
            Column::new("B", strings(&["1"])),
        ]);
        assert!(matches!(ragged, Err(DataError::RaggedColumn { .. })));

        let dup = Table::from_columns(vec![
            Column::new("A", strings(&["1"])),
            Column::new("A", strings(&["2"])),
        ]);
        assert!(matches!(dup, Err(DataError::DuplicateColumn(name)) if name == "A"));
    }

    #[test]
    fn select_and_project_keep_order() {
        let table = Table::from_columns(vec![
            Column::new("A", strings(&["a0", "a1", "a2"])),
            Column::new("B", strings(&["b0", "b1", "b2"])),
        ])
        .unwrap();

        let picked = table.select_rows(&[2, 0]);
        assert_eq!(picked.len(), 2);
        assert_eq!(picked.column("A").unwrap().values, strings(&["a2", "a0"]));

        let projected = table.project(&["B".to_string(), "Z".to_string(), "A".to_string()]);
        assert_eq!(projected.column_names(), vec!["B", "A"]);
        assert_eq!(projected.len(), 3);
    }

    #[test]
    fn project_keeps_names_unique() {
        let table = Table::from_columns(vec![Column::new("A", strings(&["a0"]))]).unwrap();
        let projected = table.project(&["A".to_string(), "A".to_string()]);
        assert_eq!(projected.column_names(), vec!["A"]);
    }
}
