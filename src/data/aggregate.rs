use super::model::Table;

/// Column totals, in the order the columns were requested.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Totals {
    entries: Vec<(String, f64)>,
}

impl Totals {
    pub fn get(&self, column: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, total)| (name.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sum each column's numeric cells. Missing cells are skipped, so a column
/// with nothing numeric totals exactly zero. Columns absent from the table
/// are left out.
pub fn totals(table: &Table, columns: &[String]) -> Totals {
    let entries = columns
        .iter()
        .filter_map(|name| {
            let column = table.column(name)?;
            // fold from +0.0: an empty f64 sum may start from -0.0
            let total = column
                .values
                .iter()
                .filter_map(|cell| cell.as_f64())
                .fold(0.0, |acc, v| acc + v);
            Some((name.clone(), total))
        })
        .collect();
    Totals { entries }
}
