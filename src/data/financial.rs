use serde::{Deserialize, Serialize};

use super::model::{CellValue, Table};
use super::normalize::normalize_header;

/// Name fragments that mark a column as monetary.
pub const DEFAULT_MARKERS: [&str; 16] = [
    "SALDO INICIAL",
    "DESEMBOLSOS",
    "PRINCIPAL REEMBOLSADO",
    "PRINCIPAL CANJEADO",
    "PRINCIPAL CONDONADO",
    "INTERESES PAGADOS",
    "INTERESES CONDONADOS",
    "INTERESES POR MORA",
    "INTERESES CANJEADOS",
    "COMISIONES PAGADAS",
    "COMISIONES CONDONADAS",
    "AJUSTE",
    "SALDO FINAL",
    "ATRASOS CAP",
    "ATRASOS INT",
    "SALDO+ATR",
];

/// The marker table used to classify financial columns.
///
/// Markers are stored in canonical header form, so a config file may spell
/// them with accents or lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FinancialMarkers(Vec<String>);

impl FinancialMarkers {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        FinancialMarkers(
            markers
                .into_iter()
                .map(|m| normalize_header(m.as_ref()))
                .filter(|m| !m.is_empty())
                .collect(),
        )
    }

    /// Whether a canonical column name contains any marker.
    pub fn matches(&self, column: &str) -> bool {
        self.0.iter().any(|marker| column.contains(marker.as_str()))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for FinancialMarkers {
    fn default() -> Self {
        FinancialMarkers::new(DEFAULT_MARKERS)
    }
}

impl From<Vec<String>> for FinancialMarkers {
    fn from(markers: Vec<String>) -> Self {
        FinancialMarkers::new(markers)
    }
}

impl From<FinancialMarkers> for Vec<String> {
    fn from(markers: FinancialMarkers) -> Self {
        markers.0
    }
}

/// Financial columns of `table`, in table order.
pub fn classify(table: &Table, markers: &FinancialMarkers) -> Vec<String> {
    table
        .columns()
        .iter()
        .filter(|c| markers.matches(&c.name))
        .map(|c| c.name.clone())
        .collect()
}

/// Parse a cell as a number. Blank, textual or non-finite content is `None`.
pub fn parse_number(cell: &CellValue) -> Option<f64> {
    let value = match cell {
        CellValue::Float(v) => *v,
        CellValue::Integer(i) => *i as f64,
        CellValue::Bool(b) => f64::from(u8::from(*b)),
        CellValue::String(s) => s.trim().parse::<f64>().ok()?,
        CellValue::Date(_) | CellValue::Empty => return None,
    };
    value.is_finite().then_some(value)
}

/// Numeric form of a cell: a float, or empty when it does not parse.
pub fn coerce_cell(cell: &CellValue) -> CellValue {
    parse_number(cell).map_or(CellValue::Empty, CellValue::Float)
}

/// Convert the given columns to numbers. Unparsable cells become missing;
/// this never fails.
pub fn coerce_numeric(table: &Table, columns: &[String]) -> Table {
    columns
        .iter()
        .fold(table.clone(), |acc, name| acc.map_column(name, coerce_cell))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    fn table() -> Table {
        Table::from_columns(vec![
            Column::new("PERIODO", vec![CellValue::Integer(2021), CellValue::Integer(2022)]),
            Column::new(
                "SALDO INICIAL USD",
                vec![CellValue::String(" 1500.25 ".into()), CellValue::String("s/d".into())],
            ),
            Column::new("NOMBRE DEL ACREEDOR", vec![CellValue::Empty, CellValue::Empty]),
            Column::new("SALDO+ATR", vec![CellValue::Float(10.0), CellValue::Empty]),
        ])
        .unwrap()
    }

    #[test]
    fn classify_by_substring_in_table_order() {
        let cols = classify(&table(), &FinancialMarkers::default());
        assert_eq!(cols, vec!["SALDO INICIAL USD", "SALDO+ATR"]);
    }

    #[test]
    fn markers_are_normalized() {
        let markers = FinancialMarkers::new(["período", "  "]);
        assert_eq!(markers.as_slice(), ["PERIODO"]);
        assert!(markers.matches("PERIODO FISCAL"));
    }

    #[test]
    fn coercion_tolerates_dirty_cells() {
        let t = table();
        let cols = classify(&t, &FinancialMarkers::default());
        let coerced = coerce_numeric(&t, &cols);
        assert_eq!(
            coerced.column("SALDO INICIAL USD").unwrap().values,
            vec![CellValue::Float(1500.25), CellValue::Empty]
        );
        assert_eq!(
            coerced.column("SALDO+ATR").unwrap().values,
            vec![CellValue::Float(10.0), CellValue::Empty]
        );
        // Non-financial columns are left alone.
        assert_eq!(coerced.column("PERIODO"), t.column("PERIODO"));
    }

    #[test]
    fn non_finite_text_is_missing() {
        assert_eq!(parse_number(&CellValue::String("NaN".into())), None);
        assert_eq!(parse_number(&CellValue::String("inf".into())), None);
        assert_eq!(parse_number(&CellValue::String("".into())), None);
        assert_eq!(parse_number(&CellValue::Date("2021-01-31".into())), None);
        assert_eq!(parse_number(&CellValue::Bool(true)), Some(1.0));
        assert_eq!(parse_number(&CellValue::String("-12e3".into())), Some(-12000.0));
    }
}
