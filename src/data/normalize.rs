use std::collections::HashSet;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::model::Column;

/// Canonical form of a raw column header.
///
/// Decomposes accented letters and drops the marks, discards whatever is
/// still outside ASCII, turns line breaks into spaces, collapses whitespace
/// runs, trims and uppercases. Never fails; the result may be empty.
pub fn normalize_header(raw: &str) -> String {
    let ascii: String = raw
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .filter(char::is_ascii)
        .collect();

    ascii
        .split_ascii_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_uppercase()
}

/// Keep the first column of each name, drop later ones.
pub fn dedup_columns(columns: Vec<Column>) -> Vec<Column> {
    let mut seen = HashSet::new();
    columns
        .into_iter()
        .filter(|column| {
            let first = seen.insert(column.name.clone());
            if !first {
                log::debug!("Dropping duplicate column '{}'", column.name);
            }
            first
        })
        .collect()
}

/// Rename every column to its canonical header, then deduplicate.
///
/// A header that normalizes to nothing is named after its position
/// (`UNNAMED: 2`), so blank-header columns are kept apart.
pub fn normalize_columns(columns: Vec<Column>) -> Vec<Column> {
    let renamed = columns
        .into_iter()
        .enumerate()
        .map(|(idx, mut column)| {
            column.name = match normalize_header(&column.name) {
                name if name.is_empty() => format!("UNNAMED: {idx}"),
                name => name,
            };
            column
        })
        .collect();
    dedup_columns(renamed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    #[test]
    fn strips_accents_case_and_whitespace() {
        assert_eq!(normalize_header("Período"), "PERIODO");
        assert_eq!(normalize_header("  nombre  del\nacreedor "), "NOMBRE DEL ACREEDOR");
        assert_eq!(normalize_header("Principal\r\nReembolsado"), "PRINCIPAL REEMBOLSADO");
        assert_eq!(normalize_header("No. Préstamos"), "NO. PRESTAMOS");
        assert_eq!(normalize_header("SALDO+ATR"), "SALDO+ATR");
    }

    #[test]
    fn variants_collapse_to_same_name() {
        let variants = [
            "Tipo de Acreedor",
            "TIPO  DE ACREEDOR",
            "tipo de\nacreedor",
            " Típo de acreedor",
        ];
        for v in variants {
            assert_eq!(normalize_header(v), "TIPO DE ACREEDOR", "variant {v:?}");
        }
    }

    #[test]
    fn non_ascii_remainder_is_dropped() {
        assert_eq!(normalize_header("Saldo € final"), "SALDO FINAL");
        assert_eq!(normalize_header("中文"), "");
        assert_eq!(normalize_header(""), "");
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let columns = vec![
            Column::new("Periodo", vec![CellValue::Integer(1)]),
            Column::new("MES", vec![CellValue::Integer(2)]),
            Column::new("período", vec![CellValue::Integer(3)]),
        ];
        let normalized = normalize_columns(columns);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].name, "PERIODO");
        assert_eq!(normalized[0].values, vec![CellValue::Integer(1)]);
        assert_eq!(normalized[1].name, "MES");
    }

    #[test]
    fn blank_headers_get_positional_names() {
        let columns = vec![
            Column::new("PERIODO", vec![CellValue::Integer(2021)]),
            Column::new("", vec![CellValue::Integer(1)]),
            Column::new("  ", vec![CellValue::Integer(2)]),
            Column::new("Saldo Final", vec![CellValue::Float(3.0)]),
        ];
        let names: Vec<String> = normalize_columns(columns).into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["PERIODO", "UNNAMED: 1", "UNNAMED: 2", "SALDO FINAL"]);
    }
}
