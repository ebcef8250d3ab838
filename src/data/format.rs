use super::aggregate::Totals;
use super::model::{CellValue, Column, Table};

/// Two decimals with comma thousands grouping: `1234567.5` → `"1,234,567.50"`.
///
/// Missing values, and non-finite ones, render as an empty string.
pub fn format_number(value: Option<f64>) -> String {
    let Some(v) = value.filter(|v| v.is_finite()) else {
        return String::new();
    };
    let fixed = format!("{v:.2}");
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));
    format!("{sign}{}.{frac_part}", group_thousands(int_part))
}

/// Row counts for the results banner: `12345` → `"12,345"`.
pub fn format_count(n: usize) -> String {
    group_thousands(&n.to_string())
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Replace the given (already coerced) columns with their display strings.
pub fn format_table(table: &Table, columns: &[String]) -> Table {
    columns.iter().fold(table.clone(), |acc, name| {
        acc.map_column(name, |cell| CellValue::String(format_number(cell.as_f64())))
    })
}

/// The totals as a single display row, formatted like the table cells.
pub fn format_totals(totals: &Totals) -> Table {
    let columns = totals
        .iter()
        .map(|(name, total)| {
            Column::new(name, vec![CellValue::String(format_number(Some(total)))])
        })
        .collect();
    // Totals carry one entry per distinct column, so this cannot fail.
    Table::from_columns(columns).unwrap_or_default()
}
