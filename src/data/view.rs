use super::aggregate::{totals, Totals};
use super::error::{ExportError, ViewError};
use super::export::{export_csv, export_xlsx};
use super::filter::{apply, FilterKey, FilterState};
use super::financial::{classify, coerce_numeric, FinancialMarkers};
use super::format::{format_table, format_totals};
use super::model::Table;

/// Everything one render cycle shows for a filter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct DebtView {
    /// Display columns: descriptive columns first, then financial ones.
    pub column_order: Vec<String>,
    /// Financial columns, in dataset order.
    pub financial_columns: Vec<String>,
    /// Filtered rows restricted to `column_order`, financial cells formatted.
    pub rows: Table,
    /// Numeric totals over the filtered rows.
    pub totals: Totals,
    /// The totals as a single formatted row.
    pub totals_row: Table,
}

impl DebtView {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The displayed table as an xlsx workbook.
    pub fn export_xlsx(&self) -> Result<Vec<u8>, ExportError> {
        export_xlsx(&self.rows, &self.column_order)
    }

    pub fn export_csv(&self) -> Result<Vec<u8>, ExportError> {
        export_csv(&self.rows, &self.column_order)
    }
}

/// Descriptive filter columns present in `table`, followed by `financial`.
/// A name listed in `financial` is not repeated among the descriptive ones.
pub fn display_columns(table: &Table, financial: &[String]) -> Vec<String> {
    FilterKey::ALL
        .iter()
        .map(|key| key.column())
        .filter(|name| table.has_column(name) && !financial.iter().any(|f| f == name))
        .map(str::to_string)
        .chain(financial.iter().cloned())
        .collect()
}

/// Filter `table`, then coerce, total and format the surviving rows.
///
/// Financial columns are classified on the full table so the layout does not
/// shift with the selection. When no row survives the filters the cycle
/// stops with [`ViewError::EmptyResult`] and nothing is totalled.
pub fn build_view(
    table: &Table,
    selections: &FilterState,
    markers: &FinancialMarkers,
) -> Result<DebtView, ViewError> {
    let filtered = apply(table, selections);
    if filtered.is_empty() {
        log::info!("No rows match the current filters");
        return Err(ViewError::EmptyResult);
    }

    // A filter column stays descriptive even when a marker matches its name.
    let financial_columns: Vec<String> = classify(table, markers)
        .into_iter()
        .filter(|name| !FilterKey::ALL.iter().any(|key| key.column() == name))
        .collect();
    let numeric = coerce_numeric(&filtered, &financial_columns);
    let totals = totals(&numeric, &financial_columns);
    let column_order = display_columns(table, &financial_columns);
    let rows = format_table(&numeric, &financial_columns).project(&column_order);

    Ok(DebtView {
        totals_row: format_totals(&totals),
        column_order,
        financial_columns,
        rows,
        totals,
    })
}
