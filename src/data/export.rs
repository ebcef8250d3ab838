//! Serialize a filtered table slice into a downloadable file, in memory.

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use super::error::ExportError;
use super::model::{CellValue, Column, Table};

/// Suggested file name for the spreadsheet download.
pub const EXPORT_FILE_NAME: &str = "deuda_filtrada.xlsx";

/// Worksheet name inside the exported workbook.
pub const EXPORT_SHEET_NAME: &str = "Deuda_Filtrada";

// Excel worksheet limits, header row included.
const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;

/// Write `table` to a single-sheet xlsx workbook and return its bytes.
///
/// `column_order` is the left-to-right layout; every name must exist in the
/// table. The first row holds the column names in bold, there is no index
/// column. Blank cells are left unwritten.
pub fn export_xlsx(table: &Table, column_order: &[String]) -> Result<Vec<u8>, ExportError> {
    let columns = resolve_columns(table, column_order)?;
    if table.len() + 1 > MAX_ROWS || columns.len() > MAX_COLUMNS {
        return Err(ExportError::TooLarge {
            rows: table.len(),
            columns: columns.len(),
        });
    }

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet().set_name(EXPORT_SHEET_NAME)?;

    for (col_idx, column) in columns.iter().enumerate() {
        // Bounded by MAX_COLUMNS above.
        let col = col_idx as u16;
        worksheet.write_string_with_format(0, col, column.name.as_str(), &header_format)?;
        for (row_idx, cell) in column.values.iter().enumerate() {
            write_cell(worksheet, row_idx as u32 + 1, col, cell).map_err(|reason| {
                ExportError::Unencodable {
                    column: column.name.clone(),
                    row: row_idx,
                    reason,
                }
            })?;
        }
    }
    worksheet.autofit();

    let bytes = workbook.save_to_buffer()?;
    log::info!(
        "Exported {} rows x {} columns ({} bytes)",
        table.len(),
        columns.len(),
        bytes.len()
    );
    Ok(bytes)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
) -> Result<(), String> {
    let written = match cell {
        CellValue::Empty => return Ok(()),
        CellValue::String(s) | CellValue::Date(s) if s.is_empty() => return Ok(()),
        CellValue::String(s) | CellValue::Date(s) => worksheet.write_string(row, col, s.as_str()),
        CellValue::Integer(i) => worksheet.write_number(row, col, *i as f64),
        CellValue::Float(v) if !v.is_finite() => return Err(format!("{v} is not a finite number")),
        CellValue::Float(v) => worksheet.write_number(row, col, *v),
        CellValue::Bool(b) => worksheet.write_boolean(row, col, *b),
    };
    written.map(|_| ()).map_err(|e| e.to_string())
}

/// Write `table` as CSV with the same layout rules as [`export_xlsx`].
pub fn export_csv(table: &Table, column_order: &[String]) -> Result<Vec<u8>, ExportError> {
    let columns = resolve_columns(table, column_order)?;
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns.iter().map(|c| c.name.as_str()))?;
    for row in 0..table.len() {
        writer.write_record(columns.iter().map(|c| c.values[row].to_string()))?;
    }
    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

fn resolve_columns<'a>(
    table: &'a Table,
    column_order: &[String],
) -> Result<Vec<&'a Column>, ExportError> {
    column_order
        .iter()
        .map(|name| {
            table
                .column(name)
                .ok_or_else(|| ExportError::UnknownColumn(name.clone()))
        })
        .collect()
}
