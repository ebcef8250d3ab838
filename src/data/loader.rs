use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use arrow::util::display::array_value_to_string;
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::DataError;
use super::filter::FilterKey;
use super::model::{CellValue, Column, Table};
use super::normalize::normalize_columns;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a debt dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first worksheet, first row is the header
/// * `.csv`     – comma separated, first row is the header
/// * `.parquet` – one column per field
///
/// Headers are normalized and deduplicated, and the month column is
/// uppercased, before the table is returned.
pub fn load_file(path: &Path) -> Result<Table, DataError> {
    if !path.exists() {
        return Err(DataError::MissingFile(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let columns = match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(path)?,
        "csv" => load_csv(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataError::UnsupportedFormat(other.to_string())),
    };

    let table = build_table(columns)?;
    log::info!(
        "Loaded {} rows from {} with columns {:?}",
        table.len(),
        path.display(),
        table.column_names()
    );
    Ok(table)
}

/// Turn raw source columns into a dataset table: canonical headers, first
/// occurrence of each name kept, month names uppercased.
pub fn build_table(columns: Vec<Column>) -> Result<Table, DataError> {
    let table = Table::from_columns(normalize_columns(columns))?;
    Ok(table.map_column(FilterKey::Mes.column(), |cell| match cell {
        CellValue::Empty => CellValue::Empty,
        other => CellValue::String(other.key().to_uppercase()),
    }))
}

/// Shape header + row cells into columns. Short rows are padded with empty
/// cells, cells past the header are dropped.
fn columns_from_rows<I>(headers: Vec<String>, rows: I) -> Vec<Column>
where
    I: IntoIterator<Item = Vec<CellValue>>,
{
    let mut columns: Vec<Column> = headers
        .into_iter()
        .map(|h| Column::new(h, Vec::new()))
        .collect();
    for mut row in rows {
        row.resize(columns.len(), CellValue::Empty);
        for (column, cell) in columns.iter_mut().zip(row) {
            column.values.push(cell);
        }
    }
    columns
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

fn load_workbook(path: &Path) -> Result<Vec<Column>, DataError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook.worksheet_range_at(0).ok_or(DataError::NoSheets)??;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers = header.iter().map(|c| cell_from_data(c).to_string()).collect();

    Ok(columns_from_rows(
        headers,
        rows.map(|r| r.iter().map(cell_from_data).collect::<Vec<_>>()),
    ))
}

fn cell_from_data(d: &Data) -> CellValue {
    match d {
        Data::String(s) => CellValue::String(s.clone()),
        Data::Float(f) => CellValue::Float(*f),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        // Serial number only when the cell is a duration or out of range.
        Data::DateTime(dt) => CellValue::Date(
            dt.as_datetime()
                .filter(|_| dt.is_datetime())
                .map(|d| d.to_string())
                .unwrap_or_else(|| dt.to_string()),
        ),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Date(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<Column>, DataError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }
    Ok(columns_from_rows(headers, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.trim().is_empty() {
        return CellValue::Empty;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Types without a direct cell mapping
/// (dates, decimals) are read as their display text.
fn load_parquet(path: &Path) -> Result<Vec<Column>, DataError> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut columns: Vec<Column> = headers
        .into_iter()
        .map(|h| Column::new(h, Vec::new()))
        .collect();

    for batch_result in reader {
        let batch = batch_result?;
        for (idx, column) in columns.iter_mut().enumerate() {
            let array = batch.column(idx);
            column
                .values
                .extend((0..batch.num_rows()).map(|row| cell_from_arrow(array, row)));
        }
    }
    Ok(columns)
}

fn cell_from_arrow(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Empty;
    }
    let cell = match col.data_type() {
        DataType::Utf8 => col
            .as_string_opt::<i32>()
            .map(|a| CellValue::String(a.value(row).to_string())),
        DataType::LargeUtf8 => col
            .as_string_opt::<i64>()
            .map(|a| CellValue::String(a.value(row).to_string())),
        DataType::Int32 => col
            .as_primitive_opt::<Int32Type>()
            .map(|a| CellValue::Integer(a.value(row) as i64)),
        DataType::Int64 => col
            .as_primitive_opt::<Int64Type>()
            .map(|a| CellValue::Integer(a.value(row))),
        DataType::Float32 => col
            .as_primitive_opt::<Float32Type>()
            .map(|a| CellValue::Float(a.value(row) as f64)),
        DataType::Float64 => col
            .as_primitive_opt::<Float64Type>()
            .map(|a| CellValue::Float(a.value(row))),
        DataType::Boolean => col.as_boolean_opt().map(|a| CellValue::Bool(a.value(row))),
        _ => array_value_to_string(col.as_ref(), row)
            .ok()
            .map(CellValue::String),
    };
    cell.unwrap_or(CellValue::Empty)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    use super::*;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_file(Path::new("/definitely/not/here/Base Plana 20-25.xlsx")).unwrap_err();
        assert!(matches!(err, DataError::MissingFile(_)));
    }

    #[test]
    fn unsupported_extension_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datos.txt");
        std::fs::write(&path, "PERIODO\n2021\n").unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, DataError::UnsupportedFormat(ext) if ext == "txt"));
    }

    #[test]
    fn build_table_normalizes_and_uppercases_months() {
        let table = build_table(vec![
            Column::new("Mes", vec![s(" enero "), CellValue::Empty, s("Marzo")]),
            Column::new("Período", vec![CellValue::Integer(2021); 3]),
            Column::new("periodo", vec![CellValue::Integer(1999); 3]),
        ])
        .unwrap();
        assert_eq!(table.column_names(), vec!["MES", "PERIODO"]);
        assert_eq!(
            table.column("MES").unwrap().values,
            vec![s("ENERO"), CellValue::Empty, s("MARZO")]
        );
        assert_eq!(table.column("PERIODO").unwrap().values[0], CellValue::Integer(2021));
    }

    #[test]
    fn csv_rows_are_padded_and_typed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deuda.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Periodo,Mes,Saldo Inicial").unwrap();
        writeln!(file, "2021,enero,100.5").unwrap();
        writeln!(file, "2022,marzo").unwrap();
        drop(file);

        let table = load_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.column("SALDO INICIAL").unwrap().values,
            vec![CellValue::Float(100.5), CellValue::Empty]
        );
        assert_eq!(table.column("MES").unwrap().values, vec![s("ENERO"), s("MARZO")]);
        assert_eq!(table.column("PERIODO").unwrap().values[1], CellValue::Integer(2022));
    }

    #[test]
    fn csv_blank_headers_keep_their_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deuda.csv");
        std::fs::write(&path, "PERIODO,,,SALDO FINAL\n2021,a,b,10\n").unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(
            table.column_names(),
            vec!["PERIODO", "UNNAMED: 1", "UNNAMED: 2", "SALDO FINAL"]
        );
        assert_eq!(table.column("UNNAMED: 2").unwrap().values, vec![s("b")]);
    }

    #[test]
    fn xlsx_first_sheet_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deuda.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Período").unwrap();
        sheet.write_string(0, 1, "Nombre del\nAcreedor").unwrap();
        sheet.write_number(1, 0, 2021.0).unwrap();
        sheet.write_string(1, 1, "BID").unwrap();
        sheet.write_number(2, 0, 2022.0).unwrap();
        workbook.add_worksheet().write_string(0, 0, "ignored").unwrap();
        workbook.save(&path).unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.column_names(), vec!["PERIODO", "NOMBRE DEL ACREEDOR"]);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.column("NOMBRE DEL ACREEDOR").unwrap().values,
            vec![s("BID"), CellValue::Empty]
        );
        assert_eq!(table.column("PERIODO").unwrap().values[0].key(), "2021");
    }

    #[test]
    fn xlsx_dates_are_read_as_calendar_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deuda.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        let date = ExcelDateTime::from_ymd(2021, 1, 31).unwrap();
        sheet.write_string(0, 0, "Fecha").unwrap();
        sheet.write_datetime_with_format(1, 0, &date, &date_format).unwrap();
        workbook.save(&path).unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(
            table.column("FECHA").unwrap().values,
            vec![CellValue::Date("2021-01-31 00:00:00".to_string())]
        );
    }

    #[test]
    fn parquet_columns_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deuda.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("Periodo", DataType::Int64, false),
            Field::new("Deudor", DataType::Utf8, true),
            Field::new("Saldo Final", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![2021, 2022])),
                Arc::new(StringArray::from(vec![Some("Gobierno Central"), None])),
                Arc::new(Float64Array::from(vec![Some(1.5), None])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.column_names(), vec!["PERIODO", "DEUDOR", "SALDO FINAL"]);
        assert_eq!(
            table.column("DEUDOR").unwrap().values,
            vec![s("Gobierno Central"), CellValue::Empty]
        );
        assert_eq!(
            table.column("SALDO FINAL").unwrap().values,
            vec![CellValue::Float(1.5), CellValue::Empty]
        );
    }
}
