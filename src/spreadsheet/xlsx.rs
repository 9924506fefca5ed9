//! XLSX encoding with rust_xlsxwriter and decoding with calamine.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook, XlsxError};
use time::Date;

use crate::{
    Error,
    ledger::{COLUMNS, CellValue, RecordTable, Transaction, schema::date_from_excel_serial},
    spreadsheet::WORKSHEET_NAME,
};

const DATE_FORMAT: &str = "yyyy-mm-dd";
const AMOUNT_FORMAT: &str = "0.00";

pub(super) fn encode(records: &[Transaction]) -> Result<Vec<u8>, Error> {
    write_workbook(records)
        .inspect_err(|error| tracing::error!("could not write XLSX workbook: {error}"))
        .map_err(|error| Error::ExportFailed(error.to_string()))
}

fn write_workbook(records: &[Transaction]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();

    // A fixed creation time keeps the output identical for identical records.
    let created = ExcelDateTime::from_ymd(2024, 1, 1)?;
    let properties = DocProperties::new().set_creation_datetime(&created);
    workbook.set_properties(&properties);

    let header_format = Format::new().set_bold();
    let date_format = Format::new().set_num_format(DATE_FORMAT);
    let amount_format = Format::new().set_num_format(AMOUNT_FORMAT);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(WORKSHEET_NAME)?;

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;

        match excel_date(record.date) {
            Some(date) => worksheet.write_datetime_with_format(row, 0, &date, &date_format)?,
            None => worksheet.write_string(row, 0, record.date.to_string())?,
        };
        worksheet.write_string(row, 1, record.kind.label())?;
        worksheet.write_string(row, 2, &record.category)?;
        worksheet.write_string(row, 3, &record.description)?;
        worksheet.write_number_with_format(row, 4, record.amount.as_f64(), &amount_format)?;
    }

    worksheet.set_column_width(0, 12)?;
    worksheet.set_column_width(2, 20)?;
    worksheet.set_column_width(3, 30)?;

    workbook.save_to_buffer()
}

/// Spreadsheets only hold dates from 1900 to 9999, other dates are written as text.
fn excel_date(date: Date) -> Option<ExcelDateTime> {
    let year = u16::try_from(date.year()).ok()?;

    ExcelDateTime::from_ymd(year, date.month() as u8, date.day()).ok()
}

pub(super) fn decode(bytes: &[u8]) -> Result<RecordTable, Error> {
    let invalid = |error: calamine::XlsxError| {
        tracing::debug!("could not read XLSX upload: {error}");
        Error::InvalidSpreadsheet(error.to_string())
    };

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).map_err(invalid)?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::InvalidSpreadsheet("the workbook has no worksheets".to_owned()))?
        .map_err(invalid)?;

    let mut rows = range.rows();

    let columns = rows
        .next()
        .map(|header| header.iter().map(header_text).collect())
        .unwrap_or_default();

    let rows = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    Ok(RecordTable::new(columns, rows))
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(text) => text.trim().to_owned(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => {
            CellValue::Text(text.clone())
        }
        Data::Int(number) => CellValue::Number(*number as f64),
        Data::Float(number) => CellValue::Number(*number),
        Data::DateTime(date_time) => match date_from_excel_serial(date_time.as_f64()) {
            Some(date) => CellValue::Date(date),
            None => CellValue::Number(date_time.as_f64()),
        },
        Data::Bool(value) => CellValue::Text(value.to_string()),
        Data::Error(error) => CellValue::Text(error.to_string()),
    }
}
