//! The spreadsheet schema of the ledger and the untyped tables decoded from files.

use std::cmp::Ordering;

use time::{
    Date, Duration, Month, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::{
    Error,
    ledger::{
        Amount, MAX_DATE, MIN_DATE, TransactionBuilder, TransactionKind, is_supported_date,
    },
};

/// The column headers, in the order they are written to spreadsheets.
pub const COLUMNS: [&str; 5] = [
    DATE_COLUMN,
    KIND_COLUMN,
    CATEGORY_COLUMN,
    DESCRIPTION_COLUMN,
    AMOUNT_COLUMN,
];

/// The header of the date column.
pub const DATE_COLUMN: &str = "Data";
/// The header of the kind column.
pub const KIND_COLUMN: &str = "Tipo";
/// The header of the category column.
pub const CATEGORY_COLUMN: &str = "Categoria";
/// The header of the description column.
pub const DESCRIPTION_COLUMN: &str = "Descrição";
/// The header of the amount column.
pub const AMOUNT_COLUMN: &str = "Valor";

const ISO_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");
const DAY_FIRST_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[day]/[month]/[year]");

/// A single cell read from a spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// A blank cell.
    Empty,
    /// A text cell.
    Text(String),
    /// A numeric cell. Dates stored without a date format show up as numbers too.
    Number(f64),
    /// A cell the spreadsheet marked as a date.
    Date(Date),
}

impl CellValue {
    fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.trim().is_empty(),
            _ => false,
        }
    }
}

/// A decoded spreadsheet: a header row and untyped data rows.
///
/// Nothing about the schema is checked until the table is merged into a
/// ledger with [Ledger::bulk_merge](crate::ledger::Ledger::bulk_merge).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    /// The header row.
    pub columns: Vec<String>,
    /// The data rows. Rows may be shorter than the header, missing cells are empty.
    pub rows: Vec<Vec<CellValue>>,
}

/// Where each schema column sits in a [RecordTable].
struct ColumnIndices {
    date: usize,
    kind: usize,
    category: usize,
    description: usize,
    amount: usize,
}

impl RecordTable {
    /// Create a table from a header row and data rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    /// Convert the rows into transaction builders.
    ///
    /// Columns beyond the schema are ignored. Rows where every cell is blank
    /// are skipped.
    ///
    /// # Errors
    /// Returns an [Error::SchemaMismatch] listing the missing schema columns,
    /// or an [Error::InvalidRow] for the first row that cannot be converted.
    pub fn to_builders(&self) -> Result<Vec<TransactionBuilder>, Error> {
        let indices = self.column_indices()?;

        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.iter().all(CellValue::is_blank))
            .map(|(index, row)| {
                parse_row(row, &indices).map_err(|reason| Error::InvalidRow {
                    row: index + 1,
                    reason,
                })
            })
            .collect()
    }

    fn column_indices(&self) -> Result<ColumnIndices, Error> {
        let find = |name: &str| {
            self.columns
                .iter()
                .position(|column| column.trim() == name)
        };

        let missing: Vec<String> = COLUMNS
            .into_iter()
            .filter(|&name| find(name).is_none())
            .map(str::to_owned)
            .collect();

        match (
            find(DATE_COLUMN),
            find(KIND_COLUMN),
            find(CATEGORY_COLUMN),
            find(DESCRIPTION_COLUMN),
            find(AMOUNT_COLUMN),
        ) {
            (Some(date), Some(kind), Some(category), Some(description), Some(amount)) => {
                Ok(ColumnIndices {
                    date,
                    kind,
                    category,
                    description,
                    amount,
                })
            }
            _ => Err(Error::SchemaMismatch { missing }),
        }
    }
}

fn parse_row(row: &[CellValue], indices: &ColumnIndices) -> Result<TransactionBuilder, String> {
    let cell = |index: usize| row.get(index).unwrap_or(&CellValue::Empty);

    let date = parse_date(cell(indices.date)).map_err(|reason| format!("{DATE_COLUMN}: {reason}"))?;
    let kind = parse_kind(cell(indices.kind)).map_err(|reason| format!("{KIND_COLUMN}: {reason}"))?;
    let category = parse_text(cell(indices.category))
        .map_err(|reason| format!("{CATEGORY_COLUMN}: {reason}"))?;
    let description = parse_text(cell(indices.description))
        .map_err(|reason| format!("{DESCRIPTION_COLUMN}: {reason}"))?;
    let amount =
        parse_amount(cell(indices.amount)).map_err(|reason| format!("{AMOUNT_COLUMN}: {reason}"))?;

    Ok(TransactionBuilder::new(
        date,
        kind,
        &category,
        &description,
        amount,
    ))
}

/// The serial day number of 9999-12-31, the last date a spreadsheet can hold.
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// The serial day number of Excel's fictional 1900-02-29.
const EXCEL_LEAP_BUG_SERIAL: i64 = 60;

/// Convert an Excel serial day number to a date.
///
/// Serial 1 is 1900-01-01. Excel counts a 1900-02-29 that never existed, so
/// serials after it are counted from 1899-12-30 instead of 1899-12-31.
/// Returns `None` for serials outside 1900-01-01 to 9999-12-31 and for the
/// fictional leap day.
pub(crate) fn date_from_excel_serial(serial: f64) -> Option<Date> {
    if !serial.is_finite() || !(1.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }

    let days = serial.floor() as i64;
    let epoch = match days.cmp(&EXCEL_LEAP_BUG_SERIAL) {
        Ordering::Less => Date::from_calendar_date(1899, Month::December, 31).ok()?,
        Ordering::Equal => return None,
        Ordering::Greater => Date::from_calendar_date(1899, Month::December, 30).ok()?,
    };

    epoch.checked_add(Duration::days(days))
}

fn parse_date(cell: &CellValue) -> Result<Date, String> {
    let date = match cell {
        CellValue::Date(date) => *date,
        CellValue::Number(serial) => date_from_excel_serial(*serial)
            .ok_or_else(|| format!("{serial} is not a valid spreadsheet date"))?,
        CellValue::Text(text) => parse_date_text(text.trim()).ok_or_else(|| {
            format!("could not read \"{text}\" as a date (expected YYYY-MM-DD)")
        })?,
        CellValue::Empty => return Err("missing date".to_owned()),
    };

    if !is_supported_date(date) {
        return Err(format!(
            "{date} is outside the supported range {MIN_DATE} to {MAX_DATE}"
        ));
    }

    Ok(date)
}

fn parse_date_text(text: &str) -> Option<Date> {
    // Dates exported with a time part look like "2024-01-05 00:00:00".
    let date_part = text.get(..10).unwrap_or(text);

    Date::parse(date_part, ISO_DATE_FORMAT)
        .or_else(|_| Date::parse(date_part, DAY_FIRST_DATE_FORMAT))
        .ok()
}

fn parse_kind(cell: &CellValue) -> Result<TransactionKind, String> {
    match cell {
        CellValue::Text(text) => text.parse().map_err(|error: Error| error.to_string()),
        CellValue::Empty => Err("missing kind".to_owned()),
        other => Err(format!("{other:?} is not a kind")),
    }
}

fn parse_text(cell: &CellValue) -> Result<String, String> {
    let text = match cell {
        CellValue::Text(text) => text.trim().to_owned(),
        CellValue::Number(number) if number.fract() == 0.0 => format!("{number:.0}"),
        CellValue::Number(number) => number.to_string(),
        CellValue::Date(date) => date.to_string(),
        CellValue::Empty => String::new(),
    };

    if text.is_empty() {
        Err("cannot be empty".to_owned())
    } else {
        Ok(text)
    }
}

fn parse_amount(cell: &CellValue) -> Result<Amount, String> {
    let amount = match cell {
        CellValue::Number(number) => {
            Amount::from_f64(*number).map_err(|error: Error| error.to_string())?
        }
        CellValue::Text(text) => text.parse().map_err(|error: Error| error.to_string())?,
        CellValue::Empty => return Err("missing amount".to_owned()),
        CellValue::Date(date) => return Err(format!("{date} is not an amount")),
    };

    if amount.is_negative() {
        return Err(format!("{amount} is negative"));
    }

    Ok(amount)
}
