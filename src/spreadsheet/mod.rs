//! Encodes ledger records as spreadsheet files and decodes uploaded spreadsheets.
//!
//! XLSX is the primary format, CSV is offered for people without a
//! spreadsheet program. Both use the header row in [COLUMNS](crate::ledger::COLUMNS).

mod csv;
mod xlsx;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    ledger::{MonthFilter, RecordTable, Transaction},
};

/// The name of the worksheet the records are written to.
pub const WORKSHEET_NAME: &str = "Meus Lancamentos";

/// The spreadsheet formats records can be exported as and imported from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// An Office Open XML workbook.
    #[default]
    Xlsx,
    /// Comma separated values.
    Csv,
}

impl ExportFormat {
    /// The file extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }

    /// The MIME type of the format.
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Csv => "text/csv; charset=utf-8",
        }
    }

    /// Work out the format of an uploaded file from its content type, falling
    /// back to the extension of its file name.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Option<ExportFormat> {
        let from_content_type = content_type.and_then(|content_type| {
            let mime = content_type.split(';').next().unwrap_or_default().trim();

            match mime {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => {
                    Some(ExportFormat::Xlsx)
                }
                "text/csv" => Some(ExportFormat::Csv),
                _ => None,
            }
        });

        from_content_type.or_else(|| {
            let (_, extension) = file_name?.rsplit_once('.')?;
            extension.parse().ok()
        })
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_lowercase().as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(Error::UnsupportedFileType),
        }
    }
}

/// Write `records` to an in-memory spreadsheet in the given order.
///
/// The same records always produce the same bytes.
///
/// # Errors
/// Returns [Error::ExportFailed] if the spreadsheet library fails.
pub fn encode(records: &[Transaction], format: ExportFormat) -> Result<Vec<u8>, Error> {
    match format {
        ExportFormat::Xlsx => xlsx::encode(records),
        ExportFormat::Csv => csv::encode(records),
    }
}

/// Read the first worksheet of a spreadsheet into a table.
///
/// The first row is taken as the header. The table is not checked against
/// the ledger schema.
///
/// # Errors
/// Returns [Error::InvalidSpreadsheet] if `bytes` are not a readable spreadsheet.
pub fn decode(bytes: &[u8], format: ExportFormat) -> Result<RecordTable, Error> {
    match format {
        ExportFormat::Xlsx => xlsx::decode(bytes),
        ExportFormat::Csv => csv::decode(bytes),
    }
}

/// The download name for an export of the records `filter` selects.
///
/// For example "financeiro_01_2024.xlsx", or "financeiro_completo.xlsx" for
/// every record.
pub fn export_file_name(filter: &MonthFilter, format: ExportFormat) -> String {
    let label = match filter {
        MonthFilter::All => "completo".to_owned(),
        MonthFilter::Month(period) => period.file_label(),
    };

    format!("financeiro_{label}.{}", format.extension())
}
