//! CSV encoding and decoding with the csv crate.

use crate::{
    Error,
    ledger::{COLUMNS, CellValue, RecordTable, Transaction},
};

pub(super) fn encode(records: &[Transaction]) -> Result<Vec<u8>, Error> {
    let export_failed = |error: ::csv::Error| {
        tracing::error!("could not write CSV: {error}");
        Error::ExportFailed(error.to_string())
    };

    let mut writer = ::csv::WriterBuilder::new()
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(COLUMNS).map_err(export_failed)?;

    for record in records {
        writer
            .write_record([
                record.date.to_string().as_str(),
                record.kind.label(),
                record.category.as_str(),
                record.description.as_str(),
                record.amount.to_string().as_str(),
            ])
            .map_err(export_failed)?;
    }

    writer.into_inner().map_err(|error| {
        tracing::error!("could not flush CSV: {error}");
        Error::ExportFailed(error.to_string())
    })
}

pub(super) fn decode(bytes: &[u8]) -> Result<RecordTable, Error> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(::csv::Trim::All)
        .from_reader(bytes);

    let invalid = |error: ::csv::Error| {
        tracing::debug!("could not read CSV upload: {error}");
        Error::InvalidSpreadsheet(error.to_string())
    };

    let columns: Vec<String> = reader
        .headers()
        .map_err(invalid)?
        .iter()
        // Spreadsheet programs like to start CSV files with a byte order mark.
        .map(|header| header.trim_start_matches('\u{feff}').to_owned())
        .collect();

    let rows = reader
        .records()
        .map(|record| {
            record.map_err(invalid).map(|record| {
                record
                    .iter()
                    .map(|field| {
                        if field.is_empty() {
                            CellValue::Empty
                        } else {
                            CellValue::Text(field.to_owned())
                        }
                    })
                    .collect()
            })
        })
        .collect::<Result<_, _>>()?;

    Ok(RecordTable::new(columns, rows))
}
