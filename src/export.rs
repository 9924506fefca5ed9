//! The download of the records on the dashboard as a spreadsheet.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    app_state::lock_ledger,
    ledger::{Ledger, MonthFilter, filter_by_month, sorted_for_display},
    spreadsheet::{ExportFormat, encode, export_file_name},
};

/// The state needed to export records.
#[derive(Debug, Clone)]
pub struct ExportState {
    /// The records of the current session.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// The query string of the export route.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ExportQuery {
    /// The month shown on the dashboard as "MM/YYYY", or "All". Missing means "All".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    /// The file format, XLSX when missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ExportFormat>,
}

/// Responds with the records for the month in the query as a spreadsheet
/// attachment, latest first.
///
/// # Errors
/// Returns [Error::InvalidPeriod] if the month cannot be parsed, or
/// [Error::ExportFailed] if the spreadsheet could not be written.
pub async fn export_transactions(
    State(state): State<ExportState>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, Error> {
    let filter = match query.month.as_deref() {
        Some(month) => month
            .parse::<MonthFilter>()
            .inspect_err(|error| tracing::debug!("invalid month in export query: {error}"))?,
        None => MonthFilter::All,
    };
    let format = query.format.unwrap_or_default();

    let records = {
        let ledger = lock_ledger(&state.ledger)?;
        sorted_for_display(&filter_by_month(ledger.records(), &filter))
    };

    let bytes = encode(&records, format)?;
    let file_name = export_file_name(&filter, format);

    tracing::info!("exporting {} records as {file_name}", records.len());

    Ok((
        [
            (CONTENT_TYPE, format.content_type().to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
