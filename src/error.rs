//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert, html::error_view, internal_server_error::InternalServerError,
    ledger::RecordId, not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An uploaded spreadsheet is missing one or more of the ledger columns.
    ///
    /// `missing` lists the missing column headers in schema order.
    #[error("the spreadsheet is missing the columns {missing:?}")]
    SchemaMismatch {
        /// The missing column headers.
        missing: Vec<String>,
    },

    /// A row of an uploaded spreadsheet could not be read as a record.
    ///
    /// `row` counts data rows from one, not counting the header.
    #[error("row {row} is invalid: {reason}")]
    InvalidRow {
        /// The data row number, starting from one.
        row: usize,
        /// What was wrong with the row.
        reason: String,
    },

    /// A record entered through the form is missing a field or has a
    /// non-positive amount.
    #[error("{0}")]
    Validation(String),

    /// Text that should have been a month label, e.g. "01/2024".
    #[error("\"{0}\" is not a valid month, expected MM/YYYY")]
    InvalidPeriod(String),

    /// Text that should have been a transaction kind.
    #[error("\"{0}\" is not a valid kind, expected Despesa or Receita")]
    InvalidKind(String),

    /// Text that should have been an amount of money.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// Tried to delete a record by position and the position is past the end.
    #[error("index {index} is out of range for a ledger with {len} records")]
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// The number of records in the ledger.
        len: usize,
    },

    /// Tried to delete a record that is not in the ledger.
    #[error("no record with the ID {0}")]
    RecordNotFound(RecordId),

    /// The uploaded file could not be read as a spreadsheet.
    #[error("could not read the spreadsheet: {0}")]
    InvalidSpreadsheet(String),

    /// The uploaded file is neither XLSX nor CSV.
    #[error("file type must be XLSX or CSV")]
    UnsupportedFileType,

    /// The multipart form could not be parsed.
    #[error("could not parse multipart form: {0}")]
    MultipartError(String),

    /// The records could not be written to a spreadsheet.
    #[error("could not create the spreadsheet: {0}")]
    ExportFailed(String),

    /// Could not acquire the ledger lock.
    #[error("could not acquire the ledger lock")]
    LedgerLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::RecordNotFound(_) => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::ExportFailed(_) => InternalServerError {
                description: "Export Failed",
                fix: "The spreadsheet could not be created. Please try again.",
            }
            .into_response(),
            Error::LedgerLockError => InternalServerError::default().into_response(),
            error @ (Error::InvalidPeriod(_) | Error::InvalidKind(_) | Error::InvalidAmount(_)) => {
                (
                    StatusCode::BAD_REQUEST,
                    error_view(
                        "Bad Request",
                        "400",
                        &capitalize(&error.to_string()),
                        "Check the link and try again.",
                    ),
                )
                    .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::SchemaMismatch { missing } => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid columns".to_owned(),
                    details: format!(
                        "The spreadsheet is missing the columns: {}. Nothing was imported.",
                        missing.join(", ")
                    ),
                },
            ),
            Error::InvalidRow { row, reason } => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid row".to_owned(),
                    details: format!("Row {row}: {reason}. Nothing was imported."),
                },
            ),
            Error::Validation(reason) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Could not add the record".to_owned(),
                    details: reason,
                },
            ),
            error @ (Error::InvalidPeriod(_) | Error::InvalidKind(_) | Error::InvalidAmount(_)) => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: capitalize(&error.to_string()),
                },
            ),
            Error::IndexOutOfRange { .. } | Error::RecordNotFound(_) => (
                // The status code has to be 200 OK or htmx will not swap in the alert.
                StatusCode::OK,
                Alert::Warning {
                    message: "Nothing to delete".to_owned(),
                    details: "The record could not be found. \
                    Try refreshing the page to see if it has already been deleted."
                        .to_owned(),
                },
            ),
            Error::InvalidSpreadsheet(reason) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Could not read the file".to_owned(),
                    details: format!(
                        "Check that the file is a valid XLSX or CSV spreadsheet ({reason})."
                    ),
                },
            ),
            Error::UnsupportedFileType => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "File type must be XLSX or CSV.".to_owned(),
                },
            ),
            Error::MultipartError(reason) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Could not read the upload".to_owned(),
                    details: reason,
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::{
        Error,
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    #[tokio::test]
    async fn schema_mismatch_alert_names_missing_columns() {
        let response = Error::SchemaMismatch {
            missing: vec!["Descrição".to_owned(), "Valor".to_owned()],
        }
        .into_alert_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        let text: String = html.root_element().text().collect();
        assert!(
            text.contains("Descrição, Valor"),
            "want alert to list the missing columns, got {text:?}"
        );
    }

    #[tokio::test]
    async fn delete_misses_are_warnings_with_ok_status() {
        let response = Error::RecordNotFound(7).into_alert_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn internal_errors_render_error_page() {
        use axum::response::IntoResponse;

        let response = Error::LedgerLockError.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn parse_errors_render_bad_request_page() {
        use axum::response::IntoResponse;

        let response = Error::InvalidPeriod("2024-01".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
