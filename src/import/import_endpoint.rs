use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Multipart, State, multipart::Field},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    alert::Alert,
    app_state::lock_ledger,
    ledger::Ledger,
    spreadsheet::{ExportFormat, decode},
};

/// The name of the multipart field that holds the spreadsheet.
const FILE_FIELD: &str = "file";

/// The state needed for importing records.
#[derive(Debug, Clone)]
pub struct ImportState {
    /// The records of the current session.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for ImportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// An uploaded spreadsheet, read fully into memory.
struct Upload {
    file_name: String,
    format: ExportFormat,
    bytes: Vec<u8>,
}

/// Route handler for importing records from an XLSX or CSV upload.
///
/// Every row is appended to the ledger, or nothing is if the file is missing
/// a column or has a row that cannot be read.
pub async fn import_transactions(
    State(state): State<ImportState>,
    multipart: Multipart,
) -> Response {
    let start_time = std::time::Instant::now();

    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(error) => return error.into_alert_response(),
    };

    let table = match decode(&upload.bytes, upload.format) {
        Ok(table) => table,
        Err(error) => {
            tracing::debug!("could not decode {}: {error}", upload.file_name);
            return error.into_alert_response();
        }
    };

    let imported_count = {
        let mut ledger = match lock_ledger(&state.ledger) {
            Ok(ledger) => ledger,
            Err(error) => return error.into_alert_response(),
        };

        match ledger.bulk_merge(&table) {
            Ok(merged) => {
                let imported_count = merged.len() - ledger.len();
                *ledger = merged;
                imported_count
            }
            Err(error) => {
                tracing::info!("rejected import of {}: {error}", upload.file_name);
                return error.into_alert_response();
            }
        }
    };

    let duration = start_time.elapsed();
    tracing::info!(
        "imported {imported_count} records from {} in {}ms",
        upload.file_name,
        duration.as_millis()
    );

    (
        StatusCode::CREATED,
        Alert::Success {
            message: "Import completed successfully!".to_owned(),
            details: format!(
                "Imported {imported_count} records from {} in {}ms.",
                upload.file_name,
                duration.as_millis()
            ),
        }
        .into_html(),
    )
        .into_response()
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, Error> {
    while let Some(field) = multipart.next_field().await.map_err(|error| {
        tracing::error!("Could not read multipart form: {error}");
        Error::MultipartError(error.body_text())
    })? {
        if field.name() == Some(FILE_FIELD) {
            return read_file_field(field).await;
        }

        tracing::debug!("ignoring multipart field {:?}", field.name());
    }

    Err(Error::MultipartError(
        "The form did not include a file.".to_owned(),
    ))
}

async fn read_file_field(field: Field<'_>) -> Result<Upload, Error> {
    let file_name = field.file_name().unwrap_or_default().to_owned();

    let Some(format) = ExportFormat::detect(field.content_type(), Some(file_name.as_str())) else {
        tracing::debug!(
            "rejected upload '{file_name}' with content type {:?}",
            field.content_type()
        );
        return Err(Error::UnsupportedFileType);
    };

    let bytes = field.bytes().await.map_err(|error| {
        tracing::error!("Could not read data from multipart form field: {error}");
        Error::MultipartError("Could not read data from multipart form field.".to_owned())
    })?;

    tracing::debug!("Received file '{file_name}' that is {} bytes", bytes.len());

    Ok(Upload {
        file_name,
        format,
        bytes: bytes.to_vec(),
    })
}

#[cfg(test)]
mod import_transactions_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{FromRequest, Multipart, State},
        http::{Request, StatusCode},
        response::Response,
    };
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        endpoints,
        import::import_endpoint::{ImportState, import_transactions},
        ledger::{Amount, COLUMNS, Ledger, Transaction, TransactionKind},
        spreadsheet::{ExportFormat, encode},
        test_utils::{assert_valid_html, parse_html_fragment},
    };

    const SCENARIO_CSV: &str = "Data,Tipo,Categoria,Descrição,Valor\n\
        2024-01-05,Despesa,Moradia,Aluguel,1200.00\n\
        2024-01-10,Receita,Salário,Salário,5000.00\n";

    fn state_with(ledger: Ledger) -> ImportState {
        ImportState {
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }

    fn salary() -> Ledger {
        Ledger::new().append(Transaction::build(
            date!(2023 - 12 - 10),
            TransactionKind::Income,
            "Salário",
            "Salário",
            Amount::from_cents(500_000),
        ))
    }

    async fn must_make_multipart(file_name: &str, content_type: &str, data: &[u8]) -> Multipart {
        let boundary = "MY_BOUNDARY123456789";

        let mut body = Vec::new();
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let request = Request::builder()
            .method("POST")
            .uri(endpoints::IMPORT)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(body.into())
            .unwrap();

        Multipart::from_request(request, &{}).await.unwrap()
    }

    async fn alert_text(response: Response) -> String {
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);

        html.select(&Selector::parse("[role=alert]").unwrap())
            .next()
            .expect("No alert found")
            .text()
            .collect()
    }

    #[tokio::test]
    async fn imports_csv_and_keeps_existing_records() {
        let state = state_with(salary());

        let response = import_transactions(
            State(state.clone()),
            must_make_multipart("lancamentos.csv", "text/csv", SCENARIO_CSV.as_bytes()).await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(alert_text(response).await.contains("Imported 2 records"));
        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.records()[1].category, "Moradia");
        assert_eq!(ledger.records()[1].amount, Amount::from_cents(120_000));
    }

    #[tokio::test]
    async fn imports_xlsx_detected_by_file_name() {
        let exported = Ledger::new().append(Transaction::build(
            date!(2024 - 01 - 05),
            TransactionKind::Expense,
            "Moradia",
            "Aluguel",
            Amount::from_cents(120_000),
        ));
        let bytes = encode(exported.records(), ExportFormat::Xlsx).unwrap();
        let state = state_with(Ledger::new());

        let response = import_transactions(
            State(state.clone()),
            must_make_multipart("financeiro.xlsx", "application/octet-stream", &bytes).await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(
            ledger.records()[0].to_builder(),
            exported.records()[0].to_builder()
        );
    }

    #[tokio::test]
    async fn missing_column_is_rejected_and_nothing_merged() {
        let state = state_with(salary());
        let csv = "Data,Tipo,Categoria,Descrição\n2024-01-05,Despesa,Moradia,Aluguel\n";

        let response = import_transactions(
            State(state.clone()),
            must_make_multipart("lancamentos.csv", "text/csv", csv.as_bytes()).await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let text = alert_text(response).await;
        assert!(text.contains("Invalid columns"), "got {text}");
        assert!(text.contains("Valor"), "got {text}");
        assert_eq!(*state.ledger.lock().unwrap(), salary());
    }

    #[tokio::test]
    async fn bad_row_is_rejected_and_nothing_merged() {
        let state = state_with(Ledger::new());
        let csv = "Data,Tipo,Categoria,Descrição,Valor\n\
            2024-01-05,Despesa,Moradia,Aluguel,1200.00\n\
            2024-01-06,Despesa,Lazer,Cinema,abc\n";

        let response = import_transactions(
            State(state.clone()),
            must_make_multipart("lancamentos.csv", "text/csv", csv.as_bytes()).await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.ledger.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unsupported_file_type_is_rejected() {
        let state = state_with(Ledger::new());

        let response = import_transactions(
            State(state.clone()),
            must_make_multipart("notes.txt", "text/plain", b"hello").await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(alert_text(response).await.contains("XLSX or CSV"));
        assert!(state.ledger.lock().unwrap().is_empty());
    }

    fn workbook_with_date_serial(serial: f64) -> Vec<u8> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, header) in COLUMNS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header).unwrap();
        }
        worksheet.write_number(1, 0, serial).unwrap();
        worksheet.write_string(1, 1, "Despesa").unwrap();
        worksheet.write_string(1, 2, "Lazer").unwrap();
        worksheet.write_string(1, 3, "Cinema").unwrap();
        worksheet.write_number(1, 4, 30.0).unwrap();

        workbook.save_to_buffer().unwrap()
    }

    #[tokio::test]
    async fn huge_date_serial_is_rejected_and_ledger_stays_usable() {
        let state = state_with(salary());
        let bytes = workbook_with_date_serial(1e15);

        let response = import_transactions(
            State(state.clone()),
            must_make_multipart("financeiro.xlsx", "application/octet-stream", &bytes).await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let text = alert_text(response).await;
        assert!(text.contains("Invalid row"), "got {text}");
        assert!(!state.ledger.is_poisoned());
        assert_eq!(*state.ledger.lock().unwrap(), salary());

        let response = import_transactions(
            State(state.clone()),
            must_make_multipart("lancamentos.csv", "text/csv", SCENARIO_CSV.as_bytes()).await,
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(state.ledger.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn out_of_range_dates_and_amounts_are_rejected() {
        let csvs = [
            "Data,Tipo,Categoria,Descrição,Valor\n1899-12-31,Despesa,Lazer,Cinema,30.00\n",
            "Data,Tipo,Categoria,Descrição,Valor\n2024-01-05,Despesa,Lazer,Cinema,90000000000000000\n",
            "Data,Tipo,Categoria,Descrição,Valor\n2024-01-05,Despesa,Lazer,Cinema,inf\n",
        ];

        for csv in csvs {
            let state = state_with(salary());

            let response = import_transactions(
                State(state.clone()),
                must_make_multipart("lancamentos.csv", "text/csv", csv.as_bytes()).await,
            )
            .await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "csv {csv}");
            assert_eq!(*state.ledger.lock().unwrap(), salary());
        }
    }
}
