//! Defines the endpoints for deleting one record or every record.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::{HxRedirect, HxRefresh};

use crate::{
    AppState, Error,
    app_state::lock_ledger,
    endpoints,
    ledger::{Ledger, RecordId},
};

/// The state needed to delete records.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The records of the current session.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// A route handler for deleting a record by ID.
///
/// Responds with a refresh so the dashboard is rendered again with the same
/// month filter, or with a warning alert if there was no such record.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<RecordId>,
) -> Response {
    let mut ledger = match lock_ledger(&state.ledger) {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };

    match ledger.remove(transaction_id) {
        Ok(updated) => {
            tracing::info!("deleted record {transaction_id}");
            *ledger = updated;
            (HxRefresh(true), StatusCode::OK).into_response()
        }
        Err(error @ Error::RecordNotFound(_)) => {
            tracing::warn!("could not delete record {transaction_id}: {error}");
            error.into_alert_response()
        }
        Err(error) => {
            tracing::error!("could not delete record {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

/// A route handler for deleting every record, redirects to the dashboard.
pub async fn reset_transactions_endpoint(State(state): State<DeleteTransactionState>) -> Response {
    let mut ledger = match lock_ledger(&state.ledger) {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };

    tracing::info!("clearing {} records", ledger.len());
    *ledger = ledger.clear();

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use scraper::Selector;
    use time::macros::date;

    use crate::{
        endpoints,
        ledger::{Amount, Ledger, Transaction, TransactionKind},
        test_utils::{assert_hx_redirect, get_header, parse_html_fragment},
        transaction::{
            delete_endpoint::DeleteTransactionState, delete_transaction_endpoint,
            reset_transactions_endpoint,
        },
    };

    fn state_with_two_identical_records() -> DeleteTransactionState {
        let rent = Transaction::build(
            date!(2024 - 01 - 05),
            TransactionKind::Expense,
            "Moradia",
            "Aluguel",
            Amount::from_cents(120_000),
        );

        DeleteTransactionState {
            ledger: Arc::new(Mutex::new(Ledger::new().append(rent.clone()).append(rent))),
        }
    }

    #[tokio::test]
    async fn deletes_only_the_addressed_record() {
        let state = state_with_two_identical_records();
        let (first_id, second_id) = {
            let ledger = state.ledger.lock().unwrap();
            (ledger.records()[0].id, ledger.records()[1].id)
        };

        let response = delete_transaction_endpoint(State(state.clone()), Path(second_id)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(get_header(&response, "hx-refresh"), "true");
        let ledger = state.ledger.lock().unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.records()[0].id, first_id);
    }

    #[tokio::test]
    async fn deleting_missing_record_is_a_warning() {
        let state = state_with_two_identical_records();
        let before = state.ledger.lock().unwrap().clone();

        let response = delete_transaction_endpoint(State(state.clone()), Path(999)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let alert = html
            .select(&Selector::parse("[role=alert]").unwrap())
            .next()
            .expect("alert missing");
        assert!(alert.text().collect::<String>().contains("Nothing to delete"));
        assert_eq!(*state.ledger.lock().unwrap(), before);
    }

    #[tokio::test]
    async fn reset_clears_every_record() {
        let state = state_with_two_identical_records();

        let response = reset_transactions_endpoint(State(state.clone())).await;

        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
        assert!(state.ledger.lock().unwrap().is_empty());
    }
}
