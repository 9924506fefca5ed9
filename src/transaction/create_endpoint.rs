//! Defines the endpoint for creating a new record.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// axum_extra's Form decodes with serde_html_form. A blank `custom_category`
// arrives as `Some("")` and is treated like a missing one.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    app_state::lock_ledger,
    endpoints,
    ledger::{Amount, Ledger, Transaction, TransactionBuilder, TransactionKind},
    transaction::categories::OTHER_CATEGORY,
};

/// The state needed to create a record.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The records of the current session.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// The form data for creating a record.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The date when the transaction ocurred.
    pub date: Date,
    /// Whether money was spent or earned.
    pub kind: TransactionKind,
    /// One of the preset categories, or "Other".
    pub category: String,
    /// The category typed in by the user, used when `category` is "Other".
    #[serde(default)]
    pub custom_category: Option<String>,
    /// Text detailing the transaction.
    pub description: String,
    /// The value of the transaction in reais.
    pub amount: f64,
}

impl TransactionForm {
    /// # Errors
    /// Returns [Error::InvalidAmount] if the amount is not finite or too large.
    fn into_builder(self) -> Result<TransactionBuilder, Error> {
        let category = if self.category == OTHER_CATEGORY {
            self.custom_category.unwrap_or_default()
        } else {
            self.category
        };

        Ok(Transaction::build(
            self.date,
            self.kind,
            &category,
            &self.description,
            Amount::from_f64(self.amount)?,
        ))
    }
}

/// A route handler for creating a new record, redirects to the dashboard on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let builder = match form
        .into_builder()
        .and_then(|builder| builder.validate().map(|()| builder))
    {
        Ok(builder) => builder,
        Err(error) => {
            tracing::debug!("rejected new record: {error}");
            return error.into_alert_response();
        }
    };

    let mut ledger = match lock_ledger(&state.ledger) {
        Ok(ledger) => ledger,
        Err(error) => return error.into_alert_response(),
    };

    tracing::info!(
        "adding {} of {} on {} to {}",
        builder.kind.display_name().to_lowercase(),
        builder.amount,
        builder.date,
        builder.category
    );
    *ledger = ledger.append(builder);

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
