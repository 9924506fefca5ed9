//! Defines the route handler for the page for creating a new record.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        currency_input_styles, loading_spinner,
    },
    ledger::TransactionKind,
    navigation::NavBar,
    timezone::local_today,
    transaction::categories::category_options_view,
};

fn create_transaction_view(today: Date) -> Markup {
    let create_transaction_route = endpoints::TRANSACTIONS_API;
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let spinner = loading_spinner();
    let default_kind = TransactionKind::Expense;

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(create_transaction_route)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "New Record" }

                div
                {
                    label
                        for="date"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Date"
                    }

                    input
                        name="date"
                        id="date"
                        type="date"
                        required
                        value=(today)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                fieldset
                {
                    legend class=(FORM_LABEL_STYLE) { "Kind" }

                    div class=(FORM_RADIO_GROUP_STYLE)
                    {
                        @for kind in TransactionKind::ALL {
                            @let id = format!("kind-{}", kind.display_name().to_lowercase());

                            div class="flex-1 flex"
                            {
                                input
                                    type="radio"
                                    name="kind"
                                    id=(id)
                                    value=(kind.label())
                                    checked[kind == default_kind]
                                    required
                                    hx-get=(endpoints::CATEGORY_OPTIONS)
                                    hx-target="#category"
                                    hx-swap="innerHTML"
                                    class=(FORM_RADIO_INPUT_STYLE);

                                label for=(id) class=(FORM_RADIO_LABEL_STYLE)
                                {
                                    (kind.display_name())
                                }
                            }
                        }
                    }
                }

                div
                {
                    label
                        for="category"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Category"
                    }

                    select
                        name="category"
                        id="category"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        (category_options_view(default_kind))
                    }
                }

                div
                {
                    label
                        for="custom_category"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Custom category"
                    }

                    input
                        name="custom_category"
                        id="custom_category"
                        type="text"
                        placeholder="Used when \"Other\" is selected"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label
                        for="description"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Description"
                    }

                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="Description"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label
                        for="amount"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Amount"
                    }

                    // w-full needed to ensure input takes the full width when prefilled with a value
                    div class="input-wrapper w-full"
                    {
                        input
                            name="amount"
                            id="amount"
                            type="number"
                            min="0.01"
                            step="0.01"
                            placeholder="0.00"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Add Record"
                }
            }
        }
    };

    base("New Record", &[currency_input_styles()], &content)
}

/// The state needed for the new record page.
#[derive(Debug, Clone)]
pub struct CreateTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for creating a record, with the date set to today.
pub async fn get_create_transaction_page(
    State(state): State<CreateTransactionPageState>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    Ok(create_transaction_view(today).into_response())
}
