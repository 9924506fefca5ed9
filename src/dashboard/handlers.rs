//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard for a month
//! - HTML view functions for rendering the dashboard UI
//! - State and query types used by the handler

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    app_state::lock_ledger,
    dashboard::{
        cards::summary_cards_view,
        charts::{DashboardChart, charts_script, expenses_pie_chart},
        tables::records_table_view,
    },
    endpoints::{self, with_query},
    export::ExportQuery,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE, ECHARTS_SCRIPT, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, HeadElement, base, link,
    },
    ledger::{
        Ledger, MonthFilter, Summary, Transaction, available_months, expense_by_category,
        filter_by_month, sorted_for_display, summarize,
    },
    navigation::NavBar,
    spreadsheet::ExportFormat,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The records of the current session.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// The query string of the dashboard page.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DashboardQuery {
    /// The selected month as "MM/YYYY", or "All". Missing means "All".
    pub month: Option<String>,
}

/// Holds all the data needed to render the dashboard for one month filter.
struct DashboardData {
    filter: MonthFilter,
    months: Vec<MonthFilter>,
    summary: Summary,
    chart: Option<DashboardChart>,
    records: Vec<Transaction>,
}

/// Display the cards, chart and records table for the month in the query.
///
/// A month that cannot be parsed, or that has no records, falls back to
/// showing every record.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let records = lock_ledger(&state.ledger)?.records().to_vec();

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    if records.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar).into_response());
    }

    let data = build_dashboard_data(&records, query.month.as_deref());

    Ok(dashboard_view(nav_bar, &data).into_response())
}

/// Picks the filter for `requested` from the months that have records.
fn resolve_filter(requested: Option<&str>, months: &[MonthFilter]) -> MonthFilter {
    let Some(requested) = requested else {
        return MonthFilter::All;
    };

    match requested.parse::<MonthFilter>() {
        Ok(filter) if months.contains(&filter) => filter,
        Ok(filter) => {
            tracing::debug!("no records in {filter}, showing all records");
            MonthFilter::All
        }
        Err(error) => {
            tracing::debug!("invalid month {requested:?} in dashboard query: {error}");
            MonthFilter::All
        }
    }
}

fn build_dashboard_data(records: &[Transaction], requested_month: Option<&str>) -> DashboardData {
    let months = available_months(records);
    let filter = resolve_filter(requested_month, &months);
    let filtered = filter_by_month(records, &filter);

    let expenses = expense_by_category(&filtered);
    let chart = (!expenses.is_empty()).then(|| DashboardChart {
        id: "expenses-chart",
        options: expenses_pie_chart(&expenses).to_string(),
    });

    DashboardData {
        filter,
        months,
        summary: summarize(&filtered),
        chart,
        records: sorted_for_display(&filtered),
    }
}

/// Renders the dashboard page when the ledger has no records.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "manually");
    let import_transaction_link = link(endpoints::IMPORT_VIEW, "importing a spreadsheet");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Your summary will show up here once you add some records.
                You can add records " (new_transaction_link) " or
                by " (import_transaction_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

fn month_selector_view(filter: MonthFilter, months: &[MonthFilter]) -> Markup {
    html! {
        form
            id="month-filter"
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            class="flex items-center gap-2"
        {
            label for="month" class=(FORM_LABEL_STYLE) { "Month" }

            select
                id="month"
                name="month"
                onchange="this.form.submit()"
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for month in months {
                    option value=(month) selected[*month == filter] { (month) }
                }
            }
        }
    }
}

fn export_links_view(filter: MonthFilter) -> Markup {
    let export_url = |format: ExportFormat| {
        with_query(
            endpoints::EXPORT,
            &ExportQuery {
                month: Some(filter.to_string()),
                format: Some(format),
            },
        )
    };

    html! {
        div id="export-links" class="flex gap-2"
        {
            a href=(export_url(ExportFormat::Xlsx)) download class=(BUTTON_SECONDARY_STYLE)
            {
                "Export Excel"
            }

            a href=(export_url(ExportFormat::Csv)) download class=(BUTTON_SECONDARY_STYLE)
            {
                "Export CSV"
            }
        }
    }
}

/// Renders the main dashboard page with the month filter, cards, chart and table.
fn dashboard_view(nav_bar: NavBar, data: &DashboardData) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            div class="w-full flex flex-wrap justify-between items-center gap-4 mb-6"
            {
                (month_selector_view(data.filter, &data.months))
                (export_links_view(data.filter))
            }

            (summary_cards_view(&data.summary))

            section id="charts" class="w-full mx-auto mb-6"
            {
                @match &data.chart {
                    Some(chart) => {
                        div id=(chart.id) class="min-h-[380px] rounded dark:bg-gray-100" {}
                    }
                    None => {
                        p class="text-center text-gray-600 dark:text-gray-400"
                        {
                            "No expenses in this period."
                        }
                    }
                }
            }

            section id="records" class="w-full mb-6"
            {
                h3 class="text-xl font-semibold mb-4" { "Records" }

                (records_table_view(&data.records))
            }

            button
                type="button"
                hx-post=(endpoints::RESET_TRANSACTIONS)
                hx-confirm="Delete every record? This cannot be undone."
                hx-target-error="#alert-container"
                hx-swap="none"
                class=(BUTTON_DELETE_STYLE)
            {
                "Clear all records"
            }
        }
    );

    let mut head_elements = Vec::new();
    if let Some(chart) = data.chart.as_ref() {
        head_elements.push(HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()));
        head_elements.push(charts_script(std::slice::from_ref(chart)));
    }

    base("Dashboard", &head_elements, &content)
}
