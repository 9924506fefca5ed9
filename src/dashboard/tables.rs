//! The records table on the dashboard.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        format_currency,
    },
    ledger::{Transaction, TransactionKind},
};

/// Renders `records` in the order given, each row with a delete button.
pub(super) fn records_table_view(records: &[Transaction]) -> Markup {
    html! {
        div class="relative overflow-x-auto shadow-md rounded-lg"
        {
            table id="records-table" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Kind" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                    }
                }

                tbody
                {
                    @for record in records {
                        (record_row(record))
                    }
                }
            }
        }
    }
}

fn record_row(record: &Transaction) -> Markup {
    let amount_style = match record.kind {
        TransactionKind::Income => "text-green-600 dark:text-green-400",
        TransactionKind::Expense => "text-red-600 dark:text-red-400",
    };
    let delete_url = format_endpoint(endpoints::DELETE_TRANSACTION, record.id);

    html! {
        tr class=(TABLE_ROW_STYLE) data-record-id=(record.id)
        {
            td class=(TABLE_CELL_STYLE) { (record.date) }
            td class=(TABLE_CELL_STYLE) { (record.kind.display_name()) }
            td class=(TABLE_CELL_STYLE) { (record.category) }
            td class=(TABLE_CELL_STYLE) { (record.description) }
            td class={ (TABLE_CELL_STYLE) " text-right " (amount_style) }
            {
                (format_currency(record.amount))
            }
            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    hx-delete=(delete_url)
                    hx-confirm={ "Delete \"" (record.description) "\"?" }
                    hx-swap="none"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}
