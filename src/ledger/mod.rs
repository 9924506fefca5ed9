//! The ledger of income and expense records and the metrics computed from it.
//!
//! Nothing in this module knows about HTTP or HTML, the route handlers lock
//! the shared [Ledger], swap in the value returned by a mutation and render
//! views from the metrics.

mod amount;
mod kind;
mod metrics;
mod period;
pub(crate) mod schema;
mod store;
mod transaction;

pub use amount::Amount;
pub use kind::TransactionKind;
pub use metrics::{
    Summary, available_months, expense_by_category, filter_by_month, net_balance,
    sorted_for_display, summarize, total_by_kind,
};
pub use period::{MonthFilter, Period};
pub use schema::{COLUMNS, CellValue, RecordTable};
pub use store::Ledger;
pub use transaction::{
    MAX_DATE, MIN_DATE, RecordId, Transaction, TransactionBuilder, is_supported_date, title_case,
};
