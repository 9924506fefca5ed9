//! Importing records from XLSX and CSV spreadsheets.

mod import_endpoint;
mod import_page;

pub use import_endpoint::import_transactions;
pub use import_page::get_import_page;
