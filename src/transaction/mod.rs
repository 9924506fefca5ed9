//! Route handlers for adding and removing records.
//!
//! This module contains:
//! - The page and endpoint for adding a record by hand
//! - The endpoints for deleting one record or every record
//! - The category options that follow the selected kind

mod categories;
mod create_endpoint;
mod create_page;
mod delete_endpoint;

pub use categories::get_category_options;
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
pub use delete_endpoint::{delete_transaction_endpoint, reset_transactions_endpoint};
