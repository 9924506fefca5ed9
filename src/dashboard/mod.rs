//! Dashboard module
//!
//! Shows the metric cards, the expense breakdown chart and the records
//! table for the selected month.

mod cards;
mod charts;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
