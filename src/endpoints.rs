//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard with the cards, chart and records table.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for adding a new record.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page for importing records from a spreadsheet.
pub const IMPORT_VIEW: &str = "/transactions/import";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to create a record.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to delete a single record.
pub const DELETE_TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to delete every record.
pub const RESET_TRANSACTIONS: &str = "/api/transactions/reset";
/// The route for the category options of a transaction kind.
pub const CATEGORY_OPTIONS: &str = "/api/categories";
/// The route to upload a spreadsheet for importing records.
pub const IMPORT: &str = "/api/import";
/// The route to download the current view as a spreadsheet.
pub const EXPORT: &str = "/api/export";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: u64) -> String {
    let Some(start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let end = endpoint_path[start..]
        .find('}')
        .map_or(endpoint_path.len(), |offset| start + offset + 1);

    format!("{}{id}{}", &endpoint_path[..start], &endpoint_path[end..])
}

/// Append `query` to `endpoint_path` as a URL encoded query string.
///
/// Returns `endpoint_path` unchanged if `query` serializes to nothing.
pub fn with_query<T: serde::Serialize>(endpoint_path: &str, query: &T) -> String {
    match serde_urlencoded::to_string(query) {
        Ok(query) if !query.is_empty() => format!("{endpoint_path}?{query}"),
        Ok(_) => endpoint_path.to_owned(),
        Err(error) => {
            tracing::error!("could not encode query for {endpoint_path}: {error}");
            endpoint_path.to_owned()
        }
    }
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::{format_endpoint, with_query};

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::NEW_TRANSACTION_VIEW);
        assert_endpoint_is_valid_uri(endpoints::IMPORT_VIEW);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);

        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_API);
        assert_endpoint_is_valid_uri(endpoints::DELETE_TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::RESET_TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::CATEGORY_OPTIONS);
        assert_endpoint_is_valid_uri(endpoints::IMPORT);
        assert_endpoint_is_valid_uri(endpoints::EXPORT);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint("/hello/{world_id}", 1);

        assert_eq!(formatted_path, "/hello/1");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint("/hello/world", 1);

        assert_eq!(formatted_path, "/hello/world");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/hello/{world}/bye", 12);

        assert_eq!(formatted_path, "/hello/12/bye");
    }

    #[test]
    fn appends_encoded_query() {
        let url = with_query(endpoints::EXPORT, &[("month", "01/2024"), ("format", "xlsx")]);

        assert_eq!(url, "/api/export?month=01%2F2024&format=xlsx");
        assert_endpoint_is_valid_uri(&url);
    }

    #[test]
    fn skips_empty_query() {
        let empty: [(&str, &str); 0] = [];

        assert_eq!(with_query(endpoints::DASHBOARD_VIEW, &empty), "/dashboard");
    }
}
