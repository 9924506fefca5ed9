//! Defines the page to display for an internal server error.
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// An error page with a short description of what went wrong and how to fix it.
pub struct InternalServerError<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

impl InternalServerError<'_> {
    fn into_html(self) -> Html<String> {
        Html(error_view("Internal Server Error", "500", self.description, self.fix).into_string())
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.into_html()).into_response()
    }
}

/// Route handler for the generic error page that htmx requests get redirected to.
pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use scraper::Selector;

    use crate::{
        internal_server_error::{InternalServerError, get_internal_server_error_page},
        test_utils::{assert_valid_html, parse_html_document},
    };

    #[tokio::test]
    async fn renders_default_page() {
        let response = get_internal_server_error_page().await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
    }

    #[tokio::test]
    async fn shows_description_and_fix() {
        let response = InternalServerError {
            description: "Export Failed",
            fix: "Please try again.",
        }
        .into_response();

        let html = parse_html_document(response).await;
        let text: String = html
            .select(&Selector::parse("section").unwrap())
            .flat_map(|section| section.text())
            .collect();
        assert!(text.contains("Export Failed"), "got {text:?}");
        assert!(text.contains("Please try again."), "got {text:?}");
    }
}
