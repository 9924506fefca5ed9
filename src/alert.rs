//! Alert messages shown to the user after an htmx request.
//!
//! Alerts are swapped out-of-band into the `#alert-container` element that
//! [base](crate::html::base) adds to every page, so a handler can return one
//! regardless of what the request targets.

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// An alert message with a title and optional details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// The operation worked.
    Success { message: String, details: String },
    /// Nothing went wrong, but nothing happened either.
    Warning { message: String, details: String },
    /// The operation failed.
    Error { message: String, details: String },
    /// The operation failed, no details needed.
    ErrorSimple { message: String },
}

#[derive(Clone, Copy)]
enum Tone {
    Success,
    Warning,
    Error,
}

impl Tone {
    fn style(self) -> &'static str {
        match self {
            Tone::Success => {
                "flex items-start gap-3 p-4 mb-4 rounded-lg shadow-lg border \
                text-green-800 bg-green-50 border-green-300 \
                dark:bg-gray-800 dark:text-green-400 dark:border-green-800"
            }
            Tone::Warning => {
                "flex items-start gap-3 p-4 mb-4 rounded-lg shadow-lg border \
                text-yellow-800 bg-yellow-50 border-yellow-300 \
                dark:bg-gray-800 dark:text-yellow-300 dark:border-yellow-800"
            }
            Tone::Error => {
                "flex items-start gap-3 p-4 mb-4 rounded-lg shadow-lg border \
                text-red-800 bg-red-50 border-red-300 \
                dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
            }
        }
    }
}

impl Alert {
    fn parts(&self) -> (Tone, &str, &str) {
        match self {
            Alert::Success { message, details } => (Tone::Success, message, details),
            Alert::Warning { message, details } => (Tone::Warning, message, details),
            Alert::Error { message, details } => (Tone::Error, message, details),
            Alert::ErrorSimple { message } => (Tone::Error, message, ""),
        }
    }

    /// Render the alert as an out-of-band swap for the alert container.
    pub fn into_markup(self) -> Markup {
        let (tone, message, details) = self.parts();

        html! {
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div role="alert" class=(tone.style())
                {
                    div class="flex-1"
                    {
                        p class="font-semibold" { (message) }

                        @if !details.is_empty() {
                            p class="text-sm" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        class="ms-auto text-lg leading-none bg-transparent border-none cursor-pointer"
                        onclick="this.closest('[role=alert]').remove()"
                    {
                        "×"
                    }
                }
            }
        }
    }

    /// Render the alert as an HTML response body.
    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}
