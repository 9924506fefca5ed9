use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_TEXT_INPUT_STYLE, base, loading_spinner},
    ledger::COLUMNS,
    navigation::NavBar,
};

/// The file types the upload input offers.
const ACCEPTED_FILE_TYPES: &str = ".xlsx,.csv,\
    application/vnd.openxmlformats-officedocument.spreadsheetml.sheet,text/csv";

fn import_form_view() -> Markup {
    let import_route = endpoints::IMPORT;
    let spinner = loading_spinner();

    html! {
        form
            hx-post=(import_route)
            enctype="multipart/form-data"
            hx-disabled-elt="#file, #submit-button"
            hx-indicator="#indicator"
            hx-swap="none"
            hx-target-error="#alert-container"
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label
                    for="file"
                    class="block mb-2 text-sm font-medium text-gray-900 dark:text-white"
                {
                    "Choose a spreadsheet to upload"
                }

                input
                    id="file"
                    type="file"
                    name="file"
                    accept=(ACCEPTED_FILE_TYPES)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);

                p class="mt-2 text-sm"
                {
                    "Upload an Excel (.xlsx) or CSV file with the columns "
                    (COLUMNS.join(", "))
                    ". The records are added to the ones you already have."
                }
            }

            button
                type="submit"
                id="submit-button"
                class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator" { (spinner) }
                " Upload File"
            }
        }
    }
}

fn import_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::IMPORT_VIEW).into_html();
    let form = import_form_view();

    let content = html! {
        (nav_bar)

        div
            class="flex flex-col items-center px-6 py-8 mx-auto lg:py-0
            text-gray-900 dark:text-white"
        {
            div class="relative max-w-md"
            {
                (form)
            }
        }
    };

    base("Import Records", &[], &content)
}

/// Route handler for the import page.
pub async fn get_import_page() -> Response {
    import_view().into_response()
}
