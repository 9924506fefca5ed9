//! The category options offered for each kind of record.

use axum::{extract::Query, response::Html};
use maud::{Markup, html};
use serde::Deserialize;

use crate::ledger::TransactionKind;

/// The option that lets the user type in their own category.
pub const OTHER_CATEGORY: &str = "Other";

/// The query for [get_category_options].
#[derive(Debug, Deserialize)]
pub struct CategoryOptionsQuery {
    /// The kind selected in the form.
    pub kind: TransactionKind,
}

/// The `<option>` elements for the presets of `kind`, followed by [OTHER_CATEGORY].
pub(crate) fn category_options_view(kind: TransactionKind) -> Markup {
    html! {
        @for category in kind.preset_categories() {
            option value=(category) { (category) }
        }

        option value=(OTHER_CATEGORY) { (OTHER_CATEGORY) }
    }
}

/// Responds with the category options for the kind in the query, for swapping
/// into the category select when the kind changes.
pub async fn get_category_options(Query(query): Query<CategoryOptionsQuery>) -> Html<String> {
    Html(category_options_view(query.kind).into_string())
}

#[cfg(test)]
mod tests {
    use axum::extract::Query;
    use scraper::{Html, Selector};

    use crate::{
        ledger::TransactionKind,
        transaction::categories::{CategoryOptionsQuery, get_category_options},
    };

    async fn option_values(kind: TransactionKind) -> Vec<String> {
        let html = get_category_options(Query(CategoryOptionsQuery { kind })).await;
        // Options outside a select are dropped by the parser.
        let html = Html::parse_fragment(&format!("<select>{}</select>", html.0));

        html.select(&Selector::parse("option").unwrap())
            .filter_map(|option| option.value().attr("value").map(str::to_owned))
            .collect()
    }

    #[tokio::test]
    async fn income_options_are_income_presets_and_other() {
        let values = option_values(TransactionKind::Income).await;

        assert_eq!(
            values,
            vec!["Salário", "Investimentos", "Vendas", "Freelance", "Other"]
        );
    }

    #[tokio::test]
    async fn expense_options_start_with_housing() {
        let values = option_values(TransactionKind::Expense).await;

        assert_eq!(values.first().map(String::as_str), Some("Moradia"));
        assert_eq!(values.len(), TransactionKind::Expense.preset_categories().len() + 1);
    }

    #[test]
    fn query_accepts_form_labels() {
        let query: CategoryOptionsQuery = serde_urlencoded::from_str("kind=Receita").unwrap();

        assert_eq!(query.kind, TransactionKind::Income);
    }
}
