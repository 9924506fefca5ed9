//! The metric cards at the top of the dashboard.

use maud::{Markup, html};

use crate::{html::format_currency, ledger::Summary};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-5 shadow-md text-center";

/// Renders the income, expenses and net balance cards.
pub(super) fn summary_cards_view(summary: &Summary) -> Markup {
    let net_style = if summary.net.is_negative() {
        "text-red-600 dark:text-red-400"
    } else {
        "text-blue-600 dark:text-blue-400"
    };

    html! {
        section id="summary-cards" class="w-full grid grid-cols-1 md:grid-cols-3 gap-4 mb-6"
        {
            (card("income-card", "Income", &format_currency(summary.income), "text-green-600 dark:text-green-400"))
            (card("expenses-card", "Expenses", &format_currency(summary.expenses), "text-red-600 dark:text-red-400"))
            (card("net-card", "Net Balance", &format_currency(summary.net), net_style))
        }
    }
}

fn card(id: &str, label: &str, value: &str, value_style: &str) -> Markup {
    html! {
        div id=(id) class=(CARD_STYLE)
        {
            div class="text-sm font-semibold uppercase text-gray-600 dark:text-gray-400 mb-2"
            {
                (label)
            }

            div class={ "text-2xl font-bold " (value_style) } { (value) }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::ledger::{Amount, Summary};

    use super::summary_cards_view;

    fn card_value(html: &Html, id: &str) -> String {
        let selector = Selector::parse(&format!("#{id} div:last-child")).unwrap();
        html.select(&selector)
            .next()
            .unwrap_or_else(|| panic!("card {id} not found"))
            .text()
            .collect()
    }

    #[test]
    fn shows_the_three_totals() {
        let summary = Summary {
            income: Amount::from_cents(500_000),
            expenses: Amount::from_cents(120_000),
            net: Amount::from_cents(380_000),
        };

        let html = Html::parse_fragment(&summary_cards_view(&summary).into_string());

        assert_eq!(card_value(&html, "income-card"), "R$ 5,000.00");
        assert_eq!(card_value(&html, "expenses-card"), "R$ 1,200.00");
        assert_eq!(card_value(&html, "net-card"), "R$ 3,800.00");
    }

    #[test]
    fn negative_balance_is_red() {
        let summary = Summary {
            income: Amount::ZERO,
            expenses: Amount::from_cents(350),
            net: Amount::from_cents(-350),
        };

        let html = Html::parse_fragment(&summary_cards_view(&summary).into_string());

        let value = html
            .select(&Selector::parse("#net-card div:last-child").unwrap())
            .next()
            .unwrap();
        assert!(
            value
                .value()
                .attr("class")
                .unwrap_or_default()
                .contains("text-red-600")
        );
        assert_eq!(value.text().collect::<String>(), "-R$ 3.50");
    }
}
