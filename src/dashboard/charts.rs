//! The expense breakdown chart on the dashboard.
//!
//! The chart is built as an ECharts option object with charming and
//! initialised by a small script once the page has loaded.

use std::collections::BTreeMap;

use charming::{
    Chart,
    component::{Legend, Title},
    element::{JsFunction, Label, Tooltip, Trigger},
    series::Pie,
};
use maud::PreEscaped;

use crate::{html::HeadElement, ledger::Amount};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Generates the script that initialises `charts` once the page has loaded.
///
/// Each chart follows the browser's dark mode setting and resizes with the window.
/// Every `<` in the options is written as `\u003c` so that category names
/// cannot close the inline script element.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    if (!chartDom) return;
                    const chart = echarts.init(chartDom);
                    chart.setOption({});

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
                    }};
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id,
                chart.options.replace('<', "\\u003c")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    HeadElement::ScriptSource(PreEscaped(format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{script_content}\n}});"
    )))
}

/// A donut chart of the share of expenses per category.
pub(super) fn expenses_pie_chart(expenses_by_category: &BTreeMap<String, Amount>) -> Chart {
    let data: Vec<(f64, &str)> = expenses_by_category
        .iter()
        .map(|(category, amount)| (amount.as_f64(), category.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Expenses by category").left("center"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().left("center").bottom(0))
        .series(
            Pie::new()
                .name("Expenses")
                .radius(vec!["40%", "70%"])
                .label(Label::new().show(true).formatter("{b}: {d}%"))
                .data(data),
        )
}

fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('pt-BR', {
              style: 'currency',
              currency: 'BRL'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}
