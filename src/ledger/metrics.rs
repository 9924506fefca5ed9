//! Aggregates over a slice of transactions for the dashboard cards, chart and table.

use std::collections::{BTreeMap, BTreeSet};

use crate::ledger::{Amount, MonthFilter, Period, Transaction, TransactionKind};

/// The three values shown on the metric cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Total income.
    pub income: Amount,
    /// Total expenses.
    pub expenses: Amount,
    /// Income minus expenses.
    pub net: Amount,
}

/// The sum of the amounts of the records of `kind`.
pub fn total_by_kind(records: &[Transaction], kind: TransactionKind) -> Amount {
    records
        .iter()
        .filter(|record| record.kind == kind)
        .map(|record| record.amount)
        .sum()
}

/// Total income minus total expenses.
pub fn net_balance(records: &[Transaction]) -> Amount {
    total_by_kind(records, TransactionKind::Income) - total_by_kind(records, TransactionKind::Expense)
}

/// Compute income, expenses and net balance in one pass.
pub fn summarize(records: &[Transaction]) -> Summary {
    let (income, expenses) =
        records
            .iter()
            .fold((Amount::ZERO, Amount::ZERO), |(income, expenses), record| {
                match record.kind {
                    TransactionKind::Income => (income + record.amount, expenses),
                    TransactionKind::Expense => (income, expenses + record.amount),
                }
            });

    Summary {
        income,
        expenses,
        net: income - expenses,
    }
}

/// Total expenses per category. Income records are ignored.
pub fn expense_by_category(records: &[Transaction]) -> BTreeMap<String, Amount> {
    let mut totals: BTreeMap<String, Amount> = BTreeMap::new();

    for record in records
        .iter()
        .filter(|record| record.kind == TransactionKind::Expense)
    {
        *totals.entry(record.category.clone()).or_default() += record.amount;
    }

    totals
}

/// The options for the month selector: [MonthFilter::All] first, then every
/// month that has a record, latest first.
pub fn available_months(records: &[Transaction]) -> Vec<MonthFilter> {
    let periods: BTreeSet<Period> = records
        .iter()
        .map(|record| Period::of(record.date))
        .collect();

    std::iter::once(MonthFilter::All)
        .chain(periods.into_iter().rev().map(MonthFilter::Month))
        .collect()
}

/// The records `filter` lets through, in their original order.
pub fn filter_by_month(records: &[Transaction], filter: &MonthFilter) -> Vec<Transaction> {
    records
        .iter()
        .filter(|record| filter.matches(record.date))
        .cloned()
        .collect()
}

/// The records sorted latest first. Records on the same date keep their order.
pub fn sorted_for_display(records: &[Transaction]) -> Vec<Transaction> {
    let mut sorted = records.to_vec();
    // `sort_by` is stable.
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}
