//! Whether a record is money spent or money earned.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// The two kinds of record in the ledger.
///
/// The wire labels ([TransactionKind::label]) are what gets written to and read
/// from spreadsheets and form values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money spent.
    #[serde(rename = "Despesa")]
    Expense,
    /// Money earned.
    #[serde(rename = "Receita")]
    Income,
}

const EXPENSE_CATEGORIES: [&str; 8] = [
    "Moradia",
    "Alimentação",
    "Transporte",
    "Lazer",
    "Saúde",
    "Educação",
    "Assinaturas",
    "Cartão De Crédito",
];

const INCOME_CATEGORIES: [&str; 4] = ["Salário", "Investimentos", "Vendas", "Freelance"];

impl TransactionKind {
    /// Both kinds, in the order they are offered in the form.
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Expense, TransactionKind::Income];

    /// The label used in spreadsheets and form values.
    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Expense => "Despesa",
            TransactionKind::Income => "Receita",
        }
    }

    /// The label shown in the UI.
    pub fn display_name(self) -> &'static str {
        match self {
            TransactionKind::Expense => "Expense",
            TransactionKind::Income => "Income",
        }
    }

    /// The categories suggested in the form for this kind.
    ///
    /// Custom categories are accepted too, these are only suggestions.
    pub fn preset_categories(self) -> &'static [&'static str] {
        match self {
            TransactionKind::Expense => &EXPENSE_CATEGORIES,
            TransactionKind::Income => &INCOME_CATEGORIES,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    /// Accepts the wire labels and the English names, ignoring case.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let normalized = text.trim().to_lowercase();

        match normalized.as_str() {
            "despesa" | "expense" => Ok(TransactionKind::Expense),
            "receita" | "income" => Ok(TransactionKind::Income),
            _ => Err(Error::InvalidKind(text.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, ledger::TransactionKind};

    #[test]
    fn parses_wire_labels_and_english_names() {
        assert_eq!("Despesa".parse(), Ok(TransactionKind::Expense));
        assert_eq!("RECEITA".parse(), Ok(TransactionKind::Income));
        assert_eq!(" expense ".parse(), Ok(TransactionKind::Expense));
        assert_eq!("Income".parse(), Ok(TransactionKind::Income));
    }

    #[test]
    fn rejects_unknown_kinds() {
        assert_eq!(
            "Transfer".parse::<TransactionKind>(),
            Err(Error::InvalidKind("Transfer".to_owned()))
        );
    }

    #[test]
    fn label_round_trips() {
        for kind in TransactionKind::ALL {
            assert_eq!(kind.label().parse(), Ok(kind));
        }
    }

    #[test]
    fn presets_depend_on_kind() {
        assert!(
            TransactionKind::Expense
                .preset_categories()
                .contains(&"Moradia")
        );
        assert!(
            TransactionKind::Income
                .preset_categories()
                .contains(&"Salário")
        );
        assert!(
            !TransactionKind::Income
                .preset_categories()
                .contains(&"Moradia")
        );
    }
}
