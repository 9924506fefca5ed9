//! Defines the transaction record and the builder used to create one.

use time::{Date, macros::date};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    Error,
    ledger::{Amount, TransactionKind},
};

/// The earliest date a record may have, spreadsheets cannot store earlier dates.
pub const MIN_DATE: Date = date!(1900 - 01 - 01);

/// The latest date a record may have.
pub const MAX_DATE: Date = date!(9999 - 12 - 31);

/// Whether `date` falls within [MIN_DATE] and [MAX_DATE].
pub fn is_supported_date(date: Date) -> bool {
    (MIN_DATE..=MAX_DATE).contains(&date)
}

/// The identity the ledger assigns to a record when it is inserted.
///
/// Identities are never reused within a ledger, so two records with the same
/// date, description and amount can still be told apart.
pub type RecordId = u64;

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Records are only created by the [Ledger](crate::ledger::Ledger) from a
/// [TransactionBuilder].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// The ID assigned by the ledger.
    pub id: RecordId,
    /// When the transaction happened.
    pub date: Date,
    /// Whether money was spent or earned.
    pub kind: TransactionKind,
    /// The title cased category, e.g. "Moradia".
    pub category: String,
    /// The title cased description, e.g. "Aluguel".
    pub description: String,
    /// How much money was spent or earned, never negative.
    pub amount: Amount,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder::new] for discoverability.
    pub fn build(
        date: Date,
        kind: TransactionKind,
        category: &str,
        description: &str,
        amount: Amount,
    ) -> TransactionBuilder {
        TransactionBuilder::new(date, kind, category, description, amount)
    }

    /// The record without its identity, e.g. for comparing records across ledgers.
    pub fn to_builder(&self) -> TransactionBuilder {
        TransactionBuilder {
            date: self.date,
            kind: self.kind,
            category: self.category.clone(),
            description: self.description.clone(),
            amount: self.amount,
        }
    }
}

/// The fields of a [Transaction] before the ledger assigns it an ID.
///
/// Text fields are trimmed and title cased on construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransactionBuilder {
    /// When the transaction happened.
    pub date: Date,
    /// Whether money was spent or earned.
    pub kind: TransactionKind,
    /// The category, normalized with [title_case].
    pub category: String,
    /// The description, normalized with [title_case].
    pub description: String,
    /// How much money was spent or earned.
    pub amount: Amount,
}

impl TransactionBuilder {
    /// Create a builder, normalizing `category` and `description`.
    pub fn new(
        date: Date,
        kind: TransactionKind,
        category: &str,
        description: &str,
        amount: Amount,
    ) -> Self {
        Self {
            date,
            kind,
            category: title_case(category),
            description: title_case(description),
            amount,
        }
    }

    /// Check the fields a person has to fill in by hand.
    ///
    /// # Errors
    /// Returns [Error::Validation] if the category or description is empty,
    /// if the amount is not above zero or if the date cannot be exported.
    pub fn validate(&self) -> Result<(), Error> {
        if self.category.is_empty() {
            return Err(Error::Validation("Category cannot be empty.".to_owned()));
        }

        if self.description.is_empty() {
            return Err(Error::Validation(
                "Description cannot be empty.".to_owned(),
            ));
        }

        if !self.amount.is_positive() {
            return Err(Error::Validation(
                "Amount must be greater than zero.".to_owned(),
            ));
        }

        if !is_supported_date(self.date) {
            return Err(Error::Validation(format!(
                "Date must be between {MIN_DATE} and {MAX_DATE}."
            )));
        }

        Ok(())
    }
}

/// Trim `text` and capitalize the first letter of each word, lower casing the rest.
///
/// Words are found with Unicode word boundaries, so accented letters are
/// handled and neither an apostrophe inside a word ("d'água" becomes "D'água")
/// nor a leading digit ("2nd" stays "2nd") starts a new word.
pub fn title_case(text: &str) -> String {
    text.trim()
        .split_word_bounds()
        .map(|segment| {
            let mut chars = segment.chars();

            match chars.next() {
                Some(first) if first.is_alphabetic() => {
                    first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
                }
                _ => segment.to_lowercase(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use time::{Date, Month, macros::date};

    use crate::{
        Error,
        ledger::{Amount, MAX_DATE, MIN_DATE, Transaction, TransactionKind, title_case},
    };

    #[test]
    fn title_cases_words() {
        assert_eq!(title_case("  cartão de CRÉDITO "), "Cartão De Crédito");
        assert_eq!(title_case("aluguel"), "Aluguel");
        assert_eq!(title_case("SALÁRIO"), "Salário");
        assert_eq!(title_case("conta   de luz"), "Conta   De Luz");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn title_case_keeps_words_whole() {
        assert_eq!(title_case("caixa d'água"), "Caixa D'água");
        assert_eq!(title_case("2nd parcela"), "2nd Parcela");
        assert_eq!(title_case("pão-de-queijo"), "Pão-De-Queijo");
    }

    #[test]
    fn builder_normalizes_text() {
        let builder = Transaction::build(
            date!(2024 - 01 - 05),
            TransactionKind::Expense,
            " moradia",
            "aluguel  ",
            Amount::from_cents(120_000),
        );

        assert_eq!(builder.category, "Moradia");
        assert_eq!(builder.description, "Aluguel");
    }

    #[test]
    fn validate_accepts_complete_record() {
        let builder = Transaction::build(
            date!(2024 - 01 - 05),
            TransactionKind::Expense,
            "Moradia",
            "Aluguel",
            Amount::from_cents(1),
        );

        assert_eq!(builder.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_missing_fields() {
        let valid = Transaction::build(
            date!(2024 - 01 - 05),
            TransactionKind::Expense,
            "Moradia",
            "Aluguel",
            Amount::from_cents(100),
        );

        let mut no_category = valid.clone();
        no_category.category = String::new();
        assert!(matches!(no_category.validate(), Err(Error::Validation(_))));

        let mut no_description = valid.clone();
        no_description.description = String::new();
        assert!(matches!(
            no_description.validate(),
            Err(Error::Validation(_))
        ));

        let mut zero_amount = valid;
        zero_amount.amount = Amount::ZERO;
        assert!(matches!(zero_amount.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn validate_checks_date_range() {
        let on = |date| {
            Transaction::build(
                date,
                TransactionKind::Income,
                "Salário",
                "Empresa",
                Amount::from_cents(100),
            )
        };

        assert_eq!(on(MIN_DATE).validate(), Ok(()));
        assert_eq!(on(MAX_DATE).validate(), Ok(()));
        assert!(matches!(
            on(date!(1899 - 12 - 31)).validate(),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            on(Date::from_calendar_date(-1, Month::June, 15).unwrap()).validate(),
            Err(Error::Validation(_))
        ));
    }
}
