//! The in-memory ledger of transactions.
//!
//! Every mutation takes `&self` and returns a new [Ledger], so a failed
//! mutation can never leave the ledger half changed.

use crate::{
    Error,
    ledger::{RecordId, RecordTable, Transaction, TransactionBuilder},
};

/// An ordered collection of transactions, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<Transaction>,
    next_id: RecordId,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// The records in insertion order.
    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    /// The number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record with the given ID, if any.
    pub fn get(&self, id: RecordId) -> Option<&Transaction> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Return a ledger with `builder` added as the last record.
    ///
    /// No validation is done here, callers that take input from a person
    /// should call [TransactionBuilder::validate] first.
    pub fn append(&self, builder: TransactionBuilder) -> Ledger {
        let mut ledger = self.clone();
        ledger.push(builder);
        ledger
    }

    /// Return a ledger with every row of `table` appended in order.
    ///
    /// # Errors
    /// Returns [Error::SchemaMismatch] if `table` is missing a column, or
    /// [Error::InvalidRow] for the first row that cannot be read. Nothing is
    /// merged when an error is returned.
    pub fn bulk_merge(&self, table: &RecordTable) -> Result<Ledger, Error> {
        let builders = table.to_builders()?;

        let mut ledger = self.clone();
        for builder in builders {
            ledger.push(builder);
        }

        Ok(ledger)
    }

    /// Return a ledger without the record at `index` in insertion order.
    ///
    /// # Errors
    /// Returns [Error::IndexOutOfRange] if there is no record at `index`.
    pub fn remove_at(&self, index: usize) -> Result<Ledger, Error> {
        if index >= self.records.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }

        let mut ledger = self.clone();
        ledger.records.remove(index);
        Ok(ledger)
    }

    /// Return a ledger without the record with ID `id`.
    ///
    /// # Errors
    /// Returns [Error::RecordNotFound] if no record has the ID `id`.
    pub fn remove(&self, id: RecordId) -> Result<Ledger, Error> {
        let index = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(Error::RecordNotFound(id))?;

        self.remove_at(index)
    }

    /// Return an empty ledger.
    ///
    /// IDs handed out before the reset are not handed out again.
    pub fn clear(&self) -> Ledger {
        Ledger {
            records: Vec::new(),
            next_id: self.next_id,
        }
    }

    fn push(&mut self, builder: TransactionBuilder) {
        let id = self.next_id;
        self.next_id += 1;

        self.records.push(Transaction {
            id,
            date: builder.date,
            kind: builder.kind,
            category: builder.category,
            description: builder.description,
            amount: builder.amount,
        });
    }
}
