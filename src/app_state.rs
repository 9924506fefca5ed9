//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{Error, ledger::Ledger};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,

    /// The records of the current session.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl AppState {
    /// Create a new [AppState] with an empty ledger.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "America/Sao_Paulo".
    pub fn new(local_timezone: &str) -> Self {
        Self::with_ledger(local_timezone, Ledger::new())
    }

    /// Create a new [AppState] starting from `ledger`.
    pub fn with_ledger(local_timezone: &str, ledger: Ledger) -> Self {
        Self {
            local_timezone: local_timezone.to_owned(),
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }
}

/// Lock the shared ledger, logging and converting a poisoned lock.
pub(crate) fn lock_ledger(ledger: &Mutex<Ledger>) -> Result<MutexGuard<'_, Ledger>, Error> {
    ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::LedgerLockError)
}
