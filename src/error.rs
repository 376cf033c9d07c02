use std::path::PathBuf;

use thiserror::Error;

use crate::domain::TransactionId;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid amount {input:?}: {reason}")]
    InvalidAmount { input: String, reason: &'static str },

    #[error("Invalid date {input:?}: expected a real calendar date formatted as MM-DD-YYYY")]
    InvalidDate { input: String },

    #[error("Invalid month {input:?}: expected MM-YYYY or All")]
    InvalidMonth { input: String },

    #[error("No transaction with id {0}")]
    NotFound(TransactionId),

    #[error("Unable to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to read ledger from {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl LedgerError {
    /// True for rejected user input, which never changes the ledger.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidAmount { .. }
                | LedgerError::InvalidDate { .. }
                | LedgerError::InvalidMonth { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
