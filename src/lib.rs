//! A personal income/expense ledger with month filtering and CSV persistence.
//!
//! [`Session`] is the entry point for a presentation shell: it owns the [`Ledger`], keeps the
//! [`MonthIndex`] and selected month current, and reads and writes the data file through a
//! [`Store`].

pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod months;
pub mod parse;
pub mod session;
pub mod store;
pub mod totals;

pub use config::Config;
pub use domain::{Kind, MonthKey, Transaction, TransactionId};
pub use error::{LedgerError, Result};
pub use ledger::{Entry, Ledger};
pub use months::{Direction, MonthIndex, MonthSelection};
pub use session::{EditDraft, Session, Status};
pub use store::Store;
pub use totals::{Totals, totals};
