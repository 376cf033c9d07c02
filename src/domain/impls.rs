use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::{
    domain::{MonthKey, Transaction, TransactionRow},
    error::LedgerError,
    parse::{format_amount, format_date, parse_stored_amount, parse_stored_date},
};

// Stored rows are trusted: the amount only has to be a number, positivity is not re-checked.
impl TryFrom<TransactionRow> for Transaction {
    type Error = LedgerError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Transaction {
            date: parse_stored_date(&row.date)?,
            kind: row.r#type,
            amount: parse_stored_amount(&row.amount)?,
            category: row.category,
            note: row.note,
        })
    }
}

impl From<Transaction> for TransactionRow {
    fn from(tx: Transaction) -> Self {
        TransactionRow {
            date: format_date(tx.date),
            r#type: tx.kind,
            amount: format_amount(tx.amount),
            category: tx.category,
            note: tx.note,
        }
    }
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl FromStr for MonthKey {
    type Err = LedgerError;

    /// Parses the `MM-YYYY` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::InvalidMonth {
            input: s.to_string(),
        };

        let (month, year) = s.trim().split_once('-').ok_or_else(invalid)?;
        if month.len() != 2 || year.len() != 4 {
            return Err(invalid());
        }

        let month = month.parse::<u32>().map_err(|_| invalid())?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}
