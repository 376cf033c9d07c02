mod impls;

use std::fmt;

use chrono::NaiveDate;
use fastnum::D128;
use serde::{Deserialize, Serialize};

/// Category that every income record carries, whatever the caller submitted.
pub const INCOME_CATEGORY: &str = "Income";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionId(u32);

impl TransactionId {
    pub const fn new(id: u32) -> Self {
        TransactionId(id)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Income,
    Expense,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Income => f.write_str("Income"),
            Kind::Expense => f.write_str("Expense"),
        }
    }
}

/// A single dated income or expense record.
///
/// Records are values: an edit replaces the whole record. Use [`Transaction::income`] and
/// [`Transaction::expense`] to build one, which keeps the income category fixed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "TransactionRow", into = "TransactionRow")]
pub struct Transaction {
    date: NaiveDate,
    kind: Kind,
    amount: D128,
    category: String,
    note: String,
}

impl Transaction {
    pub fn income(date: NaiveDate, amount: D128) -> Self {
        Transaction {
            date,
            kind: Kind::Income,
            amount,
            category: INCOME_CATEGORY.to_string(),
            note: String::new(),
        }
    }

    pub fn expense(date: NaiveDate, amount: D128, category: &str, note: &str) -> Self {
        Transaction {
            date,
            kind: Kind::Expense,
            amount,
            category: category.trim().to_string(),
            note: note.trim().to_string(),
        }
    }

    /// Builds a record of either kind, as the edit form does. Income drops the submitted category.
    pub fn new(date: NaiveDate, kind: Kind, amount: D128, category: &str, note: &str) -> Self {
        match kind {
            Kind::Income => Transaction {
                note: note.trim().to_string(),
                ..Transaction::income(date, amount)
            },
            Kind::Expense => Transaction::expense(date, amount, category, note),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn amount(&self) -> D128 {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::of(self.date)
    }
}

/// Identifies a calendar month. Orders year first, so sorting is chronological.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Returns `None` unless `month` is in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12)
            .contains(&month)
            .then_some(MonthKey { year, month })
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month, self.year)
    }
}

/// A helper struct to facilitate CSV (de)serialization of transactions.
///
/// Field order is the file's column order.
#[derive(Serialize, Deserialize, Debug)]
struct TransactionRow {
    pub date: String,
    pub r#type: Kind,
    pub amount: String,
    pub category: String,
    #[serde(default)]
    pub note: String,
}

/// Column names of the persisted file, in order.
pub const HEADER: [&str; 5] = ["date", "type", "amount", "category", "note"];
