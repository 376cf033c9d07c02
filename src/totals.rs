use fastnum::D128;

use crate::domain::{Kind, Transaction};

/// Income, expense and balance over some view of the ledger. Not rounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub income: D128,
    pub expense: D128,
    pub balance: D128,
}

pub fn totals<'a>(view: impl IntoIterator<Item = &'a Transaction>) -> Totals {
    let mut income = D128::ZERO;
    let mut expense = D128::ZERO;

    for tx in view {
        match tx.kind() {
            Kind::Income => income += tx.amount(),
            Kind::Expense => expense += tx.amount(),
        }
    }

    Totals {
        income,
        expense,
        balance: income - expense,
    }
}
