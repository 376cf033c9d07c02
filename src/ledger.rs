use std::collections::HashSet;

use crate::{
    domain::{MonthKey, Transaction, TransactionId},
    error::{LedgerError, Result},
};

/// A transaction together with the id the ledger assigned to it.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    pub id: TransactionId,
    pub transaction: Transaction,
}

/// The ordered collection of transactions of one session.
///
/// Insertion order is preserved. Every record gets an id from a counter that only grows, so
/// ids stay valid across edits, filtering and unrelated deletions, and are never handed out twice.
#[derive(Debug)]
pub struct Ledger {
    entries: Vec<Entry>,
    next_id: u32,
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl Ledger {
    /// Appends a transaction and returns its id.
    ///
    /// The transaction is expected to have gone through `parse_amount` and `parse_date` already.
    pub fn add(&mut self, transaction: Transaction) -> TransactionId {
        let id = TransactionId::new(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, transaction });
        id
    }

    /// Overwrites the whole record with the given id, keeping its position.
    pub fn replace(&mut self, id: TransactionId, transaction: Transaction) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        entry.transaction = transaction;
        Ok(())
    }

    /// Removes every record whose id is listed. Unknown ids are ignored.
    ///
    /// Returns the number of records removed.
    pub fn remove(&mut self, ids: impl IntoIterator<Item = TransactionId>) -> usize {
        let ids: HashSet<TransactionId> = ids.into_iter().collect();
        if ids.is_empty() {
            return 0;
        }

        let before = self.entries.len();
        self.entries.retain(|entry| !ids.contains(&entry.id));
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drops all records and appends `transactions` in order. Ids keep counting up.
    pub fn reset(&mut self, transactions: impl IntoIterator<Item = Transaction>) {
        self.clear();
        for transaction in transactions {
            self.add(transaction);
        }
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.transaction)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Snapshot of the records in insertion order.
    pub fn all(&self) -> Vec<Transaction> {
        self.transactions().cloned().collect()
    }

    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter().map(|entry| &entry.transaction)
    }

    pub fn in_month(&self, month: MonthKey) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .filter(move |entry| entry.transaction.month() == month)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use fastnum::dec128;

    use super::*;
    use crate::domain::Kind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lunch() -> Transaction {
        Transaction::expense(date(2024, 1, 16), dec128!(23.45), "Dining", "lunch")
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut ledger = Ledger::default();
        let first = ledger.add(Transaction::income(date(2024, 1, 15), dec128!(1500)));
        let second = ledger.add(lunch());

        assert_ne!(first, second);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.all()[0].kind(), Kind::Income);
        assert_eq!(ledger.all()[1], lunch());
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut ledger = Ledger::default();
        ledger.add(lunch());
        ledger.add(lunch());
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut ledger = Ledger::default();
        let first = ledger.add(lunch());
        ledger.add(lunch());

        let salary = Transaction::income(date(2024, 2, 1), dec128!(900));
        ledger.replace(first, salary.clone()).unwrap();

        assert_eq!(ledger.entries()[0].id, first);
        assert_eq!(ledger.entries()[0].transaction, salary);
        assert_eq!(ledger.get(first), Some(&salary));
    }

    #[test]
    fn test_replace_unknown_id() {
        let mut ledger = Ledger::default();
        ledger.add(lunch());
        let err = ledger
            .replace(TransactionId::new(42), lunch())
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(id) if id == TransactionId::new(42)));
    }

    #[test]
    fn test_remove_several() {
        let mut ledger = Ledger::default();
        let ids: Vec<_> = (0..4).map(|_| ledger.add(lunch())).collect();

        assert_eq!(ledger.remove([ids[0], ids[2]]), 2);
        let left: Vec<_> = ledger.entries().iter().map(|entry| entry.id).collect();
        assert_eq!(left, vec![ids[1], ids[3]]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut ledger = Ledger::default();
        let id = ledger.add(lunch());
        ledger.add(lunch());

        assert_eq!(ledger.remove(Vec::new()), 0);
        assert_eq!(ledger.remove([id, id]), 1);
        assert_eq!(ledger.remove([id]), 0);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_ids_not_reused() {
        let mut ledger = Ledger::default();
        let first = ledger.add(lunch());
        ledger.remove([first]);
        let second = ledger.add(lunch());
        assert_ne!(first, second);

        ledger.reset([lunch()]);
        assert!(ledger.entries()[0].id > second);
    }

    #[test]
    fn test_in_month() {
        let mut ledger = Ledger::default();
        ledger.add(lunch());
        ledger.add(Transaction::income(date(2024, 2, 1), dec128!(900)));

        let january = "01-2024".parse().unwrap();
        let found: Vec<_> = ledger.in_month(january).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].transaction, lunch());
    }
}
