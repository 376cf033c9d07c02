use std::{fmt, path::PathBuf};

use tracing::{debug, info, warn};

use crate::{
    domain::{Kind, Transaction, TransactionId},
    error::{LedgerError, Result},
    ledger::{Entry, Ledger},
    months::{Direction, MonthIndex, MonthSelection},
    parse::{format_amount, format_date, parse_amount, parse_date},
    store::Store,
    totals::{Totals, totals},
};

/// Outcome of a successful command, for the shell to report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Added(TransactionId),
    Updated(TransactionId),
    Deleted(usize),
    Selected(MonthSelection),
    Saved(PathBuf),
    Loaded(usize),
    NoData,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Added(id) => write!(f, "Added transaction {id}"),
            Status::Updated(id) => write!(f, "Updated transaction {id}"),
            Status::Deleted(count) => write!(f, "Deleted {count} transaction(s)"),
            Status::Selected(selection) => write!(f, "Viewing {selection}"),
            Status::Saved(path) => write!(f, "Saved to {}", path.display()),
            Status::Loaded(count) => write!(f, "Loaded {count} transaction(s)"),
            Status::NoData => f.write_str("No saved data found yet"),
        }
    }
}

/// Editable copy of one record, holding the raw form values.
///
/// Changing a draft never touches the ledger. It is validated and written back by
/// [`Session::commit_edit`], or dropped by [`Session::discard_edit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditDraft {
    id: TransactionId,
    pub date: String,
    pub kind: Kind,
    pub amount: String,
    pub category: String,
    pub note: String,
}

impl EditDraft {
    pub fn id(&self) -> TransactionId {
        self.id
    }
}

/// The ledger state behind a presentation shell.
///
/// The shell sends commands and then reads [`Session::view`], [`Session::totals`],
/// [`Session::months`] and [`Session::selection`] to redraw. Failed commands leave the state as
/// it was.
#[derive(Debug)]
pub struct Session {
    ledger: Ledger,
    months: MonthIndex,
    selection: MonthSelection,
    store: Store,
}

impl Session {
    pub fn new(store: Store) -> Self {
        Session {
            ledger: Ledger::default(),
            months: MonthIndex::default(),
            selection: MonthSelection::All,
            store,
        }
    }

    /// Creates a session and loads whatever the store holds.
    pub fn open(store: Store) -> Result<Self> {
        let mut session = Session::new(store);
        let status = session.load()?;
        debug!("{status}");
        Ok(session)
    }

    pub fn add_income(&mut self, date: &str, amount: &str) -> Result<Status> {
        let tx = rejected(parse_date(date).and_then(|date| {
            let amount = parse_amount(amount)?;
            Ok(Transaction::income(date, amount))
        }))?;
        Ok(self.push(tx))
    }

    pub fn add_expense(
        &mut self,
        date: &str,
        amount: &str,
        category: &str,
        note: &str,
    ) -> Result<Status> {
        let tx = rejected(parse_date(date).and_then(|date| {
            let amount = parse_amount(amount)?;
            Ok(Transaction::expense(date, amount, category, note))
        }))?;
        Ok(self.push(tx))
    }

    fn push(&mut self, tx: Transaction) -> Status {
        let id = self.ledger.add(tx);
        debug!("Added transaction {id}");
        self.refresh();
        Status::Added(id)
    }

    pub fn begin_edit(&self, id: TransactionId) -> Result<EditDraft> {
        let tx = self
            .ledger
            .get(id)
            .ok_or(LedgerError::NotFound(id))?;
        Ok(EditDraft {
            id,
            date: format_date(tx.date()),
            kind: tx.kind(),
            amount: format_amount(tx.amount()),
            category: tx.category().to_string(),
            note: tx.note().to_string(),
        })
    }

    /// Validates the draft and replaces the record it was taken from.
    pub fn commit_edit(&mut self, draft: EditDraft) -> Result<Status> {
        let tx = rejected(parse_date(&draft.date).and_then(|date| {
            let amount = parse_amount(&draft.amount)?;
            Ok(Transaction::new(
                date,
                draft.kind,
                amount,
                &draft.category,
                &draft.note,
            ))
        }))?;

        self.ledger.replace(draft.id, tx)?;
        debug!("Updated transaction {}", draft.id);
        self.refresh();
        Ok(Status::Updated(draft.id))
    }

    pub fn discard_edit(&self, draft: EditDraft) {
        debug!("Discarded edit of transaction {}", draft.id);
    }

    /// Replaces a record in one step. For income the category is always "Income".
    pub fn edit(
        &mut self,
        id: TransactionId,
        date: &str,
        kind: Kind,
        amount: &str,
        category: &str,
        note: &str,
    ) -> Result<Status> {
        let mut draft = self.begin_edit(id)?;
        draft.date = date.to_string();
        draft.kind = kind;
        draft.amount = amount.to_string();
        draft.category = category.to_string();
        draft.note = note.to_string();
        self.commit_edit(draft)
    }

    pub fn delete(&mut self, ids: impl IntoIterator<Item = TransactionId>) -> Result<Status> {
        let removed = self.ledger.remove(ids);
        if removed > 0 {
            debug!("Deleted {removed} transaction(s)");
            self.refresh();
        }
        Ok(Status::Deleted(removed))
    }

    /// Shows one month, or everything. A month with no records simply shows an empty view.
    pub fn select_month(&mut self, selection: MonthSelection) -> Result<Status> {
        self.selection = selection;
        Ok(Status::Selected(selection))
    }

    pub fn show_all(&mut self) -> Result<Status> {
        self.select_month(MonthSelection::All)
    }

    pub fn navigate(&mut self, direction: Direction) -> Result<Status> {
        let selection = self.months.step(self.selection, direction);
        self.select_month(selection)
    }

    pub fn save(&self) -> Result<Status> {
        self.store.save(self.ledger.transactions())?;
        Ok(Status::Saved(self.store.path().to_path_buf()))
    }

    /// Replaces the ledger with the stored one and selects its newest month.
    ///
    /// A missing file empties the ledger. Any other failure leaves the ledger untouched.
    pub fn load(&mut self) -> Result<Status> {
        let Some(transactions) = self.store.load()? else {
            self.ledger.clear();
            self.refresh();
            self.selection = MonthSelection::All;
            info!("No saved data at {}", self.store.path().display());
            return Ok(Status::NoData);
        };

        let count = transactions.len();
        self.ledger.reset(transactions);
        self.refresh();
        self.selection = self
            .months
            .newest()
            .map_or(MonthSelection::All, MonthSelection::Month);
        Ok(Status::Loaded(count))
    }

    fn refresh(&mut self) {
        self.months = MonthIndex::rebuild(&self.ledger);
        if !self.months.contains(self.selection) {
            self.selection = MonthSelection::All;
        }
    }

    /// Records in the current selection, in ledger order.
    pub fn view(&self) -> Vec<&Entry> {
        match self.selection {
            MonthSelection::All => self.ledger.entries().iter().collect(),
            MonthSelection::Month(key) => self.ledger.in_month(key).collect(),
        }
    }

    pub fn totals(&self) -> Totals {
        totals(self.view().into_iter().map(|entry| &entry.transaction))
    }

    /// `All` followed by the months present, newest first.
    pub fn months(&self) -> Vec<MonthSelection> {
        self.months.selections()
    }

    pub fn selection(&self) -> MonthSelection {
        self.selection
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

fn rejected<T>(result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        warn!("Rejected input: {e}");
    }
    result
}
