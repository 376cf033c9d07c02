use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::{domain::MonthKey, error::LedgerError, ledger::Ledger};

/// Which part of the ledger is being looked at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MonthSelection {
    #[default]
    All,
    Month(MonthKey),
}

impl fmt::Display for MonthSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthSelection::All => f.write_str("All"),
            MonthSelection::Month(key) => fmt::Display::fmt(key, f),
        }
    }
}

impl FromStr for MonthSelection {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(MonthSelection::All)
        } else {
            s.parse().map(MonthSelection::Month)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards older months.
    Previous,
    /// Towards newer months.
    Next,
}

/// The distinct months present in a ledger, newest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MonthIndex {
    months: Vec<MonthKey>,
}

impl MonthIndex {
    pub fn rebuild(ledger: &Ledger) -> Self {
        let distinct: BTreeSet<MonthKey> = ledger.transactions().map(|tx| tx.month()).collect();
        MonthIndex {
            months: distinct.into_iter().rev().collect(),
        }
    }

    /// Selectable values: `All` followed by the months, newest first.
    pub fn selections(&self) -> Vec<MonthSelection> {
        std::iter::once(MonthSelection::All)
            .chain(self.months.iter().copied().map(MonthSelection::Month))
            .collect()
    }

    pub fn newest(&self) -> Option<MonthKey> {
        self.months.first().copied()
    }

    pub fn contains(&self, selection: MonthSelection) -> bool {
        match selection {
            MonthSelection::All => true,
            MonthSelection::Month(key) => self.months.contains(&key),
        }
    }

    /// Steps one month older. From `All` or a month that is no longer present, goes to the newest.
    /// Stays put at the oldest month.
    pub fn previous(&self, current: MonthSelection) -> MonthSelection {
        self.step(current, Direction::Previous)
    }

    /// Steps one month newer. From `All` or a month that is no longer present, goes to the newest.
    /// Stays put at the newest month.
    pub fn next(&self, current: MonthSelection) -> MonthSelection {
        self.step(current, Direction::Next)
    }

    pub fn step(&self, current: MonthSelection, direction: Direction) -> MonthSelection {
        let Some(newest) = self.newest() else {
            return current;
        };

        let MonthSelection::Month(key) = current else {
            return MonthSelection::Month(newest);
        };
        let Some(i) = self.months.iter().position(|&month| month == key) else {
            return MonthSelection::Month(newest);
        };

        // Newest first, so older is further along.
        let target = match direction {
            Direction::Previous => (i + 1).min(self.months.len() - 1),
            Direction::Next => i.saturating_sub(1),
        };
        MonthSelection::Month(self.months[target])
    }
}
