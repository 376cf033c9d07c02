use std::path::{Path, PathBuf};

/// Environment variable that overrides where the ledger is stored.
pub const DATA_FILE_ENV: &str = "BUDGET_LEDGER_FILE";

const APP_DIR: &str = "BudgetApp";
const DATA_FILE: &str = "budget_data.csv";

/// Categories offered for expenses. Any other label is accepted as well.
pub const EXPENSE_CATEGORIES: [&str; 8] = [
    "Groceries",
    "Dining",
    "Gas",
    "Bills",
    "Shopping",
    "Health",
    "Entertainment",
    "Other",
];

pub const DEFAULT_EXPENSE_CATEGORY: &str = EXPENSE_CATEGORIES[0];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    data_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: default_data_file(),
        }
    }
}

impl Config {
    pub fn new(data_file: Option<PathBuf>) -> Self {
        data_file
            .map(|data_file| Config { data_file })
            .unwrap_or_default()
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }
}

/// `$HOME/BudgetApp/budget_data.csv`, or relative to the working directory without a home.
pub fn default_data_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(DATA_FILE)
}
