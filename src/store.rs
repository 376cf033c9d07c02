use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    domain::{HEADER, Transaction},
    error::{LedgerError, Result},
};

const TMP_SUFFIX: &str = "tmp";

/// Reads and writes the whole ledger as a CSV file.
#[derive(Clone, Debug)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes every transaction, replacing the previous file.
    ///
    /// The data goes to a sibling temporary file first, which is then renamed over the target, so
    /// an interrupted save leaves the old file in place.
    pub fn save<'a>(&self, transactions: impl IntoIterator<Item = &'a Transaction>) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| self.io_error(dir, source))?;
        }

        let tmp = self.tmp_path();
        let written = self.write_to(&tmp, transactions);
        let result = written.and_then(|count| {
            fs::rename(&tmp, &self.path)
                .map_err(|source| self.io_error(&self.path, source))
                .map(|()| count)
        });

        match result {
            Ok(count) => {
                info!("Saved {count} transactions to {}", self.path.display());
                Ok(())
            }
            Err(e) => {
                let _ = fs::remove_file(&tmp);
                Err(e)
            }
        }
    }

    fn write_to<'a>(
        &self,
        tmp: &Path,
        transactions: impl IntoIterator<Item = &'a Transaction>,
    ) -> Result<usize> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(tmp)
            .map_err(|e| self.csv_io_error(tmp, e))?;

        writer
            .write_record(HEADER)
            .map_err(|e| self.csv_io_error(tmp, e))?;

        let mut count = 0;
        for tx in transactions {
            writer
                .serialize(tx)
                .map_err(|e| self.csv_io_error(tmp, e))?;
            count += 1;
        }

        writer
            .flush()
            .map_err(|source| self.io_error(tmp, source))?;
        Ok(count)
    }

    /// Reads every transaction in file order.
    ///
    /// Returns `None` when the file does not exist yet. Nothing is returned unless every row
    /// parses.
    pub fn load(&self) -> Result<Option<Vec<Transaction>>> {
        let mut reader = match csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
        {
            Ok(reader) => reader,
            Err(e) => {
                if let csv::ErrorKind::Io(io) = e.kind() {
                    if io.kind() == ErrorKind::NotFound {
                        debug!("No ledger file at {}", self.path.display());
                        return Ok(None);
                    }
                }
                return Err(self.csv_io_error(&self.path, e));
            }
        };

        let transactions = reader
            .deserialize::<Transaction>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| self.csv_error(e))?;

        info!(
            "Loaded {} transactions from {}",
            transactions.len(),
            self.path.display()
        );
        Ok(Some(transactions))
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(TMP_SUFFIX);
        self.path.with_file_name(name)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> LedgerError {
        LedgerError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Failures while writing are all I/O failures, whatever layer reported them.
    fn csv_io_error(&self, path: &Path, e: csv::Error) -> LedgerError {
        let source = match e.into_kind() {
            csv::ErrorKind::Io(io) => io,
            other => std::io::Error::other(format!("{other:?}")),
        };
        self.io_error(path, source)
    }

    /// I/O problems while reading stay I/O failures, anything else is a malformed file.
    fn csv_error(&self, e: csv::Error) -> LedgerError {
        if e.is_io_error() {
            return self.csv_io_error(&self.path, e);
        }
        LedgerError::Parse {
            path: self.path.clone(),
            source: e,
        }
    }
}
