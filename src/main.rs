use std::{io, path::PathBuf, process::ExitCode};

use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre;
use monthly_ledger::{
    Config, Direction, Kind, LedgerError, MonthSelection, Session, Store, TransactionId,
    config::{DATA_FILE_ENV, DEFAULT_EXPENSE_CATEGORY, EXPENSE_CATEGORIES},
    parse::{format_amount, format_date},
};
use tracing::{debug, trace};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// ledger: keep track of dated income and expenses, month by month.
///
/// Every command loads the data file first. Commands that change something save it again
/// afterwards. Transaction ids are row numbers of the data file, starting at 1.
#[derive(Debug, Parser)]
#[command(name = "ledger", version)]
struct Cli {
    /// The ledger file. Defaults to $HOME/BudgetApp/budget_data.csv.
    #[arg(long, global = true, env = DATA_FILE_ENV)]
    data_file: Option<PathBuf>,

    /// The logging verbosity, one of: off, error, warn, info, debug, trace. RUST_LOG wins if set.
    #[arg(long, global = true, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Record income.
    AddIncome {
        /// MM-DD-YYYY, today if omitted.
        #[arg(long)]
        date: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
    },
    /// Record an expense.
    AddExpense {
        /// MM-DD-YYYY, today if omitted.
        #[arg(long)]
        date: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        #[arg(long, default_value = DEFAULT_EXPENSE_CATEGORY)]
        category: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Change a transaction. Fields that are not given keep their value.
    Edit {
        id: u32,
        #[arg(long)]
        date: Option<String>,
        #[arg(long = "type", value_enum)]
        kind: Option<KindArg>,
        #[arg(long, allow_hyphen_values = true)]
        amount: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Delete transactions by id.
    Delete {
        #[arg(required = true)]
        ids: Vec<u32>,
    },
    /// Print the transactions of a month as CSV.
    List(ViewArgs),
    /// Print income, expense and balance of a month as CSV.
    Summary(ViewArgs),
    /// Print the months that have transactions, newest first.
    Months,
    /// Print the suggested expense categories.
    Categories,
}

#[derive(Debug, clap::Args)]
struct ViewArgs {
    /// MM-YYYY or All. Defaults to the newest month.
    #[arg(long)]
    month: Option<MonthSelection>,

    /// Move one month older or newer from the chosen month.
    #[arg(long, value_enum)]
    step: Option<Step>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for Kind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Income => Kind::Income,
            KindArg::Expense => Kind::Expense,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Step {
    Prev,
    Next,
}

impl From<Step> for Direction {
    fn from(step: Step) -> Self {
        match step {
            Step::Prev => Direction::Previous,
            Step::Next => Direction::Next,
        }
    }
}

/// Exit status for input that was refused, as opposed to a failure.
const REJECTED: u8 = 2;

fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;

    let args = Cli::parse();
    init_logger(args.log_level);
    trace!("{args:?}");

    let config = Config::new(args.data_file);
    debug!("Using ledger file {}", config.data_file().display());
    let mut session = Session::open(Store::new(config.data_file()))?;

    match run(&mut session, args.command) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => match e.downcast_ref::<LedgerError>() {
            Some(err) if err.is_validation() => {
                eprintln!("Rejected: {err}");
                Ok(ExitCode::from(REJECTED))
            }
            _ => Err(e),
        },
    }
}

fn run(session: &mut Session, command: Command) -> eyre::Result<()> {
    match command {
        Command::AddIncome { date, amount } => {
            let date = date.unwrap_or_else(today);
            let status = session.add_income(&date, &amount)?;
            session.save()?;
            println!("{status}");
        }

        Command::AddExpense {
            date,
            amount,
            category,
            note,
        } => {
            let date = date.unwrap_or_else(today);
            let status = session.add_expense(&date, &amount, &category, &note)?;
            session.save()?;
            println!("{status}");
        }

        Command::Edit {
            id,
            date,
            kind,
            amount,
            category,
            note,
        } => {
            let mut draft = session.begin_edit(TransactionId::new(id))?;
            if let Some(date) = date {
                draft.date = date;
            }
            if let Some(kind) = kind {
                draft.kind = kind.into();
            }
            if let Some(amount) = amount {
                draft.amount = amount;
            }
            if let Some(category) = category {
                draft.category = category;
            }
            if let Some(note) = note {
                draft.note = note;
            }
            let status = session.commit_edit(draft)?;
            session.save()?;
            println!("{status}");
        }

        Command::Delete { ids } => {
            let status = session.delete(ids.into_iter().map(TransactionId::new))?;
            session.save()?;
            println!("{status}");
        }

        Command::List(view) => {
            select(session, &view)?;

            let mut writer = csv::Writer::from_writer(io::stdout());
            writer.write_record(["id", "date", "type", "amount", "category", "note"])?;
            for entry in session.view() {
                let tx = &entry.transaction;
                writer.write_record([
                    entry.id.to_string(),
                    format_date(tx.date()),
                    tx.kind().to_string(),
                    format_amount(tx.amount()),
                    tx.category().to_string(),
                    tx.note().to_string(),
                ])?;
            }
            writer.flush()?;
        }

        Command::Summary(view) => {
            select(session, &view)?;

            let totals = session.totals();
            let mut writer = csv::Writer::from_writer(io::stdout());
            writer.write_record(["month", "income", "expense", "balance"])?;
            writer.write_record([
                session.selection().to_string(),
                format_amount(totals.income),
                format_amount(totals.expense),
                format_amount(totals.balance),
            ])?;
            writer.flush()?;
        }

        Command::Months => {
            for month in session.months() {
                println!("{month}");
            }
        }

        Command::Categories => {
            for category in EXPENSE_CATEGORIES {
                println!("{category}");
            }
        }
    }

    Ok(())
}

fn select(session: &mut Session, view: &ViewArgs) -> eyre::Result<()> {
    if let Some(month) = view.month {
        session.select_month(month)?;
    }
    if let Some(step) = view.step {
        let status = session.navigate(step.into())?;
        debug!("{status}");
    }
    Ok(())
}

fn today() -> String {
    format_date(Local::now().date_naive())
}

fn init_logger(level: LevelFilter) {
    let filter = match std::env::var_os("RUST_LOG") {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "monthly_ledger={level},{}={level}",
            env!("CARGO_CRATE_NAME")
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
