//! Command dispatch and terminal output for the `budgetcraft_cli` binary.

use std::{fmt, path::PathBuf};

use budgetcraft_config::{Config, ConfigManager};
use colored::Colorize;

use crate::{
    errors::{BudgetError, BudgetResult},
    import::{export_expenses_csv_path, import_expenses_csv_path},
    store::BudgetStore,
    utils::build_info,
};

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Summary,
    Import(PathBuf),
    Export(PathBuf),
    Clear,
    Reset,
    Version,
    Help,
}

impl Command {
    pub fn parse<I, S>(args: I) -> BudgetResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let command = match args.next() {
            Some(command) => command,
            None => return Ok(Command::Summary),
        };
        let parsed = match command.as_str() {
            "summary" => Command::Summary,
            "import" => Command::Import(required_path(args.next(), "import")?),
            "export" => Command::Export(required_path(args.next(), "export")?),
            "clear" => Command::Clear,
            "reset" => Command::Reset,
            "version" | "--version" | "-V" => Command::Version,
            "help" | "--help" | "-h" => Command::Help,
            other => {
                return Err(BudgetError::Usage(format!(
                    "unknown command `{other}` (try `help`)"
                )))
            }
        };
        Ok(parsed)
    }
}

fn required_path(arg: Option<String>, command: &str) -> BudgetResult<PathBuf> {
    arg.map(PathBuf::from)
        .ok_or_else(|| BudgetError::Usage(format!("`{command}` needs a CSV file path")))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum MessageKind {
    Info,
    Success,
    Warning,
    Section,
}

fn print(kind: MessageKind, message: impl fmt::Display) {
    let text = message.to_string();
    let styled = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Success => text.bright_green().to_string(),
        MessageKind::Warning => text.bright_yellow().to_string(),
        MessageKind::Info => text,
    };
    println!("{styled}");
}

/// Loads config from the BudgetCraft home, opens the store and runs `command`.
pub fn run_cli<I, S>(args: I) -> BudgetResult<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let command = Command::parse(args)?;
    if matches!(command, Command::Help) {
        print_usage();
        return Ok(());
    }
    if matches!(command, Command::Version) {
        println!("{}", build_info::current().describe());
        return Ok(());
    }

    let home = Config::default_home();
    let config = ConfigManager::with_base_dir(home.clone())?.load_or_create()?;
    crate::init_with_filter(config.log_filter.as_deref());
    if !config.ui_color_enabled {
        colored::control::set_override(false);
    }

    let mut store = BudgetStore::open(&config, &home)?;
    execute(&mut store, command)?;
    if !store.flush() && !store.is_persistent() {
        print(MessageKind::Warning, "Storage unavailable; changes were not saved.");
    }
    Ok(())
}

/// Runs one command against an open store.
pub fn execute(store: &mut BudgetStore, command: Command) -> BudgetResult<()> {
    match command {
        Command::Summary => print_summary(store),
        Command::Import(path) => {
            let summary = import_expenses_csv_path(store, &path)?;
            print(
                MessageKind::Success,
                format!(
                    "Imported {} expenses ({} rows skipped).",
                    summary.imported, summary.skipped
                ),
            );
        }
        Command::Export(path) => {
            let rows = export_expenses_csv_path(store.expenses(), &path)?;
            print(
                MessageKind::Success,
                format!("Exported {rows} expenses to {}.", path.display()),
            );
        }
        Command::Clear => {
            let removed = store.clear_expenses();
            print(MessageKind::Success, format!("Removed {removed} expenses."));
        }
        Command::Reset => {
            store.reset();
            print(MessageKind::Success, "Budget reset to defaults.");
        }
        Command::Version => println!("{}", build_info::current().describe()),
        Command::Help => print_usage(),
    }
    Ok(())
}

fn print_summary(store: &BudgetStore) {
    let aggregates = store.aggregates();

    print(MessageKind::Section, "Budget");
    print(MessageKind::Info, format!("Income:          ${:.2}", aggregates.income));
    print(
        MessageKind::Info,
        format!("Allocated:       ${:.2}", aggregates.total_allocated),
    );
    if aggregates.allocation_overflow > 0.0 {
        print(
            MessageKind::Warning,
            format!("Over-allocated by ${:.2}", aggregates.allocation_overflow),
        );
    }
    print(MessageKind::Info, format!("Spent:           ${:.2}", aggregates.total_spent));
    let balance = format!(
        "{:<17}${:.2}",
        format!("{}:", aggregates.balance.status.label()),
        aggregates.balance.amount
    );
    match aggregates.balance.status {
        budgetcraft_core::BalanceStatus::Remaining => print(MessageKind::Success, balance),
        budgetcraft_core::BalanceStatus::OverBudget => print(MessageKind::Warning, balance),
    }

    print(MessageKind::Section, "Budget categories");
    for progress in &aggregates.budget_progress {
        let line = format!(
            "{:<16} ${:>10.2} of ${:>10.2} ({:.1}%)",
            progress.name, progress.spent, progress.budgeted, progress.progress_percent
        );
        if progress.is_overspent() {
            print(MessageKind::Warning, line);
        } else {
            print(MessageKind::Info, line);
        }
    }

    print(MessageKind::Section, "Spending");
    if aggregates.category_breakdown.is_empty() {
        print(MessageKind::Info, "No expenses recorded.");
    }
    for share in &aggregates.category_breakdown {
        print(
            MessageKind::Info,
            format!("{:<16} ${:>10.2} ({:.1}%)", share.name, share.amount, share.share),
        );
    }
    if let Some(top) = &aggregates.top_category {
        print(MessageKind::Info, format!("Top category: {}", top.name));
    }
    print(MessageKind::Info, format!("Expenses: {}", store.expenses().len()));
}

fn print_usage() {
    println!(
        "Usage: budgetcraft_cli [command]\n\n\
         Commands:\n  \
         summary          Show income, allocations and spending (default)\n  \
         import <file>    Add expenses from a CSV file\n  \
         export <file>    Write all expenses to a CSV file\n  \
         clear            Remove every expense\n  \
         reset            Restore the first-run budget\n  \
         version          Show build information\n\n\
         Data lives under $BUDGETCRAFT_HOME (or the platform data directory)."
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_summary() {
        assert_eq!(Command::parse(Vec::<String>::new()).unwrap(), Command::Summary);
    }

    #[test]
    fn import_requires_a_path() {
        assert!(Command::parse(["import"]).is_err());
        assert_eq!(
            Command::parse(["import", "expenses.csv"]).unwrap(),
            Command::Import(PathBuf::from("expenses.csv"))
        );
    }

    #[test]
    fn unknown_commands_are_rejected() {
        let err = Command::parse(["frobnicate"]).unwrap_err();
        assert!(err.to_string().contains("frobnicate"));
    }
}
