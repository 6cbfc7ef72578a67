pub mod accounts;
pub mod categories;
pub mod import;
pub mod init;
pub mod transactions;

use clap::{Parser, Subcommand};

pub(crate) fn parse_month_opt(month: &Option<String>) -> (Option<i32>, Option<u32>) {
    if let Some(m) = month {
        let parts: Vec<&str> = m.split('-').collect();
        if parts.len() == 2 {
            let year = parts[0].parse().ok();
            let month = parts[1].parse().ok();
            return (year, month);
        }
    }
    (None, None)
}

#[derive(Parser)]
#[command(name = "rupee", about = "Personal finance tracker with bank-statement CSV import.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up rupee: choose a data directory and initialize the database.
    Init {
        /// Path for rupee data (default: ~/Documents/rupee)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// User the CLI acts as (default: local)
        #[arg(long)]
        user: Option<String>,
    },
    /// Manage accounts.
    Accounts {
        #[command(subcommand)]
        command: AccountsCommands,
    },
    /// Manage categories.
    Categories {
        #[command(subcommand)]
        command: CategoriesCommands,
    },
    /// Manage individual transactions.
    Tx {
        #[command(subcommand)]
        command: TxCommands,
    },
    /// Import a bank statement (CSV, or JSON rows) into an account.
    Import {
        /// Path to the statement file
        file: String,
        /// Account name to import into
        #[arg(long)]
        account: String,
    },
}

#[derive(Subcommand)]
pub enum AccountsCommands {
    /// Add a new account.
    Add {
        /// Account name, e.g. 'HDFC Savings'
        name: String,
        /// Opening balance
        #[arg(long)]
        balance: Option<String>,
    },
    /// List all accounts with their current balance.
    List,
    /// Rename an account.
    Rename {
        name: String,
        new_name: String,
    },
    /// Remove (soft-delete) an account.
    Remove {
        name: String,
    },
    /// Record a new balance snapshot for an account.
    SetBalance {
        name: String,
        balance: String,
    },
    /// Show the balance history of an account, newest first.
    History {
        name: String,
    },
}

#[derive(Subcommand)]
pub enum CategoriesCommands {
    /// Add a new category.
    Add {
        /// Category name, e.g. 'Groceries'
        name: String,
    },
    /// List all categories.
    List,
    /// Rename a category.
    Rename {
        name: String,
        new_name: String,
    },
    /// Remove (soft-delete) a category.
    Remove {
        name: String,
    },
}

#[derive(Subcommand)]
pub enum TxCommands {
    /// Add a single transaction.
    Add {
        /// Account name
        #[arg(long)]
        account: String,
        /// Amount, e.g. 250 or 1,250.50
        #[arg(long)]
        amount: String,
        /// Transaction type: debit or credit
        #[arg(long = "type")]
        txn_type: String,
        /// Description
        #[arg(long)]
        description: Option<String>,
        /// Date (e.g. 01-01-2024 or 2024-01-01)
        #[arg(long)]
        date: String,
        /// Category name
        #[arg(long)]
        category: Option<String>,
    },
    /// List transactions.
    List {
        /// Filter by account name
        #[arg(long)]
        account: Option<String>,
        /// Filter by month: YYYY-MM
        #[arg(long)]
        month: Option<String>,
    },
    /// Assign (or clear) the category of a transaction.
    SetCategory {
        /// Transaction ID (shown in `rupee tx list`)
        id: i64,
        /// Category name; omit to clear
        #[arg(long)]
        category: Option<String>,
    },
    /// Remove (soft-delete) a transaction.
    Remove {
        /// Transaction ID (shown in `rupee tx list`)
        id: i64,
    },
}
