mod amounts;
mod cli;
mod dates;
mod db;
mod error;
mod fmt;
mod importer;
mod models;
mod rows;
mod settings;

use clap::Parser;

use cli::{AccountsCommands, CategoriesCommands, Cli, Commands, TxCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir, user } => cli::init::run(data_dir, user),
        Commands::Accounts { command } => match command {
            AccountsCommands::Add { name, balance } => {
                cli::accounts::add(&name, balance.as_deref())
            }
            AccountsCommands::List => cli::accounts::list(),
            AccountsCommands::Rename { name, new_name } => {
                cli::accounts::rename(&name, &new_name)
            }
            AccountsCommands::Remove { name } => cli::accounts::remove(&name),
            AccountsCommands::SetBalance { name, balance } => {
                cli::accounts::set_balance(&name, &balance)
            }
            AccountsCommands::History { name } => cli::accounts::history(&name),
        },
        Commands::Categories { command } => match command {
            CategoriesCommands::Add { name } => cli::categories::add(&name),
            CategoriesCommands::List => cli::categories::list(),
            CategoriesCommands::Rename { name, new_name } => {
                cli::categories::rename(&name, &new_name)
            }
            CategoriesCommands::Remove { name } => cli::categories::remove(&name),
        },
        Commands::Tx { command } => match command {
            TxCommands::Add {
                account,
                amount,
                txn_type,
                description,
                date,
                category,
            } => cli::transactions::add(
                &account,
                &amount,
                &txn_type,
                description.as_deref(),
                &date,
                category.as_deref(),
            ),
            TxCommands::List { account, month } => {
                cli::transactions::list(account.as_deref(), &month)
            }
            TxCommands::SetCategory { id, category } => {
                cli::transactions::set_category(id, category.as_deref())
            }
            TxCommands::Remove { id } => cli::transactions::remove(id),
        },
        Commands::Import { file, account } => cli::import::run(&file, &account),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
