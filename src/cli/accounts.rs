use comfy_table::{Cell, Table};
use rusqlite::Connection;

use crate::amounts::validate_balance;
use crate::db::get_connection;
use crate::error::{Result, RupeeError};
use crate::fmt::money;
use crate::settings::{current_user, get_data_dir};

#[derive(Debug, Clone)]
pub struct AccountRow {
    pub id: i64,
    pub name: String,
    pub balance: Option<String>,
}

pub fn add(name: &str, balance: Option<&str>) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("rupee.db"))?;
    add_account(&conn, &current_user(), name, balance)?;
    println!("Added account: {name}");
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = get_connection(&get_data_dir().join("rupee.db"))?;
    let accounts = list_accounts(&conn, &current_user())?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Balance"]);
    for account in accounts {
        let balance = account
            .balance
            .map(|b| money(b.parse().unwrap_or(0.0)))
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(account.id),
            Cell::new(account.name),
            Cell::new(balance),
        ]);
    }
    println!("Accounts\n{table}");
    Ok(())
}

pub fn rename(name: &str, new_name: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("rupee.db"))?;
    let user = current_user();
    let id = find_account_by_name(&conn, &user, name)?;
    rename_account(&conn, id, new_name)?;
    println!("Renamed account {name} to: {new_name}");
    Ok(())
}

pub fn remove(name: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("rupee.db"))?;
    let user = current_user();
    let id = find_account_by_name(&conn, &user, name)?;
    remove_account(&conn, id)?;
    println!("Removed account: {name}");
    Ok(())
}

pub fn set_balance(name: &str, balance: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("rupee.db"))?;
    let user = current_user();
    let id = find_account_by_name(&conn, &user, name)?;
    let recorded = record_balance(&conn, id, balance)?;
    println!("Balance for {name} is now {}", money(recorded.parse().unwrap_or(0.0)));
    Ok(())
}

pub fn history(name: &str) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("rupee.db"))?;
    let user = current_user();
    let id = find_account_by_name(&conn, &user, name)?;
    let snapshots = balance_history(&conn, id)?;

    let mut table = Table::new();
    table.set_header(vec!["Balance", "Recorded"]);
    for (balance, recorded_at) in snapshots {
        table.add_row(vec![
            Cell::new(money(balance.parse().unwrap_or(0.0))),
            Cell::new(recorded_at),
        ]);
    }
    println!("Balance history for {name}\n{table}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Data layer
// ---------------------------------------------------------------------------

pub fn add_account(
    conn: &Connection,
    user_id: &str,
    name: &str,
    initial_balance: Option<&str>,
) -> Result<i64> {
    if name.trim().is_empty() {
        return Err(RupeeError::Other("Account name is required".into()));
    }
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM accounts WHERE name = ?1 AND user_id = ?2 AND deleted_at IS NULL)",
        rusqlite::params![name, user_id],
        |row| row.get(0),
    )?;
    if exists {
        return Err(RupeeError::Other(format!("Account name already exists: {name}")));
    }
    conn.execute(
        "INSERT INTO accounts (name, user_id) VALUES (?1, ?2)",
        rusqlite::params![name, user_id],
    )?;
    let id = conn.last_insert_rowid();
    if let Some(balance) = initial_balance {
        record_balance(conn, id, balance)?;
    }
    Ok(id)
}

pub fn find_account_by_name(conn: &Connection, user_id: &str, name: &str) -> Result<i64> {
    conn.query_row(
        "SELECT id FROM accounts WHERE name = ?1 AND user_id = ?2 AND deleted_at IS NULL",
        rusqlite::params![name, user_id],
        |row| row.get(0),
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => RupeeError::UnknownAccount(name.to_string()),
        other => RupeeError::Db(other),
    })
}

pub fn list_accounts(conn: &Connection, user_id: &str) -> Result<Vec<AccountRow>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.name, \
                (SELECT b.balance FROM balances b WHERE b.account_id = a.id ORDER BY b.id DESC LIMIT 1) \
         FROM accounts a \
         WHERE a.user_id = ?1 AND a.deleted_at IS NULL \
         ORDER BY a.name ASC",
    )?;
    let accounts = stmt
        .query_map([user_id], |row| {
            Ok(AccountRow {
                id: row.get(0)?,
                name: row.get(1)?,
                balance: row.get(2)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(accounts)
}

pub fn rename_account(conn: &Connection, id: i64, new_name: &str) -> Result<()> {
    if new_name.trim().is_empty() {
        return Err(RupeeError::Other("Account name is required".into()));
    }
    let updated = conn.execute(
        "UPDATE accounts SET name = ?1, updated_at = datetime('now') \
         WHERE id = ?2 AND deleted_at IS NULL",
        rusqlite::params![new_name, id],
    )?;
    if updated == 0 {
        return Err(RupeeError::AccountNotFound);
    }
    Ok(())
}

pub fn remove_account(conn: &Connection, id: i64) -> Result<()> {
    let updated = conn.execute(
        "UPDATE accounts SET deleted_at = datetime('now') WHERE id = ?1 AND deleted_at IS NULL",
        [id],
    )?;
    if updated == 0 {
        return Err(RupeeError::AccountNotFound);
    }
    Ok(())
}

/// Append a balance snapshot; the newest snapshot is the current balance.
pub fn record_balance(conn: &Connection, account_id: i64, balance: &str) -> Result<String> {
    let validated = validate_balance(balance)?;
    conn.execute(
        "INSERT INTO balances (account_id, balance) VALUES (?1, ?2)",
        rusqlite::params![account_id, validated],
    )?;
    Ok(validated)
}

pub fn balance_history(conn: &Connection, account_id: i64) -> Result<Vec<(String, String)>> {
    let mut stmt = conn.prepare(
        "SELECT balance, created_at FROM balances WHERE account_id = ?1 ORDER BY id DESC",
    )?;
    let snapshots = stmt
        .query_map([account_id], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(snapshots)
}
