use comfy_table::{Cell, Table};
use rusqlite::Connection;

use crate::amounts::validate_amount;
use crate::cli::accounts::find_account_by_name;
use crate::cli::categories::find_category_by_name;
use crate::cli::parse_month_opt;
use crate::dates::{parse_date, DB_DATE_FORMAT};
use crate::db::get_connection;
use crate::error::{Result, RupeeError};
use crate::fmt::signed_money;
use crate::models::TxnType;
use crate::settings::{current_user, get_data_dir};

#[derive(Debug, Clone)]
pub struct TxnRow {
    pub id: i64,
    pub date: String,
    pub account: String,
    pub description: Option<String>,
    pub amount: String,
    pub txn_type: TxnType,
    pub category: Option<String>,
}

pub fn add(
    account: &str,
    amount: &str,
    txn_type: &str,
    description: Option<&str>,
    date: &str,
    category: Option<&str>,
) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("rupee.db"))?;
    let user = current_user();
    let account_id = find_account_by_name(&conn, &user, account)?;
    let category_id = match category {
        Some(name) => Some(find_category_by_name(&conn, &user, name)?),
        None => None,
    };
    let txn_type = TxnType::parse(txn_type)
        .ok_or_else(|| RupeeError::Other(format!("Invalid type: {txn_type} (must be 'debit' or 'credit')")))?;
    add_transaction(&conn, account_id, amount, txn_type, description, date, category_id)?;
    println!("Added {} transaction to {account}", txn_type.as_str());
    Ok(())
}

pub fn list(account: Option<&str>, month: &Option<String>) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("rupee.db"))?;
    let user = current_user();
    let account_id = match account {
        Some(name) => Some(find_account_by_name(&conn, &user, name)?),
        None => None,
    };
    let (year, month) = parse_month_opt(month);
    let rows = list_transactions(&conn, &user, account_id, year, month)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Account", "Description", "Amount", "Category"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.id),
            Cell::new(row.date),
            Cell::new(row.account),
            Cell::new(row.description.unwrap_or_default()),
            Cell::new(signed_money(&row.amount, row.txn_type)),
            Cell::new(row.category.unwrap_or_default()),
        ]);
    }
    println!("Transactions\n{table}");
    Ok(())
}

pub fn set_category(id: i64, category: Option<&str>) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("rupee.db"))?;
    let user = current_user();
    let category_id = match category {
        Some(name) => Some(find_category_by_name(&conn, &user, name)?),
        None => None,
    };
    set_transaction_category(&conn, &user, id, category_id)?;
    match category {
        Some(name) => println!("Transaction {id} categorized as: {name}"),
        None => println!("Transaction {id} category cleared"),
    }
    Ok(())
}

pub fn remove(id: i64) -> Result<()> {
    let conn = get_connection(&get_data_dir().join("rupee.db"))?;
    remove_transaction(&conn, &current_user(), id)?;
    println!("Removed transaction {id}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Data layer
// ---------------------------------------------------------------------------

pub fn add_transaction(
    conn: &Connection,
    account_id: i64,
    amount: &str,
    txn_type: TxnType,
    description: Option<&str>,
    date: &str,
    category_id: Option<i64>,
) -> Result<i64> {
    let amount = validate_amount(Some(amount))?;
    if amount == "0.00" {
        return Err(RupeeError::MissingAmount);
    }
    let date = parse_date(date)?;
    let description = description.map(str::trim).filter(|d| !d.is_empty());
    conn.execute(
        "INSERT INTO transactions (account_id, category_id, amount, type, description, date) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            account_id,
            category_id,
            amount,
            txn_type.as_str(),
            description,
            date.format(DB_DATE_FORMAT).to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_transactions(
    conn: &Connection,
    user_id: &str,
    account_id: Option<i64>,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<Vec<TxnRow>> {
    let mut sql = String::from(
        "SELECT t.id, t.date, a.name, t.description, t.amount, t.type, c.name \
         FROM transactions t \
         JOIN accounts a ON a.id = t.account_id \
         LEFT JOIN categories c ON c.id = t.category_id \
         WHERE a.user_id = ?1 AND t.deleted_at IS NULL",
    );
    let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = vec![Box::new(user_id.to_string())];
    if let Some(id) = account_id {
        sql.push_str(" AND t.account_id = ?2");
        params.push(Box::new(id));
    }
    if let (Some(year), Some(month)) = (year, month) {
        let idx = params.len() + 1;
        sql.push_str(&format!(" AND strftime('%Y-%m', t.date) = ?{idx}"));
        params.push(Box::new(format!("{year:04}-{month:02}")));
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())), |row| {
            let txn_type: String = row.get(5)?;
            Ok(TxnRow {
                id: row.get(0)?,
                date: row.get(1)?,
                account: row.get(2)?,
                description: row.get(3)?,
                amount: row.get(4)?,
                txn_type: TxnType::parse(&txn_type).unwrap_or(TxnType::Debit),
                category: row.get(6)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn owned_transaction(conn: &Connection, user_id: &str, id: i64) -> Result<()> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM transactions t JOIN accounts a ON a.id = t.account_id \
         WHERE t.id = ?1 AND a.user_id = ?2 AND t.deleted_at IS NULL)",
        rusqlite::params![id, user_id],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(RupeeError::Other(format!("Transaction not found: id {id}")));
    }
    Ok(())
}

pub fn set_transaction_category(
    conn: &Connection,
    user_id: &str,
    id: i64,
    category_id: Option<i64>,
) -> Result<()> {
    owned_transaction(conn, user_id, id)?;
    conn.execute(
        "UPDATE transactions SET category_id = ?1, updated_at = datetime('now') WHERE id = ?2",
        rusqlite::params![category_id, id],
    )?;
    Ok(())
}

pub fn remove_transaction(conn: &Connection, user_id: &str, id: i64) -> Result<()> {
    owned_transaction(conn, user_id, id)?;
    conn.execute(
        "UPDATE transactions SET deleted_at = datetime('now') WHERE id = ?1",
        [id],
    )?;
    Ok(())
}
