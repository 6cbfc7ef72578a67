use std::collections::HashMap;

use rusqlite::Connection;

use crate::amounts::validate_amount;
use crate::dates::{resolve_row_date, DB_DATE_FORMAT};
use crate::error::{Result, RowError, RupeeError};
use crate::models::{ImportOutcome, RawRow, TransactionCandidate, TxnType};
use crate::rows::{get_field, normalize_rows};

fn account_exists(conn: &Connection, account_id: i64, user_id: &str) -> Result<bool> {
    let mut stmt = conn.prepare(
        "SELECT 1 FROM accounts WHERE id = ?1 AND user_id = ?2 AND deleted_at IS NULL",
    )?;
    Ok(stmt.exists(rusqlite::params![account_id, user_id])?)
}

/// Validate one normalized statement row into a transaction candidate.
/// Exactly one of debit/credit must be strictly positive; the positive side
/// decides the transaction type and amount.
fn validate_row(row: &HashMap<String, String>, account_id: i64) -> Result<TransactionCandidate> {
    let mut date_str = get_field(row, "date", "");
    if date_str.is_empty() {
        // common bank-export alias
        date_str = get_field(row, "txn date", "");
    }
    let description = get_field(row, "description", "");
    let debit_str = get_field(row, "debit", "0");
    let credit_str = get_field(row, "credit", "0");

    let (date, description) = resolve_row_date(&date_str, &description)?;

    let debit_amount = validate_amount(Some(&debit_str))?;
    let credit_amount = validate_amount(Some(&credit_str))?;
    let debit: f64 = debit_amount.parse().unwrap_or(0.0);
    let credit: f64 = credit_amount.parse().unwrap_or(0.0);

    if debit > 0.0 && credit > 0.0 {
        return Err(RupeeError::ConflictingDebitCredit);
    }
    if debit == 0.0 && credit == 0.0 {
        return Err(RupeeError::MissingAmount);
    }

    let (txn_type, amount) = if debit > 0.0 {
        (TxnType::Debit, debit_amount)
    } else {
        (TxnType::Credit, credit_amount)
    };

    Ok(TransactionCandidate {
        account_id,
        amount,
        txn_type,
        description: if description.is_empty() { None } else { Some(description) },
        date,
        category_id: None,
    })
}

/// Import a batch of statement rows into an account. Every row is validated
/// before anything is written; row errors are collected in input order and a
/// single failing row aborts the whole batch. On success all candidates are
/// inserted inside one database transaction.
pub fn import_transactions(
    conn: &mut Connection,
    account_id: i64,
    user_id: &str,
    rows: &[RawRow],
) -> Result<ImportOutcome> {
    if rows.is_empty() {
        return Err(RupeeError::NoData);
    }
    if !account_exists(conn, account_id, user_id)? {
        return Err(RupeeError::AccountNotFound);
    }

    let normalized = normalize_rows(rows);

    let mut candidates = Vec::new();
    let mut errors = Vec::new();
    for (index, row) in normalized.iter().enumerate() {
        if row.is_empty() {
            continue;
        }
        match validate_row(row, account_id) {
            Ok(candidate) => candidates.push(candidate),
            Err(err) => errors.push(RowError {
                row: index + 1,
                error: err.to_string(),
            }),
        }
    }

    if !errors.is_empty() {
        return Err(RupeeError::ValidationFailed(errors));
    }
    if candidates.is_empty() {
        return Err(RupeeError::NoValidTransactions);
    }

    let imported = candidates.len();
    insert_candidates(conn, &candidates).map_err(|e| RupeeError::ImportFailed(e.to_string()))?;

    Ok(ImportOutcome { imported })
}

fn insert_candidates(
    conn: &mut Connection,
    candidates: &[TransactionCandidate],
) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO transactions (account_id, category_id, amount, type, description, date) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for candidate in candidates {
            stmt.execute(rusqlite::params![
                candidate.account_id,
                candidate.category_id,
                candidate.amount,
                candidate.txn_type.as_str(),
                candidate.description,
                candidate.date.format(DB_DATE_FORMAT).to_string(),
            ])?;
        }
    }
    tx.commit()
}
