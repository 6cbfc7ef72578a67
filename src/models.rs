use std::collections::HashMap;

use chrono::NaiveDateTime;

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub user_id: String,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub user_id: String,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: Option<i64>,
    pub account_id: i64,
    pub category_id: Option<i64>,
    pub amount: String,
    pub txn_type: TxnType,
    pub description: Option<String>,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnType {
    Debit,
    Credit,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "debit" => Some(Self::Debit),
            "credit" => Some(Self::Credit),
            _ => None,
        }
    }
}

/// One raw row from a statement file before normalization: either an ordered
/// list of cells (the first such row is the header) or an already-keyed record.
#[derive(Debug, Clone)]
pub enum RawRow {
    Cells(Vec<String>),
    Record(HashMap<String, String>),
}

/// A validated row ready for the batch insert. Never persisted unless every
/// row in the same batch validated cleanly.
#[derive(Debug, Clone)]
pub struct TransactionCandidate {
    pub account_id: i64,
    pub amount: String,
    pub txn_type: TxnType,
    pub description: Option<String>,
    pub date: NaiveDateTime,
    pub category_id: Option<i64>,
}

#[derive(Debug)]
pub struct ImportOutcome {
    pub imported: usize,
}
