use thiserror::Error;

/// A single rejected row from a statement import, numbered from 1.
#[derive(Debug, Clone)]
pub struct RowError {
    pub row: usize,
    pub error: String,
}

#[derive(Error, Debug)]
pub enum RupeeError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No data to import")]
    NoData,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Date is required")]
    DateRequired,

    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount exceeds maximum allowed value")]
    AmountExceedsMaximum,

    #[error("Both Debit and Credit cannot have values in the same row")]
    ConflictingDebitCredit,

    #[error("Either Debit or Credit must have a value")]
    MissingAmount,

    #[error("Validation failed: {} row(s) rejected, nothing was imported", .0.len())]
    ValidationFailed(Vec<RowError>),

    #[error("No valid transactions found in the file")]
    NoValidTransactions,

    #[error("Import failed: {0}")]
    ImportFailed(String),

    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, RupeeError>;
