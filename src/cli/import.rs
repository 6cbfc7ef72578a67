use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::accounts::find_account_by_name;
use crate::db::get_connection;
use crate::error::{Result, RupeeError};
use crate::importer::import_transactions;
use crate::models::RawRow;
use crate::settings::{current_user, get_data_dir};

pub fn run(file: &str, account: &str) -> Result<()> {
    let rows = read_rows(Path::new(file))?;

    let mut conn = get_connection(&get_data_dir().join("rupee.db"))?;
    let user = current_user();
    let account_id = find_account_by_name(&conn, &user, account)?;

    match import_transactions(&mut conn, account_id, &user, &rows) {
        Ok(outcome) => {
            println!("{} transaction(s) imported into {account}", outcome.imported);
            Ok(())
        }
        Err(RupeeError::ValidationFailed(errors)) => {
            let mut table = Table::new();
            table.set_header(vec!["Row", "Error"]);
            for err in &errors {
                table.add_row(vec![Cell::new(err.row), Cell::new(&err.error)]);
            }
            eprintln!(
                "{}\n{table}",
                "Some rows failed validation; nothing was imported.".red()
            );
            Err(RupeeError::ValidationFailed(errors))
        }
        Err(other) => Err(other),
    }
}

/// Read statement rows from disk: `.json` files carry the web payload shape
/// (array of arrays or objects); anything else is parsed as CSV.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => read_json_rows(path),
        _ => read_csv_rows(path),
    }
}

fn read_csv_rows(path: &Path) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(RawRow::Cells(record.iter().map(|f| f.to_string()).collect()));
    }
    Ok(rows)
}

fn read_json_rows(path: &Path) -> Result<Vec<RawRow>> {
    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    let Some(items) = value.as_array() else {
        return Err(RupeeError::Other("JSON import expects an array of rows".into()));
    };
    let mut rows = Vec::new();
    for item in items {
        match item {
            serde_json::Value::Array(cells) => {
                rows.push(RawRow::Cells(cells.iter().map(json_cell).collect()));
            }
            serde_json::Value::Object(map) => {
                rows.push(RawRow::Record(
                    map.iter().map(|(k, v)| (k.clone(), json_cell(v))).collect(),
                ));
            }
            _ => {
                return Err(RupeeError::Other("JSON rows must be arrays or objects".into()));
            }
        }
    }
    Ok(rows)
}

fn json_cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
