use std::collections::HashMap;

use crate::models::RawRow;

/// Collapse the two statement shapes (header row + cell rows, or pre-keyed
/// records) into one record per usable data row. The header row itself is
/// never emitted, and rows that end up with no fields are dropped silently.
pub fn normalize_rows(rows: &[RawRow]) -> Vec<HashMap<String, String>> {
    let mut out = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let record = match row {
            RawRow::Record(map) => map.clone(),
            RawRow::Cells(cells) => {
                if index == 0 {
                    // header row, consumed by the rows below
                    continue;
                }
                let Some(RawRow::Cells(headers)) = rows.first() else {
                    continue;
                };
                let mut map = HashMap::new();
                for (col, header) in headers.iter().enumerate() {
                    let header = header.trim();
                    if header.is_empty() {
                        continue;
                    }
                    let value = cells.get(col).cloned().unwrap_or_default();
                    map.insert(header.to_string(), value);
                }
                map
            }
        };
        if !record.is_empty() {
            out.push(record);
        }
    }
    out
}

/// Look up a logical field under the casing variants banks actually export
/// (`date`, `Date`, `DATE`, `Txn Date`, ...). First variant present with a
/// non-empty value wins; otherwise the default.
pub fn get_field(row: &HashMap<String, String>, field_name: &str, default_value: &str) -> String {
    let variants = [
        field_name.to_string(),
        capitalize(field_name),
        field_name.to_uppercase(),
        title_case(field_name),
        field_name.to_lowercase(),
    ];
    for variant in &variants {
        if let Some(value) = row.get(variant.as_str()) {
            if !value.is_empty() {
                return value.clone();
            }
        }
    }
    default_value.to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn title_case(s: &str) -> String {
    s.split(' ').map(capitalize).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> RawRow {
        RawRow::Cells(values.iter().map(|s| s.to_string()).collect())
    }

    fn record(pairs: &[(&str, &str)]) -> RawRow {
        RawRow::Record(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_normalize_zips_header_against_data_rows() {
        let rows = vec![
            cells(&["Date", "Description", "Amount"]),
            cells(&["01-01-2024", "Groceries", "100.00"]),
            cells(&["02-01-2024", "Rent", "5000.00"]),
        ];
        let normalized = normalize_rows(&rows);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0]["Date"], "01-01-2024");
        assert_eq!(normalized[0]["Description"], "Groceries");
        assert_eq!(normalized[1]["Amount"], "5000.00");
    }

    #[test]
    fn test_normalize_trims_header_cells() {
        let rows = vec![
            cells(&[" Date ", "Description"]),
            cells(&["01-01-2024", "Chai"]),
        ];
        let normalized = normalize_rows(&rows);
        assert_eq!(normalized[0]["Date"], "01-01-2024");
    }

    #[test]
    fn test_normalize_skips_empty_header_columns() {
        let rows = vec![
            cells(&["Date", "", "Amount"]),
            cells(&["01-01-2024", "ignored", "100.00"]),
        ];
        let normalized = normalize_rows(&rows);
        assert_eq!(normalized[0].len(), 2);
        assert!(!normalized[0].values().any(|v| v == "ignored"));
    }

    #[test]
    fn test_normalize_missing_cells_become_empty() {
        let rows = vec![
            cells(&["Date", "Description", "Amount"]),
            cells(&["01-01-2024"]),
        ];
        let normalized = normalize_rows(&rows);
        assert_eq!(normalized[0]["Description"], "");
        assert_eq!(normalized[0]["Amount"], "");
    }

    #[test]
    fn test_normalize_drops_blank_rows() {
        let rows = vec![
            cells(&["Date", "Amount"]),
            record(&[]),
            cells(&["01-01-2024", "1.00"]),
        ];
        let normalized = normalize_rows(&rows);
        assert_eq!(normalized.len(), 1);
    }

    #[test]
    fn test_normalize_header_row_never_appears_in_output() {
        let rows = vec![cells(&["Date", "Amount"])];
        assert!(normalize_rows(&rows).is_empty());
    }

    #[test]
    fn test_normalize_records_pass_through() {
        let rows = vec![
            record(&[("date", "01-01-2024"), ("debit", "10")]),
            record(&[("date", "02-01-2024"), ("credit", "20")]),
        ];
        let normalized = normalize_rows(&rows);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0]["debit"], "10");
    }

    #[test]
    fn test_normalize_cell_rows_without_cell_header_yield_nothing() {
        let rows = vec![
            record(&[("date", "01-01-2024")]),
            cells(&["02-01-2024", "Rent", "5000.00"]),
        ];
        let normalized = normalize_rows(&rows);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0]["date"], "01-01-2024");
    }

    #[test]
    fn test_get_field_is_case_tolerant() {
        for key in ["date", "Date", "DATE"] {
            let row: HashMap<String, String> =
                [(key.to_string(), "01-01-2024".to_string())].into();
            assert_eq!(get_field(&row, "date", ""), "01-01-2024", "key: {key}");
        }
    }

    #[test]
    fn test_get_field_title_case_with_spaces() {
        let row: HashMap<String, String> =
            [("Txn Date".to_string(), "01-01-2024".to_string())].into();
        assert_eq!(get_field(&row, "txn date", ""), "01-01-2024");
    }

    #[test]
    fn test_get_field_falls_back_to_default() {
        let row: HashMap<String, String> =
            [("description".to_string(), "Chai".to_string())].into();
        assert_eq!(get_field(&row, "debit", "0"), "0");
    }

    #[test]
    fn test_get_field_skips_empty_values() {
        let row: HashMap<String, String> = [
            ("debit".to_string(), String::new()),
            ("Debit".to_string(), "50".to_string()),
        ]
        .into();
        assert_eq!(get_field(&row, "debit", "0"), "50");
    }
}
