use crate::models::TxnType;

/// Format a value as rupees with Indian digit grouping: ₹12,34,567.89
pub fn money(val: f64) -> String {
    let negative = val < 0.0;
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    // Indian grouping: three digits, then twos
    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i == 3 || (i > 3 && (i - 3) % 2 == 0) {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-\u{20b9}{with_commas}.{dec_part}")
    } else {
        format!("\u{20b9}{with_commas}.{dec_part}")
    }
}

/// Render a stored fixed-point amount with its debit/credit sign.
pub fn signed_money(amount: &str, txn_type: TxnType) -> String {
    let val: f64 = amount.parse().unwrap_or(0.0);
    match txn_type {
        TxnType::Debit => format!("-{}", money(val)),
        TxnType::Credit => money(val),
    }
}
