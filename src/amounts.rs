use crate::error::{Result, RupeeError};

/// Largest magnitude that fits the DECIMAL(12,2) columns the data model uses.
pub const MAX_AMOUNT: f64 = 999_999_999_999.99;

/// Validate a monetary field from a statement row and normalize it to a
/// fixed-point decimal string with exactly two fractional digits. Absent or
/// empty input means "no amount on this side" and becomes `"0.00"`. Grouping
/// commas are tolerated; negatives are not (debit/credit carry the sign).
pub fn validate_amount(raw: Option<&str>) -> Result<String> {
    let raw = match raw {
        None => return Ok("0.00".to_string()),
        Some(s) => s,
    };
    if raw.is_empty() {
        return Ok("0.00".to_string());
    }
    let num: f64 = raw
        .replace(',', "")
        .trim()
        .parse()
        .map_err(|_| RupeeError::InvalidAmount(raw.to_string()))?;
    if !num.is_finite() || num < 0.0 {
        return Err(RupeeError::InvalidAmount(raw.to_string()));
    }
    if num.abs() > MAX_AMOUNT {
        return Err(RupeeError::AmountExceedsMaximum);
    }
    Ok(format!("{num:.2}"))
}

/// Like [`validate_amount`] but for account balances, which may be negative
/// and must always be present.
pub fn validate_balance(raw: &str) -> Result<String> {
    let num: f64 = raw
        .replace(',', "")
        .trim()
        .parse()
        .map_err(|_| RupeeError::InvalidAmount(raw.to_string()))?;
    if !num.is_finite() {
        return Err(RupeeError::InvalidAmount(raw.to_string()));
    }
    if num.abs() > MAX_AMOUNT {
        return Err(RupeeError::AmountExceedsMaximum);
    }
    Ok(format!("{num:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_amount_formats_two_decimals() {
        assert_eq!(validate_amount(Some("100")).unwrap(), "100.00");
        assert_eq!(validate_amount(Some("1,234.5")).unwrap(), "1234.50");
        assert_eq!(validate_amount(Some("0.005")).unwrap(), "0.01");
    }

    #[test]
    fn test_validate_amount_absent_means_zero() {
        assert_eq!(validate_amount(None).unwrap(), "0.00");
        assert_eq!(validate_amount(Some("")).unwrap(), "0.00");
    }

    #[test]
    fn test_validate_amount_is_idempotent() {
        for input in ["100", "1,234.5", "0.10", "999999999999.99"] {
            let once = validate_amount(Some(input)).unwrap();
            let twice = validate_amount(Some(&once)).unwrap();
            assert_eq!(once, twice, "input: {input}");
        }
    }

    #[test]
    fn test_validate_amount_rejects_garbage() {
        assert!(matches!(
            validate_amount(Some("abc")),
            Err(RupeeError::InvalidAmount(_))
        ));
        assert!(matches!(
            validate_amount(Some("NaN")),
            Err(RupeeError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_validate_amount_rejects_negatives() {
        assert!(matches!(
            validate_amount(Some("-5.00")),
            Err(RupeeError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_validate_amount_enforces_maximum() {
        assert_eq!(validate_amount(Some("999999999999.99")).unwrap(), "999999999999.99");
        assert!(matches!(
            validate_amount(Some("1000000000000")),
            Err(RupeeError::AmountExceedsMaximum)
        ));
    }

    #[test]
    fn test_validate_balance_allows_negatives() {
        assert_eq!(validate_balance("-250.5").unwrap(), "-250.50");
        assert_eq!(validate_balance("1,000").unwrap(), "1000.00");
        assert!(matches!(
            validate_balance("1000000000000"),
            Err(RupeeError::AmountExceedsMaximum)
        ));
    }
}
