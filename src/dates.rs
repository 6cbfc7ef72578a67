use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::error::{Result, RupeeError};

pub const DB_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static DESC_DATE_TIME: OnceLock<Regex> = OnceLock::new();
static DASH_DATE_TIME: OnceLock<Regex> = OnceLock::new();
static DASH_DATE: OnceLock<Regex> = OnceLock::new();

fn desc_date_time_re() -> &'static Regex {
    DESC_DATE_TIME.get_or_init(|| {
        Regex::new(r"(\d{2})/(\d{2})/(\d{4})\s+(\d{2}):(\d{2}):(\d{2})$").unwrap()
    })
}

fn dash_date_time_re() -> &'static Regex {
    DASH_DATE_TIME.get_or_init(|| {
        Regex::new(r"(\d{2})-(\d{2})-(\d{4})\s+(\d{2}):(\d{2}):(\d{2})$").unwrap()
    })
}

fn dash_date_re() -> &'static Regex {
    DASH_DATE.get_or_init(|| Regex::new(r"(\d{2})-(\d{2})-(\d{4})$").unwrap())
}

fn capture_u32(caps: &regex::Captures, i: usize) -> Option<u32> {
    caps.get(i)?.as_str().parse().ok()
}

/// Build a date-time from DD MM YYYY [HH MM SS] captures, rejecting
/// calendar-invalid combinations.
fn date_from_captures(caps: &regex::Captures, with_time: bool) -> Option<NaiveDateTime> {
    let day = capture_u32(caps, 1)?;
    let month = capture_u32(caps, 2)?;
    let year = capture_u32(caps, 3)? as i32;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    if with_time {
        let hours = capture_u32(caps, 4)?;
        let minutes = capture_u32(caps, 5)?;
        let seconds = capture_u32(caps, 6)?;
        date.and_hms_opt(hours, minutes, seconds)
    } else {
        date.and_hms_opt(0, 0, 0)
    }
}

/// Some banks append the transaction timestamp to the narration instead of
/// filling the date column: `"UPI/SWIGGY/... 05/06/2024 13:45:30"`. Returns
/// the parsed date-time and the description with the suffix stripped.
pub fn extract_date_time_from_description(description: &str) -> Option<(NaiveDateTime, String)> {
    let re = desc_date_time_re();
    let caps = re.captures(description)?;
    let date = date_from_captures(&caps, true)?;
    let cleaned = re.replace(description, "").trim().to_string();
    Some((date, cleaned))
}

/// Parse a date string, trying the formats observed in bank exports in
/// priority order: `DD-MM-YYYY HH:MM:SS`, `DD-MM-YYYY`, `DD/MM/YYYY HH:MM:SS`,
/// then a generic ISO/US fallback. Patterns are anchored at the end of the
/// string only; a structurally matching but calendar-invalid candidate falls
/// through to the next format.
pub fn parse_date(date_str: &str) -> Result<NaiveDateTime> {
    let trimmed = date_str.trim();
    if trimmed.is_empty() {
        return Err(RupeeError::DateRequired);
    }

    if let Some(caps) = dash_date_time_re().captures(trimmed) {
        if let Some(date) = date_from_captures(&caps, true) {
            return Ok(date);
        }
    }

    if let Some(caps) = dash_date_re().captures(trimmed) {
        if let Some(date) = date_from_captures(&caps, false) {
            return Ok(date);
        }
    }

    if let Some(caps) = desc_date_time_re().captures(trimmed) {
        if let Some(date) = date_from_captures(&caps, true) {
            return Ok(date);
        }
    }

    parse_generic(trimmed).ok_or_else(|| RupeeError::InvalidDateFormat(date_str.to_string()))
}

fn parse_generic(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    for format in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, format) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Pick the date for one statement row: the explicit date field wins when it
/// parses; otherwise fall back to a timestamp embedded in the description,
/// stripping it from the stored text. A date error is only propagated when
/// the description cannot supply a fallback.
pub fn resolve_row_date(date_str: &str, description: &str) -> Result<(NaiveDateTime, String)> {
    if date_str.trim().is_empty() {
        return extract_date_time_from_description(description).ok_or(RupeeError::DateRequired);
    }
    match parse_date(date_str) {
        Ok(date) => Ok((date, description.trim().to_string())),
        Err(err) => match extract_date_time_from_description(description) {
            Some((date, cleaned)) => Ok((date, cleaned)),
            None => Err(err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    #[test]
    fn test_parse_dash_date_time() {
        assert_eq!(parse_date("15-01-2024 09:30:00").unwrap(), dt(2024, 1, 15, 9, 30, 0));
    }

    #[test]
    fn test_parse_dash_date() {
        assert_eq!(parse_date("01-01-2024").unwrap(), dt(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_parse_slash_date_time() {
        assert_eq!(parse_date("05/06/2024 13:45:30").unwrap(), dt(2024, 6, 5, 13, 45, 30));
    }

    #[test]
    fn test_parse_generic_fallbacks() {
        assert_eq!(parse_date("2024-06-05").unwrap(), dt(2024, 6, 5, 0, 0, 0));
        assert_eq!(parse_date("2024-06-05T13:45:30").unwrap(), dt(2024, 6, 5, 13, 45, 30));
        // US-style slash date without a time component
        assert_eq!(parse_date("06/05/2024").unwrap(), dt(2024, 6, 5, 0, 0, 0));
    }

    #[test]
    fn test_parse_date_anchored_at_end_only() {
        // Matches a trailing date even with a prefix, as the patterns are
        // only end-anchored.
        assert_eq!(parse_date("paid on 01-01-2024").unwrap(), dt(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(matches!(parse_date("not a date"), Err(RupeeError::InvalidDateFormat(_))));
    }

    #[test]
    fn test_parse_date_rejects_invalid_calendar_dates() {
        // 31-02 matches the dash pattern structurally but is not a real day
        assert!(matches!(parse_date("31-02-2024"), Err(RupeeError::InvalidDateFormat(_))));
    }

    #[test]
    fn test_parse_date_requires_non_blank_input() {
        assert!(matches!(parse_date(""), Err(RupeeError::DateRequired)));
        assert!(matches!(parse_date("   "), Err(RupeeError::DateRequired)));
    }

    #[test]
    fn test_extract_from_description() {
        let (date, cleaned) =
            extract_date_time_from_description("Some text 05/06/2024 13:45:30").unwrap();
        assert_eq!(date, dt(2024, 6, 5, 13, 45, 30));
        assert_eq!(cleaned, "Some text");
    }

    #[test]
    fn test_extract_requires_trailing_timestamp() {
        assert!(extract_date_time_from_description("05/06/2024 13:45:30 refund").is_none());
        assert!(extract_date_time_from_description("no timestamp here").is_none());
    }

    #[test]
    fn test_extract_rejects_invalid_calendar_dates() {
        assert!(extract_date_time_from_description("x 31/02/2024 10:00:00").is_none());
    }

    #[test]
    fn test_resolve_prefers_explicit_date_field() {
        let (date, desc) =
            resolve_row_date("01-01-2024", "Chai 05/06/2024 13:45:30").unwrap();
        assert_eq!(date, dt(2024, 1, 1, 0, 0, 0));
        // explicit date wins, so the description keeps its suffix
        assert_eq!(desc, "Chai 05/06/2024 13:45:30");
    }

    #[test]
    fn test_resolve_falls_back_to_description() {
        let (date, desc) = resolve_row_date("", "Chai 05/06/2024 13:45:30").unwrap();
        assert_eq!(date, dt(2024, 6, 5, 13, 45, 30));
        assert_eq!(desc, "Chai");
    }

    #[test]
    fn test_resolve_bad_date_with_description_fallback() {
        let (date, desc) = resolve_row_date("junk", "Chai 05/06/2024 13:45:30").unwrap();
        assert_eq!(date, dt(2024, 6, 5, 13, 45, 30));
        assert_eq!(desc, "Chai");
    }

    #[test]
    fn test_resolve_propagates_original_date_error() {
        assert!(matches!(
            resolve_row_date("junk", "no timestamp"),
            Err(RupeeError::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn test_resolve_requires_some_date_source() {
        assert!(matches!(
            resolve_row_date("", "no timestamp"),
            Err(RupeeError::DateRequired)
        ));
    }
}
