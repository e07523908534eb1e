use chrono::NaiveDate;

use crate::error::ParseError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const MONTH_FORMAT: &str = "%Y-%m";

/**
 * Dates come in as plain `YYYY-MM-DD` cells. chrono on its own is lenient about
 * padding (`2024-1-4` parses fine with `%Y-%m-%d`), so the shape is checked
 * by hand first and chrono only has to validate the calendar.
 */
pub fn parse_date(text: &str) -> Result<NaiveDate, ParseError> {
    let invalid = || ParseError::Date {
        value: text.to_string(),
    };

    let bytes = text.as_bytes();
    let well_shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, byte)| match i {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        });
    if !well_shaped {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| invalid())
}

/// `YYYY-MM` of the given date.
pub fn month_key(date: NaiveDate) -> String {
    date.format(MONTH_FORMAT).to_string()
}
