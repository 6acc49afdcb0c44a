//! String libraries.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use regex::Regex;

use crate::constants::DateFormat;

/// To format the calendar date in `YYYY-MM-DD` format with zero-padded month and day.
pub fn date_str(date: &NaiveDate) -> String {
    date.format(DateFormat::DATE).to_string()
}

/// To check if the string is a valid `YYYY-MM-DD` calendar date.
pub fn is_date(date: &str) -> bool {
    parse_date(date).is_some()
}

/// To parse a `YYYY-MM-DD` calendar date. Dates without zero padding are rejected.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    let regex = match Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$") {
        Err(_) => return None,
        Ok(regex) => regex,
    };
    if !regex.is_match(date) {
        return None;
    }
    NaiveDate::parse_from_str(date, DateFormat::DATE).ok()
}

/// To transfer time to RFC 3339 format with milliseconds.
pub fn time_str(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}
