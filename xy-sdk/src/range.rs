//! To resolve symbolic time ranges of analytics queries into calendar dates.
//!
//! | selector    | start date       | end date       |
//! |-------------|------------------|----------------|
//! | `today`     | today            | today          |
//! | `yesterday` | today - 1        | today - 1      |
//! | `3days`     | today - 3        | today          |
//! | `7days`     | today - 7        | today          |
//! | `30days`    | today - 30       | today          |
//! | `custom`    | custom start     | custom end     |
//!
//! Dates are local calendar dates. A `custom` selector without both bounds and an unrecognized
//! selector fall back to the `7days` range.

use std::{fmt, str::FromStr};

use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use xy_corelib::strings;

/// Symbolic time range selectors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimeRange {
    Today,
    Yesterday,
    ThreeDays,
    SevenDays,
    ThirtyDays,
    Custom,
}

/// The resolved date range in `YYYY-MM-DD` format. Serialized as the analytics query string.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

pub const SEL_TODAY: &'static str = "today";
pub const SEL_YESTERDAY: &'static str = "yesterday";
pub const SEL_3DAYS: &'static str = "3days";
pub const SEL_7DAYS: &'static str = "7days";
pub const SEL_30DAYS: &'static str = "30days";
pub const SEL_CUSTOM: &'static str = "custom";

/// All selectors for argument parsers.
pub const SELECTORS: [&'static str; 6] = [
    SEL_TODAY,
    SEL_YESTERDAY,
    SEL_3DAYS,
    SEL_7DAYS,
    SEL_30DAYS,
    SEL_CUSTOM,
];

const DEF_DAYS: u64 = 7;

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Today => SEL_TODAY,
            TimeRange::Yesterday => SEL_YESTERDAY,
            TimeRange::ThreeDays => SEL_3DAYS,
            TimeRange::SevenDays => SEL_7DAYS,
            TimeRange::ThirtyDays => SEL_30DAYS,
            TimeRange::Custom => SEL_CUSTOM,
        }
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SEL_TODAY => Ok(TimeRange::Today),
            SEL_YESTERDAY => Ok(TimeRange::Yesterday),
            SEL_3DAYS => Ok(TimeRange::ThreeDays),
            SEL_7DAYS => Ok(TimeRange::SevenDays),
            SEL_30DAYS => Ok(TimeRange::ThirtyDays),
            SEL_CUSTOM => Ok(TimeRange::Custom),
            _ => Err(format!("unknown time range `{}`", s)),
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// To resolve the selector with the local date of today.
pub fn resolve(selector: &str, custom_start: Option<&str>, custom_end: Option<&str>) -> DateRange {
    resolve_on(Local::now().date_naive(), selector, custom_start, custom_end)
}

/// To resolve the selector with the specified date of today.
///
/// Custom bounds are used as-is when both of them are non-empty.
pub fn resolve_on(
    today: NaiveDate,
    selector: &str,
    custom_start: Option<&str>,
    custom_end: Option<&str>,
) -> DateRange {
    let range = match TimeRange::from_str(selector) {
        Err(_) => return days_ago(today, DEF_DAYS),
        Ok(range) => range,
    };
    match range {
        TimeRange::Today => days_ago(today, 0),
        TimeRange::Yesterday => {
            let yesterday = strings::date_str(&sub_days(today, 1));
            DateRange {
                start_date: yesterday.clone(),
                end_date: yesterday,
            }
        }
        TimeRange::ThreeDays => days_ago(today, 3),
        TimeRange::SevenDays => days_ago(today, 7),
        TimeRange::ThirtyDays => days_ago(today, 30),
        TimeRange::Custom => match (custom_start, custom_end) {
            (Some(start), Some(end)) if start.len() > 0 && end.len() > 0 => DateRange {
                start_date: start.to_string(),
                end_date: end.to_string(),
            },
            _ => days_ago(today, DEF_DAYS),
        },
    }
}

/// From `days` days ago to today.
fn days_ago(today: NaiveDate, days: u64) -> DateRange {
    DateRange {
        start_date: strings::date_str(&sub_days(today, days)),
        end_date: strings::date_str(&today),
    }
}

fn sub_days(date: NaiveDate, days: u64) -> NaiveDate {
    match date.checked_sub_days(Days::new(days)) {
        None => NaiveDate::MIN,
        Some(date) => date,
    }
}
