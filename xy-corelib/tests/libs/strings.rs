use chrono::{NaiveDate, TimeZone, Utc};
use laboratory::{SpecContext, expect};

use xy_corelib::strings;

use crate::TestState;

/// Test [`strings::date_str`].
pub fn date_str(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    let date = match NaiveDate::from_ymd_opt(2024, 3, 1) {
        None => return Err("invalid test date".to_string()),
        Some(date) => date,
    };
    expect(strings::date_str(&date)).to_equal("2024-03-01".to_string())?;
    let date = match NaiveDate::from_ymd_opt(987, 12, 31) {
        None => return Err("invalid test date".to_string()),
        Some(date) => date,
    };
    expect(strings::date_str(&date)).to_equal("0987-12-31".to_string())
}

/// Test [`strings::is_date`].
pub fn is_date(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    expect(strings::is_date("2024-02-29")).to_equal(true)?;
    expect(strings::is_date("2023-02-29")).to_equal(false)?;
    expect(strings::is_date("2024-3-1")).to_equal(false)?;
    expect(strings::is_date("2024/03/01")).to_equal(false)?;
    expect(strings::is_date("")).to_equal(false)
}

/// Test [`strings::parse_date`].
pub fn parse_date(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    expect(strings::parse_date("2024-03-01")).to_equal(NaiveDate::from_ymd_opt(2024, 3, 1))?;
    expect(strings::parse_date("2024-13-01")).to_equal(None)?;
    expect(strings::parse_date(" 2024-03-01")).to_equal(None)
}

/// Test [`strings::time_str`].
pub fn time_str(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    let time = Utc.timestamp_nanos(1629469195228_000000);
    expect(strings::time_str(&time)).to_equal("2021-08-20T14:19:55.228Z".to_string())
}
