//! Common constants for xy-admin modules.

pub struct ContentType;
pub struct DateFormat;

impl ContentType {
    pub const JSON: &'static str = "application/json";
}

impl DateFormat {
    /// The calendar date format of analytics queries.
    pub const DATE: &'static str = "%Y-%m-%d";
}
