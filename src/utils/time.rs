//! Time utilities

use chrono::{Local, NaiveDate};

use crate::constants::CERTIFICATE_DATE_FORMAT;

/// Current local calendar date
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a date the way it is printed on certificates (dd-mm-yyyy)
pub fn format_certificate_date(date: NaiveDate) -> String {
    date.format(CERTIFICATE_DATE_FORMAT).to_string()
}
