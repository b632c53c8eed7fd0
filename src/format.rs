// Display formatting helpers for dates and durations

use chrono::{DateTime, Datelike, Utc};

/// Short numeric date, e.g. "3/8/2024".
pub fn format_date(date: &DateTime<Utc>) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Month and year, e.g. "March 2024".
pub fn format_month_year(date: &DateTime<Utc>) -> String {
    date.format("%B %Y").to_string()
}

/// Duration in seconds as minutes:seconds, e.g. "1:30".
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
