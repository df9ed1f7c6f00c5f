// Utility functions
use chrono::{Duration, NaiveDate};

/// Formats a date as `02-Jan-2006`, the form the index service and reports use.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d-%b-%Y").to_string()
}

/// Inclusive calendar window ending on `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn trailing(end: NaiveDate, days: i64) -> Self {
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    pub fn start_label(&self) -> String {
        format_date(self.start)
    }

    pub fn end_label(&self) -> String {
        format_date(self.end)
    }
}

/// Strips the exchange suffix from a symbol (`TCS.NS` -> `TCS`).
pub fn display_name(symbol: &str) -> &str {
    symbol.strip_suffix(".NS").unwrap_or(symbol)
}
