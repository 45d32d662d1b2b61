use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// One day of the displayed month, flagged against an explicit `today`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day_of_month: u32,
    pub weekday: String,
    pub is_today: bool,
    pub is_future: bool,
}

/// Canonical wire format for dates. Every set-membership comparison goes
/// through this, never locale-dependent formatting.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The month selector exchanged with the page, e.g. `2024-03`.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Human heading for the month, e.g. `March 2024`.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Parses a `YYYY-MM` selector into the first day of that month.
pub fn parse_month(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok()
}

pub fn month_start(reference: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1)
        .expect("first of an existing month is always valid")
}

pub fn next_month(reference: NaiveDate) -> NaiveDate {
    month_start(reference) + Months::new(1)
}

pub fn prev_month(reference: NaiveDate) -> NaiveDate {
    month_start(reference) - Months::new(1)
}

/// Every day of the reference month, first through last, ascending.
pub fn month_days(reference: NaiveDate) -> Vec<NaiveDate> {
    let start = month_start(reference);
    let end = next_month(reference);
    let mut days = Vec::with_capacity(31);
    let mut day = start;
    while day < end {
        days.push(day);
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    days
}

/// `month_days` annotated for rendering against an explicit `today`.
pub fn calendar_days(reference: NaiveDate, today: NaiveDate) -> Vec<CalendarDay> {
    month_days(reference)
        .into_iter()
        .map(|date| CalendarDay {
            day_of_month: date.day(),
            weekday: date.format("%a").to_string(),
            is_today: date == today,
            is_future: date > today,
            date,
        })
        .collect()
}
