use crate::errors::{AppError, AppResult};
use crate::models::event::{DAY_FORMAT, parse_day};
use chrono::{Datelike, Local, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Sunday-first, like the calendar grid.
pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current local calendar date as `YYYY-MM-DD`.
pub fn today_string() -> String {
    today().format(DAY_FORMAT).to_string()
}

/// Parse a CLI day argument; `today` is accepted as a shortcut.
pub fn parse_day_arg(s: &str) -> AppResult<NaiveDate> {
    if s.eq_ignore_ascii_case("today") {
        return Ok(today());
    }
    parse_day(s.trim()).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// `YYYY-MM` → (year, month).
pub fn parse_month(s: &str) -> AppResult<(i32, u32)> {
    let d = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), DAY_FORMAT)
        .map_err(|_| AppError::InvalidDate(format!("{s} (expected YYYY-MM)")))?;
    Ok((d.year(), d.month()))
}

/// Shift a (year, month) cursor by `delta` months.
pub fn add_months((year, month): (i32, u32), delta: i32) -> (i32, u32) {
    let idx = year * 12 + (month as i32 - 1) + delta;
    (idx.div_euclid(12), (idx.rem_euclid(12) + 1) as u32)
}

pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn last_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (ny, nm) = add_months((year, month), 1);
    first_of_month(ny, nm)?.pred_opt()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    last_of_month(year, month).map(|d| d.day()).unwrap_or(0)
}

pub fn month_label(year: i32, month: u32) -> String {
    let name = MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?");
    format!("{name} {year}")
}

/// "Friday, March 1, 2024"
pub fn format_long(day: &NaiveDate) -> String {
    day.format("%A, %B %-d, %Y").to_string()
}

/// "Fri, Mar 1"
pub fn format_short(day: &NaiveDate) -> String {
    day.format("%a, %b %-d").to_string()
}
