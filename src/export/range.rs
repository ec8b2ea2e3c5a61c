// src/export/range.rs

use crate::errors::{AppError, AppResult};
use crate::models::event::parse_day;
use crate::utils::date::{first_of_month, last_of_month, parse_month};
use chrono::NaiveDate;

/// Parse `--range` into inclusive bounds.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let (start, end) = match r.split_once(':') {
        Some((s, e)) => (s.trim(), e.trim()),
        None => (r.trim(), r.trim()),
    };

    if start.len() != end.len() {
        return Err(invalid(r, "start and end must have the same format"));
    }

    let from = lower_bound(start).ok_or_else(|| invalid(r, "invalid start"))?;
    let to = upper_bound(end).ok_or_else(|| invalid(r, "invalid end"))?;

    if from > to {
        return Err(invalid(r, "start is after end"));
    }
    Ok((from, to))
}

fn invalid(r: &str, why: &str) -> AppError {
    AppError::InvalidDate(format!("range '{r}': {why}"))
}

fn lower_bound(s: &str) -> Option<NaiveDate> {
    match s.len() {
        4 => NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1),
        7 => {
            let (y, m) = parse_month(s).ok()?;
            first_of_month(y, m)
        }
        10 => parse_day(s),
        _ => None,
    }
}

fn upper_bound(s: &str) -> Option<NaiveDate> {
    match s.len() {
        4 => NaiveDate::from_ymd_opt(s.parse().ok()?, 12, 31),
        7 => {
            let (y, m) = parse_month(s).ok()?;
            last_of_month(y, m)
        }
        10 => parse_day(s),
        _ => None,
    }
}
