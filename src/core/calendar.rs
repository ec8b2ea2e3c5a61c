//! Month calendar model: which days of a month carry events.

use crate::models::Event;
use crate::utils::date::{days_in_month, first_of_month};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub events: usize,
    pub is_today: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st in a Sunday-first grid.
    pub start_padding: u32,
    pub days: Vec<CalendarDay>,
}

impl MonthCalendar {
    pub fn build(year: i32, month: u32, events: &[Event], today: NaiveDate) -> Self {
        let counts = count_by_day(events);

        let start_padding = first_of_month(year, month)
            .map(|d| d.weekday().num_days_from_sunday())
            .unwrap_or(0);

        let days = (1..=days_in_month(year, month))
            .filter_map(|d| NaiveDate::from_ymd_opt(year, month, d))
            .map(|date| CalendarDay {
                date,
                events: counts.get(&date).copied().unwrap_or(0),
                is_today: date == today,
            })
            .collect();

        Self {
            year,
            month,
            start_padding,
            days,
        }
    }

    pub fn days_with_events(&self) -> usize {
        self.days.iter().filter(|d| d.events > 0).count()
    }

    /// Grid rows of 7 cells; `None` is a padding cell.
    pub fn weeks(&self) -> Vec<Vec<Option<&CalendarDay>>> {
        let mut cells: Vec<Option<&CalendarDay>> = vec![None; self.start_padding as usize];
        cells.extend(self.days.iter().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(|w| w.to_vec()).collect()
    }
}

pub fn count_by_day(events: &[Event]) -> BTreeMap<NaiveDate, usize> {
    let mut out = BTreeMap::new();
    for ev in events {
        *out.entry(ev.day).or_insert(0) += 1;
    }
    out
}

/// Events of one day, in store order.
pub fn events_on<'a>(events: &'a [Event], day: &NaiveDate) -> Vec<&'a Event> {
    events.iter().filter(|e| &e.day == day).collect()
}
