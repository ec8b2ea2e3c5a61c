use crate::core::calendar::{MonthCalendar, events_on};
use crate::errors::AppResult;
use crate::models::{Event, EventType, TypeLookup};
use crate::store::{Collection, LiveQuery, Store};
use crate::utils::colors::swatch;
use crate::utils::date::{DAY_NAMES, add_months, format_long, month_label, today};
use crate::utils::formatting::{
    bold, format_created_at, format_value, pad_left, pad_right, visible_width,
};
use ansi_term::Style;
use chrono::{Datelike, NaiveDate};

/// Month calendar with per-day markers and the detail list of one day.
pub struct HistoryView {
    events: LiveQuery<Vec<Event>>,
    types: LiveQuery<Vec<EventType>>,
    month: (i32, u32),
    selected: Option<NaiveDate>,
    today: NaiveDate,
}

impl HistoryView {
    pub fn new(store: &Store) -> AppResult<Self> {
        let events = LiveQuery::new(store, &[Collection::Events], |s| s.events())?;
        let types = LiveQuery::new(store, &[Collection::EventTypes], |s| s.event_types())?;
        let today = today();

        Ok(Self {
            events,
            types,
            month: (today.year(), today.month()),
            selected: None,
            today,
        })
    }

    pub fn events(&self) -> &LiveQuery<Vec<Event>> {
        &self.events
    }

    pub fn types(&self) -> &LiveQuery<Vec<EventType>> {
        &self.types
    }

    pub fn month(&self) -> (i32, u32) {
        self.month
    }

    /// Moving the cursor drops the day selection.
    pub fn set_month(&mut self, year: i32, month: u32) {
        self.month = (year, month);
        self.selected = None;
    }

    pub fn prev_month(&mut self) {
        let (y, m) = add_months(self.month, -1);
        self.set_month(y, m);
    }

    pub fn next_month(&mut self) {
        let (y, m) = add_months(self.month, 1);
        self.set_month(y, m);
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    /// Select `day`, or clear the selection when it is already selected.
    /// A day outside the shown month moves the cursor to it.
    pub fn select_day(&mut self, day: NaiveDate) {
        if self.selected == Some(day) {
            self.selected = None;
            return;
        }
        self.month = (day.year(), day.month());
        self.selected = Some(day);
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn calendar(&self) -> MonthCalendar {
        let (y, m) = self.month;
        MonthCalendar::build(y, m, &self.events.get(), self.today)
    }

    /// Events of the selected day with their types resolved.
    pub fn day_details(&self) -> Vec<(Event, TypeLookup)> {
        let Some(day) = self.selected else {
            return Vec::new();
        };
        let types = self.types.get();
        events_on(&self.events.get(), &day)
            .into_iter()
            .map(|ev| (ev.clone(), TypeLookup::resolve(&types, ev.type_id)))
            .collect()
    }

    pub fn render(&self) -> String {
        let cal = self.calendar();
        let mut out = format!("{}\n\n", bold(&month_label(cal.year, cal.month)));

        for name in DAY_NAMES {
            out.push_str(&format!("{:>4}", &name[..2]));
        }
        out.push('\n');

        for week in cal.weeks() {
            for cell in week {
                let Some(day) = cell else {
                    out.push_str("    ");
                    continue;
                };
                let marker = if day.events > 0 { '•' } else { ' ' };
                let text = format!("{:>3}{}", day.date.day(), marker);

                let mut style = Style::new();
                if day.is_today {
                    style = style.bold().underline();
                }
                if Some(day.date) == self.selected {
                    style = style.reverse();
                }
                out.push_str(&style.paint(text).to_string());
            }
            out.push('\n');
        }

        out.push_str(&format!(
            "\n{} day(s) with events this month\n",
            cal.days_with_events()
        ));

        if let Some(day) = self.selected {
            out.push('\n');
            out.push_str(&bold(&format_long(&day)));
            out.push('\n');

            let details = self.day_details();
            if details.is_empty() {
                out.push_str("  No events on this day\n");
            }

            let name_w = details
                .iter()
                .map(|(_, t)| visible_width(t.name()))
                .max()
                .unwrap_or(0);
            for (ev, ty) in &details {
                out.push_str(&format!(
                    "  #{:<4} {} {}  {}  {}\n",
                    ev.id,
                    swatch(ty.color()),
                    pad_right(ty.name(), name_w),
                    pad_left(&format_value(ev.value), 6),
                    format_created_at(&ev.created_at),
                ));
            }
        }
        out
    }
}
