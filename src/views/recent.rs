use crate::core::register::resolve_type;
use crate::errors::AppResult;
use crate::models::{Event, EventType, TypeLookup};
use crate::store::{Collection, LiveQuery, Store};
use crate::utils::colors::swatch;
use crate::utils::date::format_short;
use crate::utils::formatting::{format_created_at, format_value};
use crate::utils::table::Table;

pub const NO_EVENTS_MSG: &str = "No events yet";
pub const NO_EVENTS_OF_TYPE_MSG: &str = "No events of this type";

/// Newest events first, optionally limited to one type.
pub struct RecentView {
    events: LiveQuery<Vec<Event>>,
    types: LiveQuery<Vec<EventType>>,
    filter: Option<i64>,
    limit: Option<usize>,
    show_weekday: bool,
}

impl RecentView {
    pub fn new(store: &Store) -> AppResult<Self> {
        let events = LiveQuery::new(store, &[Collection::Events], |s| s.recent_events(None, None))?;
        let types = LiveQuery::new(store, &[Collection::EventTypes], |s| s.event_types())?;

        Ok(Self {
            events,
            types,
            filter: None,
            limit: None,
            show_weekday: true,
        })
    }

    pub fn events(&self) -> &LiveQuery<Vec<Event>> {
        &self.events
    }

    pub fn types(&self) -> &LiveQuery<Vec<EventType>> {
        &self.types
    }

    pub fn filter(&self) -> Option<i64> {
        self.filter
    }

    /// Filter by type id. The id does not have to exist any more: events of
    /// a deleted type can still be listed.
    pub fn set_filter(&mut self, type_id: Option<i64>) {
        self.filter = type_id;
    }

    /// Filter by a type selector (id or name); `all` clears the filter.
    pub fn set_filter_by(&mut self, selector: &str) -> AppResult<()> {
        let sel = selector.trim();
        if sel.is_empty() || sel.eq_ignore_ascii_case("all") {
            self.filter = None;
            return Ok(());
        }
        let ty = resolve_type(&self.types.get(), sel)?;
        self.filter = Some(ty.id);
        Ok(())
    }

    pub fn set_limit(&mut self, limit: Option<usize>) {
        self.limit = limit;
    }

    pub fn set_show_weekday(&mut self, show: bool) {
        self.show_weekday = show;
    }

    /// Rows to display, with types resolved (or `Unknown`).
    pub fn rows(&self) -> Vec<(Event, TypeLookup)> {
        let types = self.types.get();
        self.events
            .get()
            .iter()
            .filter(|ev| self.filter.is_none_or(|id| ev.type_id == id))
            .take(self.limit.unwrap_or(usize::MAX))
            .map(|ev| (ev.clone(), TypeLookup::resolve(&types, ev.type_id)))
            .collect()
    }

    pub fn empty_message(&self) -> &'static str {
        if self.filter.is_some() {
            NO_EVENTS_OF_TYPE_MSG
        } else {
            NO_EVENTS_MSG
        }
    }

    pub fn render(&self) -> String {
        let rows = self.rows();
        if rows.is_empty() {
            return format!("{}\n", self.empty_message());
        }

        let mut table = Table::with_headers(&["ID", "DAY", "TYPE", "VALUE", "LOGGED AT"]);
        for (ev, ty) in rows {
            let day = if self.show_weekday {
                format!("{} ({})", ev.day_str(), format_short(&ev.day))
            } else {
                ev.day_str()
            };
            table.add_row(vec![
                ev.id.to_string(),
                day,
                format!("{} {}", swatch(ty.color()), ty.name()),
                format_value(ev.value),
                format_created_at(&ev.created_at),
            ]);
        }
        table.render()
    }
}
