use crate::db::log::ttlog_soft;
use crate::errors::{AppError, AppResult};
use crate::models::color::{DEFAULT_COLOR, parse_color};
use crate::models::{EventType, NewEventType, TypeLookup};
use crate::store::Store;

pub const MISSING_NAME_MSG: &str = "Please enter a name";

/// Event-type management (the settings screen).
pub struct TypeLogic;

impl TypeLogic {
    /// Validate and create a type. Colour defaults to the first palette
    /// entry.
    pub fn add(
        store: &Store,
        name: &str,
        is_numeric: bool,
        color: Option<&str>,
    ) -> AppResult<EventType> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(MISSING_NAME_MSG.to_string()));
        }

        let color = match color {
            Some(c) => parse_color(c)?,
            None => DEFAULT_COLOR.to_string(),
        };

        let new_type = NewEventType::new(name, is_numeric, color);
        let id = store.add_event_type(&new_type)?;

        ttlog_soft(
            store.conn(),
            "type_add",
            name,
            &format!("Event type #{} added (numeric={})", id, is_numeric),
        );

        Ok(EventType {
            id,
            name: new_type.name,
            is_numeric,
            color: new_type.color,
        })
    }

    /// Remove a type. Its events stay and show as "Unknown".
    pub fn delete(store: &Store, id: i64) -> AppResult<EventType> {
        let existing = match store.event_type(id)? {
            TypeLookup::Found(t) => t,
            TypeLookup::Unknown(_) => return Err(AppError::EventTypeNotFound(format!("#{id}"))),
        };

        store.delete_event_type(id)?;

        ttlog_soft(
            store.conn(),
            "type_del",
            &existing.name,
            &format!("Event type #{} deleted (events kept)", id),
        );

        Ok(existing)
    }
}
