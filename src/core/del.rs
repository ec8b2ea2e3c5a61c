use crate::db::log::ttlog_soft;
use crate::errors::{AppError, AppResult};
use crate::models::Event;
use crate::store::Store;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Delete one event by id and return what was removed.
    pub fn apply(store: &Store, id: i64) -> AppResult<Event> {
        let event = store.event(id)?.ok_or(AppError::EventNotFound(id))?;

        store.delete_event(id)?;

        let type_name = store.event_type(event.type_id)?.name().to_string();
        ttlog_soft(
            store.conn(),
            "del",
            &format!("#{id}"),
            &format!("Deleted {} on {}", type_name, event.day_str()),
        );

        Ok(event)
    }
}
