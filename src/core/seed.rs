use crate::db::log::ttlog_soft;
use crate::db::queries::{count_event_types, insert_event_type};
use crate::errors::AppResult;
use crate::models::NewEventType;
use crate::store::{Collection, Store};

/// (name, numeric, colour) of the types created on first run.
pub const DEFAULT_EVENT_TYPES: [(&str, bool, &str); 4] = [
    ("Exercise", false, "#22c55e"),
    ("Meditation", false, "#8b5cf6"),
    ("Water (glasses)", true, "#3b82f6"),
    ("Sleep (hours)", true, "#06b6d4"),
];

/// Insert the default types if and only if there are no types at all.
/// Returns how many were inserted (0 when it was a no-op).
pub fn seed_default_event_types(store: &Store) -> AppResult<usize> {
    if store.count_event_types()? > 0 {
        return Ok(0);
    }

    let inserted = store.transaction(&[Collection::EventTypes], |conn| {
        // Re-check inside the transaction so two seeds can never double up.
        if count_event_types(conn)? > 0 {
            return Ok(0);
        }
        for (name, is_numeric, color) in DEFAULT_EVENT_TYPES {
            insert_event_type(conn, &NewEventType::new(name, is_numeric, color))?;
        }
        Ok(DEFAULT_EVENT_TYPES.len())
    })?;

    if inserted > 0 {
        ttlog_soft(
            store.conn(),
            "seed",
            "event_types",
            &format!("Created {} default event types", inserted),
        );
    }

    Ok(inserted)
}
