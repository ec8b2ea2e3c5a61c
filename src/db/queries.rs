//! Plain SQL access to the two collections.
//!
//! Nothing here notifies listeners; `store::Store` wraps these calls and
//! publishes changes after they succeed.

use crate::errors::AppError;
use crate::models::event::{DAY_FORMAT, parse_day};
use crate::models::{Event, EventType, NewEvent, NewEventType};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const EVENT_TYPE_COLUMNS: &str = "id, name, is_numeric, color";
const EVENT_COLUMNS: &str = "id, type_id, day, created_at, value";

pub fn map_event_type(row: &Row) -> Result<EventType> {
    Ok(EventType {
        id: row.get("id")?,
        name: row.get("name")?,
        is_numeric: row.get::<_, i64>("is_numeric")? != 0,
        color: row.get("color")?,
    })
}

pub fn map_event(row: &Row) -> Result<Event> {
    let day_str: String = row.get("day")?;

    let day = parse_day(&day_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(day_str.clone())),
        )
    })?;

    Ok(Event {
        id: row.get("id")?,
        type_id: row.get("type_id")?,
        day,
        created_at: row.get("created_at")?,
        value: row.get("value")?,
    })
}

fn collect<T>(rows: impl Iterator<Item = Result<T>>) -> Result<Vec<T>> {
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn day_key(day: &NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

// ---------------------------
// event_types
// ---------------------------

pub fn insert_event_type(conn: &Connection, ty: &NewEventType) -> Result<i64> {
    insert_event_type_row(conn, None, &ty.name, ty.is_numeric, ty.color.as_deref())
}

/// Insert keeping an explicit id when given (import), otherwise let SQLite
/// assign one.
pub fn insert_event_type_row(
    conn: &Connection,
    id: Option<i64>,
    name: &str,
    is_numeric: bool,
    color: Option<&str>,
) -> Result<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO event_types (id, name, is_numeric, color)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    stmt.execute(params![id, name, if is_numeric { 1 } else { 0 }, color])?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_event_type(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM event_types WHERE id = ?1", [id])
}

pub fn load_event_types(conn: &Connection) -> Result<Vec<EventType>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {EVENT_TYPE_COLUMNS} FROM event_types ORDER BY id ASC"
    ))?;
    let rows = stmt.query_map([], map_event_type)?;
    collect(rows)
}

pub fn load_event_type(conn: &Connection, id: i64) -> Result<Option<EventType>> {
    conn.query_row(
        &format!("SELECT {EVENT_TYPE_COLUMNS} FROM event_types WHERE id = ?1"),
        [id],
        map_event_type,
    )
    .optional()
}

pub fn count_event_types(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM event_types", [], |row| row.get(0))
}

// ---------------------------
// events
// ---------------------------

pub fn insert_event(conn: &Connection, ev: &NewEvent) -> Result<i64> {
    insert_event_row(conn, None, ev.type_id, &ev.day, &ev.created_at, ev.value)
}

pub fn insert_event_row(
    conn: &Connection,
    id: Option<i64>,
    type_id: i64,
    day: &NaiveDate,
    created_at: &str,
    value: Option<i64>,
) -> Result<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO events (id, type_id, day, created_at, value)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    stmt.execute(params![id, type_id, day_key(day), created_at, value])?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_event(conn: &Connection, id: i64) -> Result<usize> {
    conn.execute("DELETE FROM events WHERE id = ?1", [id])
}

pub fn load_event(conn: &Connection, id: i64) -> Result<Option<Event>> {
    conn.query_row(
        &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"),
        [id],
        map_event,
    )
    .optional()
}

pub fn load_events(conn: &Connection) -> Result<Vec<Event>> {
    let mut stmt =
        conn.prepare_cached(&format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY id ASC"))?;
    let rows = stmt.query_map([], map_event)?;
    collect(rows)
}

pub fn load_events_by_day(conn: &Connection, day: &NaiveDate) -> Result<Vec<Event>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {EVENT_COLUMNS} FROM events
         WHERE day = ?1
         ORDER BY id ASC"
    ))?;
    let rows = stmt.query_map([day_key(day)], map_event)?;
    collect(rows)
}

/// Inclusive day range. Fixed-width day strings sort chronologically.
pub fn load_events_in_range(
    conn: &Connection,
    from: &NaiveDate,
    to: &NaiveDate,
) -> Result<Vec<Event>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {EVENT_COLUMNS} FROM events
         WHERE day >= ?1 AND day <= ?2
         ORDER BY day ASC, id ASC"
    ))?;
    let rows = stmt.query_map([day_key(from), day_key(to)], map_event)?;
    collect(rows)
}

/// Most recently created first, optionally for one type only.
pub fn load_recent_events(
    conn: &Connection,
    type_id: Option<i64>,
    limit: Option<usize>,
) -> Result<Vec<Event>> {
    // SQLite treats a negative LIMIT as "no limit".
    let limit = limit.map(|l| l as i64).unwrap_or(-1);

    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {EVENT_COLUMNS} FROM events
         WHERE (?1 IS NULL OR type_id = ?1)
         ORDER BY created_at DESC, id DESC
         LIMIT ?2"
    ))?;
    let rows = stmt.query_map(params![type_id, limit], map_event)?;
    collect(rows)
}

pub fn count_events(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))
}

/// Remove every record of both collections. Callers wrap this in the same
/// transaction as the re-insert.
pub fn clear_collections(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "DELETE FROM events;
         DELETE FROM event_types;",
    )
}
