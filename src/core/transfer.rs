//! JSON export/import of the whole store.
//!
//! Export shape (stable, camelCase keys):
//!
//! ```json
//! { "eventTypes": [ { "id": 1, "name": "Exercise", "isNumeric": false, "color": "#22c55e" } ],
//!   "events":     [ { "id": 1, "typeId": 1, "day": "2024-03-01",
//!                     "createdAt": "2024-03-01T07:12:03.410Z", "value": null } ] }
//! ```
//!
//! Import validates the entire document before touching the store, then
//! clears and refills both tables in a single transaction.

use crate::db::log::ttlog_soft;
use crate::db::queries::{
    clear_collections, count_event_types, count_events, insert_event_row,
    insert_event_type_row, load_event_types, load_events,
};
use crate::errors::{AppError, AppResult};
use crate::models::color::is_valid_hex;
use crate::models::event::parse_day;
use crate::models::{Event, EventType};
use crate::store::{Collection, Store};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub event_types: Vec<EventType>,
    pub events: Vec<Event>,
}

/// Read both collections in one transaction.
pub fn snapshot(store: &Store) -> AppResult<ExportDocument> {
    store.read(|conn| {
        Ok(ExportDocument {
            event_types: load_event_types(conn)?,
            events: load_events(conn)?,
        })
    })
}

/// Pretty-printed JSON document of everything in the store.
pub fn export_data(store: &Store) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(&snapshot(store)?)?)
}

// ---------------------------
// Import
// ---------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportEventType {
    #[serde(default)]
    id: Option<i64>,
    name: String,
    is_numeric: bool,
    #[serde(default)]
    color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportEvent {
    #[serde(default)]
    id: Option<i64>,
    type_id: i64,
    day: String,
    created_at: String,
    #[serde(default)]
    value: Option<i64>,
}

/// A fully validated import, ready to be swapped in.
#[derive(Debug)]
struct ValidatedImport {
    event_types: Vec<ImportEventType>,
    events: Vec<(ImportEvent, NaiveDate)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub event_types: usize,
    pub events: usize,
    pub replaced_event_types: i64,
    pub replaced_events: i64,
}

/// Records of one top-level key. Missing or `null` means "empty".
fn records<'a>(doc: &'a serde_json::Map<String, Value>, key: &str) -> AppResult<&'a [Value]> {
    match doc.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(other) => Err(AppError::Import(format!(
            "'{}' must be an array, found {}",
            key,
            json_kind(other)
        ))),
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn check_unique_id(seen: &mut HashSet<i64>, id: Option<i64>, at: &str) -> AppResult<()> {
    if let Some(id) = id
        && !seen.insert(id)
    {
        return Err(AppError::Import(format!("{at}: duplicate id {id}")));
    }
    Ok(())
}

fn validate(json: &str) -> AppResult<ValidatedImport> {
    let root: Value =
        serde_json::from_str(json).map_err(|e| AppError::Import(format!("invalid JSON: {e}")))?;

    let doc = root.as_object().ok_or_else(|| {
        AppError::Import(format!(
            "top level must be an object, found {}",
            json_kind(&root)
        ))
    })?;

    let mut event_types = Vec::new();
    let mut seen = HashSet::new();
    for (i, raw) in records(doc, "eventTypes")?.iter().enumerate() {
        let at = format!("eventTypes[{i}]");
        let t: ImportEventType = serde_json::from_value(raw.clone())
            .map_err(|e| AppError::Import(format!("{at}: {e}")))?;

        if t.name.trim().is_empty() {
            return Err(AppError::Import(format!("{at}: name is empty")));
        }
        if let Some(c) = &t.color
            && !is_valid_hex(c)
        {
            return Err(AppError::Import(format!("{at}: invalid color '{c}'")));
        }
        check_unique_id(&mut seen, t.id, &at)?;
        event_types.push(t);
    }

    let mut events = Vec::new();
    let mut seen = HashSet::new();
    for (i, raw) in records(doc, "events")?.iter().enumerate() {
        let at = format!("events[{i}]");
        let e: ImportEvent = serde_json::from_value(raw.clone())
            .map_err(|err| AppError::Import(format!("{at}: {err}")))?;

        let day = parse_day(&e.day)
            .ok_or_else(|| AppError::Import(format!("{at}: invalid day '{}'", e.day)))?;
        if DateTime::parse_from_rfc3339(&e.created_at).is_err() {
            return Err(AppError::Import(format!(
                "{at}: invalid createdAt '{}'",
                e.created_at
            )));
        }
        check_unique_id(&mut seen, e.id, &at)?;
        events.push((e, day));
    }

    Ok(ValidatedImport {
        event_types,
        events,
    })
}

fn swap_error(key: &str, record: &str, e: rusqlite::Error) -> AppError {
    if e.sqlite_error_code() == Some(rusqlite::ErrorCode::ConstraintViolation) {
        AppError::Import(format!("{key}: '{record}' rejected: {e}"))
    } else {
        AppError::Db(e)
    }
}

/// Replace the entire contents of both collections with `json`.
///
/// Fails without touching the store when the document is malformed; a
/// failure during the swap rolls back to the previous contents. Missing
/// colours are stored as-is (only schema migration backfills).
pub fn import_data(store: &Store, json: &str) -> AppResult<ImportSummary> {
    let data = validate(json)?;

    let summary = store.transaction(&Collection::ALL, |conn| {
        let replaced_event_types = count_event_types(conn)?;
        let replaced_events = count_events(conn)?;

        clear_collections(conn)?;

        // Explicit ids first, so a fresh id can never take one that a later
        // record asks for.
        let (with_id, without_id): (Vec<_>, Vec<_>) =
            data.event_types.iter().partition(|t| t.id.is_some());
        for t in with_id.into_iter().chain(without_id) {
            insert_event_type_row(conn, t.id, &t.name, t.is_numeric, t.color.as_deref())
                .map_err(|e| swap_error("eventTypes", &t.name, e))?;
        }

        let (with_id, without_id): (Vec<_>, Vec<_>) =
            data.events.iter().partition(|(e, _)| e.id.is_some());
        for (e, day) in with_id.into_iter().chain(without_id) {
            insert_event_row(conn, e.id, e.type_id, day, &e.created_at, e.value)
                .map_err(|err| swap_error("events", &e.day, err))?;
        }

        Ok(ImportSummary {
            event_types: data.event_types.len(),
            events: data.events.len(),
            replaced_event_types,
            replaced_events,
        })
    })?;

    ttlog_soft(
        store.conn(),
        "import",
        "all",
        &format!(
            "Imported {} event types and {} events (replaced {} / {})",
            summary.event_types,
            summary.events,
            summary.replaced_event_types,
            summary.replaced_events
        ),
    );

    Ok(summary)
}
