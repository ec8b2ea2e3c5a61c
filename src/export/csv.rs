// src/export/csv.rs

use crate::errors::AppResult;
use crate::models::{Event, EventType, TypeLookup};
use serde::Serialize;
use std::path::Path;

/// One flat row of the CSV report.
#[derive(Serialize, Clone, Debug)]
pub struct EventRow {
    pub id: i64,
    pub day: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub value: Option<i64>,
    pub created_at: String,
}

impl EventRow {
    pub fn from_event(ev: &Event, types: &[EventType]) -> Self {
        Self {
            id: ev.id,
            day: ev.day_str(),
            type_name: TypeLookup::resolve(types, ev.type_id).name().to_string(),
            value: ev.value,
            created_at: ev.created_at.clone(),
        }
    }
}

pub(crate) const HEADER: [&str; 5] = ["id", "day", "type", "value", "created_at"];

/// Write the rows with a header line (from the field names). An empty
/// report still gets the header.
pub(crate) fn write_csv(path: &Path, rows: &[EventRow]) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    if rows.is_empty() {
        wtr.write_record(HEADER)?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}
