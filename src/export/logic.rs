// src/export/logic.rs

use crate::core::transfer::export_data;
use crate::db::log::ttlog_soft;
use crate::errors::{AppError, AppResult};
use crate::export::csv::{EventRow, write_csv};
use crate::export::fs_utils::{ensure_parent, ensure_writable};
use crate::export::range::parse_range;
use crate::export::{ExportFormat, notify_export_success};
use crate::store::Store;
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;
use std::fs;
use std::path::PathBuf;

/// Writing exports to disk.
pub struct ExportLogic;

impl ExportLogic {
    /// Export to `file`.
    ///
    /// - `Json`: the full importable document; `range` is rejected because a
    ///   partial backup could not be restored faithfully.
    /// - `Csv`: one row per event, optionally limited to `range`
    ///   (`all`, `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or `A:B` of equal format).
    ///
    /// Returns the path written.
    pub fn export(
        store: &Store,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<PathBuf> {
        let bounds = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        if format == ExportFormat::Json && bounds.is_some() {
            return Err(AppError::Validation(
                "--range is only supported for csv exports".to_string(),
            ));
        }

        let path = expand_tilde(file);
        ensure_writable(&path, force)?;
        ensure_parent(&path)?;

        let written = match format {
            ExportFormat::Json => {
                let json = export_data(store)?;
                fs::write(&path, json)?;
                store.count_events()? as usize
            }
            ExportFormat::Csv => {
                let (types, events) = store.read(|_| {
                    let types = store.event_types()?;
                    let events = match &bounds {
                        Some((from, to)) => store.events_in_range(from, to)?,
                        None => store.events()?,
                    };
                    Ok((types, events))
                })?;

                if events.is_empty() {
                    warning("No events found for the selected range.");
                }

                let rows: Vec<EventRow> = events
                    .iter()
                    .map(|ev| EventRow::from_event(ev, &types))
                    .collect();
                write_csv(&path, &rows)?;
                rows.len()
            }
        };

        ttlog_soft(
            store.conn(),
            "export",
            format.as_str(),
            &format!("{} events to {}", written, path.display()),
        );

        notify_export_success(&format.as_str().to_uppercase(), &path);
        Ok(path)
    }
}
