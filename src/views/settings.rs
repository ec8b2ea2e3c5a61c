use crate::core::transfer::{ImportSummary, import_data};
use crate::core::types::TypeLogic;
use crate::errors::AppResult;
use crate::export::{ExportFormat, ExportLogic};
use crate::models::EventType;
use crate::models::color::palette_name;
use crate::store::{Collection, LiveQuery, Store};
use crate::utils::colors::swatch;
use crate::utils::path::expand_tilde;
use crate::utils::table::Table;
use std::cell::Ref;
use std::fs;
use std::path::PathBuf;

/// Type management plus backup/restore.
pub struct SettingsView {
    types: LiveQuery<Vec<EventType>>,
}

impl SettingsView {
    pub fn new(store: &Store) -> AppResult<Self> {
        let types = LiveQuery::new(store, &[Collection::EventTypes], |s| s.event_types())?;
        Ok(Self { types })
    }

    pub fn types(&self) -> Ref<'_, Vec<EventType>> {
        self.types.get()
    }

    pub fn live(&self) -> &LiveQuery<Vec<EventType>> {
        &self.types
    }

    pub fn add_type(
        &self,
        store: &Store,
        name: &str,
        is_numeric: bool,
        color: Option<&str>,
    ) -> AppResult<EventType> {
        TypeLogic::add(store, name, is_numeric, color)
    }

    pub fn delete_type(&self, store: &Store, id: i64) -> AppResult<EventType> {
        TypeLogic::delete(store, id)
    }

    pub fn export(
        &self,
        store: &Store,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<PathBuf> {
        ExportLogic::export(store, format, file, range, force)
    }

    /// Replace everything with the content of a JSON export file.
    pub fn import_file(&self, store: &Store, file: &str) -> AppResult<ImportSummary> {
        let json = fs::read_to_string(expand_tilde(file))?;
        import_data(store, &json)
    }

    pub fn render(&self) -> String {
        let types = self.types.get();
        if types.is_empty() {
            return "No event types defined.\n".to_string();
        }

        let mut table = Table::with_headers(&["ID", "COLOR", "NAME", "KIND"]);
        for t in types.iter() {
            let color = t.resolved_color();
            let label = palette_name(color).unwrap_or(color);
            table.add_row(vec![
                t.id.to_string(),
                format!("{} {}", swatch(color), label),
                t.name.clone(),
                t.kind_label().to_string(),
            ]);
        }
        table.render()
    }
}
