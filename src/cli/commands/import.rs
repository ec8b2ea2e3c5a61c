use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::store::Store;
use crate::ui::messages::{confirm, info, success};
use crate::views::SettingsView;

pub fn handle(cmd: &Commands, store: &Store) -> AppResult<()> {
    if let Commands::Import { file, yes } = cmd {
        let prompt = format!(
            "Importing '{}' replaces all {} event types and {} events. Continue?",
            file,
            store.count_event_types()?,
            store.count_events()?
        );
        if !*yes && !confirm(&prompt) {
            info("Import cancelled.");
            return Ok(());
        }

        let view = SettingsView::new(store)?;
        let summary = view.import_file(store, file)?;
        success(format!(
            "Imported {} event types and {} events",
            summary.event_types, summary.events
        ));
    }
    Ok(())
}
